// ./src/view.rs

use crate::{
    error::FetchFailure,
    fetcher::CacheMode,
    pipeline::{LoadOptions, Pipeline},
    record::Record,
};
use html_escape::{encode_double_quoted_attribute, encode_text};

// ════════════════════════════════════════════════════════════
// 1. States & Events
// ════════════════════════════════════════════════════════════

/// The client-rendered view.
///
/// `Ready` always carries its record, so a "ready but empty" view can't exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Needs a fetch. This is where every view starts.
    #[default]
    Invalid,
    Loading,
    Ready(Record),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Mount,
    Reload,
    FetchStarted,
    FetchCompleted(Record),
    FetchFailed,
}

impl ViewState {
    pub fn initial() -> Self {
        ViewState::Invalid
    }

    pub fn needs_fetch(&self) -> bool {
        matches!(self, ViewState::Invalid)
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            ViewState::Ready(record) => Some(record),
            _ => None,
        }
    }

    pub fn transition(self, event: ViewEvent) -> ViewState {
        match (self, event) {
            (_, ViewEvent::Mount | ViewEvent::Reload) => ViewState::Invalid,
            (ViewState::Invalid, ViewEvent::FetchStarted) => ViewState::Loading,
            (state, ViewEvent::FetchStarted) => state,
            // Last completion wins, even if a reload happened while it was in flight.
            (_, ViewEvent::FetchCompleted(record)) => ViewState::Ready(record),
            (_, ViewEvent::FetchFailed) => ViewState::Invalid,
        }
    }
}

// ════════════════════════════════════════════════════════════
// 2. Driver
// ════════════════════════════════════════════════════════════

/// Owns a [`ViewState`] and runs fetch cycles against a [`Pipeline`].
#[derive(Debug, Default)]
pub struct ClientView {
    state: ViewState,
}

impl ClientView {
    pub fn new() -> Self {
        Self {
            state: ViewState::initial(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        let current = std::mem::take(&mut self.state);
        self.state = current.transition(event);
    }

    pub fn reload(&mut self) {
        self.dispatch(ViewEvent::Reload);
    }

    /// Fetches if the view is invalid; otherwise does nothing.
    ///
    /// The record is not inlined. On failure the view returns to `Invalid`
    /// and the error goes to the caller; there is no automatic retry.
    pub async fn cycle(
        &mut self,
        pipeline: &Pipeline,
        cache: CacheMode,
    ) -> Result<(), FetchFailure> {
        if !self.state.needs_fetch() {
            return Ok(());
        }

        self.dispatch(ViewEvent::FetchStarted);
        match pipeline.load(LoadOptions::client_rendered(cache)).await {
            Ok(record) => {
                self.dispatch(ViewEvent::FetchCompleted(record));
                Ok(())
            }
            Err(failure) => {
                self.dispatch(ViewEvent::FetchFailed);
                Err(failure)
            }
        }
    }

    pub fn render(&self) -> String {
        render(&self.state)
    }
}

// ════════════════════════════════════════════════════════════
// 3. Rendering
// ════════════════════════════════════════════════════════════

pub const LOADING: &str = "<div>Loading...</div>";

/// The content fragment for a state: a placeholder until a record is ready.
pub fn render(state: &ViewState) -> String {
    match state {
        ViewState::Invalid | ViewState::Loading => LOADING.to_string(),
        ViewState::Ready(record) => render_record(record),
    }
}

pub fn render_record(record: &Record) -> String {
    let title = encode_text(record.title());
    let alt = encode_double_quoted_attribute(record.title());

    let player_only =
        record.is_video() && record.image().is_none() && record.thumbnail_url().is_none();

    let media = if player_only {
        format!(
            r#"<iframe src="{src}" title="{alt}" width="1000" height="500" allowfullscreen></iframe>"#,
            src = encode_double_quoted_attribute(record.url()),
        )
    } else {
        format!(
            r#"<img src="{src}" alt="{alt}" width="1000" height="500" style="width: auto; height: 500px" />"#,
            src = encode_double_quoted_attribute(record.display_src()),
        )
    };

    let mut meta = String::new();
    if let Some(date) = record.date() {
        meta.push_str(&format!(r#"<div class="date">{}</div>"#, encode_text(date)));
    }
    if let Some(copyright) = record.copyright() {
        meta.push_str(&format!(
            r#"<div class="copyright">&copy; {}</div>"#,
            encode_text(copyright.trim())
        ));
    }

    format!(
        r#"<div>
  <div class="title">{title}</div>
  {media}
  <div class="description">{explanation}</div>
  {meta}
</div>"#,
        explanation = encode_text(record.explanation()),
    )
}
