// ./src/record.rs

use crate::{data_url::DataUrl, error::FetchFailure};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// One Astronomy Picture of the Day entry.
///
/// `title`, `explanation` and `url` are required at the fetch boundary; a feed
/// element missing any of them fails to deserialize. `image` is never read
/// from the feed and can only be attached once, through [`Record::with_image`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    title: String,
    explanation: String,
    url: String,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    image: Option<DataUrl>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_type: Option<MediaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    copyright: Option<String>,
}

impl Record {
    pub fn new(
        title: impl Into<String>,
        explanation: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            explanation: explanation.into(),
            url: url.into(),
            image: None,
            date: None,
            media_type: None,
            thumbnail_url: None,
            copyright: None,
        }
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn with_thumbnail_url(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }

    /// Attaches the inlined image. Fails if one is already attached.
    pub fn with_image(mut self, image: DataUrl) -> Result<Self, FetchFailure> {
        if self.image.is_some() {
            return Err(FetchFailure::AlreadyInlined);
        }
        self.image = Some(image);
        Ok(self)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn image(&self) -> Option<&DataUrl> {
        self.image.as_ref()
    }

    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.media_type
    }

    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    pub fn is_video(&self) -> bool {
        self.media_type == Some(MediaType::Video)
    }

    /// What an `<img>` should point at: the inlined image, then a video
    /// thumbnail, then the remote URL.
    pub fn display_src(&self) -> &str {
        if let Some(image) = &self.image {
            return image.as_str();
        }
        if self.is_video() {
            if let Some(thumb) = &self.thumbnail_url {
                return thumb;
            }
        }
        &self.url
    }
}
