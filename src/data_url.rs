// ./src/data_url.rs

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use std::fmt;

/// MIME type declared on every inlined image.
pub const INLINE_MIME: &str = "image/png";

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, thiserror::Error)]
pub enum DataUrlError {
    #[error("missing `data:` scheme")]
    MissingScheme,
    #[error("missing `;base64,` marker")]
    NotBase64,
    #[error("payload is not valid base64: {0}")]
    Payload(#[from] base64::DecodeError),
}

/// A base64 `data:` URL. Values of this type are always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataUrl(String);

impl DataUrl {
    /// Encodes `bytes` as `data:image/png;base64,<payload>`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        DataUrl(format!(
            "{SCHEME}{INLINE_MIME}{BASE64_MARKER}{}",
            BASE64.encode(bytes)
        ))
    }

    /// Validates an existing string: scheme, base64 marker, decodable payload.
    pub fn parse(value: &str) -> Result<Self, DataUrlError> {
        let rest = value
            .strip_prefix(SCHEME)
            .ok_or(DataUrlError::MissingScheme)?;
        let (_, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or(DataUrlError::NotBase64)?;
        BASE64.decode(payload)?;
        Ok(DataUrl(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The declared media type, e.g. `image/png`.
    pub fn mime_type(&self) -> &str {
        self.split().0
    }

    /// The base64 text after the comma.
    pub fn payload(&self) -> &str {
        self.split().1
    }

    /// Decodes the payload back into the original bytes.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(self.payload())
    }

    fn split(&self) -> (&str, &str) {
        // Both markers are guaranteed by construction.
        let rest = &self.0[SCHEME.len()..];
        rest.split_once(BASE64_MARKER).unwrap_or((rest, ""))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DataUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
