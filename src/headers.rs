// ./src/headers.rs

use headers::{Error, Header, HeaderName, HeaderValue};
use std::iter;

/// Macro to define a custom string-valued request header.
macro_rules! define_string_header {
    ($struct_name:ident, $header_name:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $struct_name(pub String);

        impl $struct_name {
            pub const NAME: &'static str = $header_name;
        }

        impl Header for $struct_name {
            fn name() -> &'static HeaderName {
                static NAME: HeaderName = HeaderName::from_static($header_name);
                &NAME
            }

            fn decode<'i, I>(values: &mut I) -> Result<Self, Error>
            where
                I: Iterator<Item = &'i HeaderValue>,
            {
                let value = values.next().ok_or_else(Error::invalid)?;
                let s = value.to_str().map_err(|_| Error::invalid())?;
                Ok($struct_name(s.to_string()))
            }

            fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
                if let Ok(value) = HeaderValue::from_str(&self.0) {
                    values.extend(iter::once(value));
                }
            }
        }
    };
}

// Sent by public/client.js on every fetch it makes.
define_string_header!(ApodClient, "apod-client");
// `default` or `bypass`: cache behaviour for this request's outbound fetch.
define_string_header!(ApodCache, "apod-cache");
