//! Error types for tagtext.
//!
//! Parse failures are per-document: callers are expected to report them and
//! move on to the next input. Three kinds abort a parse:
//!
//! - `Resource` - the input bytes could not be staged as a local file
//! - `TagDecode` - the staged file could not be read or its tag is malformed
//! - `NoTagPresent` - neither an ID3v2 nor an ID3v1 tag was found
//!
//! `Plugin` and `Config` come from the extension registry and the
//! configuration loader and never occur while parsing.
use thiserror::Error;

/// Result type alias using `TagTextError`.
pub type Result<T> = std::result::Result<T, TagTextError>;

/// Main error type for all tagtext operations.
#[derive(Debug, Error)]
pub enum TagTextError {
    #[error("Couldn't create temporary file: {message}")]
    Resource {
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ID3 tags could not be parsed: {message}")]
    TagDecode {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No textual content available")]
    NoTagPresent,

    #[error("Plugin error in '{plugin_name}': {message}")]
    Plugin { message: String, plugin_name: String },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl TagTextError {
    /// Create a resource error from the I/O failure that caused it
    pub fn resource<S: Into<String>>(message: S, source: std::io::Error) -> Self {
        Self::Resource {
            message: message.into(),
            source,
        }
    }

    /// Create a tag decode error
    pub fn tag_decode<S: Into<String>>(message: S) -> Self {
        Self::TagDecode {
            message: message.into(),
            source: None,
        }
    }

    /// Create a tag decode error with source
    pub fn tag_decode_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::TagDecode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a plugin error
    pub fn plugin<S: Into<String>, N: Into<String>>(plugin_name: N, message: S) -> Self {
        Self::Plugin {
            message: message.into(),
            plugin_name: plugin_name.into(),
        }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
