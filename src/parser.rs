//! The MP3 parser and the `Parser` capability it implements.
//!
//! Parsing stages the content in a temporary file, detects the ID3 tag,
//! flattens it into properties and merges those over the metadata that came
//! with the content:
//!
//! ```text
//! bytes ─▶ Container ─▶ detect ─┬─ ID3v2 ─┐
//!                               ├─ ID3v1 ─┴─▶ extract ─▶ collect ─▶ DocumentRecord
//!                               └─ none ───▶ NoTagPresent
//! ```
//!
//! The staged file is removed once detection finishes, whatever the outcome.

use crate::config::StagingConfig;
use crate::container::Container;
use crate::document::DocumentRecord;
use crate::error::{Result, TagTextError};
use crate::extract::extract;
use crate::id3::{self, TagVariant};
use crate::metadata::{MetadataCollector, MetadataMap};

/// Capability identifier for content parsers
pub const PARSER_CAPABILITY: &str = "parser";

/// Extension name of [`Mp3Parser`]
pub const MP3_PARSER_NAME: &str = "parse-mp3";

/// Raw content handed to a parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    pub url: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub metadata: MetadataMap,
}

impl Content {
    pub fn new<S: Into<String>>(url: S, bytes: Vec<u8>) -> Self {
        Content {
            url: url.into(),
            bytes,
            ..Default::default()
        }
    }

    pub fn with_mime_type<S: Into<String>>(mut self, mime_type: S) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn with_metadata(mut self, metadata: MetadataMap) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A content parser producing document records
pub trait Parser: Send + Sync {
    /// Extension name
    fn name(&self) -> &str;

    fn supported_mime_types(&self) -> &[&str];

    /// Parse one piece of content. Failures concern this content only.
    fn parse(&self, content: &Content) -> Result<DocumentRecord>;
}

/// Parser for ID3-tagged MP3 data
#[derive(Debug, Clone, Default)]
pub struct Mp3Parser {
    staging: StagingConfig,
}

impl Mp3Parser {
    pub fn new(staging: StagingConfig) -> Self {
        Mp3Parser { staging }
    }

    /// Parse raw bytes, seeding the result with `existing` metadata
    pub fn parse_bytes(&self, bytes: &[u8], existing: &MetadataMap) -> Result<DocumentRecord> {
        let tag = {
            let container = Container::materialize(bytes, self.staging.temp_dir.as_deref())?;
            let detected = id3::detect(&container);
            container.release();
            detected?
        };

        if matches!(tag, TagVariant::None) {
            return Err(TagTextError::NoTagPresent);
        }

        let properties = extract(&tag);
        tracing::debug!("Extracted {} properties from {} tag", properties.len(), tag.kind());

        let collected = MetadataCollector::new().seed(existing).ingest(properties);
        Ok(DocumentRecord::build(collected))
    }
}

impl Parser for Mp3Parser {
    fn name(&self) -> &str {
        MP3_PARSER_NAME
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["audio/mpeg", "audio/mp3", "audio/x-mpeg"]
    }

    fn parse(&self, content: &Content) -> Result<DocumentRecord> {
        let _span = tracing::debug_span!("parse", parser = MP3_PARSER_NAME, url = %content.url).entered();
        self.parse_bytes(&content.bytes, &content.metadata)
    }
}

/// Parse MP3 bytes with the default staging configuration
pub fn parse_mp3(bytes: &[u8], existing: &MetadataMap) -> Result<DocumentRecord> {
    Mp3Parser::default().parse_bytes(bytes, existing)
}
