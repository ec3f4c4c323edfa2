//! Property keys, the metadata map and the collector that accumulates them.
//!
//! Tag properties are keyed `"<frame>-<object>"` (for example `TIT2-Text` or
//! `COMM-Language`). Downstream consumers index on these exact strings, so
//! keys are only ever built through [`PropertyKey::new`].

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id3::frames::{frame_ids, object_ids};

/// Ordered key/value metadata. Inserting an existing key overwrites its value
/// in place.
pub type MetadataMap = IndexMap<String, String>;

/// Key of an extracted property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyKey(String);

impl PropertyKey {
    pub fn new(frame: &str, object: &str) -> Self {
        PropertyKey(format!("{}-{}", frame, object))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Object part of the key (everything after the first `-`)
    pub fn object(&self) -> &str {
        self.0.split_once('-').map(|(_, object)| object).unwrap_or("")
    }

    /// Whether values under this key are human-readable text
    pub fn is_textual(&self) -> bool {
        self.object().contains(object_ids::TEXT)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PropertyKey> for String {
    fn from(key: PropertyKey) -> Self {
        key.0
    }
}

/// One extracted `(key, value)` pair
pub type Property = (PropertyKey, String);

/// A hyperlink found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlink {
    pub url: String,
    pub anchor: String,
}

/// Accumulates metadata for a single parse.
///
/// Seed it with metadata that arrived with the content, then hand it the
/// extracted properties with [`ingest`](Self::ingest). Ingestion consumes the
/// collector and returns the finalized [`CollectedMetadata`].
#[derive(Debug, Default)]
pub struct MetadataCollector {
    metadata: MetadataMap,
}

impl MetadataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy pre-existing metadata into the collector
    pub fn seed(mut self, existing: &MetadataMap) -> Self {
        for (key, value) in existing {
            self.metadata.insert(key.clone(), value.clone());
        }
        self
    }

    /// Apply properties in order; later values for a key replace earlier ones
    pub fn ingest<I>(mut self, properties: I) -> CollectedMetadata
    where
        I: IntoIterator<Item = Property>,
    {
        let mut text = Vec::new();
        for (key, value) in properties {
            if key.is_textual() && !value.is_empty() {
                text.push(value.clone());
            }
            self.metadata.insert(key.into(), value);
        }

        CollectedMetadata {
            metadata: self.metadata,
            text,
        }
    }
}

/// Metadata after ingestion, with the derived document views
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedMetadata {
    metadata: MetadataMap,
    text: Vec<String>,
}

impl CollectedMetadata {
    pub fn title(&self) -> String {
        [frame_ids::TITLE, frame_ids::TITLE_V22]
            .iter()
            .map(|frame| PropertyKey::new(frame, object_ids::TEXT))
            .find_map(|key| self.metadata.get(key.as_str()))
            .cloned()
            .unwrap_or_default()
    }

    /// Textual property values in ingestion order, one per line
    pub fn text(&self) -> String {
        self.text.join("\n")
    }

    /// Audio tags carry no hyperlinks
    pub fn outlinks(&self) -> Vec<Outlink> {
        Vec::new()
    }

    pub fn data(&self) -> &MetadataMap {
        &self.metadata
    }

    pub fn into_data(self) -> MetadataMap {
        self.metadata
    }
}
