// Parse result assembly

use serde::{Deserialize, Serialize};

use crate::metadata::{CollectedMetadata, MetadataMap, Outlink};

/// The normalized result of parsing one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    title: String,
    text: String,
    metadata: MetadataMap,
    outlinks: Vec<Outlink>,
}

impl DocumentRecord {
    /// Assemble a record from collected metadata
    pub fn build(collected: CollectedMetadata) -> Self {
        DocumentRecord {
            title: collected.title(),
            text: collected.text(),
            outlinks: collected.outlinks(),
            metadata: collected.into_data(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    pub fn outlinks(&self) -> &[Outlink] {
        &self.outlinks
    }
}
