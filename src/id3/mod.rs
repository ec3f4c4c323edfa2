// ID3 metadata handling module
pub mod frames;
pub mod genres;
pub mod v1;
pub mod v2;

pub use frames::{Frame, Mp3Object, ObjectValue};
pub use v1::Id3v1Tag;
pub use v2::{Id3v2Header, Id3v2Tag};

use std::io::{Seek, SeekFrom};

use crate::container::Container;
use crate::error::{Result, TagTextError};

/// The tag found in a container. At most one variant applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagVariant {
    /// Frame-based ID3v2 tag at the start of the file
    V2(Id3v2Tag),
    /// Legacy fixed-field ID3v1 tag at the end of the file
    V1(Id3v1Tag),
    None,
}

impl TagVariant {
    pub fn kind(&self) -> &'static str {
        match self {
            TagVariant::V2(_) => "ID3v2",
            TagVariant::V1(_) => "ID3v1",
            TagVariant::None => "none",
        }
    }
}

/// Classify and decode the tag carried by a container.
///
/// ID3v2 is checked first; the ID3v1 trailer is only read when there is no
/// ID3v2 header, so a file carrying both is treated as ID3v2.
pub fn detect(container: &Container) -> Result<TagVariant> {
    let mut reader = container.open()?;

    if let Some(tag) = Id3v2Tag::read(&mut reader)? {
        tracing::debug!("Detected ID3v2.{} tag with {} frames", tag.header.major(), tag.frames.len());
        return Ok(TagVariant::V2(tag));
    }

    reader
        .seek(SeekFrom::Start(0))
        .map_err(|e| TagTextError::tag_decode_with_source("failed to rewind staged file", e))?;

    match Id3v1Tag::read(&mut reader)
        .map_err(|e| TagTextError::tag_decode_with_source("failed to read ID3v1 tag", e))?
    {
        Some(tag) => {
            tracing::debug!("Detected ID3v1 tag");
            Ok(TagVariant::V1(tag))
        }
        None => {
            tracing::debug!("No ID3 tag found");
            Ok(TagVariant::None)
        }
    }
}
