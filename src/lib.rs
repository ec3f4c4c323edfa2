//! tagtext - searchable text and metadata from ID3-tagged MP3 content
//!
//! The MP3 parser stages raw bytes in a temporary file, detects an ID3v2 or
//! ID3v1 tag, and turns the tag into a [`DocumentRecord`]: a title, a text
//! body built from the textual tag values, the merged metadata map and (for
//! audio, always empty) outlinks.
//!
//! ```rust,no_run
//! use tagtext::{parse_mp3, MetadataMap};
//!
//! let bytes = std::fs::read("song.mp3")?;
//! let record = parse_mp3(&bytes, &MetadataMap::new())?;
//! println!("{}: {}", record.title(), record.metadata().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Parsers are also available through the extension registry in
//! [`plugins`], which resolves a configured parser by name.

pub mod config;
pub mod container;
pub mod document;
pub mod error;
pub mod extract;
pub mod id3;
pub mod metadata;
pub mod parser;
pub mod plugins;
mod utils;

pub use config::Config;
pub use document::DocumentRecord;
pub use error::{Result, TagTextError};
pub use id3::{detect, TagVariant};
pub use metadata::{MetadataCollector, MetadataMap, Outlink, Property, PropertyKey};
pub use parser::{parse_mp3, Content, Mp3Parser, Parser};
pub use plugins::{default_registry, ExtensionRegistry, ExtensionResolver};
