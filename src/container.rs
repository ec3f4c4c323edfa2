// Temporary file staging for raw content
//
// Tag decoding works on a seekable local file. A `Container` writes the raw
// bytes to a named temporary file and removes it when dropped, so every exit
// path of a parse (success, missing tag, decode failure, panic unwinding)
// releases the file.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, TagTextError};

const TEMP_PREFIX: &str = "tagtext";
const TEMP_SUFFIX: &str = ".mp3";

/// A staged, locally addressable copy of one input blob
#[derive(Debug)]
pub struct Container {
    file: NamedTempFile,
}

impl Container {
    /// Write `bytes` to a new temporary file.
    ///
    /// The file is created in `dir` when given, otherwise in the system
    /// temporary directory.
    pub fn materialize(bytes: &[u8], dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);

        let file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(|e| TagTextError::resource("could not create staging file", e))?;

        let mut container = Container { file };
        container
            .file
            .write_all(bytes)
            .and_then(|_| container.file.flush())
            .map_err(|e| TagTextError::resource("could not write staging file", e))?;

        tracing::debug!("Staged {} bytes at {}", bytes.len(), container.path().display());
        Ok(container)
    }

    /// Path of the staged file
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Open an independent buffered reader over the staged bytes
    pub fn open(&self) -> Result<BufReader<File>> {
        let file = self.file.reopen().map_err(|e| {
            TagTextError::tag_decode_with_source(
                format!("could not open {}", self.path().display()),
                e,
            )
        })?;
        Ok(BufReader::new(file))
    }

    /// Delete the staged file now, reporting a failure instead of ignoring it
    pub fn release(self) {
        let path = self.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::warn!("Failed to remove staging file {}: {}", path.display(), e);
        }
    }
}
