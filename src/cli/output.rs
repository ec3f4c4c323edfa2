// Output formatting for CLI

use std::io::{self, Write};

use anyhow::Result;
use tagtext::DocumentRecord;

use crate::cli::config::OutputFormat;

/// Format and output data
pub struct OutputFormatter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    /// Output one parsed record
    pub fn output_record(&self, file: &str, record: &DocumentRecord, writer: &mut impl Write) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(writer, "{}", serde_json::to_string_pretty(&self.record_json(file, record)?)?)?;
            }
            OutputFormat::Json => {
                writeln!(writer, "{}", serde_json::to_string(&self.record_json(file, record)?)?)?;
            }
            OutputFormat::KeyValue => {
                self.output_key_value(file, record, writer)?;
            }
        }
        Ok(())
    }

    fn record_json(&self, file: &str, record: &DocumentRecord) -> Result<serde_json::Value> {
        let mut value = serde_json::to_value(record)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("file".to_string(), serde_json::Value::String(file.to_string()));
        }
        Ok(value)
    }

    /// Output as key-value pairs, metadata in record order
    fn output_key_value(&self, file: &str, record: &DocumentRecord, writer: &mut impl Write) -> Result<()> {
        writeln!(writer, "file: {}", file)?;
        writeln!(writer, "title: {}", record.title())?;
        for (key, value) in record.metadata() {
            writeln!(writer, "{}: {}", key, self.format_value(value))?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// Keep multi-line values on one line
    fn format_value(&self, value: &str) -> String {
        if value.is_empty() {
            "(empty)".to_string()
        } else {
            value.replace('\n', "\\n")
        }
    }

    /// Print success message
    pub fn print_success(&self, message: &str) {
        if !self.quiet {
            println!("✓ {}", message);
        }
    }

    /// Print error message
    pub fn print_error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if !self.quiet {
            println!("  {}", message);
        }
    }
}

/// Progress indicator for batch operations, drawn on stderr
pub struct ProgressBar {
    total: usize,
    current: usize,
    show: bool,
}

impl ProgressBar {
    pub fn new(total: usize, show: bool) -> Self {
        Self {
            total,
            current: 0,
            show,
        }
    }

    pub fn increment(&mut self) {
        self.current += 1;
        if self.show && self.total > 0 {
            let percent = (self.current * 100) / self.total;
            let mut stderr = io::stderr();
            let _ = write!(stderr, "\r[{}/{}] ({}%)", self.current, self.total, percent);
            if self.current == self.total {
                let _ = writeln!(stderr);
            }
            let _ = stderr.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagtext::{MetadataCollector, PropertyKey};

    fn record() -> DocumentRecord {
        DocumentRecord::build(MetadataCollector::new().ingest(vec![
            (PropertyKey::new("TIT2", "Text"), "Song".to_string()),
            (PropertyKey::new("COMM", "Text"), "".to_string()),
        ]))
    }

    #[test]
    fn test_key_value_output() {
        let formatter = OutputFormatter::new(OutputFormat::KeyValue, true);
        let mut out = Vec::new();
        formatter.output_record("a.mp3", &record(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "file: a.mp3\ntitle: Song\nTIT2-Text: Song\nCOMM-Text: (empty)\n\n");
    }

    #[test]
    fn test_json_output_includes_file() {
        let formatter = OutputFormatter::new(OutputFormat::Json, true);
        let mut out = Vec::new();
        formatter.output_record("a.mp3", &record(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["file"], "a.mp3");
        assert_eq!(value["title"], "Song");
        assert_eq!(value["metadata"]["TIT2-Text"], "Song");
        assert_eq!(value["outlinks"], serde_json::json!([]));
    }
}
