// CLI command implementations
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tagtext::config::Config;
use tagtext::container::Container;
use tagtext::parser::PARSER_CAPABILITY;
use tagtext::{default_registry, detect, Content, ExtensionResolver, MetadataMap, Parser, TagVariant};

use crate::cli::output::{OutputFormatter, ProgressBar};

/// Load configuration from `path` (or defaults), then apply the environment
/// and the `--parser` flag
pub fn load_config(path: Option<&Path>, parser: Option<&str>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let mut config = config.with_env_overrides();
    if let Some(name) = parser {
        config.extensions.preferred_parser = Some(name.to_string());
    }
    Ok(config)
}

fn resolve_parser(config: &Config) -> Result<Arc<dyn Parser>> {
    let registry = default_registry(config)?;
    let resolver = ExtensionResolver::new(&registry, config.extensions.preferred_parser());
    resolver
        .resolve(PARSER_CAPABILITY)
        .context("no parser extension is registered")
}

/// Parse files and write one record per file. Returns the number of failures.
pub fn command_parse(
    files: &[String],
    meta: &[(String, String)],
    output: Option<&Path>,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<usize> {
    let parser = resolve_parser(config)?;
    let metadata: MetadataMap = meta.iter().cloned().collect();

    let mut writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    let mut failures = 0;
    for file_path in files {
        if let Err(e) = parse_one(parser.as_ref(), file_path, &metadata, formatter, &mut writer) {
            formatter.print_error(&format!("{}: {:#}", file_path, e));
            failures += 1;
        }
    }
    writer.flush()?;

    if let Some(path) = output {
        formatter.print_success(&format!(
            "Wrote {} record(s) to {}",
            files.len() - failures,
            path.display()
        ));
    }
    Ok(failures)
}

fn parse_one(
    parser: &dyn Parser,
    file_path: &str,
    metadata: &MetadataMap,
    formatter: &OutputFormatter,
    writer: &mut impl Write,
) -> Result<()> {
    let bytes = std::fs::read(file_path).with_context(|| format!("cannot read {}", file_path))?;
    let content = Content::new(file_path, bytes)
        .with_mime_type("audio/mpeg")
        .with_metadata(metadata.clone());
    let record = parser.parse(&content)?;
    formatter.output_record(file_path, &record, writer)
}

/// Parse every file in `directory` matching `pattern`
pub fn command_batch(directory: &str, pattern: &str, config: &Config, formatter: &OutputFormatter, quiet: bool) -> Result<usize> {
    let full_pattern = Path::new(directory).join(pattern);
    let full_pattern = full_pattern.to_string_lossy();
    let files: Vec<PathBuf> = glob::glob(&full_pattern)
        .with_context(|| format!("invalid pattern {}", full_pattern))?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    if files.is_empty() {
        formatter.print_info(&format!("No files match {}", full_pattern));
        return Ok(0);
    }

    let parser = resolve_parser(config)?;
    let mut progress = ProgressBar::new(files.len(), !quiet);
    let mut stdout = std::io::stdout();
    let mut failures = 0;

    for path in &files {
        let file_path = path.to_string_lossy();
        if let Err(e) = parse_one(parser.as_ref(), &file_path, &MetadataMap::new(), formatter, &mut stdout) {
            formatter.print_error(&format!("{}: {:#}", file_path, e));
            failures += 1;
        }
        progress.increment();
    }

    formatter.print_success(&format!("Parsed {} of {} file(s)", files.len() - failures, files.len()));
    Ok(failures)
}

/// Report the tag variant of each file
pub fn command_detect(files: &[String], config: &Config, formatter: &OutputFormatter) -> Result<usize> {
    let mut failures = 0;
    for file_path in files {
        match detect_one(file_path, config) {
            Ok(description) => println!("{}: {}", file_path, description),
            Err(e) => {
                formatter.print_error(&format!("{}: {:#}", file_path, e));
                failures += 1;
            }
        }
    }
    Ok(failures)
}

fn detect_one(file_path: &str, config: &Config) -> Result<String> {
    let bytes = std::fs::read(file_path).with_context(|| format!("cannot read {}", file_path))?;
    let container = Container::materialize(&bytes, config.staging.temp_dir.as_deref())?;
    let tag = detect(&container);
    container.release();

    Ok(match tag? {
        TagVariant::V2(tag) => format!(
            "ID3v2.{}.{} ({} frames)",
            tag.header.version.0,
            tag.header.version.1,
            tag.frames.len()
        ),
        TagVariant::V1(_) => "ID3v1".to_string(),
        TagVariant::None => "no ID3 tag".to_string(),
    })
}

/// List registered extensions, marking the one the resolver picks
pub fn command_extensions(config: &Config) -> Result<usize> {
    let registry = default_registry(config)?;
    let resolver = ExtensionResolver::new(&registry, config.extensions.preferred_parser());

    for capability in registry.capabilities() {
        println!("{}:", capability);
        let selected = resolver.resolve(&capability).map(|parser| parser.name().to_string());
        if let Some(point) = registry.point(&capability) {
            for extension in point.extensions() {
                let marker = if selected.as_deref() == Some(extension.id()) { "*" } else { " " };
                println!("  {} {}", marker, extension.id());
            }
        }
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"extensions": {"preferred_parser": "other"}}"#).unwrap();

        let config = load_config(Some(&path), Some("parse-mp3")).unwrap();
        assert_eq!(config.extensions.preferred_parser(), Some("parse-mp3"));
    }

    #[test]
    fn test_resolves_builtin_parser() {
        let parser = resolve_parser(&Config::default()).unwrap();
        assert_eq!(parser.name(), "parse-mp3");
    }

    #[test]
    fn test_detect_reports_missing_tag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.mp3");
        std::fs::write(&path, vec![0xFFu8; 200]).unwrap();
        let description = detect_one(&path.to_string_lossy(), &Config::default()).unwrap();
        assert_eq!(description, "no ID3 tag");
    }
}
