//! Extension resolution against a registry of parsers.

mod common;

use std::sync::Arc;

use tagtext::config::Config;
use tagtext::parser::PARSER_CAPABILITY;
use tagtext::{default_registry, Content, DocumentRecord, ExtensionRegistry, ExtensionResolver, Parser, Result, TagTextError};

/// A parser that only reports its own name
struct NamedParser(&'static str);

impl Parser for NamedParser {
    fn name(&self) -> &str {
        self.0
    }

    fn supported_mime_types(&self) -> &[&str] {
        &["application/octet-stream"]
    }

    fn parse(&self, _content: &Content) -> Result<DocumentRecord> {
        Err(TagTextError::NoTagPresent)
    }
}

fn registry(names: &[&'static str]) -> ExtensionRegistry<dyn Parser> {
    let mut registry: ExtensionRegistry<dyn Parser> = ExtensionRegistry::new();
    registry.declare(PARSER_CAPABILITY).unwrap();
    for &name in names {
        registry
            .register(PARSER_CAPABILITY, name, move || Arc::new(NamedParser(name)) as Arc<dyn Parser>)
            .unwrap();
    }
    registry
}

#[test]
fn test_preferred_extension_is_returned() {
    let registry = registry(&["bar", "foo"]);
    let resolver = ExtensionResolver::new(&registry, Some("foo"));

    let parser = resolver.resolve(PARSER_CAPABILITY).unwrap();
    assert_eq!(parser.name(), "foo");
}

#[test]
fn test_first_extension_without_preference() {
    let registry = registry(&["bar", "foo"]);
    let resolver = ExtensionResolver::new(&registry, None);

    let parser = resolver.resolve(PARSER_CAPABILITY).unwrap();
    assert_eq!(parser.name(), "bar");
}

#[test]
fn test_unknown_preference_falls_back_to_first() {
    let registry = registry(&["bar", "foo"]);
    let resolver = ExtensionResolver::new(&registry, Some("baz"));

    let parser = resolver.resolve(PARSER_CAPABILITY).unwrap();
    assert_eq!(parser.name(), "bar");
}

#[test]
fn test_empty_registry_resolves_nothing() {
    let registry = registry(&[]);
    let resolver = ExtensionResolver::new(&registry, Some("foo"));

    assert!(resolver.resolve(PARSER_CAPABILITY).is_none());
    assert!(resolver.list_all(PARSER_CAPABILITY).is_empty());

    let undeclared: ExtensionRegistry<dyn Parser> = ExtensionRegistry::new();
    assert!(ExtensionResolver::new(&undeclared, None).resolve(PARSER_CAPABILITY).is_none());
}

#[test]
fn test_list_all_keeps_registration_order() {
    let registry = registry(&["bar", "foo", "qux"]);
    let resolver = ExtensionResolver::new(&registry, None);

    let names: Vec<_> = resolver
        .list_all(PARSER_CAPABILITY)
        .iter()
        .map(|p| p.name().to_string())
        .collect();
    assert_eq!(names, vec!["bar", "foo", "qux"]);
}

#[test]
fn test_default_registry_parses_mp3() {
    let config = Config::from_json_str(r#"{"extensions": {"preferred_parser": "parse-mp3"}}"#).unwrap();
    let registry = default_registry(&config).unwrap();
    let resolver = ExtensionResolver::new(&registry, config.extensions.preferred_parser());

    let parser = resolver.resolve(PARSER_CAPABILITY).unwrap();
    assert_eq!(parser.name(), "parse-mp3");

    let data = common::v23_tag(&[common::text_frame("TALB", "Album")], 8);
    let record = parser.parse(&Content::new("file:///album.mp3", data)).unwrap();
    assert_eq!(record.metadata()["TALB-Text"], "Album");
    assert_eq!(record.title(), "");
}

#[test]
fn test_default_registry_honours_staging_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::from_json_str(&format!(
        r#"{{"staging": {{"temp_dir": {}}}}}"#,
        serde_json::to_string(dir.path()).unwrap()
    ))
    .unwrap();

    let registry = default_registry(&config).unwrap();
    let parser = ExtensionResolver::new(&registry, None).resolve(PARSER_CAPABILITY).unwrap();

    let data = common::v23_tag(&[common::text_frame("TIT2", "Song")], 0);
    parser.parse(&Content::new("file:///song.mp3", data)).unwrap();
    assert_eq!(common::entry_count(dir.path()), 0);
}
