//! Extension registry and resolver.
//!
//! Extensions are registered explicitly at startup, not discovered at
//! runtime. [`default_registry`] registers the built-in parsers; embedders
//! can register more before building a resolver.
//!
//! ```rust
//! use tagtext::config::Config;
//! use tagtext::plugins::{default_registry, ExtensionResolver};
//! use tagtext::parser::{Parser, PARSER_CAPABILITY};
//!
//! let config = Config::default();
//! let registry = default_registry(&config)?;
//! let resolver = ExtensionResolver::new(&registry, config.extensions.preferred_parser());
//! let parser = resolver.resolve(PARSER_CAPABILITY).expect("built-in parser");
//! assert_eq!(parser.name(), "parse-mp3");
//! # Ok::<(), tagtext::TagTextError>(())
//! ```

pub mod registry;
pub mod resolver;

pub use registry::{Constructor, Extension, ExtensionPoint, ExtensionRegistry};
pub use resolver::ExtensionResolver;

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::parser::{Mp3Parser, Parser, MP3_PARSER_NAME, PARSER_CAPABILITY};

/// Registry with the built-in parser extensions
pub fn default_registry(config: &Config) -> Result<ExtensionRegistry<dyn Parser>> {
    let mut registry: ExtensionRegistry<dyn Parser> = ExtensionRegistry::new();

    let staging = config.staging.clone();
    registry.register(PARSER_CAPABILITY, MP3_PARSER_NAME, move || {
        Arc::new(Mp3Parser::new(staging.clone())) as Arc<dyn Parser>
    })?;

    Ok(registry)
}
