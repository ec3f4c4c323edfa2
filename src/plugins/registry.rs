//! Extension registration.
//!
//! A registry maps capability identifiers to an ordered list of named
//! extensions. Each extension is a constructor function producing a shared
//! implementation of the capability's trait. Registration order is
//! preserved and is the order the resolver falls back on.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{Result, TagTextError};

/// Constructor for an extension's implementation
pub type Constructor<T> = Arc<dyn Fn() -> Arc<T> + Send + Sync>;

/// Validate an extension or capability name before registration.
///
/// Names cannot be empty or contain whitespace.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TagTextError::plugin(name, "Extension name cannot be empty"));
    }

    if name.contains(char::is_whitespace) {
        return Err(TagTextError::plugin(
            name,
            format!("Extension name '{}' cannot contain whitespace", name),
        ));
    }

    Ok(())
}

/// A named, registered implementation of a capability
pub struct Extension<T: ?Sized> {
    id: String,
    constructor: Constructor<T>,
}

impl<T: ?Sized> Extension<T> {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Construct the extension's implementation
    pub fn instance(&self) -> Arc<T> {
        (self.constructor)()
    }
}

impl<T: ?Sized> fmt::Debug for Extension<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension").field("id", &self.id).finish_non_exhaustive()
    }
}

/// All extensions registered for one capability, in registration order
#[derive(Debug)]
pub struct ExtensionPoint<T: ?Sized> {
    id: String,
    extensions: IndexMap<String, Extension<T>>,
}

impl<T: ?Sized> ExtensionPoint<T> {
    fn new(id: &str) -> Self {
        ExtensionPoint {
            id: id.to_string(),
            extensions: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Find an extension by its id
    pub fn find(&self, name: &str) -> Option<&Extension<T>> {
        self.extensions.get(name)
    }

    /// The first registered extension
    pub fn first(&self) -> Option<&Extension<T>> {
        self.extensions.values().next()
    }

    pub fn extensions(&self) -> impl Iterator<Item = &Extension<T>> {
        self.extensions.values()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }
}

/// Registry of extension points keyed by capability
#[derive(Debug)]
pub struct ExtensionRegistry<T: ?Sized> {
    points: IndexMap<String, ExtensionPoint<T>>,
}

impl<T: ?Sized> Default for ExtensionRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> ExtensionRegistry<T> {
    /// Create an empty registry
    pub fn new() -> Self {
        ExtensionRegistry {
            points: IndexMap::new(),
        }
    }

    /// Declare a capability without registering any extension for it
    pub fn declare(&mut self, capability: &str) -> Result<&mut ExtensionPoint<T>> {
        validate_name(capability)?;
        Ok(self
            .points
            .entry(capability.to_string())
            .or_insert_with(|| ExtensionPoint::new(capability)))
    }

    /// Register an extension for a capability.
    ///
    /// # Errors
    ///
    /// Returns `Plugin` if either name is invalid or an extension with the
    /// same name is already registered for the capability.
    pub fn register<F>(&mut self, capability: &str, name: &str, constructor: F) -> Result<()>
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        validate_name(name)?;
        let point = self.declare(capability)?;

        if point.extensions.contains_key(name) {
            return Err(TagTextError::plugin(
                name,
                format!("Extension already registered for capability '{}'", capability),
            ));
        }

        point.extensions.insert(
            name.to_string(),
            Extension {
                id: name.to_string(),
                constructor: Arc::new(constructor),
            },
        );
        tracing::debug!("Registered extension '{}' for capability '{}'", name, capability);
        Ok(())
    }

    /// The extension point for a capability, if declared
    pub fn point(&self, capability: &str) -> Option<&ExtensionPoint<T>> {
        self.points.get(capability)
    }

    /// Names of all declared capabilities
    pub fn capabilities(&self) -> Vec<String> {
        self.points.keys().cloned().collect()
    }
}
