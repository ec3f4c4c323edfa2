// Extension resolution with preferred-name fallback

use std::sync::Arc;

use crate::plugins::registry::ExtensionRegistry;

/// Picks an implementation of a capability from a registry.
///
/// When a preferred name is configured and registered, that extension is
/// used. Otherwise the first extension in registration order is used. An
/// undeclared or empty capability resolves to nothing.
pub struct ExtensionResolver<'r, T: ?Sized> {
    registry: &'r ExtensionRegistry<T>,
    preferred: Option<String>,
}

impl<'r, T: ?Sized> ExtensionResolver<'r, T> {
    /// A blank preferred name means no preference
    pub fn new(registry: &'r ExtensionRegistry<T>, preferred: Option<&str>) -> Self {
        let preferred = preferred
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        ExtensionResolver { registry, preferred }
    }

    pub fn preferred(&self) -> Option<&str> {
        self.preferred.as_deref()
    }

    pub fn resolve(&self, capability: &str) -> Option<Arc<T>> {
        // not even an extension point defined
        let point = self.registry.point(capability)?;

        if let Some(name) = &self.preferred {
            if let Some(extension) = point.find(name) {
                tracing::info!("Using {} extension: {}", capability, name);
                return Some(extension.instance());
            }
            tracing::warn!("{} extension not found: '{}', trying the default", capability, name);
        }

        let extension = point.first()?;
        tracing::info!("Using the first {} extension found: {}", capability, extension.id());
        Some(extension.instance())
    }

    /// Every implementation of a capability, in registration order
    pub fn list_all(&self, capability: &str) -> Vec<Arc<T>> {
        self.registry
            .point(capability)
            .map(|point| point.extensions().map(|e| e.instance()).collect())
            .unwrap_or_default()
    }
}
