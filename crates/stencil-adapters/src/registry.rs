//! In-memory bundle registry with built-in bundles.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use stencil_core::{
    application::ports::BundleRegistry,
    domain::{DomainError, TemplateBundle},
    error::StencilResult,
};

use crate::builtin_bundles;

/// Thread-safe in-memory bundle registry.
///
/// Populated once at process start (built-ins plus any bundles discovered on
/// disk) and read-only through the [`BundleRegistry`] port afterwards.
#[derive(Clone)]
pub struct InMemoryRegistry {
    inner: Arc<RwLock<HashMap<String, TemplateBundle>>>,
}

impl InMemoryRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry with built-in bundles loaded.
    pub fn with_builtin() -> StencilResult<Self> {
        let registry = Self::new();
        registry.load_builtin()?;
        Ok(registry)
    }

    /// Load built-in bundles.
    pub fn load_builtin(&self) -> StencilResult<()> {
        for bundle in builtin_bundles::all_bundles()? {
            self.insert(bundle)?;
        }
        Ok(())
    }

    /// Register a bundle. Validates first; later registrations under the
    /// same name replace earlier ones (user bundles override built-ins).
    pub fn insert(&self, bundle: TemplateBundle) -> StencilResult<()> {
        bundle
            .validate()
            .map_err(stencil_core::error::StencilError::Domain)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| stencil_core::application::ApplicationError::RegistryLockError)?;

        inner.insert(bundle.id.name().to_string(), bundle);
        Ok(())
    }

    /// Get the number of bundles. A poisoned lock counts as empty rather
    /// than panicking; the port methods report it as `RegistryLockError`.
    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BundleRegistry for InMemoryRegistry {
    fn get(&self, name: &str) -> StencilResult<TemplateBundle> {
        let inner = self
            .inner
            .read()
            .map_err(|_| stencil_core::application::ApplicationError::RegistryLockError)?;

        inner
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::UnknownBundle { name: name.into() }.into())
    }

    fn list(&self) -> StencilResult<Vec<TemplateBundle>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| stencil_core::application::ApplicationError::RegistryLockError)?;

        let mut bundles: Vec<_> = inner.values().cloned().collect();
        bundles.sort_by(|a, b| a.id.name().cmp(b.id.name()));
        Ok(bundles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::domain::{BundleId, BundleMetadata, TemplateFile};

    fn bundle(name: &str) -> TemplateBundle {
        TemplateBundle::builder()
            .id(BundleId::new(name, "1.0.0"))
            .metadata(BundleMetadata::new("Test"))
            .add_file(TemplateFile::text("f.txt", "x"))
            .build()
            .unwrap()
    }

    #[test]
    fn builtin_registry_serves_known_bundles() {
        let registry = InMemoryRegistry::with_builtin().unwrap();
        assert!(registry.get("python-project").is_ok());
        assert!(registry.get("pytest-setup").is_ok());
        assert!(registry.get("docs-init").is_ok());
    }

    #[test]
    fn unknown_bundle_errors() {
        let registry = InMemoryRegistry::with_builtin().unwrap();
        let err = registry.get("no-such-bundle").unwrap_err();
        assert!(matches!(
            err,
            stencil_core::error::StencilError::Domain(DomainError::UnknownBundle { .. })
        ));
    }

    #[test]
    fn list_is_sorted_by_name() {
        let registry = InMemoryRegistry::new();
        registry.insert(bundle("zeta")).unwrap();
        registry.insert(bundle("alpha")).unwrap();

        let names: Vec<_> = registry
            .list()
            .unwrap()
            .iter()
            .map(|b| b.id.name().to_string())
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn insert_replaces_same_name() {
        let registry = InMemoryRegistry::new();
        registry.insert(bundle("same")).unwrap();
        registry.insert(bundle("same")).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn len_does_not_panic_on_poisoned_lock() {
        let registry = InMemoryRegistry::new();
        registry.insert(bundle("a")).unwrap();

        let clone = registry.clone();
        let _ = std::thread::spawn(move || {
            let _guard = clone.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(registry.len(), 0);
        assert!(registry.get("a").is_err());
    }

    #[test]
    fn insert_validates() {
        let registry = InMemoryRegistry::new();
        let invalid = TemplateBundle {
            id: BundleId::new("bad", "1.0.0"),
            metadata: BundleMetadata::new("Bad"),
            schema: Default::default(),
            files: vec![],
        };
        assert!(registry.insert(invalid).is_err());
    }
}
