//! In-memory star catalog.
//!
//! This module provides a local implementation of [`TargetResolver`] suitable
//! for offline use and unit testing. Names are matched case-insensitively and
//! with whitespace collapsed, so `"alf  Lyr"` and `"ALF LYR"` are the same key.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::TargetResolver;
use crate::core::domain::CelestialTarget;
use crate::core::error::{ObservationError, ObservationResult};
use crate::parsing::catalog_parser::{self, CatalogEntry};

/// In-memory star catalog.
///
/// Entries keep their insertion order, which is the order [`TargetResolver::names`]
/// lists them in. Clones share the same underlying data.
///
/// # Example
/// ```
/// use novascope_rust::core::domain::CelestialTarget;
/// use novascope_rust::resolvers::LocalCatalog;
///
/// let catalog = LocalCatalog::new();
/// catalog.insert(CelestialTarget::new("Vega", 18.6156, 38.7837).unwrap(), &["alf Lyr"]);
/// assert_eq!(catalog.len(), 1);
/// assert!(catalog.contains("ALF LYR"));
/// ```
#[derive(Clone, Default)]
pub struct LocalCatalog {
    data: Arc<RwLock<CatalogData>>,
}

#[derive(Default)]
struct CatalogData {
    targets: Vec<CelestialTarget>,
    // Normalized name or alias -> index into `targets`
    index: HashMap<String, usize>,
    unavailable: bool,
}

impl LocalCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from parsed entries.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let catalog = Self::new();
        for entry in entries {
            let aliases: Vec<&str> = entry.aliases.iter().map(String::as_str).collect();
            catalog.insert(entry.target, &aliases);
        }
        catalog
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Returns
    /// * `Ok(LocalCatalog)` if the file was read and every star is valid
    /// * `Err(ObservationError::Configuration)` otherwise
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ObservationResult<Self> {
        let entries = catalog_parser::parse_catalog_json(path.as_ref())
            .map_err(|e| ObservationError::Configuration(format!("{:#}", e)))?;
        log::info!(
            "Loaded {} stars from {}",
            entries.len(),
            path.as_ref().display()
        );
        Ok(Self::from_entries(entries))
    }

    /// Add a target under its name and any aliases.
    ///
    /// A name already present keeps pointing at the first target registered
    /// under it; the duplicate is logged and skipped.
    pub fn insert(&self, target: CelestialTarget, aliases: &[&str]) {
        let mut data = self.write();
        let key = normalize(&target.name);
        if data.index.contains_key(&key) {
            log::warn!("Duplicate catalog entry '{}' ignored", target.name);
            return;
        }

        let idx = data.targets.len();
        data.index.insert(key, idx);
        for alias in aliases {
            let alias_key = normalize(alias);
            if !alias_key.is_empty() {
                data.index.entry(alias_key).or_insert(idx);
            }
        }
        data.targets.push(target);
    }

    /// Simulate an unreachable catalog service.
    pub fn set_available(&self, available: bool) {
        self.write().unavailable = !available;
    }

    /// Number of distinct targets stored.
    pub fn len(&self) -> usize {
        self.read().targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether a name or alias is known.
    pub fn contains(&self, name: &str) -> bool {
        self.read().index.contains_key(&normalize(name))
    }

    fn lookup(&self, name: &str) -> ObservationResult<CelestialTarget> {
        let data = self.read();
        if data.unavailable {
            return Err(ObservationError::catalog(name, "catalog service unavailable"));
        }
        data.index
            .get(&normalize(name))
            .map(|&idx| data.targets[idx].clone())
            .ok_or_else(|| ObservationError::catalog(name, "no such object in catalog"))
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogData> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogData> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TargetResolver for LocalCatalog {
    async fn resolve(&self, name: &str) -> ObservationResult<CelestialTarget> {
        self.lookup(name)
    }

    async fn names(&self, limit: usize) -> ObservationResult<Vec<String>> {
        let data = self.read();
        if data.unavailable {
            return Err(ObservationError::catalog("*", "catalog service unavailable"));
        }
        Ok(data
            .targets
            .iter()
            .take(limit)
            .map(|t| t.name.clone())
            .collect())
    }
}

fn normalize(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
