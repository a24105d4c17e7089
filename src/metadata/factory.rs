//! Metadata factory: memoizes driver results per class.
//!
//! Each cache entry remembers the modification time of every file resource the
//! metadata was built from. When freshness checks are enabled, a changed (or
//! newly appearing/disappearing) file forces the driver to run again.

use crate::driver::MetadataDriver;
use crate::error::FactoryError;
use crate::metadata::ClassMetadata;
use crate::resource::ClassRef;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;
use tracing::debug;

/// Lookup of metadata by class, as consumed by the serialization hook.
pub trait MetadataSource: Send + Sync {
    /// Metadata for `class`, or `None` when the class declares nothing relevant.
    fn metadata_for_class(
        &self,
        class: &ClassRef,
    ) -> Result<Option<Arc<ClassMetadata>>, FactoryError>;
}

#[derive(Debug)]
struct CacheEntry {
    metadata: Option<Arc<ClassMetadata>>,
    stamps: Vec<(PathBuf, Option<SystemTime>)>,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        self.stamps
            .iter()
            .all(|(path, stamp)| modified_at(path) == *stamp)
    }
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
}

/// Caching metadata factory.
pub struct MetadataFactory<D> {
    driver: D,
    check_freshness: bool,
    cache: RwLock<HashMap<String, CacheEntry>>,
}

impl<D: MetadataDriver> MetadataFactory<D> {
    /// Create a factory that re-checks file resources on every lookup.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            check_freshness: true,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Enable or disable file freshness checks (disable in production builds
    /// where sources never change).
    pub fn with_freshness_check(mut self, check_freshness: bool) -> Self {
        self.check_freshness = check_freshness;
        self
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Drop every cached entry.
    pub fn clear(&self) -> Result<(), FactoryError> {
        self.cache
            .write()
            .map_err(|_| FactoryError::Poisoned)?
            .clear();
        Ok(())
    }

    /// Number of classes currently cached (including "no metadata" results).
    pub fn cached_classes(&self) -> Result<usize, FactoryError> {
        Ok(self.cache.read().map_err(|_| FactoryError::Poisoned)?.len())
    }

    /// Outer `None` means "not cached (or stale)", inner `None` a cached absence.
    fn cached(
        &self,
        class: &ClassRef,
    ) -> Result<Option<Option<Arc<ClassMetadata>>>, FactoryError> {
        let cache = self.cache.read().map_err(|_| FactoryError::Poisoned)?;

        Ok(cache.get(class.name()).and_then(|entry| {
            if self.check_freshness && !entry.is_fresh() {
                debug!("Metadata for {} is stale, reloading", class.name());
                None
            } else {
                Some(entry.metadata.clone())
            }
        }))
    }
}

impl<D: MetadataDriver> MetadataSource for MetadataFactory<D> {
    fn metadata_for_class(
        &self,
        class: &ClassRef,
    ) -> Result<Option<Arc<ClassMetadata>>, FactoryError> {
        if let Some(metadata) = self.cached(class)? {
            return Ok(metadata);
        }

        let metadata = self.driver.load_metadata_for_class(class)?.map(Arc::new);

        let resources: Vec<PathBuf> = match &metadata {
            Some(metadata) => metadata.file_resources().map(Path::to_path_buf).collect(),
            None => vec![class.file().to_path_buf()],
        };
        let stamps = resources
            .into_iter()
            .map(|path| {
                let stamp = modified_at(&path);
                (path, stamp)
            })
            .collect();

        debug!(
            "Loaded metadata for {} (found: {})",
            class.name(),
            metadata.is_some()
        );

        self.cache
            .write()
            .map_err(|_| FactoryError::Poisoned)?
            .insert(
                class.name().to_string(),
                CacheEntry {
                    metadata: metadata.clone(),
                    stamps,
                },
            );

        Ok(metadata)
    }
}
