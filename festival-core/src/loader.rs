//! Dataset loading.
//!
//! Every handler obtains the dataset through a [`DatasetLoader`], so the
//! source can be swapped for a fixed in-memory dataset in tests.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use tracing::{debug, info};

use crate::error::LoadError;
use crate::models::Dataset;
use crate::Config;

/// Source of the festival dataset.
pub trait DatasetLoader: Send + Sync {
    /// Load the full dataset, or fail without exposing a partial one.
    fn load(&self) -> Result<Arc<Dataset>, LoadError>;
}

impl<L: DatasetLoader + ?Sized> DatasetLoader for Arc<L> {
    fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        (**self).load()
    }
}

impl<L: DatasetLoader + ?Sized> DatasetLoader for Box<L> {
    fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        (**self).load()
    }
}

/// Parse and validate dataset JSON.
pub fn parse_dataset(content: impl AsRef<[u8]>) -> Result<Dataset, LoadError> {
    serde_json::from_slice(content.as_ref()).map_err(LoadError::from_json)
}

/// Reads the dataset file on every call.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetLoader for FileLoader {
    fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        let content = fs::read(&self.path).map_err(|source| LoadError::SourceNotFound {
            path: self.path.clone(),
            source,
        })?;

        let dataset = parse_dataset(content)?;
        debug!(
            "Loaded {} festivals from {}",
            dataset.festivals.len(),
            self.path.display()
        );

        Ok(Arc::new(dataset))
    }
}

/// Loads once through the inner loader and serves that dataset afterwards.
///
/// Failed loads are not cached; the next call tries again. Concurrent first
/// callers wait on the write lock, so the inner loader runs once per success.
pub struct CachedLoader<L> {
    inner: L,
    cache: RwLock<Option<Arc<Dataset>>>,
}

impl<L: DatasetLoader> CachedLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RwLock::new(None),
        }
    }
}

impl<L: DatasetLoader> DatasetLoader for CachedLoader<L> {
    fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        // Check cache first
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(dataset) = cache.as_ref() {
                return Ok(Arc::clone(dataset));
            }
        }

        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        // Another caller may have filled it while we waited for the lock
        if let Some(dataset) = cache.as_ref() {
            return Ok(Arc::clone(dataset));
        }

        let dataset = self.inner.load()?;
        *cache = Some(Arc::clone(&dataset));
        Ok(dataset)
    }
}

/// Serves a dataset that is already in memory.
#[derive(Debug, Clone)]
pub struct StaticLoader {
    dataset: Arc<Dataset>,
}

impl StaticLoader {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Arc::new(dataset),
        }
    }
}

impl DatasetLoader for StaticLoader {
    fn load(&self) -> Result<Arc<Dataset>, LoadError> {
        Ok(Arc::clone(&self.dataset))
    }
}

/// Build the loader described by the configuration.
pub fn from_config(config: &Config) -> Box<dyn DatasetLoader> {
    let file = FileLoader::new(&config.data_path);
    if config.reload_per_request {
        info!("Dataset will be re-read from {} per request", config.data_path.display());
        Box::new(file)
    } else {
        info!("Dataset will be cached after first load from {}", config.data_path.display());
        Box::new(CachedLoader::new(file))
    }
}
