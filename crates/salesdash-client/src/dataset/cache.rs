use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::dataset::source::{SourceKey, source_key};
use crate::dataset::{Dataset, load_dataset};
use crate::error::LoadError;

#[derive(Debug, Clone)]
struct CachedDataset {
    key: SourceKey,
    dataset: Arc<Dataset>,
}

/// Caller-owned, single-slot dataset cache keyed by [`SourceKey`].
///
/// The slot is replaced whenever the source key changes and is only
/// populated by successful loads.
#[derive(Debug, Clone, Default)]
pub struct DatasetCache {
    slot: Option<CachedDataset>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        let key = source_key(path)?;
        if let Some(cached) = &self.slot
            && cached.key == key
        {
            debug!(path = %path.display(), "dataset cache hit");
            return Ok(Arc::clone(&cached.dataset));
        }

        debug!(path = %path.display(), "dataset cache miss");
        let dataset = Arc::new(load_dataset(path)?);
        self.slot = Some(CachedDataset {
            key,
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }

    pub fn reload(&mut self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        self.invalidate();
        self.get_or_load(path)
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
    }

    pub fn cached_key(&self) -> Option<&SourceKey> {
        self.slot.as_ref().map(|cached| &cached.key)
    }
}
