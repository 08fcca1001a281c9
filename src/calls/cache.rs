//! Caller-owned cache of loaded call datasets
//!
//! Repeated report requests against the same export should not re-parse the
//! CSV. Entries are keyed by source path and stamped with a version (the
//! file's modification time); a changed version forces a reload. The
//! aggregation functions never touch this cache.

use super::{load_calls, CallRecord, LoadMode};
use crate::error::AnalysisResult;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Version stamp of a dataset source
pub type SourceVersion = Option<SystemTime>;

/// A loaded dataset and the version it was loaded at
#[derive(Debug, Clone)]
pub struct CachedDataset {
    pub version: SourceVersion,
    pub mode: LoadMode,
    pub records: Arc<Vec<CallRecord>>,
}

/// Cache manager for loaded datasets
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, CachedDataset>,

    /// Statistics
    pub cache_hits: u64,
    pub cache_misses: u64,
}

/// Modification time of a file, if the platform reports one
pub fn source_version(path: &Path) -> AnalysisResult<SourceVersion> {
    let metadata = std::fs::metadata(path)?;
    Ok(metadata.modified().ok())
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached records for `path` if they were loaded at `version` in `mode`
    pub fn get(&self, path: &Path, version: SourceVersion, mode: LoadMode) -> Option<Arc<Vec<CallRecord>>> {
        self.entries
            .get(path)
            .filter(|entry| entry.version == version && entry.mode == mode)
            .map(|entry| Arc::clone(&entry.records))
    }

    /// Store records for `path`, replacing any older version
    pub fn insert(&mut self, path: impl Into<PathBuf>, version: SourceVersion, mode: LoadMode, records: Vec<CallRecord>) -> Arc<Vec<CallRecord>> {
        let records = Arc::new(records);
        self.entries.insert(
            path.into(),
            CachedDataset { version, mode, records: Arc::clone(&records) },
        );
        records
    }

    /// Return the cached dataset for `path`, loading it if absent or stale
    pub fn load(&mut self, path: &Path, mode: LoadMode) -> AnalysisResult<Arc<Vec<CallRecord>>> {
        let version = source_version(path)?;
        if let Some(records) = self.get(path, version, mode) {
            self.cache_hits += 1;
            debug!("Dataset cache hit for {}", path.display());
            return Ok(records);
        }

        self.cache_misses += 1;
        info!("Dataset cache miss for {}, loading", path.display());
        let records = load_calls(path, mode)?;
        Ok(self.insert(path, version, mode, records))
    }

    /// Drop the entry for `path`
    pub fn invalidate(&mut self, path: &Path) -> Option<CachedDataset> {
        self.entries.remove(path)
    }

    /// Clear all cached data
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cache_hits = 0;
        self.cache_misses = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }
}
