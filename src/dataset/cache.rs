//! Process-wide dataset cache.
//!
//! The survey file is parsed once per process; every later render of the
//! report reuses the cached [`Dataset`] instead of re-reading the file. The
//! cache is keyed by canonicalized path and never evicted — entries live
//! until process exit, and the dataset itself is immutable, so no further
//! synchronization is needed beyond the map's own mutex.

use super::Dataset;
use crate::domain::LoadError;
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

static CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<Dataset>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Load a survey CSV through the process-wide cache.
///
/// # Errors
/// Returns a [`LoadError`] if the path cannot be resolved or the file fails
/// to parse. Failed loads are not cached, so a corrected file is picked up
/// on the next call.
pub fn load_cached(path: impl AsRef<Path>) -> Result<Arc<Dataset>, LoadError> {
    let path = path.as_ref();
    let key = path
        .canonicalize()
        .map_err(|_| LoadError::FileNotFound(path.to_path_buf()))?;

    let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(dataset) = cache.get(&key) {
        debug!("dataset cache hit for {}", key.display());
        return Ok(Arc::clone(dataset));
    }

    let dataset = Arc::new(Dataset::from_path(&key)?);
    cache.insert(key, Arc::clone(&dataset));
    Ok(dataset)
}
