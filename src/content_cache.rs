use std::collections::HashMap;
use std::io;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};

/// How long a cached value stays servable.
pub enum Expire {
    Never,
    After(Duration),
}

struct CacheValue<T> {
    expire_date: DateTime<Utc>,
    value: Arc<T>,
}

/// Keyed cache for derived content (post lists, rendered posts). The
/// cache is handed to callers explicitly, so its lifetime is a visible
/// contract: entries live until their TTL passes or the process restarts.
/// `non_caching` builds a variant that stores nothing, for setups where
/// every request should hit the disk.
pub struct ContentCache<T> {
    entries: Option<RwLock<HashMap<String, CacheValue<T>>>>,
}

impl<T> ContentCache<T> {
    pub fn new() -> Self {
        ContentCache {
            entries: Some(RwLock::new(HashMap::new())),
        }
    }

    pub fn non_caching() -> Self {
        ContentCache { entries: None }
    }

    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        let entries = self.entries.as_ref()?;
        let map = entries.read().unwrap_or_else(|e| e.into_inner());
        let cached = map.get(key)?;
        if Utc::now() > cached.expire_date {
            return None;
        }
        Some(cached.value.clone())
    }

    /// Returns the cached value for `key`, or builds, stores and returns
    /// a fresh one. Build failures are not cached.
    pub fn get_or<F>(&self, key: &str, expire_after: Expire, build: F) -> io::Result<Arc<T>>
    where
        F: FnOnce() -> io::Result<T>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = build()?;
        Ok(self.add(key.to_string(), value, expire_after))
    }

    fn add(&self, key: String, value: T, expire_after: Expire) -> Arc<T> {
        let value = Arc::new(value);
        if let Some(ref entries) = self.entries {
            let expire_date = match expire_after {
                Expire::Never => DateTime::<Utc>::MAX_UTC,
                Expire::After(duration) => Utc::now() + duration,
            };
            let mut map = entries.write().unwrap_or_else(|e| e.into_inner());
            map.insert(
                key,
                CacheValue {
                    expire_date,
                    value: value.clone(),
                },
            );
        }
        value
    }
}
