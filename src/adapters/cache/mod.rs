//! In-memory result cache: Implementation of ReportCache.
//!
//! Bounded by entry count with a time-to-live per entry. Built on
//! `moka::sync::Cache`, whose `get_with` runs the initializer at most once
//! per key even under concurrent callers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;

use crate::domain::Evaluation;
use crate::ports::{InputFingerprint, ReportCache};

/// Configuration for the result cache.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Whether evaluations are cached at all
    pub enabled: bool,

    /// Maximum number of cached evaluations
    pub capacity: u64,

    /// Lifetime of a cached evaluation
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: 1024,
            ttl: Duration::from_secs(900),
        }
    }
}

impl CacheConfig {
    /// Load config overrides from environment (best-effort).
    ///
    /// Supported:
    /// - FERTILITY_CACHE_ENABLED
    /// - FERTILITY_CACHE_CAPACITY
    /// - FERTILITY_CACHE_TTL_SECS
    #[must_use]
    pub fn from_env_or_default() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("FERTILITY_CACHE_ENABLED") {
            match v.trim() {
                "1" | "true" | "TRUE" | "yes" | "YES" => cfg.enabled = true,
                "0" | "false" | "FALSE" | "no" | "NO" => cfg.enabled = false,
                other => tracing::warn!("Ignoring FERTILITY_CACHE_ENABLED={other:?}"),
            }
        }

        if let Ok(v) = std::env::var("FERTILITY_CACHE_CAPACITY") {
            match v.trim().parse::<u64>() {
                Ok(x) if x > 0 => cfg.capacity = x,
                _ => tracing::warn!("Ignoring FERTILITY_CACHE_CAPACITY={v:?}"),
            }
        }

        if let Ok(v) = std::env::var("FERTILITY_CACHE_TTL_SECS") {
            match v.trim().parse::<u64>() {
                Ok(x) if x > 0 => cfg.ttl = Duration::from_secs(x),
                _ => tracing::warn!("Ignoring FERTILITY_CACHE_TTL_SECS={v:?}"),
            }
        }

        cfg
    }

    /// Build the cache adapter described by this config.
    #[must_use]
    pub fn build(&self) -> Box<dyn ReportCache> {
        if self.enabled {
            Box::new(MokaReportCache::new(self))
        } else {
            Box::new(NoopCache)
        }
    }
}

/// Bounded, TTL-based evaluation cache.
pub struct MokaReportCache {
    inner: Cache<InputFingerprint, Evaluation>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MokaReportCache {
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(config.ttl)
            .build();

        Self {
            inner,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// (hits, misses) since construction.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (
            self.hits.load(Ordering::Relaxed),
            self.misses.load(Ordering::Relaxed),
        )
    }
}

impl ReportCache for MokaReportCache {
    fn get(&self, key: &InputFingerprint) -> Option<Evaluation> {
        self.inner.get(key)
    }

    fn get_or_insert_with(
        &self,
        key: InputFingerprint,
        init: &mut dyn FnMut() -> Evaluation,
    ) -> Evaluation {
        let mut computed = false;
        let short = key.short().to_string();

        let value = self.inner.get_with(key, || {
            computed = true;
            init()
        });

        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Cache miss for input {short}");
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Cache hit for input {short}");
        }

        value
    }

    fn invalidate_all(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
    }

    fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

/// Cache that stores nothing; every lookup recomputes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl ReportCache for NoopCache {
    fn get(&self, _key: &InputFingerprint) -> Option<Evaluation> {
        None
    }

    fn get_or_insert_with(
        &self,
        _key: InputFingerprint,
        init: &mut dyn FnMut() -> Evaluation,
    ) -> Evaluation {
        init()
    }

    fn invalidate_all(&self) {}

    fn entry_count(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClinicalInput;

    fn entry(age: f64) -> (InputFingerprint, Evaluation) {
        let input = ClinicalInput::new(age);
        (
            InputFingerprint::of(&input, 12).expect("Should hash"),
            Evaluation::run(&input, 12),
        )
    }

    #[test]
    fn test_compute_once_per_key() {
        let cache = MokaReportCache::new(&CacheConfig::default());
        let (key, eval) = entry(31.0);

        let mut calls = 0;
        let first = cache.get_or_insert_with(key.clone(), &mut || {
            calls += 1;
            eval.clone()
        });
        let second = cache.get_or_insert_with(key.clone(), &mut || {
            calls += 1;
            eval.clone()
        });

        assert_eq!(calls, 1);
        assert_eq!(first, second);
        assert_eq!(cache.stats(), (1, 1));
        assert_eq!(cache.get(&key), Some(eval));
    }

    #[test]
    fn test_invalidate_all() {
        let cache = MokaReportCache::new(&CacheConfig::default());
        let (key, eval) = entry(28.0);
        cache.get_or_insert_with(key.clone(), &mut || eval.clone());
        assert_eq!(cache.entry_count(), 1);

        cache.invalidate_all();
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_concurrent_single_entry() {
        use std::sync::atomic::AtomicUsize;
        use std::sync::Arc;

        let cache = Arc::new(MokaReportCache::new(&CacheConfig::default()));
        let calls = Arc::new(AtomicUsize::new(0));
        let (key, eval) = entry(35.0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                let key = key.clone();
                let eval = eval.clone();
                std::thread::spawn(move || {
                    cache.get_or_insert_with(key, &mut || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        eval.clone()
                    })
                })
            })
            .collect();

        for handle in handles {
            let value = handle.join().expect("Thread should finish");
            assert_eq!(value, eval);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_noop_cache_always_computes() {
        let cache = NoopCache;
        let (key, eval) = entry(30.0);

        let mut calls = 0;
        for _ in 0..3 {
            cache.get_or_insert_with(key.clone(), &mut || {
                calls += 1;
                eval.clone()
            });
        }
        assert_eq!(calls, 3);
        assert!(cache.get(&key).is_none());
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_disabled_config_builds_noop() {
        let config = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        assert_eq!(config.build().entry_count(), 0);
    }
}
