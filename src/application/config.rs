//! Service configuration.

use crate::adapters::cache::CacheConfig;
use crate::domain::DEFAULT_CYCLES_PER_YEAR;

/// Configuration for `PrognosisService`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Cycles per year used by the per-cycle transform.
    /// 1 (the default) reports the combined probability unchanged.
    pub cycles_per_year: u32,

    /// Result cache settings
    pub cache: CacheConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cycles_per_year: DEFAULT_CYCLES_PER_YEAR,
            cache: CacheConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load config overrides from environment (best-effort).
    ///
    /// Supported:
    /// - FERTILITY_CYCLES_PER_YEAR
    /// - the cache variables read by `CacheConfig::from_env_or_default`
    #[must_use]
    pub fn from_env_or_default() -> Self {
        let mut cfg = Self {
            cache: CacheConfig::from_env_or_default(),
            ..Self::default()
        };

        if let Ok(v) = std::env::var("FERTILITY_CYCLES_PER_YEAR") {
            match v.trim().parse::<u32>() {
                Ok(x) if (1..=365).contains(&x) => cfg.cycles_per_year = x,
                _ => tracing::warn!("Ignoring FERTILITY_CYCLES_PER_YEAR={v:?}"),
            }
        }

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.cycles_per_year, DEFAULT_CYCLES_PER_YEAR);
        assert!(cfg.cache.enabled);
    }
}
