//! Result cache port: memoizes evaluations by input fingerprint.
//!
//! Implementations must store at most one `Evaluation` per fingerprint and
//! must never hand out a partially written entry to concurrent readers.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::domain::{ClinicalInput, Evaluation};

/// Content hash identifying a `ClinicalInput`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputFingerprint(String);

impl InputFingerprint {
    /// Hash the canonical JSON encoding of `input`, together with the
    /// per-cycle model that shapes the result.
    ///
    /// # Errors
    /// Returns the serializer error if the input cannot be encoded.
    pub fn of(input: &ClinicalInput, cycles_per_year: u32) -> Result<Self, serde_json::Error> {
        let bytes = serde_json::to_vec(input)?;

        let mut hasher = Sha256::new();
        hasher.update(cycles_per_year.to_le_bytes());
        hasher.update(&bytes);
        let digest = hasher.finalize();

        Ok(Self(digest.iter().map(|b| format!("{b:02x}")).collect()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 16 hex characters, for logging.
    #[must_use]
    pub fn short(&self) -> &str {
        &self.0[..16.min(self.0.len())]
    }
}

impl fmt::Display for InputFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for evaluation caches.
pub trait ReportCache: Send + Sync {
    /// Look up a cached evaluation.
    fn get(&self, key: &InputFingerprint) -> Option<Evaluation>;

    /// Return the cached evaluation for `key`, computing and storing it with
    /// `init` when absent. Concurrent callers for the same key observe a
    /// single stored value.
    fn get_or_insert_with(
        &self,
        key: InputFingerprint,
        init: &mut dyn FnMut() -> Evaluation,
    ) -> Evaluation;

    /// Drop every entry.
    fn invalidate_all(&self);

    /// Approximate number of stored entries.
    fn entry_count(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let input = ClinicalInput {
            bmi: Some(22.0),
            ..ClinicalInput::new(32.0)
        };
        let a = InputFingerprint::of(&input, 12).expect("Should hash");
        let b = InputFingerprint::of(&input.clone(), 12).expect("Should hash");
        assert_eq!(a, b);
        assert_eq!(a.as_str().len(), 64);
        assert_eq!(a.short().len(), 16);
    }

    #[test]
    fn test_fingerprint_distinguishes_inputs() {
        let a = InputFingerprint::of(&ClinicalInput::new(32.0), 12).expect("Should hash");
        let b = InputFingerprint::of(&ClinicalInput::new(33.0), 12).expect("Should hash");
        let c = InputFingerprint::of(&ClinicalInput::new(32.0), 1).expect("Should hash");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
