use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Counters collected over a translation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationMetrics {
    /// Files handed to the orchestrator
    pub files_attempted: usize,

    /// Files with at least one accepted edit
    pub files_translated: usize,

    /// Matches reported by the front end over both passes
    pub matches_found: usize,

    /// Edits produced by rules
    pub edits_proposed: usize,

    /// Edits kept by the replacement sets
    pub edits_accepted: usize,

    /// Edits dropped as span conflicts
    pub edits_rejected: usize,

    /// (file, view) scans that reported diagnostics
    pub pass_failures: usize,

    /// Edits written to disk
    pub edits_applied: usize,

    /// Accepted edits that could not be applied
    pub apply_failures: usize,

    /// Wall time of the analysis passes
    #[serde(with = "duration_millis")]
    pub total_time: Duration,
}

// Helper module for serializing Duration
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis: u64 = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

impl TranslationMetrics {
    /// Share of proposed edits that were accepted (0.0 to 1.0)
    pub fn acceptance_rate(&self) -> f64 {
        if self.edits_proposed == 0 {
            0.0
        } else {
            self.edits_accepted as f64 / self.edits_proposed as f64
        }
    }

    /// Whether every accepted edit made it to disk
    pub fn fully_applied(&self) -> bool {
        self.apply_failures == 0
    }

    /// Fold another run's counters into this one
    pub fn merge(&mut self, other: &TranslationMetrics) {
        self.files_attempted += other.files_attempted;
        self.files_translated += other.files_translated;
        self.matches_found += other.matches_found;
        self.edits_proposed += other.edits_proposed;
        self.edits_accepted += other.edits_accepted;
        self.edits_rejected += other.edits_rejected;
        self.pass_failures += other.pass_failures;
        self.edits_applied += other.edits_applied;
        self.apply_failures += other.apply_failures;
        self.total_time += other.total_time;
    }
}
