use chrono::{DateTime, Utc};
use ouro_engine::GameSeed;
use ouro_training::genetic::Individual;
use serde::{Deserialize, Serialize};

/// Metadata written next to a record-breaking individual's gene file.
///
/// The plain-text gene and seed files are the canonical record; this JSON
/// sidecar only adds context (when the record fell, how the episode went).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMeta {
    pub score: u32,
    pub steps: u32,
    pub fitness: f64,
    pub seed: GameSeed,
    pub recorded_at: DateTime<Utc>,
}

impl RecordMeta {
    /// # Panics
    ///
    /// Panics if `best` has not been evaluated (no recorded seed).
    pub fn new(best: &Individual) -> Self {
        Self {
            score: best.score(),
            steps: best.steps(),
            fitness: best.fitness(),
            seed: best.seed().expect("record individual must be evaluated"),
            recorded_at: Utc::now(),
        }
    }
}
