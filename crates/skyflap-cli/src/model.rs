use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyflap_engine::Seed;
use skyflap_strategy::DecisionModel;
use skyflap_training::Champion;

/// A trained decision model as stored on disk.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Generation the model was selected in.
    pub generation: u64,
    pub best_score: usize,
    /// Seed of the training run that produced the model.
    pub seed: Seed,
    pub model: DecisionModel,
}

impl AiModel {
    pub fn from_champion(name: impl Into<String>, seed: Seed, champion: &Champion) -> Self {
        Self {
            name: name.into(),
            trained_at: Utc::now(),
            generation: champion.generation,
            best_score: champion.score,
            seed,
            model: champion.model.clone(),
        }
    }
}
