//! Tunable evaluation coefficients and the store they persist to.
//!
//! Load failures fall back to defaults and save failures are logged; neither
//! interrupts play.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::WeightsStoreError;

pub const MIN_WEIGHT: f64 = 0.1;
pub const MAX_WEIGHT: f64 = 20.0;
pub const DEFAULT_LEARNING_RATE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvaluationWeights {
    pub material: f64,
    pub center_control: f64,
    pub promotion_bonus: f64,
    pub check_bonus: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            material: 1.0,
            center_control: 0.5,
            promotion_bonus: 8.0,
            check_bonus: 1.5,
        }
    }
}

/// How a finished game went for the side whose weights are being tuned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcomeForPlayer {
    Win,
    Loss,
    Draw,
}

impl EvaluationWeights {
    /// Nudges every coefficient by `learning_rate * moves_played`, upward after a win
    /// and downward after a loss, clamped to `[MIN_WEIGHT, MAX_WEIGHT]`. Draws leave
    /// the weights unchanged.
    pub fn nudged(self, outcome: GameOutcomeForPlayer, moves_played: u32, learning_rate: f64) -> Self {
        let direction = match outcome {
            GameOutcomeForPlayer::Win => 1.0,
            GameOutcomeForPlayer::Loss => -1.0,
            GameOutcomeForPlayer::Draw => 0.0,
        };
        let step = direction * learning_rate * f64::from(moves_played);
        let adjust = |value: f64| (value + step).clamp(MIN_WEIGHT, MAX_WEIGHT);
        Self {
            material: adjust(self.material),
            center_control: adjust(self.center_control),
            promotion_bonus: adjust(self.promotion_bonus),
            check_bonus: adjust(self.check_bonus),
        }
    }
}

/// Configuration port for evaluation weights.
pub trait WeightsStore: Send {
    fn load(&self) -> Result<EvaluationWeights, WeightsStoreError>;
    fn save(&self, weights: &EvaluationWeights) -> Result<(), WeightsStoreError>;
}

/// Loads from `store`, falling back to defaults on any failure.
pub fn load_or_default(store: &dyn WeightsStore) -> EvaluationWeights {
    match store.load() {
        Ok(weights) => weights,
        Err(WeightsStoreError::NotFound) => {
            debug!("no stored evaluation weights, using defaults");
            EvaluationWeights::default()
        }
        Err(err) => {
            warn!(error = %err, "failed to load evaluation weights, using defaults");
            EvaluationWeights::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedWeights {
    #[serde(flatten)]
    weights: EvaluationWeights,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
}

/// Pretty-printed JSON file, stamped with the time of the last save.
#[derive(Debug, Clone)]
pub struct JsonFileWeightsStore {
    path: PathBuf,
}

impl JsonFileWeightsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Time of the last save, if the file carries one.
    pub fn updated_at(&self) -> Result<Option<DateTime<Utc>>, WeightsStoreError> {
        Ok(self.read()?.updated_at)
    }

    fn read(&self) -> Result<PersistedWeights, WeightsStoreError> {
        if !self.path.exists() {
            return Err(WeightsStoreError::NotFound);
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl WeightsStore for JsonFileWeightsStore {
    fn load(&self) -> Result<EvaluationWeights, WeightsStoreError> {
        let persisted = self.read()?;
        info!(path = %self.path.display(), "loaded evaluation weights");
        Ok(persisted.weights)
    }

    fn save(&self, weights: &EvaluationWeights) -> Result<(), WeightsStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let persisted = PersistedWeights {
            weights: *weights,
            updated_at: Some(Utc::now()),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&persisted)?)?;
        info!(path = %self.path.display(), "saved evaluation weights");
        Ok(())
    }
}

/// Process-local store, handy for tests and embedded use.
#[derive(Debug, Default)]
pub struct InMemoryWeightsStore {
    weights: Mutex<Option<EvaluationWeights>>,
}

impl InMemoryWeightsStore {
    pub fn with_weights(weights: EvaluationWeights) -> Self {
        Self {
            weights: Mutex::new(Some(weights)),
        }
    }

    pub fn snapshot(&self) -> Option<EvaluationWeights> {
        self.weights.lock().ok().and_then(|guard| *guard)
    }
}

impl WeightsStore for InMemoryWeightsStore {
    fn load(&self) -> Result<EvaluationWeights, WeightsStoreError> {
        self.snapshot().ok_or(WeightsStoreError::NotFound)
    }

    fn save(&self, weights: &EvaluationWeights) -> Result<(), WeightsStoreError> {
        if let Ok(mut guard) = self.weights.lock() {
            *guard = Some(*weights);
        }
        Ok(())
    }
}

/// Store that never holds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWeightsStore;

impl WeightsStore for NullWeightsStore {
    fn load(&self) -> Result<EvaluationWeights, WeightsStoreError> {
        Err(WeightsStoreError::NotFound)
    }

    fn save(&self, _weights: &EvaluationWeights) -> Result<(), WeightsStoreError> {
        Ok(())
    }
}
