//! Next-position predictors for the enemy
//!
//! Provides:
//! - The `Predictor` boundary: a normalized window of past player x-positions in,
//!   one normalized next position out
//! - Min-max normalization bounds shared by the trainer and the game
//! - An LSTM regressor built on Burn, plus its persistence and training loop
//! - Heuristic predictors usable without a trained model, and selection between them

pub mod backend;
pub mod dataset;
pub mod heuristic;
pub mod network;
pub mod normalize;
pub mod persistence;
pub mod select;
pub mod trainer;

pub use backend::{InferenceBackend, TrainingBackend, default_device};
pub use dataset::{SequenceDataset, load_x_positions};
pub use heuristic::{ExtrapolatePredictor, LastValuePredictor};
pub use network::{LstmPredictor, LstmRegressor, LstmRegressorConfig};
pub use normalize::NormalizationBounds;
pub use persistence::{ModelMetadata, load_lstm_predictor, load_metadata, save_model};
pub use select::{PredictorKind, load_predictor};
pub use trainer::{EarlyStopping, Trainer, TrainerConfig, TrainingReport};

use thiserror::Error;

/// Failure at the predictor boundary
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PredictionError {
    #[error("expected a window of {expected} positions, got {actual}")]
    WindowShape { expected: usize, actual: usize },
    #[error("expected exactly one output value, got {0}")]
    MalformedOutput(usize),
    #[error("predictor produced a non-finite value: {0}")]
    NonFinite(f32),
    #[error("predictor backend failed: {0}")]
    Backend(String),
}

/// Maps a normalized window of past positions (oldest first) to the normalized
/// next position
///
/// The window always has exactly `sequence_length()` entries; this corresponds to
/// an input of shape `[1, sequence_length, 1]`.
pub trait Predictor {
    fn predict(&self, window: &[f32]) -> Result<f32, PredictionError>;

    fn sequence_length(&self) -> usize;

    fn name(&self) -> &str;
}

/// Reject windows of the wrong length before they reach a model
pub(crate) fn check_window(window: &[f32], expected: usize) -> Result<(), PredictionError> {
    if window.len() != expected {
        return Err(PredictionError::WindowShape {
            expected,
            actual: window.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_window() {
        assert!(check_window(&[0.0; 10], 10).is_ok());
        assert_eq!(
            check_window(&[0.0; 4], 10),
            Err(PredictionError::WindowShape {
                expected: 10,
                actual: 4
            })
        );
    }

    #[test]
    fn test_error_messages() {
        let err = PredictionError::MalformedOutput(3);
        assert_eq!(err.to_string(), "expected exactly one output value, got 3");
    }
}
