//! Choosing and loading the predictor a play session will use

use anyhow::{Context, Result};
use std::path::Path;

use super::{
    ExtrapolatePredictor, InferenceBackend, LastValuePredictor, NormalizationBounds, Predictor,
    default_device, load_lstm_predictor, load_metadata,
};
use crate::game::GameConfig;

/// Frames ahead the extrapolating heuristic projects the player's velocity
const EXTRAPOLATE_LOOKAHEAD: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictorKind {
    /// Trained LSTM regressor; requires a saved model
    Lstm,
    /// Linear extrapolation of recent velocity
    Extrapolate,
    /// Repeat the last seen position
    LastValue,
}

/// Load the predictor and the normalization bounds it expects
///
/// The LSTM needs both files of a saved model; any failure is fatal. Heuristics use
/// the model's bounds when a model is present and the playfield's x range otherwise.
pub fn load_predictor(
    kind: PredictorKind,
    model_path: &Path,
    config: &GameConfig,
) -> Result<(Box<dyn Predictor>, NormalizationBounds)> {
    match kind {
        PredictorKind::Lstm => {
            let (predictor, metadata) =
                load_lstm_predictor::<InferenceBackend>(model_path, &default_device())
                    .with_context(|| {
                        format!(
                            "Failed to load the enemy model from {:?}; record movement and \
                             run --mode train first, or pick a heuristic --predictor",
                            model_path
                        )
                    })?;
            tracing::info!(
                min = metadata.bounds.min(),
                max = metadata.bounds.max(),
                epochs = metadata.epochs_trained,
                "loaded LSTM predictor from {:?}",
                model_path
            );
            Ok((Box::new(predictor), metadata.bounds))
        }
        PredictorKind::Extrapolate => {
            let bounds = heuristic_bounds(model_path, config)?;
            let predictor = ExtrapolatePredictor::new(config.sequence_length, EXTRAPOLATE_LOOKAHEAD);
            Ok((Box::new(predictor), bounds))
        }
        PredictorKind::LastValue => {
            let bounds = heuristic_bounds(model_path, config)?;
            Ok((Box::new(LastValuePredictor::new(config.sequence_length)), bounds))
        }
    }
}

fn heuristic_bounds(model_path: &Path, config: &GameConfig) -> Result<NormalizationBounds> {
    match load_metadata(model_path) {
        Ok(metadata) => Ok(metadata.bounds),
        Err(err) => {
            tracing::debug!("no model bounds ({:#}), using the playfield range", err);
            NormalizationBounds::new(0.0, config.max_x())
        }
    }
}
