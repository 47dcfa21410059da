//! Saving and loading the predictor artifact
//!
//! A trained predictor is stored as two files:
//! - `<path>` - Network weights (Burn named MessagePack record)
//! - `<path>.meta.json` - Network configuration, normalization bounds, training summary
//!
//! The game needs both before a round can start; either one missing is fatal.

use super::{LstmPredictor, LstmRegressor, LstmRegressorConfig, NormalizationBounds};
use anyhow::{Context, Result};
use burn::{
    module::Module,
    record::{FullPrecisionSettings, NamedMpkFileRecorder, Recorder},
    tensor::backend::Backend,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata saved alongside the network weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Architecture needed to rebuild the network before loading weights
    pub network: LstmRegressorConfig,

    /// Bounds the training data was scaled with
    pub bounds: NormalizationBounds,

    /// Number of training windows (excluding validation)
    pub training_samples: usize,

    /// Epochs run before stopping
    pub epochs_trained: usize,

    /// Best validation loss seen, if a validation split was used
    pub best_validation_loss: Option<f32>,

    /// Version identifier for compatibility checking
    pub version: String,
}

impl ModelMetadata {
    pub fn new(network: LstmRegressorConfig, bounds: NormalizationBounds) -> Self {
        Self {
            network,
            bounds,
            training_samples: 0,
            epochs_trained: 0,
            best_validation_loss: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Path of the metadata file belonging to a weights file
pub fn metadata_path(path: &Path) -> PathBuf {
    path.with_extension("meta.json")
}

/// Save a trained network and its metadata
///
/// Creates parent directories if they don't exist.
pub fn save_model<B: Backend>(
    network: &LstmRegressor<B>,
    metadata: &ModelMetadata,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }

    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    recorder
        .record(network.clone().into_record(), path.to_path_buf())
        .context("Failed to save network weights")?;

    let meta_path = metadata_path(path);
    let meta_json =
        serde_json::to_string_pretty(metadata).context("Failed to serialize metadata")?;
    std::fs::write(&meta_path, meta_json)
        .with_context(|| format!("Failed to write metadata to {:?}", meta_path))?;

    Ok(())
}

/// Load and validate the metadata of a saved model
pub fn load_metadata(path: &Path) -> Result<ModelMetadata> {
    let meta_path = metadata_path(path);
    let meta_json = std::fs::read_to_string(&meta_path)
        .with_context(|| format!("Failed to read metadata from {:?}", meta_path))?;
    let metadata: ModelMetadata =
        serde_json::from_str(&meta_json).context("Failed to deserialize metadata")?;

    metadata
        .bounds
        .validate()
        .with_context(|| format!("Invalid normalization bounds in {:?}", meta_path))?;

    Ok(metadata)
}

/// Load a saved network
pub fn load_network<B: Backend>(
    path: &Path,
    device: &B::Device,
) -> Result<(LstmRegressor<B>, ModelMetadata)> {
    let metadata = load_metadata(path)?;

    let network = metadata.network.init::<B>(device);
    let recorder = NamedMpkFileRecorder::<FullPrecisionSettings>::new();
    let record = recorder
        .load(path.to_path_buf(), device)
        .with_context(|| format!("Failed to load network weights from {:?}", path))?;

    Ok((network.load_record(record), metadata))
}

/// Load a saved network wrapped as a `Predictor`
pub fn load_lstm_predictor<B: Backend>(
    path: &Path,
    device: &B::Device,
) -> Result<(LstmPredictor<B>, ModelMetadata)> {
    let (network, metadata) = load_network::<B>(path, device)?;
    let predictor = LstmPredictor::new(
        network,
        metadata.network.sequence_length,
        device.clone(),
    );
    Ok((predictor, metadata))
}
