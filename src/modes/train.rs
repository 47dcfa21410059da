//! Training mode for the enemy's position predictor
//!
//! Reads the x-positions from a movement log, fits the normalization bounds,
//! cuts the series into sliding windows and fits the LSTM regressor with early
//! stopping. The best weights and their metadata are saved for play mode.
//!
//! # Example
//!
//! ```rust,ignore
//! use catch_me::modes::{TrainConfig, TrainMode};
//! use catch_me::predictor::{TrainingBackend, default_device};
//! use std::path::PathBuf;
//!
//! let config = TrainConfig::new(
//!     PathBuf::from("movement_data.csv"),
//!     PathBuf::from("models/enemy_lstm.mpk"),
//! );
//! let mut train_mode = TrainMode::<TrainingBackend>::new(config, default_device())?;
//! let report = train_mode.run()?;
//! ```

use anyhow::{Context, Result};
use burn::tensor::backend::AutodiffBackend;
use std::path::PathBuf;

use crate::metrics::TrainingStats;
use crate::predictor::{
    EarlyStopping, LstmRegressor, ModelMetadata, NormalizationBounds, SequenceDataset, Trainer,
    TrainerConfig, TrainingReport, load_x_positions, save_model,
};

/// Configuration for training mode
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Movement log to learn from
    pub data_path: PathBuf,

    /// Where to save the trained weights (metadata goes next to them)
    pub save_path: PathBuf,

    /// Print progress every N epochs
    pub log_frequency: usize,

    /// Optimization hyperparameters and network shape
    pub trainer: TrainerConfig,
}

impl TrainConfig {
    /// Create a training configuration with default hyperparameters
    ///
    /// # Example
    ///
    /// ```rust
    /// use catch_me::modes::TrainConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = TrainConfig::new(
    ///     PathBuf::from("movement_data.csv"),
    ///     PathBuf::from("models/enemy_lstm.mpk"),
    /// );
    /// assert_eq!(config.trainer.epochs, 50);
    /// ```
    pub fn new(data_path: PathBuf, save_path: PathBuf) -> Self {
        Self {
            data_path,
            save_path,
            log_frequency: 1,
            trainer: TrainerConfig::default(),
        }
    }
}

/// Fits the predictor to a recorded movement log
pub struct TrainMode<B: AutodiffBackend> {
    trainer: Trainer<B>,
    stats: TrainingStats,
    config: TrainConfig,
}

impl<B: AutodiffBackend> TrainMode<B> {
    pub fn new(config: TrainConfig, device: B::Device) -> Result<Self> {
        let trainer = Trainer::new(config.trainer.clone(), device)?;

        Ok(Self {
            trainer,
            stats: TrainingStats::new(10),
            config,
        })
    }

    /// Run the full pipeline: load, fit, save
    pub fn run(&mut self) -> Result<TrainingReport> {
        let positions = load_x_positions(&self.config.data_path)?;
        let bounds = NormalizationBounds::fit(&positions).with_context(|| {
            format!(
                "Cannot normalize {:?}: the recorded x-positions never vary",
                self.config.data_path
            )
        })?;

        let sequence_length = self.config.trainer.network.sequence_length;
        let dataset = SequenceDataset::from_positions(&positions, &bounds, sequence_length)?;
        let (train, valid) = dataset.split(self.config.trainer.validation_split);

        self.print_header(positions.len(), &bounds, train.len(), valid.as_ref());
        tracing::info!(
            frames = positions.len(),
            train = train.len(),
            valid = valid.as_ref().map_or(0, |v| v.len()),
            min = bounds.min(),
            max = bounds.max(),
            "training data loaded"
        );

        let report = self.fit(&train, valid.as_ref());

        let mut metadata = ModelMetadata::new(self.config.trainer.network.clone(), bounds);
        metadata.training_samples = train.len();
        metadata.epochs_trained = report.epochs_run;
        metadata.best_validation_loss = report.best_validation_loss;

        save_model(self.trainer.network(), &metadata, &self.config.save_path).with_context(
            || format!("Failed to save final model to {:?}", self.config.save_path),
        )?;

        println!("\nTraining complete!");
        println!("Final model saved to: {:?}", self.config.save_path);
        println!("\nFinal Statistics:");
        println!("{}", self.stats.format_summary());
        tracing::info!(
            epochs = report.epochs_run,
            stopped_early = report.stopped_early,
            "model saved to {:?}",
            self.config.save_path
        );

        Ok(report)
    }

    /// Train until the epoch budget runs out or validation loss stops improving,
    /// leaving the best weights in the trainer
    pub fn fit(
        &mut self,
        train: &SequenceDataset,
        valid: Option<&SequenceDataset>,
    ) -> TrainingReport {
        let epochs = self.config.trainer.epochs;
        let mut stopper: EarlyStopping<LstmRegressor<B>> =
            EarlyStopping::new(self.config.trainer.patience);

        let mut epochs_run = 0;
        let mut final_train_loss = 0.0;
        let mut stopped_early = false;

        for epoch in 1..=epochs {
            final_train_loss = self.trainer.train_epoch(train);
            let valid_loss = valid.map(|data| self.trainer.evaluate(data));
            epochs_run = epoch;

            self.stats.record_epoch(final_train_loss, valid_loss);
            if epoch % self.config.log_frequency.max(1) == 0 {
                self.print_progress(epoch);
            }
            tracing::debug!(epoch, train_loss = final_train_loss, ?valid_loss, "epoch finished");

            // Without a validation split the training loss is monitored instead
            let monitored = valid_loss.unwrap_or(final_train_loss);
            if stopper.observe(monitored, self.trainer.network()) {
                stopped_early = epoch < epochs;
                println!(
                    "  Early stop at epoch {}: no improvement for {} epochs",
                    epoch, self.config.trainer.patience
                );
                break;
            }
        }

        let best_loss = stopper.best_loss();
        if let Some(best) = stopper.into_best() {
            self.trainer.set_network(best);
        }

        TrainingReport {
            epochs_run,
            final_train_loss,
            best_validation_loss: valid.and(best_loss),
            stopped_early,
        }
    }

    fn print_header(
        &self,
        frames: usize,
        bounds: &NormalizationBounds,
        train_len: usize,
        valid: Option<&SequenceDataset>,
    ) {
        let trainer = &self.config.trainer;
        println!("{}", "=".repeat(70));
        println!("LSTM Training - Catch Me");
        println!("{}", "=".repeat(70));
        println!("Data: {:?} ({} frames)", self.config.data_path, frames);
        println!("Bounds: min {} / max {}", bounds.min(), bounds.max());
        println!(
            "Windows: {} train, {} validation (length {})",
            train_len,
            valid.map_or(0, |v| v.len()),
            trainer.network.sequence_length
        );
        println!("Trainer Config:");
        println!("  Epochs: {}", trainer.epochs);
        println!("  Batch size: {}", trainer.batch_size);
        println!("  Learning rate: {}", trainer.learning_rate);
        println!("  Hidden size: {}", trainer.network.hidden_size);
        println!("  Early stopping patience: {}", trainer.patience);
        println!("Save path: {:?}", self.config.save_path);
        println!("{}", "=".repeat(70));
        println!();
    }

    fn print_progress(&self, epoch: usize) {
        println!(
            "[Epoch {}/{}] {}",
            epoch,
            self.config.trainer.epochs,
            self.stats.format_summary()
        );
    }
}
