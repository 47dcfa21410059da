//! Supervised training of the LSTM regressor
//!
//! Minibatch gradient descent with Adam on mean squared error, plus an
//! early-stopping tracker that remembers the best weights seen.

use anyhow::{Result, bail};
use burn::{
    module::AutodiffModule,
    optim::{Adam, AdamConfig, GradientsParams, Optimizer, adaptor::OptimizerAdaptor},
    tensor::{ElementConversion, Tensor, backend::AutodiffBackend, backend::Backend},
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::{LstmRegressor, LstmRegressorConfig, SequenceDataset};

/// Hyperparameters for fitting the regressor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Maximum passes over the training windows
    ///
    /// Default: 50
    pub epochs: usize,

    /// Windows per gradient step
    ///
    /// Default: 32
    pub batch_size: usize,

    /// Learning rate for the Adam optimizer
    ///
    /// Default: 1e-3
    pub learning_rate: f64,

    /// Trailing fraction of windows held out for validation
    ///
    /// Default: 0.2
    pub validation_split: f32,

    /// Epochs without improvement before stopping
    ///
    /// Default: 5
    pub patience: usize,

    /// Network architecture
    pub network: LstmRegressorConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs: 50,
            batch_size: 32,
            learning_rate: 1e-3,
            validation_split: 0.2,
            patience: 5,
            network: LstmRegressorConfig::default(),
        }
    }
}

impl TrainerConfig {
    /// Check that all hyperparameters are in valid ranges
    pub fn validate(&self) -> Result<(), String> {
        if self.epochs == 0 {
            return Err("epochs must be at least 1".to_string());
        }

        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".to_string());
        }

        if self.learning_rate <= 0.0 {
            return Err(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            ));
        }

        if !(0.0..1.0).contains(&self.validation_split) {
            return Err(format!(
                "validation_split must be in [0, 1), got {}",
                self.validation_split
            ));
        }

        if self.network.hidden_size == 0 || self.network.sequence_length == 0 {
            return Err("network sizes must be at least 1".to_string());
        }

        Ok(())
    }
}

/// Outcome of a training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub epochs_run: usize,
    pub final_train_loss: f32,
    pub best_validation_loss: Option<f32>,
    pub stopped_early: bool,
}

/// Owns the network and optimizer while training
pub struct Trainer<B: AutodiffBackend> {
    network: LstmRegressor<B>,
    optim: OptimizerAdaptor<Adam, LstmRegressor<B>, B>,
    config: TrainerConfig,
    device: B::Device,
}

impl<B: AutodiffBackend> Trainer<B> {
    pub fn new(config: TrainerConfig, device: B::Device) -> Result<Self> {
        if let Err(msg) = config.validate() {
            bail!("Invalid trainer configuration: {}", msg);
        }

        let network = config.network.init::<B>(&device);
        let optim = AdamConfig::new().init();

        Ok(Self {
            network,
            optim,
            config,
            device,
        })
    }

    /// Run one shuffled pass over `data`, returning the mean batch loss
    pub fn train_epoch(&mut self, data: &SequenceDataset) -> f32 {
        let mut indices: Vec<usize> = (0..data.len()).collect();
        indices.shuffle(&mut rand::thread_rng());

        let mut total_loss = 0.0;
        let mut n_batches = 0;

        for chunk in indices.chunks(self.config.batch_size) {
            let (inputs, targets) = data.batch(chunk);
            let inputs: Tensor<B, 3> = Tensor::from_data(inputs, &self.device);
            let targets: Tensor<B, 2> = Tensor::from_data(targets, &self.device);

            let predictions = self.network.forward(inputs);
            let loss = mse_loss(predictions, targets);

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &self.network);
            self.network = self
                .optim
                .step(self.config.learning_rate, self.network.clone(), grads);

            total_loss += loss.into_scalar().elem::<f32>();
            n_batches += 1;
        }

        if n_batches == 0 {
            0.0
        } else {
            total_loss / n_batches as f32
        }
    }

    /// Mean squared error over `data` without tracking gradients
    pub fn evaluate(&self, data: &SequenceDataset) -> f32 {
        let network = self.network.valid();
        let indices: Vec<usize> = (0..data.len()).collect();

        let mut weighted_loss = 0.0;
        for chunk in indices.chunks(self.config.batch_size) {
            let (inputs, targets) = data.batch(chunk);
            let inputs = Tensor::<B::InnerBackend, 3>::from_data(inputs, &self.device);
            let targets = Tensor::<B::InnerBackend, 2>::from_data(targets, &self.device);

            let loss = mse_loss(network.forward(inputs), targets);
            weighted_loss += loss.into_scalar().elem::<f32>() * chunk.len() as f32;
        }

        if data.is_empty() {
            0.0
        } else {
            weighted_loss / data.len() as f32
        }
    }

    pub fn network(&self) -> &LstmRegressor<B> {
        &self.network
    }

    pub fn set_network(&mut self, network: LstmRegressor<B>) {
        self.network = network;
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }
}

/// L = E[(ŷ - y)²]
fn mse_loss<B: Backend>(predictions: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
    let diff = predictions - targets;
    (diff.clone() * diff).mean()
}

/// Stops training once the monitored loss has not improved for `patience` epochs,
/// keeping a copy of the best model seen
#[derive(Debug, Clone)]
pub struct EarlyStopping<M> {
    patience: usize,
    best_loss: Option<f32>,
    best_model: Option<M>,
    epochs_without_improvement: usize,
}

impl<M: Clone> EarlyStopping<M> {
    pub fn new(patience: usize) -> Self {
        Self {
            patience,
            best_loss: None,
            best_model: None,
            epochs_without_improvement: 0,
        }
    }

    /// Record an epoch's loss. Returns true when training should stop.
    pub fn observe(&mut self, loss: f32, model: &M) -> bool {
        let improved = match self.best_loss {
            Some(best) => loss < best,
            None => loss.is_finite(),
        };

        if improved {
            self.best_loss = Some(loss);
            self.best_model = Some(model.clone());
            self.epochs_without_improvement = 0;
        } else {
            self.epochs_without_improvement += 1;
        }

        self.patience > 0 && self.epochs_without_improvement >= self.patience
    }

    pub fn best_loss(&self) -> Option<f32> {
        self.best_loss
    }

    /// Best model seen, if any epoch produced a finite loss
    pub fn into_best(self) -> Option<M> {
        self.best_model
    }
}
