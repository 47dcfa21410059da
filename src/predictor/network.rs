//! Sequence-to-one LSTM regressor
//!
//! # Architecture
//!
//! ```text
//! Input: [batch, sequence_length, 1]   normalized x-positions, oldest first
//!   ↓ LSTM(1 → hidden_size)
//!   ↓ Last timestep: [batch, hidden_size]
//!   ↓ Linear(hidden_size → 1)
//! Output: [batch, 1]                   normalized next x-position
//! ```
//!
//! # Example
//!
//! ```rust
//! use catch_me::predictor::LstmRegressorConfig;
//! use burn::backend::ndarray::NdArrayDevice;
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//!
//! type Backend = NdArray<f32>;
//!
//! let device = NdArrayDevice::default();
//! let network = LstmRegressorConfig::default().init::<Backend>(&device);
//!
//! let windows = Tensor::zeros([4, 10, 1], &device);
//! let prediction = network.forward(windows);
//! assert_eq!(prediction.dims(), [4, 1]);
//! ```

use burn::{
    module::Module,
    nn::{Linear, LinearConfig, Lstm, LstmConfig},
    tensor::{Tensor, TensorData, backend::Backend},
};
use serde::{Deserialize, Serialize};

use super::{PredictionError, Predictor, check_window};

/// Configuration for the LSTM regressor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LstmRegressorConfig {
    /// Features per timestep (1: the x-position)
    pub input_size: usize,

    /// LSTM hidden state size (default: 64)
    pub hidden_size: usize,

    /// Timesteps per input window (default: 10)
    pub sequence_length: usize,
}

impl LstmRegressorConfig {
    pub fn new(hidden_size: usize, sequence_length: usize) -> Self {
        Self {
            input_size: 1,
            hidden_size,
            sequence_length,
        }
    }

    /// Initialize the regressor with fresh weights
    pub fn init<B: Backend>(&self, device: &B::Device) -> LstmRegressor<B> {
        LstmRegressor {
            lstm: LstmConfig::new(self.input_size, self.hidden_size, true).init(device),
            head: LinearConfig::new(self.hidden_size, 1).init(device),
        }
    }
}

impl Default for LstmRegressorConfig {
    fn default() -> Self {
        Self::new(64, 10)
    }
}

/// LSTM followed by a linear head reading the last hidden state
#[derive(Module, Debug)]
pub struct LstmRegressor<B: Backend> {
    lstm: Lstm<B>,
    head: Linear<B>,
}

impl<B: Backend> LstmRegressor<B> {
    /// Forward pass
    ///
    /// * `windows` - `[batch, sequence_length, input_size]`
    ///
    /// Returns `[batch, 1]`.
    pub fn forward(&self, windows: Tensor<B, 3>) -> Tensor<B, 2> {
        let (hidden_states, _state) = self.lstm.forward(windows, None);

        // Keep only the final timestep: [batch, seq, hidden] → [batch, hidden]
        let [batch_size, seq_len, hidden_size] = hidden_states.dims();
        let last = hidden_states
            .slice([0..batch_size, seq_len - 1..seq_len, 0..hidden_size])
            .reshape([batch_size, hidden_size]);

        self.head.forward(last)
    }
}

/// A trained regressor behind the `Predictor` boundary
pub struct LstmPredictor<B: Backend> {
    network: LstmRegressor<B>,
    sequence_length: usize,
    device: B::Device,
}

impl<B: Backend> LstmPredictor<B> {
    pub fn new(network: LstmRegressor<B>, sequence_length: usize, device: B::Device) -> Self {
        Self {
            network,
            sequence_length,
            device,
        }
    }
}

impl<B: Backend> Predictor for LstmPredictor<B> {
    fn predict(&self, window: &[f32]) -> Result<f32, PredictionError> {
        check_window(window, self.sequence_length)?;

        let data = TensorData::new(window.to_vec(), [1, self.sequence_length, 1]);
        let input = Tensor::<B, 3>::from_data(data, &self.device);

        let output = self.network.forward(input);
        let values: Vec<f32> = output
            .into_data()
            .to_vec()
            .map_err(|e| PredictionError::Backend(format!("{:?}", e)))?;

        match values.as_slice() {
            [value] if value.is_finite() => Ok(*value),
            [value] => Err(PredictionError::NonFinite(*value)),
            other => Err(PredictionError::MalformedOutput(other.len())),
        }
    }

    fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    fn name(&self) -> &str {
        "lstm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::Autodiff;
    use burn::backend::ndarray::{NdArray, NdArrayDevice};
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<NdArray<f32>>;

    #[test]
    fn test_forward_pass_shapes() {
        let device = NdArrayDevice::default();
        let network = LstmRegressorConfig::default().init::<TestBackend>(&device);

        for batch_size in [1, 4, 32] {
            let windows = Tensor::zeros([batch_size, 10, 1], &device);
            let output = network.forward(windows);
            assert_eq!(output.dims(), [batch_size, 1]);
        }
    }

    #[test]
    fn test_custom_hidden_size() {
        let device = NdArrayDevice::default();
        let network = LstmRegressorConfig::new(8, 5).init::<TestBackend>(&device);

        let output = network.forward(Tensor::zeros([2, 5, 1], &device));
        assert_eq!(output.dims(), [2, 1]);
    }

    #[test]
    fn test_output_finite() {
        let device = NdArrayDevice::default();
        let network = LstmRegressorConfig::default().init::<TestBackend>(&device);

        let windows = Tensor::random([8, 10, 1], Distribution::Uniform(0.0, 1.0), &device);
        let output: Vec<f32> = network.forward(windows).into_data().to_vec().unwrap();

        for val in output {
            assert!(val.is_finite(), "Prediction should be finite, got: {}", val);
        }
    }

    #[test]
    fn test_gradient_flow() {
        let device = NdArrayDevice::default();
        let network = LstmRegressorConfig::new(16, 10).init::<TestAutodiffBackend>(&device);

        let windows = Tensor::ones([2, 10, 1], &device).require_grad();
        let loss = network.forward(windows.clone()).sum();
        let gradients = loss.backward();

        assert!(
            windows.grad(&gradients).is_some(),
            "Gradients should flow back to the input window"
        );
    }

    #[test]
    fn test_predictor_returns_single_value() {
        let device = NdArrayDevice::default();
        let network = LstmRegressorConfig::default().init::<TestBackend>(&device);
        let predictor = LstmPredictor::new(network, 10, device);

        let prediction = predictor.predict(&[0.5; 10]);
        assert!(prediction.is_ok());
        assert!(prediction.unwrap().is_finite());
        assert_eq!(predictor.name(), "lstm");
    }

    #[test]
    fn test_predictor_rejects_short_window() {
        let device = NdArrayDevice::default();
        let network = LstmRegressorConfig::default().init::<TestBackend>(&device);
        let predictor = LstmPredictor::new(network, 10, device);

        assert_eq!(
            predictor.predict(&[0.5; 3]),
            Err(PredictionError::WindowShape {
                expected: 10,
                actual: 3
            })
        );
    }
}
