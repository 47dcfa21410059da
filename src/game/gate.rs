use super::history::PositionHistory;
use crate::predictor::{NormalizationBounds, PredictionError, Predictor};

/// What the gate did on a frame
#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    /// Cooling down or the history is not full yet; the target is unchanged
    Waiting,
    /// The predictor ran and the target moved to this x
    Predicted(f32),
    /// The predictor ran but failed; the previous target is kept
    Failed(PredictionError),
}

/// Decides when to query the predictor and remembers the last target
///
/// The counter advances every frame. Once it has reached the interval and the
/// history is full, the next frame resets it and runs exactly one prediction.
#[derive(Debug, Clone)]
pub struct PredictionGate {
    interval: u32,
    counter: u32,
    target_x: f32,
    predictions: u64,
    failures: u64,
}

impl PredictionGate {
    pub fn new(interval: u32, initial_target_x: f32) -> Self {
        Self {
            interval,
            counter: 0,
            target_x: initial_target_x,
            predictions: 0,
            failures: 0,
        }
    }

    pub fn target_x(&self) -> f32 {
        self.target_x
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Successful predictions so far
    pub fn predictions(&self) -> u64 {
        self.predictions
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Advance one frame, querying the predictor if due
    pub fn tick(
        &mut self,
        history: &PositionHistory,
        bounds: &NormalizationBounds,
        predictor: &dyn Predictor,
    ) -> GateOutcome {
        self.counter += 1;

        if self.counter < self.interval || !history.is_full() {
            return GateOutcome::Waiting;
        }
        self.counter = 0;

        let window: Vec<f32> = history.iter().map(|x| bounds.normalize(x)).collect();

        let result = predictor.predict(&window).and_then(|y| {
            if y.is_finite() {
                Ok(y)
            } else {
                Err(PredictionError::NonFinite(y))
            }
        });

        match result {
            Ok(normalized) => {
                self.target_x = bounds.denormalize(normalized);
                self.predictions += 1;
                tracing::trace!(
                    predictor = predictor.name(),
                    target_x = self.target_x,
                    "enemy target updated"
                );
                GateOutcome::Predicted(self.target_x)
            }
            Err(err) => {
                self.failures += 1;
                tracing::warn!(
                    predictor = predictor.name(),
                    failures = self.failures,
                    "prediction failed, keeping target {}: {}",
                    self.target_x,
                    err
                );
                GateOutcome::Failed(err)
            }
        }
    }
}
