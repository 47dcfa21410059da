//! Model-free predictors
//!
//! Both work directly in normalized space, so they slot into the same gate as the
//! LSTM without any change to the enemy.

use super::{PredictionError, Predictor, check_window};

/// Predicts that the player stays where they were last seen
#[derive(Debug, Clone)]
pub struct LastValuePredictor {
    sequence_length: usize,
}

impl LastValuePredictor {
    pub fn new(sequence_length: usize) -> Self {
        Self { sequence_length }
    }
}

impl Predictor for LastValuePredictor {
    fn predict(&self, window: &[f32]) -> Result<f32, PredictionError> {
        check_window(window, self.sequence_length)?;
        window
            .last()
            .copied()
            .ok_or(PredictionError::MalformedOutput(0))
    }

    fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    fn name(&self) -> &str {
        "last-value"
    }
}

/// Extends the average velocity over the window a few steps ahead
#[derive(Debug, Clone)]
pub struct ExtrapolatePredictor {
    sequence_length: usize,
    lookahead: f32,
}

impl ExtrapolatePredictor {
    pub fn new(sequence_length: usize, lookahead: f32) -> Self {
        Self {
            sequence_length,
            lookahead,
        }
    }
}

impl Predictor for ExtrapolatePredictor {
    fn predict(&self, window: &[f32]) -> Result<f32, PredictionError> {
        check_window(window, self.sequence_length)?;
        let (first, last) = match (window.first(), window.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Err(PredictionError::MalformedOutput(0)),
        };

        let steps = (window.len().max(2) - 1) as f32;
        let velocity = (last - first) / steps;

        // Stay inside the range the bounds were fitted on
        Ok((last + velocity * self.lookahead).clamp(0.0, 1.0))
    }

    fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    fn name(&self) -> &str {
        "extrapolate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_value() {
        let predictor = LastValuePredictor::new(3);
        assert_eq!(predictor.predict(&[0.1, 0.2, 0.7]), Ok(0.7));
    }

    #[test]
    fn test_last_value_rejects_wrong_window() {
        let predictor = LastValuePredictor::new(3);
        assert!(predictor.predict(&[0.1, 0.2]).is_err());
    }

    #[test]
    fn test_extrapolate_constant_window() {
        let predictor = ExtrapolatePredictor::new(4, 8.0);
        assert_eq!(predictor.predict(&[0.4; 4]), Ok(0.4));
    }

    #[test]
    fn test_extrapolate_moving_right() {
        let predictor = ExtrapolatePredictor::new(5, 2.0);
        // Velocity 0.05 per step, two steps past 0.3
        let prediction = predictor.predict(&[0.1, 0.15, 0.2, 0.25, 0.3]).unwrap();
        assert!((prediction - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_extrapolate_clamps_to_unit_range() {
        let predictor = ExtrapolatePredictor::new(3, 10.0);
        assert_eq!(predictor.predict(&[0.8, 0.9, 1.0]), Ok(1.0));
        assert_eq!(predictor.predict(&[0.2, 0.1, 0.0]), Ok(0.0));
    }
}
