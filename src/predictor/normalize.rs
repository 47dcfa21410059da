use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Min-max bounds mapping raw x-positions onto the predictor's [0, 1] range
///
/// Fitted once by the trainer and loaded once by the game; never recomputed while
/// playing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationBounds {
    min: f32,
    max: f32,
}

impl NormalizationBounds {
    /// Create bounds, rejecting empty or inverted ranges
    pub fn new(min: f32, max: f32) -> Result<Self> {
        let bounds = Self { min, max };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Fit bounds to the smallest and largest value in `data`
    pub fn fit(data: &[f32]) -> Result<Self> {
        if data.is_empty() {
            bail!("cannot fit normalization bounds to an empty series");
        }
        let min = data.iter().copied().fold(f32::INFINITY, f32::min);
        let max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        Self::new(min, max)
    }

    /// Check the invariant `max > min`; required after deserializing
    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            bail!(
                "normalization bounds must be finite, got min={} max={}",
                self.min,
                self.max
            );
        }
        if self.max <= self.min {
            bail!(
                "normalization max ({}) must be greater than min ({})",
                self.max,
                self.min
            );
        }
        Ok(())
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    fn range(&self) -> f32 {
        self.max - self.min
    }

    pub fn normalize(&self, x: f32) -> f32 {
        (x - self.min) / self.range()
    }

    pub fn denormalize(&self, y: f32) -> f32 {
        y * self.range() + self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_endpoints() {
        let bounds = NormalizationBounds::new(100.0, 300.0).unwrap();
        assert_eq!(bounds.normalize(100.0), 0.0);
        assert_eq!(bounds.normalize(300.0), 1.0);
        assert_eq!(bounds.normalize(200.0), 0.5);
    }

    #[test]
    fn test_denormalize_inverts_normalize() {
        let bounds = NormalizationBounds::new(0.0, 736.0).unwrap();
        let mut x = 0.0;
        while x <= 736.0 {
            let back = bounds.denormalize(bounds.normalize(x));
            assert!((back - x).abs() < 1e-3, "x={} came back as {}", x, back);
            x += 3.7;
        }
    }

    #[test]
    fn test_out_of_range_values_extrapolate() {
        let bounds = NormalizationBounds::new(0.0, 100.0).unwrap();
        assert_eq!(bounds.normalize(150.0), 1.5);
        assert_eq!(bounds.denormalize(-0.5), -50.0);
    }

    #[test]
    fn test_rejects_degenerate_bounds() {
        assert!(NormalizationBounds::new(5.0, 5.0).is_err());
        assert!(NormalizationBounds::new(10.0, 5.0).is_err());
        assert!(NormalizationBounds::new(f32::NAN, 5.0).is_err());
    }

    #[test]
    fn test_fit() {
        let bounds = NormalizationBounds::fit(&[40.0, 12.0, 99.0, 50.0]).unwrap();
        assert_eq!(bounds.min(), 12.0);
        assert_eq!(bounds.max(), 99.0);
    }

    #[test]
    fn test_fit_constant_series_fails() {
        assert!(NormalizationBounds::fit(&[7.0, 7.0, 7.0]).is_err());
        assert!(NormalizationBounds::fit(&[]).is_err());
    }

    #[test]
    fn test_deserialized_bounds_validate() {
        let bounds: NormalizationBounds =
            serde_json::from_str(r#"{ "min": 3.0, "max": 1.0 }"#).unwrap();
        assert!(bounds.validate().is_err());
    }
}
