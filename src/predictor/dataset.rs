//! Sliding-window training data built from a movement log

use anyhow::{Context, Result, bail};
use burn::tensor::TensorData;
use std::path::Path;

use super::NormalizationBounds;
use crate::recording::read_x_positions;

/// Read the x-position series from a movement log
pub fn load_x_positions(path: &Path) -> Result<Vec<f32>> {
    let positions = read_x_positions(path)
        .with_context(|| format!("Failed to load training data from {:?}", path))?;
    if positions.is_empty() {
        bail!("{:?} contains no recorded frames", path);
    }
    Ok(positions)
}

/// Windows of `sequence_length` normalized positions, each paired with the
/// position that followed it
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDataset {
    windows: Vec<Vec<f32>>,
    targets: Vec<f32>,
    sequence_length: usize,
}

impl SequenceDataset {
    /// Normalize `positions` and cut them into overlapping windows
    ///
    /// A series of length L yields L - sequence_length samples.
    pub fn from_positions(
        positions: &[f32],
        bounds: &NormalizationBounds,
        sequence_length: usize,
    ) -> Result<Self> {
        if positions.len() <= sequence_length {
            bail!(
                "need more than {} recorded frames to build one training window, got {}",
                sequence_length,
                positions.len()
            );
        }

        let scaled: Vec<f32> = positions.iter().map(|&x| bounds.normalize(x)).collect();

        let (windows, targets) = (0..scaled.len() - sequence_length)
            .map(|i| {
                (
                    scaled[i..i + sequence_length].to_vec(),
                    scaled[i + sequence_length],
                )
            })
            .unzip();

        Ok(Self {
            windows,
            targets,
            sequence_length,
        })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn sequence_length(&self) -> usize {
        self.sequence_length
    }

    /// Split off the trailing `fraction` of samples for validation
    ///
    /// The split is chronological, so validation windows come from the end of the
    /// recording rather than being interleaved with training windows.
    pub fn split(mut self, fraction: f32) -> (SequenceDataset, Option<SequenceDataset>) {
        let n_valid = (self.len() as f32 * fraction).floor() as usize;
        if n_valid == 0 || n_valid >= self.len() {
            return (self, None);
        }

        let split_at = self.len() - n_valid;
        let valid = SequenceDataset {
            windows: self.windows.split_off(split_at),
            targets: self.targets.split_off(split_at),
            sequence_length: self.sequence_length,
        };
        (self, Some(valid))
    }

    /// Gather samples into `[n, sequence_length, 1]` inputs and `[n, 1]` targets
    pub fn batch(&self, indices: &[usize]) -> (TensorData, TensorData) {
        let mut inputs = Vec::with_capacity(indices.len() * self.sequence_length);
        let mut targets = Vec::with_capacity(indices.len());

        for &idx in indices {
            inputs.extend_from_slice(&self.windows[idx]);
            targets.push(self.targets[idx]);
        }

        (
            TensorData::new(inputs, [indices.len(), self.sequence_length, 1]),
            TensorData::new(targets, [indices.len(), 1]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn bounds() -> NormalizationBounds {
        NormalizationBounds::new(0.0, 100.0).unwrap()
    }

    #[test]
    fn test_windows_and_targets() {
        let positions: Vec<f32> = (0..15).map(|i| i as f32 * 10.0).collect();
        let dataset = SequenceDataset::from_positions(&positions, &bounds(), 10).unwrap();

        assert_eq!(dataset.len(), 5);
        let (inputs, targets) = dataset.batch(&[0, 4]);
        let inputs: Vec<f32> = inputs.to_vec().unwrap();
        let targets: Vec<f32> = targets.to_vec().unwrap();

        assert_eq!(inputs.len(), 20);
        assert_eq!(inputs[0], 0.0);
        assert_eq!(inputs[9], 0.9);
        assert_eq!(inputs[10], 0.4);
        assert_eq!(targets, vec![1.0, 1.4]);
    }

    #[test]
    fn test_too_short_series() {
        let positions = vec![1.0; 10];
        assert!(SequenceDataset::from_positions(&positions, &bounds(), 10).is_err());
    }

    #[test]
    fn test_split_is_chronological() {
        let positions: Vec<f32> = (0..20).map(|i| i as f32).collect();
        let dataset = SequenceDataset::from_positions(&positions, &bounds(), 10).unwrap();

        let (train, valid) = dataset.split(0.2);
        let valid = valid.unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(valid.len(), 2);

        let (_, valid_targets) = valid.batch(&[0, 1]);
        let valid_targets: Vec<f32> = valid_targets.to_vec().unwrap();
        assert_eq!(valid_targets, vec![0.18, 0.19]);
    }

    #[test]
    fn test_split_too_small_keeps_everything() {
        let positions: Vec<f32> = (0..13).map(|i| i as f32).collect();
        let dataset = SequenceDataset::from_positions(&positions, &bounds(), 10).unwrap();

        let (train, valid) = dataset.split(0.2);
        assert_eq!(train.len(), 3);
        assert!(valid.is_none());
    }

    #[test]
    fn test_load_x_positions_empty_log() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "timestamp,x_position,y_position,action\n").unwrap();

        assert!(load_x_positions(&path).is_err());
    }
}
