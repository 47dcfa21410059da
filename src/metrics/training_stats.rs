//! Per-epoch loss tracking for the predictor trainer

use std::collections::VecDeque;

/// Training loss tracker with rolling averages
///
/// Keeps the most recent epoch losses for smoothed reporting, plus the best
/// validation loss seen over the whole run.
///
/// # Example
///
/// ```rust
/// use catch_me::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(5);
/// stats.record_epoch(0.040, Some(0.050));
/// stats.record_epoch(0.020, Some(0.030));
///
/// assert_eq!(stats.best_epoch(), Some(2));
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Training losses (rolling window)
    train_losses: VecDeque<f32>,

    /// Validation losses (rolling window)
    validation_losses: VecDeque<f32>,

    /// Epochs recorded so far
    total_epochs: usize,

    /// Lowest validation loss and the 1-based epoch it came from
    best: Option<(f32, usize)>,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    pub fn new(window_size: usize) -> Self {
        Self {
            train_losses: VecDeque::with_capacity(window_size),
            validation_losses: VecDeque::with_capacity(window_size),
            total_epochs: 0,
            best: None,
            window_size,
        }
    }

    /// Record one finished epoch
    pub fn record_epoch(&mut self, train_loss: f32, validation_loss: Option<f32>) {
        self.total_epochs += 1;
        Self::push_deque(&mut self.train_losses, train_loss, self.window_size);

        if let Some(loss) = validation_loss {
            Self::push_deque(&mut self.validation_losses, loss, self.window_size);
            let improved = match self.best {
                Some((best, _)) => loss < best,
                None => loss.is_finite(),
            };
            if improved {
                self.best = Some((loss, self.total_epochs));
            }
        }
    }

    pub fn mean_train_loss(&self) -> f32 {
        Self::mean(&self.train_losses)
    }

    pub fn mean_validation_loss(&self) -> f32 {
        Self::mean(&self.validation_losses)
    }

    pub fn last_train_loss(&self) -> Option<f32> {
        self.train_losses.back().copied()
    }

    pub fn last_validation_loss(&self) -> Option<f32> {
        self.validation_losses.back().copied()
    }

    pub fn best_validation_loss(&self) -> Option<f32> {
        self.best.map(|(loss, _)| loss)
    }

    /// 1-based epoch with the lowest validation loss
    pub fn best_epoch(&self) -> Option<usize> {
        self.best.map(|(_, epoch)| epoch)
    }

    pub fn total_epochs(&self) -> usize {
        self.total_epochs
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the latest epoch and the rolling means
    pub fn format_summary(&self) -> String {
        let val = match self.last_validation_loss() {
            Some(loss) => format!("{:.6}", loss),
            None => "-".to_string(),
        };
        let best = match self.best {
            Some((loss, epoch)) => format!("{:.6} (epoch {})", loss, epoch),
            None => "-".to_string(),
        };

        format!(
            "Epoch: {} | Train: {:.6} | Val: {} | Mean Train: {:.6} | Best Val: {}",
            self.total_epochs,
            self.last_train_loss().unwrap_or(0.0),
            val,
            self.mean_train_loss(),
            best,
        )
    }

    fn mean(deque: &VecDeque<f32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f32>() / deque.len() as f32
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let stats = TrainingStats::new(10);
        assert_eq!(stats.window_size(), 10);
        assert_eq!(stats.total_epochs(), 0);
        assert_eq!(stats.best_validation_loss(), None);
        assert_eq!(stats.mean_train_loss(), 0.0);
    }

    #[test]
    fn test_rolling_average() {
        let mut stats = TrainingStats::new(3);

        stats.record_epoch(1.0, None);
        stats.record_epoch(2.0, None);
        stats.record_epoch(3.0, None);
        assert!((stats.mean_train_loss() - 2.0).abs() < 1e-5);

        // A 4th epoch evicts the first
        stats.record_epoch(4.0, None);
        assert_eq!(stats.total_epochs(), 4);
        assert!((stats.mean_train_loss() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_best_validation_epoch() {
        let mut stats = TrainingStats::new(10);

        stats.record_epoch(0.5, Some(0.40));
        stats.record_epoch(0.3, Some(0.20));
        stats.record_epoch(0.2, Some(0.25));

        assert_eq!(stats.best_validation_loss(), Some(0.20));
        assert_eq!(stats.best_epoch(), Some(2));
        assert_eq!(stats.last_validation_loss(), Some(0.25));
    }

    #[test]
    fn test_format_summary() {
        let mut stats = TrainingStats::new(10);
        stats.record_epoch(0.0125, Some(0.02));

        let summary = stats.format_summary();
        assert!(summary.contains("Epoch: 1"));
        assert!(summary.contains("Train: 0.012500"));
        assert!(summary.contains("Val: 0.020000"));
        assert!(summary.contains("Best Val: 0.020000 (epoch 1)"));
    }

    #[test]
    fn test_format_summary_without_validation() {
        let mut stats = TrainingStats::new(10);
        stats.record_epoch(0.5, None);

        let summary = stats.format_summary();
        assert!(summary.contains("Val: -"));
        assert!(summary.contains("Best Val: -"));
    }
}
