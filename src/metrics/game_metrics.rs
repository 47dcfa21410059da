use std::time::{Duration, Instant};

use crate::game::{GateOutcome, StepInfo};

/// Session-wide numbers shown in the HUD and on the game-over screen
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub rounds_played: u32,
    pub predictions: u64,
    pub prediction_failures: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            rounds_played: 0,
            predictions: 0,
            prediction_failures: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_round_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_step(&mut self, info: &StepInfo) {
        match info.prediction {
            GateOutcome::Predicted(_) => self.predictions += 1,
            GateOutcome::Failed(_) => self.prediction_failures += 1,
            GateOutcome::Waiting => {}
        }
    }

    /// Returns true when `final_score` is a new best
    pub fn on_round_over(&mut self, final_score: u32) -> bool {
        self.rounds_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
            return true;
        }
        false
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
