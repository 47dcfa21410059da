use super::{
    character::Character,
    config::GameConfig,
    gate::{GateOutcome, PredictionGate},
    history::PositionHistory,
    pursuit,
};
use crate::predictor::{NormalizationBounds, Predictor};

/// What the enemy did on a frame
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyFrame {
    pub prediction: GateOutcome,
    pub jumped: bool,
}

/// The pursuing character
///
/// Owns the round-scoped pursuit state: the window of observed player positions and
/// the gate holding the current target.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub body: Character,
    history: PositionHistory,
    gate: PredictionGate,
}

impl Enemy {
    /// Spawn with an empty history, targeting its own starting position
    pub fn new(body: Character, config: &GameConfig) -> Self {
        Self {
            history: PositionHistory::new(config.sequence_length),
            gate: PredictionGate::new(config.prediction_interval, body.x),
            body,
        }
    }

    pub fn history(&self) -> &PositionHistory {
        &self.history
    }

    pub fn gate(&self) -> &PredictionGate {
        &self.gate
    }

    pub fn target_x(&self) -> f32 {
        self.gate.target_x()
    }

    /// Advance one frame after the player has moved to `player_x`
    pub fn update(
        &mut self,
        player_x: f32,
        bounds: &NormalizationBounds,
        predictor: &dyn Predictor,
        config: &GameConfig,
    ) -> EnemyFrame {
        self.history.push(player_x);
        let prediction = self.gate.tick(&self.history, bounds, predictor);

        let jumped = pursuit::steer(&mut self.body, self.gate.target_x(), player_x, config);
        self.body.apply_gravity(config);

        EnemyFrame { prediction, jumped }
    }
}
