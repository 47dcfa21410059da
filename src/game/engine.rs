use anyhow::{Result, bail};

use super::{
    action::PlayerInput,
    character::Character,
    config::GameConfig,
    enemy::Enemy,
    gate::GateOutcome,
    state::RoundState,
};
use crate::predictor::{NormalizationBounds, Predictor};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the player started a jump this frame
    pub player_jumped: bool,
    /// Whether the enemy started a jump this frame
    pub enemy_jumped: bool,
    /// What the prediction gate did this frame
    pub prediction: GateOutcome,
    /// Whether the enemy caught the player this frame
    pub caught: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the round has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn ended() -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                player_jumped: false,
                enemy_jumped: false,
                prediction: GateOutcome::Waiting,
                caught: false,
            },
        }
    }
}

/// The session: configuration, normalization bounds and predictor loaded once at
/// startup and shared by every round
pub struct GameEngine {
    config: GameConfig,
    bounds: NormalizationBounds,
    predictor: Box<dyn Predictor>,
}

impl GameEngine {
    /// Create a session, rejecting a predictor whose window length disagrees with
    /// the configured history length
    pub fn new(
        config: GameConfig,
        bounds: NormalizationBounds,
        predictor: Box<dyn Predictor>,
    ) -> Result<Self> {
        if let Err(msg) = config.validate() {
            bail!("Invalid game configuration: {}", msg);
        }
        bounds.validate()?;

        if predictor.sequence_length() != config.sequence_length {
            bail!(
                "predictor '{}' expects windows of {} positions but the game keeps {}",
                predictor.name(),
                predictor.sequence_length(),
                config.sequence_length
            );
        }

        Ok(Self {
            config,
            bounds,
            predictor,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bounds(&self) -> &NormalizationBounds {
        &self.bounds
    }

    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    /// Start a new round with both characters at their spawn points
    pub fn reset(&self) -> RoundState {
        let config = &self.config;
        let player = Character::player_spawn(config);
        let enemy_body = Character::enemy_spawn(config);

        RoundState::new(player, Enemy::new(enemy_body, config))
    }

    /// Execute one frame of the round
    pub fn step(&self, state: &mut RoundState, input: PlayerInput) -> StepResult {
        if !state.is_running {
            return StepResult::ended();
        }

        let player_jumped = state.player.drive(input, &self.config);
        let enemy = state.enemy.update(
            state.player.x,
            &self.bounds,
            self.predictor.as_ref(),
            &self.config,
        );
        state.frames += 1;

        let caught = state.is_caught();
        if caught {
            state.is_running = false;
            tracing::info!(score = state.score, frames = state.frames, "player caught");
        } else {
            state.score += 1;
        }

        StepResult {
            terminated: caught,
            info: StepInfo {
                player_jumped,
                enemy_jumped: enemy.jumped,
                prediction: enemy.prediction,
                caught,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::{LastValuePredictor, PredictionError};

    fn engine() -> GameEngine {
        let config = GameConfig::default();
        let bounds = NormalizationBounds::new(0.0, config.max_x()).unwrap();
        let predictor = Box::new(LastValuePredictor::new(config.sequence_length));
        GameEngine::new(config, bounds, predictor).unwrap()
    }

    /// Always fails, so the enemy keeps its spawn target
    struct BrokenPredictor;

    impl Predictor for BrokenPredictor {
        fn predict(&self, _window: &[f32]) -> Result<f32, PredictionError> {
            Err(PredictionError::Backend("offline".to_string()))
        }

        fn sequence_length(&self) -> usize {
            10
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[test]
    fn test_reset() {
        let engine = engine();
        let state = engine.reset();

        assert!(state.is_running);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.x, 168.0);
        assert_eq!(state.player.y, 536.0);
        assert_eq!(state.enemy.body.bottom(), 600.0);
        assert_eq!(state.enemy.body.x, 368.0);
        assert_eq!(state.enemy.target_x(), 368.0);
        assert!(state.player.grounded);
        assert!(state.enemy.body.grounded);
        assert!(state.enemy.history().is_empty());
    }

    #[test]
    fn test_fresh_round_jumps_only_from_floor() {
        let engine = engine();
        let mut state = engine.reset();
        let floor = engine.config().field_height;

        let result = engine.step(&mut state, PlayerInput::IDLE);
        // Enemy spawns 200 px away, so it takes off from the floor at once
        assert!(result.info.enemy_jumped);
        assert!(state.enemy.body.bottom() < floor);

        let jump = PlayerInput {
            jump: true,
            ..PlayerInput::IDLE
        };
        let result = engine.step(&mut state, jump);
        assert!(result.info.player_jumped);
        assert!(!result.info.enemy_jumped);

        // Both airborne now; no further takeoff until they land
        let result = engine.step(&mut state, jump);
        assert!(!result.info.player_jumped);
        assert!(!result.info.enemy_jumped);
    }

    #[test]
    fn test_rejects_mismatched_window_length() {
        let config = GameConfig::default();
        let bounds = NormalizationBounds::new(0.0, 736.0).unwrap();
        let predictor = Box::new(LastValuePredictor::new(5));

        assert!(GameEngine::new(config, bounds, predictor).is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.prediction_interval = 0;
        let bounds = NormalizationBounds::new(0.0, 736.0).unwrap();
        let predictor = Box::new(LastValuePredictor::new(10));

        assert!(GameEngine::new(config, bounds, predictor).is_err());
    }

    #[test]
    fn test_score_counts_survived_frames() {
        let engine = engine();
        let mut state = engine.reset();

        for _ in 0..5 {
            let result = engine.step(&mut state, PlayerInput::IDLE);
            assert!(!result.terminated);
        }

        assert_eq!(state.score, 5);
        assert_eq!(state.frames, 5);
        assert_eq!(state.enemy.history().len(), 5);
    }

    #[test]
    fn test_player_moves_with_input() {
        let engine = engine();
        let mut state = engine.reset();

        let input = PlayerInput {
            left: true,
            ..PlayerInput::IDLE
        };
        engine.step(&mut state, input);

        assert_eq!(state.player.x, 163.0);
        assert_eq!(state.enemy.history().latest(), Some(163.0));
    }

    #[test]
    fn test_collision_ends_round_without_scoring() {
        let engine = engine();
        let mut state = engine.reset();
        state.score = 42;
        state.enemy.body.x = state.player.x + 10.0;
        state.enemy.body.y = state.player.y;

        let result = engine.step(&mut state, PlayerInput::IDLE);

        assert!(result.terminated);
        assert!(result.info.caught);
        assert!(!state.is_running);
        assert_eq!(state.score, 42);
    }

    #[test]
    fn test_ended_round_does_not_advance() {
        let engine = engine();
        let mut state = engine.reset();
        state.is_running = false;
        let player_before = state.player;

        let result = engine.step(&mut state, PlayerInput::IDLE);

        assert!(result.terminated);
        assert_eq!(state.score, 0);
        assert_eq!(state.frames, 0);
        assert_eq!(state.player, player_before);
    }

    #[test]
    fn test_stationary_player_is_caught() {
        let engine = engine();
        let mut state = engine.reset();

        let mut terminated = false;
        for _ in 0..300 {
            if engine.step(&mut state, PlayerInput::IDLE).terminated {
                terminated = true;
                break;
            }
        }

        assert!(terminated, "enemy never reached an idle player");
        assert_eq!(u64::from(state.score), state.frames - 1);
    }

    #[test]
    fn test_prediction_failures_do_not_end_round() {
        let config = GameConfig::default();
        let bounds = NormalizationBounds::new(0.0, config.max_x()).unwrap();
        let engine = GameEngine::new(config, bounds, Box::new(BrokenPredictor)).unwrap();
        let mut state = engine.reset();

        // Run away from the enemy so contact never happens
        let input = PlayerInput {
            left: true,
            ..PlayerInput::IDLE
        };
        let mut failures = 0;
        for _ in 0..40 {
            let result = engine.step(&mut state, input);
            assert!(!result.terminated);
            if let GateOutcome::Failed(_) = result.info.prediction {
                failures += 1;
            }
        }

        assert_eq!(failures, 4);
        assert_eq!(state.enemy.target_x(), 368.0);
        assert_eq!(state.score, 40);
    }
}
