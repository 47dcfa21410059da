use super::{character::Character, enemy::Enemy};

/// Everything that changes during one round
///
/// Built fresh by `GameEngine::reset` and mutated only through `GameEngine::step`.
#[derive(Debug, Clone)]
pub struct RoundState {
    pub player: Character,
    pub enemy: Enemy,
    /// Frames survived without contact
    pub score: u32,
    /// Frames simulated, including the fatal one
    pub frames: u64,
    pub is_running: bool,
}

impl RoundState {
    pub fn new(player: Character, enemy: Enemy) -> Self {
        Self {
            player,
            enemy,
            score: 0,
            frames: 0,
            is_running: true,
        }
    }

    /// Whether the player and enemy boxes currently overlap
    pub fn is_caught(&self) -> bool {
        self.player.overlaps(&self.enemy.body)
    }

    /// Horizontal gap between the two characters' left edges
    pub fn separation(&self) -> f32 {
        (self.player.x - self.enemy.body.x).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    #[test]
    fn test_new_round_is_running() {
        let config = GameConfig::default();
        let player = Character::on_floor(168.0, &config);
        let enemy = Enemy::new(Character::on_floor(368.0, &config), &config);

        let state = RoundState::new(player, enemy);

        assert!(state.is_running);
        assert_eq!(state.score, 0);
        assert_eq!(state.frames, 0);
        assert!(!state.is_caught());
        assert_eq!(state.separation(), 200.0);
    }

    #[test]
    fn test_caught_when_boxes_overlap() {
        let config = GameConfig::default();
        let player = Character::on_floor(168.0, &config);
        let enemy = Enemy::new(Character::on_floor(198.0, &config), &config);

        assert!(RoundState::new(player, enemy).is_caught());
    }
}
