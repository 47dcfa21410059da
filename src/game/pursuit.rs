//! Enemy steering: walk toward the predicted target, jump based on where the
//! player actually is

use super::character::Character;
use super::config::GameConfig;

/// Step the enemy one frame toward `target_x` at its fixed speed
///
/// The step never snaps onto the target, so the enemy can overshoot by up to one
/// step and correct on the following frames.
pub fn step_toward(enemy: &mut Character, target_x: f32, config: &GameConfig) {
    if enemy.x < target_x {
        enemy.move_horizontal(config.enemy_speed, config);
    } else if enemy.x > target_x {
        enemy.move_horizontal(-config.enemy_speed, config);
    } else {
        enemy.clamp_horizontal(config);
    }
}

/// Whether a grounded enemy should jump this frame
///
/// Any of: the player is far away; the player is well to the left and the enemy
/// is not hugging the left wall; the player is well to the right and the enemy is
/// not hugging the right wall. The cases overlap near the walls.
pub fn should_jump(enemy: &Character, player_x: f32, config: &GameConfig) -> bool {
    if !enemy.grounded {
        return false;
    }

    let far_away = (enemy.x - player_x).abs() > config.jump_distance;
    let player_left =
        player_x < enemy.x - config.jump_margin && enemy.x > config.edge_margin;
    let player_right = player_x > enemy.x + config.jump_margin
        && enemy.x < config.field_width - config.edge_margin;

    far_away || player_left || player_right
}

/// Apply one frame of pursuit: horizontal step, then the jump decision.
/// Returns whether the enemy jumped.
pub fn steer(enemy: &mut Character, target_x: f32, player_x: f32, config: &GameConfig) -> bool {
    step_toward(enemy, target_x, config);
    if should_jump(enemy, player_x, config) {
        enemy.jump(config)
    } else {
        false
    }
}
