use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the chase game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playfield in pixels
    pub field_width: f32,
    /// Height of the playfield in pixels (the floor sits at this y)
    pub field_height: f32,
    /// Bounding box width shared by both characters
    pub character_width: f32,
    /// Bounding box height shared by both characters
    pub character_height: f32,

    // Kinematics
    /// Downward acceleration added to vertical velocity every frame
    pub gravity: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_velocity: f32,
    /// Horizontal pixels per frame for the player
    pub player_speed: f32,
    /// Horizontal pixels per frame for the enemy
    pub enemy_speed: f32,

    // Pursuit
    /// Number of player positions fed to the predictor
    pub sequence_length: usize,
    /// Frames between predictor invocations
    pub prediction_interval: u32,
    /// Horizontal distance beyond which the enemy always jumps
    pub jump_distance: f32,
    /// Lead the player must have on either side before the enemy jumps toward them
    pub jump_margin: f32,
    /// Minimum distance from a wall for the side-triggered jumps
    pub edge_margin: f32,

    /// Logical frames per second
    pub frame_rate: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            character_width: 64.0,
            character_height: 64.0,
            gravity: 0.5,
            jump_velocity: -10.0,
            player_speed: 5.0,
            enemy_speed: 4.0,
            sequence_length: 10,
            prediction_interval: 8,
            jump_distance: 100.0,
            jump_margin: 50.0,
            edge_margin: 50.0,
            frame_rate: 60,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom playfield size
    pub fn new(field_width: f32, field_height: f32) -> Self {
        Self {
            field_width,
            field_height,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file
    ///
    /// Fields missing from the file keep their default values.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read game config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse game config {:?}", path))?;
        config
            .validate()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid game config {:?}", path))?;
        Ok(config)
    }

    /// Duration of one logical frame
    pub fn frame_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.frame_rate as f64)
    }

    /// Largest x a character's left edge may reach
    pub fn max_x(&self) -> f32 {
        self.field_width - self.character_width
    }

    /// Check that all parameters are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.field_width <= self.character_width {
            return Err(format!(
                "field_width ({}) must exceed character_width ({})",
                self.field_width, self.character_width
            ));
        }

        if self.field_height <= self.character_height {
            return Err(format!(
                "field_height ({}) must exceed character_height ({})",
                self.field_height, self.character_height
            ));
        }

        if self.gravity <= 0.0 {
            return Err(format!("gravity must be positive, got {}", self.gravity));
        }

        if self.jump_velocity >= 0.0 {
            return Err(format!(
                "jump_velocity must be negative (upward), got {}",
                self.jump_velocity
            ));
        }

        if self.player_speed <= 0.0 || self.enemy_speed <= 0.0 {
            return Err("character speeds must be positive".to_string());
        }

        if self.sequence_length == 0 {
            return Err("sequence_length must be at least 1".to_string());
        }

        if self.prediction_interval == 0 {
            return Err("prediction_interval must be at least 1".to_string());
        }

        if self.frame_rate == 0 {
            return Err("frame_rate must be at least 1".to_string());
        }

        Ok(())
    }
}
