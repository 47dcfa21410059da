use super::action::PlayerInput;
use super::config::GameConfig;

/// A character on the playfield
///
/// Both the player and the enemy are plain `Character` records; what differs is
/// who decides their horizontal motion and when they jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    /// Left edge in pixels
    pub x: f32,
    /// Top edge in pixels (y grows downward)
    pub y: f32,
    /// Vertical velocity in pixels per frame (negative is up)
    pub vel_y: f32,
    /// Resting on the floor and allowed to jump
    pub grounded: bool,
    pub width: f32,
    pub height: f32,
}

impl Character {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vel_y: 0.0,
            grounded: true,
            width,
            height,
        }
    }

    /// Create a grounded character standing on the floor with its left edge at `x`
    pub fn on_floor(x: f32, config: &GameConfig) -> Self {
        Self::new(
            x,
            config.field_height - config.character_height,
            config.character_width,
            config.character_height,
        )
    }

    /// Player spawn: a quarter of the way across, on the floor
    pub fn player_spawn(config: &GameConfig) -> Self {
        Self::on_floor(config.field_width / 4.0 - config.character_width / 2.0, config)
    }

    /// Enemy spawn: mid-field, on the floor
    pub fn enemy_spawn(config: &GameConfig) -> Self {
        Self::on_floor(config.field_width / 2.0 - config.character_width / 2.0, config)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Start a jump if grounded. Returns whether the jump happened.
    pub fn jump(&mut self, config: &GameConfig) -> bool {
        if !self.grounded {
            return false;
        }
        self.vel_y = config.jump_velocity;
        self.grounded = false;
        true
    }

    /// Move horizontally by `dx` and keep the box inside the playfield
    pub fn move_horizontal(&mut self, dx: f32, config: &GameConfig) {
        self.x += dx;
        self.clamp_horizontal(config);
    }

    /// Clamp the box to the left and right walls
    pub fn clamp_horizontal(&mut self, config: &GameConfig) {
        if self.x < 0.0 {
            self.x = 0.0;
        }
        if self.right() > config.field_width {
            self.x = config.field_width - self.width;
        }
    }

    /// Apply one frame of gravity and land on the floor
    pub fn apply_gravity(&mut self, config: &GameConfig) {
        self.vel_y += config.gravity;
        self.y += self.vel_y;

        if self.bottom() >= config.field_height {
            self.y = config.field_height - self.height;
            self.vel_y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    /// One frame under player control: walk, maybe jump, then fall.
    /// Returns whether a jump started this frame.
    pub fn drive(&mut self, input: PlayerInput, config: &GameConfig) -> bool {
        let dx = input.horizontal() * config.player_speed;
        if dx != 0.0 {
            self.move_horizontal(dx, config);
        }
        let jumped = input.jump && self.jump(config);
        self.apply_gravity(config);
        self.clamp_horizontal(config);
        jumped
    }

    /// Axis-aligned bounding box overlap; touching edges do not count
    pub fn overlaps(&self, other: &Character) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
