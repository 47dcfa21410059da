use std::fmt;

/// Player controls held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl PlayerInput {
    pub const IDLE: PlayerInput = PlayerInput {
        left: false,
        right: false,
        jump: false,
    };

    /// Horizontal direction: -1, 0 or 1. Both arrows move left then right, which nets zero.
    pub fn horizontal(&self) -> f32 {
        let mut dx = 0.0;
        if self.left {
            dx -= 1.0;
        }
        if self.right {
            dx += 1.0;
        }
        dx
    }
}

/// Label recorded for a frame in the movement log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveAction {
    Idle,
    Left,
    Right,
    Jump,
}

impl MoveAction {
    /// Label a frame: later checks win, so a jump outranks right, which outranks left
    pub fn from_frame(input: PlayerInput, jumped: bool) -> Self {
        let mut action = MoveAction::Idle;
        if input.left {
            action = MoveAction::Left;
        }
        if input.right {
            action = MoveAction::Right;
        }
        if jumped {
            action = MoveAction::Jump;
        }
        action
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveAction::Idle => "idle",
            MoveAction::Left => "left",
            MoveAction::Right => "right",
            MoveAction::Jump => "jump",
        }
    }
}

impl fmt::Display for MoveAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
