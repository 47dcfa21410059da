//! Core game logic for the chase
//!
//! Kinematics, the enemy's pursuit state and the per-frame round update, with no
//! terminal I/O. Shared by play mode and the movement recorder.

pub mod action;
pub mod character;
pub mod config;
pub mod enemy;
pub mod engine;
pub mod gate;
pub mod history;
pub mod pursuit;
pub mod state;

// Re-export commonly used types
pub use action::{MoveAction, PlayerInput};
pub use character::Character;
pub use config::GameConfig;
pub use enemy::{Enemy, EnemyFrame};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use gate::{GateOutcome, PredictionGate};
pub use history::PositionHistory;
pub use state::RoundState;
