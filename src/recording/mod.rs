//! Player movement recording for offline training

pub mod movement_log;

pub use movement_log::{MovementLog, MovementRecord, read_x_positions};
