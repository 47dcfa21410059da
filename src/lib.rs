//! Catch Me - a terminal chase game with a learned pursuer
//!
//! This library provides:
//! - Core game logic (game module)
//! - Next-position predictors and their training (predictor module)
//! - Movement recording for training data (recording module)
//! - TUI rendering and input handling (render, input modules)
//! - Play, record and train modes (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod predictor;
pub mod recording;
pub mod render;
