pub mod play;
pub mod record;
pub mod terminal;
pub mod train;

pub use play::{PlayMode, Screen};
pub use record::RecordMode;
pub use train::{TrainConfig, TrainMode};
