pub mod human;
pub mod play;
pub mod train;

pub use human::HumanMode;
pub use play::{PlayMode, PlaybackSpeed};
pub use train::{TrainConfig, TrainMode, TrainOutcome};
