pub mod session;
pub mod training_stats;

pub use session::{SessionMetrics, format_clock};
pub use training_stats::{GenerationSummary, TrainingStats};
