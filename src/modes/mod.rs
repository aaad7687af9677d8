pub mod bench;
pub mod play;

pub use bench::{BenchConfig, BenchMode};
pub use play::PlayMode;
