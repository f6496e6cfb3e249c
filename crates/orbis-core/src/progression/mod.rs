mod curve;
mod tracker;

pub use curve::{LevelCurve, LevelProgress, DEFAULT_BASE_REQUIREMENT, DEFAULT_GROWTH_FACTOR};
pub use tracker::ProgressTracker;
