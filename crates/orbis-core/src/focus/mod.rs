mod evaluator;
mod policy;
mod stats;

pub use evaluator::{FocusEvaluator, FocusOutcome, FocusStatus};
pub use policy::{FixedThresholdPolicy, RandomizedBandPolicy, RewardPolicy, SessionMode};
pub use stats::SessionSummary;
