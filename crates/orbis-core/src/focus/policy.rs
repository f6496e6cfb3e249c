//! Reward policies for focus session evaluation.
//!
//! The product ships two rule sets side by side: a fixed three-tier
//! threshold rule, and an all-or-nothing rule that draws its reward from a
//! randomized band and supports sessions with a declared target duration.
//! Neither is canonical, so both are kept and the caller selects one
//! explicitly; the fixed rule is the default.

use serde::{Deserialize, Serialize};

/// Fixed three-tier threshold rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedThresholdPolicy {
    /// Sessions shorter than this fail (seconds).
    #[serde(default = "default_failure_below_secs")]
    pub failure_below_secs: u64,
    /// Sessions at or past this succeed (seconds).
    #[serde(default = "default_success_at_secs")]
    pub success_at_secs: u64,
    #[serde(default = "default_failure_penalty")]
    pub failure_penalty: i64,
    #[serde(default)]
    pub partial_delta: i64,
    #[serde(default = "default_success_reward")]
    pub success_reward: i64,
}

/// All-or-nothing rule with a randomized reward band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomizedBandPolicy {
    /// Minimum duration that earns the reward (seconds).
    #[serde(default = "default_success_at_secs")]
    pub threshold_secs: u64,
    /// Inclusive lower bound of the reward band.
    #[serde(default = "default_reward_min")]
    pub reward_min: i64,
    /// Inclusive upper bound of the reward band.
    #[serde(default = "default_reward_max")]
    pub reward_max: i64,
    /// Penalty applied when a defined-time session stops early.
    #[serde(default = "default_failure_penalty")]
    pub early_stop_penalty: i64,
}

/// Which rule set evaluates a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RewardPolicy {
    FixedThreshold(FixedThresholdPolicy),
    RandomizedBand(RandomizedBandPolicy),
}

/// How the session was set up by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Free-running session, evaluated against the policy threshold.
    Open,
    /// Session with a declared target duration in seconds. Only the
    /// randomized policy distinguishes this from an open session.
    Defined { target_secs: u64 },
}

// Default functions
fn default_failure_below_secs() -> u64 {
    600
}
fn default_success_at_secs() -> u64 {
    1200
}
fn default_failure_penalty() -> i64 {
    -5
}
fn default_success_reward() -> i64 {
    30
}
fn default_reward_min() -> i64 {
    5
}
fn default_reward_max() -> i64 {
    10
}

impl Default for FixedThresholdPolicy {
    fn default() -> Self {
        Self {
            failure_below_secs: default_failure_below_secs(),
            success_at_secs: default_success_at_secs(),
            failure_penalty: default_failure_penalty(),
            partial_delta: 0,
            success_reward: default_success_reward(),
        }
    }
}

impl Default for RandomizedBandPolicy {
    fn default() -> Self {
        Self {
            threshold_secs: default_success_at_secs(),
            reward_min: default_reward_min(),
            reward_max: default_reward_max(),
            early_stop_penalty: default_failure_penalty(),
        }
    }
}

impl Default for RewardPolicy {
    fn default() -> Self {
        RewardPolicy::FixedThreshold(FixedThresholdPolicy::default())
    }
}

impl Default for SessionMode {
    fn default() -> Self {
        SessionMode::Open
    }
}
