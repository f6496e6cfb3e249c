//! Focus session evaluation.
//!
//! Classifies a finished session by elapsed duration and reports the XP
//! reward or penalty attached to that classification. Evaluation is a pure
//! function of its inputs; the randomized policy takes its randomness as an
//! argument so callers can pin a seed.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::policy::{FixedThresholdPolicy, RandomizedBandPolicy, RewardPolicy, SessionMode};
use crate::format::format_duration;

/// Outcome tier of a focus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusStatus {
    Success,
    Partial,
    Failure,
}

/// Result of evaluating one session.
///
/// Created fresh per evaluation and never mutated; it has no identity
/// beyond the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusOutcome {
    pub status: FocusStatus,
    /// Display string for the UI layer.
    pub message: String,
    /// XP reward or penalty, possibly negative.
    pub xp_delta: i64,
}

/// Evaluates sessions against a reward policy.
#[derive(Debug, Clone, Default)]
pub struct FocusEvaluator {
    policy: RewardPolicy,
}

impl FocusEvaluator {
    /// Create an evaluator with the default (fixed-threshold) policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: RewardPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    /// Evaluate an open session.
    ///
    /// Negative, NaN and non-finite durations count as zero; fractional
    /// seconds are dropped before classification. Total over all inputs.
    pub fn evaluate(&self, elapsed_secs: f64) -> FocusOutcome {
        self.evaluate_session(elapsed_secs, SessionMode::Open)
    }

    /// Evaluate a session in the given mode, drawing any randomized reward
    /// from the thread RNG.
    pub fn evaluate_session(&self, elapsed_secs: f64, mode: SessionMode) -> FocusOutcome {
        self.evaluate_session_with_rng(elapsed_secs, mode, &mut rand::thread_rng())
    }

    /// Evaluate an open session with a caller-supplied RNG.
    pub fn evaluate_with_rng<R: Rng>(&self, elapsed_secs: f64, rng: &mut R) -> FocusOutcome {
        self.evaluate_session_with_rng(elapsed_secs, SessionMode::Open, rng)
    }

    /// Evaluate a session in the given mode with a caller-supplied RNG.
    /// Deterministic for a given policy, input and RNG state.
    pub fn evaluate_session_with_rng<R: Rng>(
        &self,
        elapsed_secs: f64,
        mode: SessionMode,
        rng: &mut R,
    ) -> FocusOutcome {
        let elapsed = clamp_seconds(elapsed_secs);
        let outcome = match &self.policy {
            RewardPolicy::FixedThreshold(policy) => evaluate_fixed(policy, elapsed),
            RewardPolicy::RandomizedBand(policy) => evaluate_randomized(policy, elapsed, mode, rng),
        };
        debug!(
            "evaluated {elapsed}s session: {:?} ({:+} xp)",
            outcome.status, outcome.xp_delta
        );
        outcome
    }
}

fn evaluate_fixed(policy: &FixedThresholdPolicy, elapsed: u64) -> FocusOutcome {
    if elapsed < policy.failure_below_secs {
        FocusOutcome {
            status: FocusStatus::Failure,
            message: format!(
                "Session too short. Stay focused for at least {} minutes to make progress.",
                policy.failure_below_secs / 60
            ),
            xp_delta: policy.failure_penalty,
        }
    } else if elapsed < policy.success_at_secs {
        FocusOutcome {
            status: FocusStatus::Partial,
            message: format!(
                "Good effort! Hold on past {} minutes next time for the full reward.",
                policy.success_at_secs / 60
            ),
            xp_delta: policy.partial_delta,
        }
    } else {
        FocusOutcome {
            status: FocusStatus::Success,
            message: format!(
                "Deep focus achieved! {} of uninterrupted work logged.",
                format_duration(elapsed as f64)
            ),
            xp_delta: policy.success_reward,
        }
    }
}

fn evaluate_randomized<R: Rng>(
    policy: &RandomizedBandPolicy,
    elapsed: u64,
    mode: SessionMode,
    rng: &mut R,
) -> FocusOutcome {
    let threshold = match mode {
        SessionMode::Open => policy.threshold_secs,
        SessionMode::Defined { target_secs } => target_secs,
    };

    if elapsed >= threshold {
        let reward = sample_reward(policy, rng);
        return FocusOutcome {
            status: FocusStatus::Success,
            message: format!("Focus session complete: +{reward} XP earned."),
            xp_delta: reward,
        };
    }

    match mode {
        SessionMode::Open => FocusOutcome {
            status: FocusStatus::Failure,
            message: format!(
                "Session ended before the {}-minute goal. No XP awarded.",
                threshold / 60
            ),
            xp_delta: 0,
        },
        SessionMode::Defined { target_secs } => FocusOutcome {
            status: FocusStatus::Failure,
            message: format!(
                "Stopped {} short of the declared target.",
                format_duration(target_secs.saturating_sub(elapsed) as f64)
            ),
            xp_delta: policy.early_stop_penalty,
        },
    }
}

fn sample_reward<R: Rng>(policy: &RandomizedBandPolicy, rng: &mut R) -> i64 {
    let lo = policy.reward_min.min(policy.reward_max);
    let hi = policy.reward_min.max(policy.reward_max);
    rng.gen_range(lo..=hi)
}

/// Negative, NaN and non-finite durations count as zero; fractional
/// seconds round down.
fn clamp_seconds(value: f64) -> u64 {
    if !value.is_finite() || value < 0.0 {
        0
    } else {
        value.floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn zero_elapsed_fails_with_penalty() {
        let outcome = FocusEvaluator::new().evaluate(0.0);
        assert_eq!(outcome.status, FocusStatus::Failure);
        assert_eq!(outcome.xp_delta, -5);
    }

    #[test]
    fn ten_minutes_is_partial_with_no_reward() {
        let outcome = FocusEvaluator::new().evaluate(600.0);
        assert_eq!(outcome.status, FocusStatus::Partial);
        assert_eq!(outcome.xp_delta, 0);
    }

    #[test]
    fn just_below_twenty_minutes_is_still_partial() {
        let outcome = FocusEvaluator::new().evaluate(1199.0);
        assert_eq!(outcome.status, FocusStatus::Partial);
    }

    #[test]
    fn twenty_minutes_succeeds_with_full_reward() {
        let outcome = FocusEvaluator::new().evaluate(1200.0);
        assert_eq!(outcome.status, FocusStatus::Success);
        assert_eq!(outcome.xp_delta, 30);
    }

    #[test]
    fn invalid_durations_clamp_to_zero() {
        let evaluator = FocusEvaluator::new();
        for elapsed in [-1.0, -600.0, f64::NAN, f64::NEG_INFINITY] {
            let outcome = evaluator.evaluate(elapsed);
            assert_eq!(outcome.status, FocusStatus::Failure);
            assert_eq!(outcome.xp_delta, -5);
        }
    }

    #[test]
    fn fractional_seconds_round_down() {
        let evaluator = FocusEvaluator::new();
        assert_eq!(evaluator.evaluate(1199.9).status, FocusStatus::Partial);
        assert_eq!(evaluator.evaluate(599.9).status, FocusStatus::Failure);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let evaluator = FocusEvaluator::new();
        assert_eq!(evaluator.evaluate(900.0), evaluator.evaluate(900.0));
    }

    #[test]
    fn randomized_reward_stays_inside_the_band() {
        let evaluator =
            FocusEvaluator::with_policy(RewardPolicy::RandomizedBand(RandomizedBandPolicy::default()));
        for seed in 0..200 {
            let mut rng = Pcg64::seed_from_u64(seed);
            let outcome = evaluator.evaluate_with_rng(1500.0, &mut rng);
            assert_eq!(outcome.status, FocusStatus::Success);
            assert!((5..=10).contains(&outcome.xp_delta), "got {}", outcome.xp_delta);
        }
    }

    #[test]
    fn randomized_outcome_is_reproducible_for_a_seed() {
        let evaluator =
            FocusEvaluator::with_policy(RewardPolicy::RandomizedBand(RandomizedBandPolicy::default()));
        let first = evaluator.evaluate_with_rng(1500.0, &mut Pcg64::seed_from_u64(42));
        let second = evaluator.evaluate_with_rng(1500.0, &mut Pcg64::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn randomized_open_session_below_threshold_earns_nothing() {
        let evaluator =
            FocusEvaluator::with_policy(RewardPolicy::RandomizedBand(RandomizedBandPolicy::default()));
        let mut rng = Pcg64::seed_from_u64(7);
        let outcome = evaluator.evaluate_session_with_rng(1199.0, SessionMode::Open, &mut rng);
        assert_eq!(outcome.status, FocusStatus::Failure);
        assert_eq!(outcome.xp_delta, 0);
    }

    #[test]
    fn defined_session_early_stop_is_penalized() {
        let evaluator =
            FocusEvaluator::with_policy(RewardPolicy::RandomizedBand(RandomizedBandPolicy::default()));
        let mut rng = Pcg64::seed_from_u64(7);
        let mode = SessionMode::Defined { target_secs: 1800 };
        let outcome = evaluator.evaluate_session_with_rng(1500.0, mode, &mut rng);
        assert_eq!(outcome.status, FocusStatus::Failure);
        assert_eq!(outcome.xp_delta, -5);
    }

    #[test]
    fn defined_session_reaching_target_earns_the_band() {
        let evaluator =
            FocusEvaluator::with_policy(RewardPolicy::RandomizedBand(RandomizedBandPolicy::default()));
        let mut rng = Pcg64::seed_from_u64(7);
        let mode = SessionMode::Defined { target_secs: 900 };
        let outcome = evaluator.evaluate_session_with_rng(900.0, mode, &mut rng);
        assert_eq!(outcome.status, FocusStatus::Success);
        assert!((5..=10).contains(&outcome.xp_delta));
    }

    #[test]
    fn inverted_band_bounds_are_normalized() {
        let policy = RandomizedBandPolicy {
            reward_min: 10,
            reward_max: 5,
            ..Default::default()
        };
        let evaluator = FocusEvaluator::with_policy(RewardPolicy::RandomizedBand(policy));
        let mut rng = Pcg64::seed_from_u64(1);
        let outcome = evaluator.evaluate_with_rng(1500.0, &mut rng);
        assert!((5..=10).contains(&outcome.xp_delta));
    }

    #[test]
    fn custom_fixed_thresholds_apply() {
        let policy = FixedThresholdPolicy {
            failure_below_secs: 300,
            success_at_secs: 900,
            failure_penalty: -2,
            partial_delta: 1,
            success_reward: 20,
        };
        let evaluator = FocusEvaluator::with_policy(RewardPolicy::FixedThreshold(policy));
        assert_eq!(evaluator.evaluate(299.0).xp_delta, -2);
        assert_eq!(evaluator.evaluate(300.0).xp_delta, 1);
        assert_eq!(evaluator.evaluate(900.0).xp_delta, 20);
    }
}
