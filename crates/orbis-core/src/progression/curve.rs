//! Geometric level curve and XP resolution.
//!
//! The XP cost of clearing a level follows a geometric recurrence seeded at
//! 50: each level costs 2.5x the previous one, rounded up to the next whole
//! point at every step (50, 125, 313, 783, 1958, ...). Resolution walks the
//! curve level by level rather than inverting the series in closed form --
//! the rounding at each step shifts the exact boundaries, and the recurrence
//! grows fast enough that the scan stays short for any representable total.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default XP cost of the first level.
pub const DEFAULT_BASE_REQUIREMENT: f64 = 50.0;

/// Default per-level cost multiplier.
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.5;

/// Derived view of a lifetime XP total: level plus in-level progress.
///
/// Invariant: `current_level_xp + xp_remaining == xp_for_next_level` (up to
/// floating rounding), and `progress_percent` is that ratio scaled to 100
/// and capped there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    /// Current level, 1-based.
    pub level: u32,
    /// XP earned inside the current level.
    pub current_level_xp: f64,
    /// Total XP span of the current level.
    pub xp_for_next_level: f64,
    /// XP still needed to reach the next level.
    pub xp_remaining: f64,
    /// 0.0 ..= 100.0.
    pub progress_percent: f64,
}

/// Geometric XP growth curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelCurve {
    base_requirement: f64,
    growth_factor: f64,
}

impl LevelCurve {
    /// Create a curve with custom parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_requirement` is not positive and finite,
    /// or if `growth_factor` is not finite and greater than 1.0.
    pub fn new(base_requirement: f64, growth_factor: f64) -> Result<Self, ValidationError> {
        if !base_requirement.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "base_requirement".into(),
                value: base_requirement,
            });
        }
        if base_requirement <= 0.0 {
            return Err(ValidationError::InvalidValue {
                field: "base_requirement".into(),
                message: "must be positive".into(),
            });
        }
        if !growth_factor.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "growth_factor".into(),
                value: growth_factor,
            });
        }
        if growth_factor <= 1.0 {
            return Err(ValidationError::InvalidValue {
                field: "growth_factor".into(),
                message: "must be greater than 1.0".into(),
            });
        }
        Ok(Self {
            base_requirement,
            growth_factor,
        })
    }

    pub fn base_requirement(&self) -> f64 {
        self.base_requirement
    }

    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }

    /// Resolve a lifetime XP total into level and in-level progress.
    ///
    /// Negative, NaN and non-finite totals are treated as zero. A total
    /// that lands exactly on a level boundary belongs to the higher level.
    pub fn resolve(&self, total_xp: f64) -> LevelProgress {
        let total = sanitize_xp(total_xp);

        let mut level: u32 = 1;
        let mut accumulated = 0.0;
        let mut requirement = self.base_requirement;
        while accumulated + requirement <= total {
            accumulated += requirement;
            requirement = self.next_requirement(requirement);
            level += 1;
        }

        let current_level_xp = total - accumulated;
        let progress_percent = (current_level_xp / requirement * 100.0).min(100.0);
        debug!("resolved {total} xp to level {level} ({progress_percent:.1}%)");

        LevelProgress {
            level,
            current_level_xp,
            xp_for_next_level: requirement,
            xp_remaining: requirement - current_level_xp,
            progress_percent,
        }
    }

    /// XP span of the given level (level 1 spans the base requirement).
    pub fn requirement_for(&self, level: u32) -> f64 {
        let mut requirement = self.base_requirement;
        for _ in 1..level.max(1) {
            requirement = self.next_requirement(requirement);
        }
        requirement
    }

    /// Cumulative XP at which the given level begins.
    pub fn level_floor(&self, level: u32) -> f64 {
        let mut floor = 0.0;
        let mut requirement = self.base_requirement;
        for _ in 1..level.max(1) {
            floor += requirement;
            requirement = self.next_requirement(requirement);
        }
        floor
    }

    fn next_requirement(&self, requirement: f64) -> f64 {
        (requirement * self.growth_factor).ceil()
    }
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self {
            base_requirement: DEFAULT_BASE_REQUIREMENT,
            growth_factor: DEFAULT_GROWTH_FACTOR,
        }
    }
}

/// Clamp an XP total to the valid domain. NaN and infinities count as zero.
pub(crate) fn sanitize_xp(value: f64) -> f64 {
    if !value.is_finite() || value < 0.0 {
        0.0
    } else {
        value
    }
}
