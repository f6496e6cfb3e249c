//! # Orbis Core Library
//!
//! This library provides the core progression logic for the Orbis wellness
//! app. It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary, with any GUI shell being a thin
//! layer over the same core library.
//!
//! ## Architecture
//!
//! - **Progression**: geometric level curve, XP resolution, and a
//!   caller-owned progress tracker
//! - **Focus**: session evaluation under interchangeable reward policies,
//!   plus outcome aggregation
//! - **Events**: explicit publish/subscribe fan-out owned by the caller
//! - **Config**: TOML-based settings selecting the curve and policy
//!
//! The library owns no persistence and talks to no network: callers feed
//! it XP totals and elapsed durations and persist what comes back.
//!
//! ## Key Components
//!
//! - [`LevelCurve`]: XP total to level/progress resolution
//! - [`FocusEvaluator`]: session outcome classification
//! - [`ProgressTracker`]: running total with level-change events
//! - [`Config`]: application configuration management

pub mod config;
pub mod error;
pub mod events;
pub mod focus;
pub mod format;
pub mod progression;

pub use config::{Config, FocusConfig, PolicyKind, ProgressionConfig};
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use events::{Event, EventBus};
pub use focus::{
    FixedThresholdPolicy, FocusEvaluator, FocusOutcome, FocusStatus, RandomizedBandPolicy,
    RewardPolicy, SessionMode, SessionSummary,
};
pub use format::format_duration;
pub use progression::{LevelCurve, LevelProgress, ProgressTracker};
