//! TOML-based application configuration.
//!
//! Stores the progression curve parameters and the active reward policy.
//! Configuration is stored at `~/.config/orbis/config.toml`
//! (`~/.config/orbis-dev/` when `ORBIS_ENV=dev`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::focus::{FixedThresholdPolicy, FocusEvaluator, RandomizedBandPolicy, RewardPolicy};
use crate::progression::LevelCurve;

/// Progression curve configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConfig {
    #[serde(default = "default_base_requirement")]
    pub base_requirement: f64,
    #[serde(default = "default_growth_factor")]
    pub growth_factor: f64,
}

/// Which reward policy evaluates sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Fixed,
    Randomized,
}

/// Focus evaluation configuration. Both policies keep their settings even
/// when inactive, so switching back and forth loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FocusConfig {
    #[serde(default)]
    pub policy: PolicyKind,
    #[serde(default)]
    pub fixed: FixedThresholdPolicy,
    #[serde(default)]
    pub randomized: RandomizedBandPolicy,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/orbis/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub progression: ProgressionConfig,
    #[serde(default)]
    pub focus: FocusConfig,
}

// Default functions
fn default_base_requirement() -> f64 {
    crate::progression::DEFAULT_BASE_REQUIREMENT
}
fn default_growth_factor() -> f64 {
    crate::progression::DEFAULT_GROWTH_FACTOR
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            base_requirement: default_base_requirement(),
            growth_factor: default_growth_factor(),
        }
    }
}

impl Default for PolicyKind {
    fn default() -> Self {
        PolicyKind::Fixed
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            fixed: FixedThresholdPolicy::default(),
            randomized: RandomizedBandPolicy::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            progression: ProgressionConfig::default(),
            focus: FocusConfig::default(),
        }
    }
}

/// Returns `~/.config/orbis[-dev]/` based on ORBIS_ENV.
///
/// Set ORBIS_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ORBIS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("orbis-dev")
    } else {
        base_dir.join("orbis")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

/// Path of the config file inside [`data_dir`].
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("config.toml"))
}

impl Config {
    /// Load from the default location, writing defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_path()?)
    }

    /// Load from an explicit path, writing defaults if missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_path()?)
    }

    /// Persist to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load from disk, returning defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Build the level curve described by this config.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored curve parameters are out of range.
    pub fn curve(&self) -> Result<LevelCurve> {
        Ok(LevelCurve::new(
            self.progression.base_requirement,
            self.progression.growth_factor,
        )?)
    }

    /// Build the evaluator selected by this config.
    pub fn evaluator(&self) -> FocusEvaluator {
        let policy = match self.focus.policy {
            PolicyKind::Fixed => RewardPolicy::FixedThreshold(self.focus.fixed.clone()),
            PolicyKind::Randomized => RewardPolicy::RandomizedBand(self.focus.randomized.clone()),
        };
        FocusEvaluator::with_policy(policy)
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist the result.
    ///
    /// The new value is parsed to the type the key already holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        set_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.save()
    }
}

fn set_value_by_path(
    root: &mut serde_json::Value,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    let mut parts = key.split('.').peekable();
    if parts.peek().is_none() {
        return Err(ConfigError::UnknownKey(key.to_string()));
    }

    let mut current = root;
    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            let obj = current
                .as_object_mut()
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let existing = obj
                .get(part)
                .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
            let new_value = coerce_to_existing_type(existing, value, key)?;
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        current = current
            .get_mut(part)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
    }

    Err(ConfigError::UnknownKey(key.to_string()))
}

fn coerce_to_existing_type(
    existing: &serde_json::Value,
    value: &str,
    key: &str,
) -> Result<serde_json::Value, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidValue {
        key: key.to_string(),
        message,
    };

    match existing {
        serde_json::Value::Bool(_) => value
            .parse::<bool>()
            .map(serde_json::Value::Bool)
            .map_err(|_| invalid(format!("cannot parse '{value}' as bool"))),
        serde_json::Value::Number(_) => {
            if let Ok(n) = value.parse::<i64>() {
                Ok(serde_json::Value::Number(n.into()))
            } else if let Ok(n) = value.parse::<f64>() {
                serde_json::Number::from_f64(n)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))
            } else {
                Err(invalid(format!("cannot parse '{value}' as number")))
            }
        }
        serde_json::Value::String(_) => Ok(serde_json::Value::String(value.to_string())),
        _ => serde_json::from_str(value).map_err(|e| invalid(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FocusStatus;

    #[test]
    fn default_config_roundtrips_through_toml() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("progression.base_requirement").as_deref(), Some("50.0"));
        assert_eq!(cfg.get("progression.growth_factor").as_deref(), Some("2.5"));
        assert_eq!(cfg.get("focus.policy").as_deref(), Some("fixed"));
        assert_eq!(cfg.get("focus.fixed.success_reward").as_deref(), Some("30"));
        assert!(cfg.get("focus.missing_key").is_none());
    }

    #[test]
    fn set_value_by_path_updates_nested_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        set_value_by_path(&mut json, "focus.fixed.success_reward", "45").unwrap();
        assert_eq!(json["focus"]["fixed"]["success_reward"], 45);
    }

    #[test]
    fn set_value_by_path_updates_nested_float() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        set_value_by_path(&mut json, "progression.growth_factor", "3.5").unwrap();
        assert_eq!(json["progression"]["growth_factor"], 3.5);
    }

    #[test]
    fn set_value_by_path_rejects_unknown_key() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        assert!(set_value_by_path(&mut json, "focus.nonexistent", "1").is_err());
        assert!(set_value_by_path(&mut json, "", "1").is_err());
    }

    #[test]
    fn set_value_by_path_rejects_invalid_number() {
        let mut json = serde_json::to_value(Config::default()).unwrap();
        let result = set_value_by_path(&mut json, "focus.fixed.success_reward", "lots");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, cfg);
    }

    #[test]
    fn save_to_then_load_from_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut cfg = Config::default();
        cfg.focus.policy = PolicyKind::Randomized;
        cfg.focus.randomized.reward_max = 15;
        cfg.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.focus.policy, PolicyKind::Randomized);
        assert_eq!(reloaded.focus.randomized.reward_max, 15);
    }

    #[test]
    fn load_from_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "progression = \"not a table\"").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn curve_construction_validates_parameters() {
        let mut cfg = Config::default();
        assert!(cfg.curve().is_ok());

        cfg.progression.growth_factor = 0.5;
        assert!(cfg.curve().is_err());
    }

    #[test]
    fn evaluator_follows_the_selected_policy() {
        let mut cfg = Config::default();
        let outcome = cfg.evaluator().evaluate(0.0);
        assert_eq!(outcome.xp_delta, -5);

        cfg.focus.policy = PolicyKind::Randomized;
        let outcome = cfg.evaluator().evaluate(0.0);
        assert_eq!(outcome.status, FocusStatus::Failure);
        assert_eq!(outcome.xp_delta, 0);
    }
}
