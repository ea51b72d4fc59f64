//! Engine configuration with documented constants
//!
//! All tunable numbers for pacing, probabilities and thresholds live here.
//! Defaults reproduce the classic game; a TOML file can override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{LifeError, Result};

/// Configuration for the progression engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === SESSION LIMITS ===
    /// Maximum number of chapters before the fallback final page
    ///
    /// With an average step of ~3.5 years, 16 chapters cover roughly the
    /// first half of a life, so most sessions end on a special ending.
    pub chapter_limit: u32,

    /// Age at which the natural endpoint is reached
    pub max_age: u32,

    // === AGE STEPPING ===
    /// Smallest number of years a chapter advances
    ///
    /// Must be at least 1 so the age is strictly increasing per chapter.
    pub age_step_min: u32,

    /// Largest number of years a chapter advances
    pub age_step_max: u32,

    /// Upper bound on the step while the player is still an infant (age <= 2)
    ///
    /// Keeps the early childhood milestone from being reached in a single jump.
    pub infant_step_max: u32,

    /// Ages with a mandatory two-option milestone menu (ascending)
    ///
    /// Index 0 is the childhood milestone, the last index is the
    /// work-or-retire milestone; everything in between escalates career costs.
    pub milestones: Vec<u32>,

    // === PROBABILITIES ===
    /// Chance per chapter that an environment trigger fires
    pub env_trigger_prob: f64,

    /// Span of the per-turn random variation, drawn uniformly in [-span, span]
    pub variation_span: i32,

    // === ENDINGS ===
    /// Any stat at or above this value ends the session with an achievement
    pub achievement_target: i32,

    // === MENUS ===
    /// Number of options in a regular chapter menu
    pub menu_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chapter_limit: 16,
            max_age: 100,

            age_step_min: 1,
            age_step_max: 6,
            infant_step_max: 4,
            milestones: vec![7, 18, 24, 30, 50],

            env_trigger_prob: 0.35,
            variation_span: 3,

            achievement_target: 30,

            menu_size: 3,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a TOML file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate().map_err(LifeError::Config)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.chapter_limit == 0 {
            return Err("chapter_limit must be positive".into());
        }

        if self.age_step_min == 0 {
            return Err("age_step_min must be at least 1".into());
        }

        if self.age_step_min > self.age_step_max {
            return Err(format!(
                "age_step_min ({}) should be <= age_step_max ({})",
                self.age_step_min, self.age_step_max
            ));
        }

        if self.infant_step_max < self.age_step_min {
            return Err(format!(
                "infant_step_max ({}) should be >= age_step_min ({})",
                self.infant_step_max, self.age_step_min
            ));
        }

        if self.milestones.is_empty() {
            return Err("milestones must not be empty".into());
        }

        if self.milestones.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(format!(
                "milestones must be strictly ascending, got {:?}",
                self.milestones
            ));
        }

        if let Some(&last) = self.milestones.last() {
            if last >= self.max_age {
                return Err(format!(
                    "milestone {} is not below max_age ({})",
                    last, self.max_age
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.env_trigger_prob) {
            return Err(format!(
                "env_trigger_prob ({}) must lie in [0, 1]",
                self.env_trigger_prob
            ));
        }

        if self.variation_span < 0 {
            return Err("variation_span must not be negative".into());
        }

        if self.menu_size == 0 {
            return Err("menu_size must be positive".into());
        }

        Ok(())
    }
}
