//! Progression engine
//!
//! Menu construction, milestone scheduling, outcome resolution, ending
//! detection, environment triggers, time rifts and age stepping.

pub mod ending;
pub mod environment;
pub mod menu;
pub mod milestone;
pub mod outcome;
pub mod rift;
pub mod variation;

pub use ending::{check_special_endings, NarrativeClass, SpecialEnding};
pub use environment::{maybe_env_trigger, TriggerKey};
pub use menu::{bias_score, build_option_menu, personalize};
pub use milestone::{
    build_milestone_menu, cap_age_step_to_milestone, is_pending_milestone, next_unprocessed_milestone,
};
pub use outcome::{resolve_outcome, Outcome, Swing};
pub use rift::{open_time_rift, RiftMode, RiftOutcome};
pub use variation::{random_age_step, random_variation};
