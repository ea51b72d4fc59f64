//! Per-turn random variation and random age steps

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::EngineConfig;
use crate::core::types::Stat;
use crate::life::stats::StatDelta;

/// Uniform change in [-span, span] for every stat, drawn in stat order
pub fn random_variation(span: i32, rng: &mut ChaCha8Rng) -> StatDelta {
    let mut delta = StatDelta::new();
    for stat in Stat::ALL {
        delta.add(stat, rng.gen_range(-span..=span));
    }
    delta
}

/// Years to advance before milestone capping; infants take shorter steps
pub fn random_age_step(age: u32, config: &EngineConfig, rng: &mut ChaCha8Rng) -> u32 {
    let hi = if age <= 2 {
        config.infant_step_max.min(config.age_step_max)
    } else {
        config.age_step_max
    };
    rng.gen_range(config.age_step_min..=hi.max(config.age_step_min))
}
