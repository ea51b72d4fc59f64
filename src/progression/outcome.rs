//! Outcome resolver: delta application with swing and death rolls
//!
//! Roll order is fixed so seeded sessions replay exactly:
//! 1. swing roll (only when swing > 0 and the delta sums negative)
//! 2. swing direction roll (only when the swing fired)
//! 3. death roll (always)

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Stat, Tag};
use crate::life::choice::Choice;
use crate::life::stats::{StatDelta, StatVector};

/// Extra death chance for a risky choice taken with low health
pub const LOW_HEALTH_RISK_BONUS: f64 = 0.10;
/// Health at or below which the bonus applies
pub const LOW_HEALTH_THRESHOLD: i32 = 10;

/// Secondary adjustment applied to a setback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Swing {
    /// Against the odds, the player grows from the setback
    Growth,
    /// The setback deepens into a rough patch
    Deepening,
}

impl Swing {
    pub fn delta(&self) -> StatDelta {
        match self {
            Swing::Growth => StatDelta::from_pairs(&[(Stat::Knowledge, 1), (Stat::Karma, 1)]),
            Swing::Deepening => StatDelta::from_pairs(&[(Stat::Health, -1), (Stat::Karma, -1)]),
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            Swing::Growth => "(Against the odds, you grow from the setback.)",
            Swing::Deepening => "(The setback deepens into a rough patch.)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub stats: StatVector,
    pub died: bool,
    pub swing: Option<Swing>,
    /// Human-readable swing/death annotations; empty when nothing happened
    pub note: String,
    /// Exactly what was applied: option delta + swing + death compensation
    pub net_delta: StatDelta,
}

/// Death probability after the low-health bonus for risky choices
pub fn effective_death_probability(choice: &Choice, health_after: i32) -> f64 {
    let mut probability = choice.death_risk;
    if choice.has_tag(Tag::Risk) && health_after <= LOW_HEALTH_THRESHOLD {
        probability += LOW_HEALTH_RISK_BONUS;
    }
    probability.min(1.0)
}

/// Resolve a selected choice against the current stats
pub fn resolve_outcome(choice: &Choice, stats: &StatVector, rng: &mut ChaCha8Rng) -> Outcome {
    let mut net = choice.delta.clone();
    let mut current = stats.apply(&choice.delta);
    let mut notes: Vec<&'static str> = Vec::new();

    let mut swing = None;
    if choice.swing_prob > 0.0 && choice.delta.total() < 0 && rng.gen::<f64>() < choice.swing_prob {
        let kind = if rng.gen::<f64>() < 0.5 {
            Swing::Growth
        } else {
            Swing::Deepening
        };
        let swing_delta = kind.delta();
        current = current.apply(&swing_delta);
        net = net.merged(&swing_delta);
        notes.push(kind.note());
        swing = Some(kind);
        tracing::debug!("Swing fired on {}: {:?}", choice.id, kind);
    }

    let death_probability = effective_death_probability(choice, current.health);
    let died = rng.gen::<f64>() < death_probability;
    if died {
        // Compensating delta so downstream checks observe zero health
        let death_delta = StatDelta::from_pairs(&[(Stat::Health, -current.health)]);
        current = current.apply(&death_delta);
        net = net.merged(&death_delta);
        notes.push("[You collapse.]");
        tracing::debug!("Death roll hit on {} (p={:.2})", choice.id, death_probability);
    }

    Outcome {
        stats: current,
        died,
        swing,
        note: notes.join(" "),
        net_delta: net,
    }
}
