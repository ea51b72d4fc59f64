//! Environment trigger: low-probability events independent of the player

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::content::events::{environment_triggers, EventEntry};
use crate::core::types::{AgeBand, Era};

/// Usage key for a trigger within one session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerKey {
    pub era: Era,
    pub band: AgeBand,
    pub text: String,
}

impl TriggerKey {
    pub fn new(era: Era, band: AgeBand, entry: &EventEntry) -> Self {
        Self {
            era,
            band,
            text: entry.text.to_string(),
        }
    }
}

/// Roll for an environment trigger and pick an unused one
///
/// Always consumes one roll; consumes a second only when the roll succeeds
/// and unused triggers remain.
pub fn maybe_env_trigger(
    era: Era,
    age: u32,
    used: &AHashSet<TriggerKey>,
    probability: f64,
    rng: &mut ChaCha8Rng,
) -> Option<EventEntry> {
    if rng.gen::<f64>() >= probability {
        return None;
    }
    let band = AgeBand::for_age(age);
    let candidates: Vec<&EventEntry> = environment_triggers(era, band)
        .iter()
        .filter(|entry| !used.contains(&TriggerKey::new(era, band, entry)))
        .collect();
    candidates.choose(rng).map(|entry| **entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_certain_trigger_picks_pool_entry() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let entry = maybe_env_trigger(Era::Tang, 40, &AHashSet::new(), 1.0, &mut rng)
            .expect("trigger at p=1");
        assert_eq!(entry.text, "A drought threatens harvests.");
    }

    #[test]
    fn test_zero_probability_never_fires() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(maybe_env_trigger(Era::Modern, 20, &AHashSet::new(), 0.0, &mut rng).is_none());
        }
    }

    #[test]
    fn test_used_trigger_is_excluded() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let entry = environment_triggers(Era::Modern, AgeBand::Teen)[0];
        let used = AHashSet::from_iter([TriggerKey::new(Era::Modern, AgeBand::Teen, &entry)]);
        assert!(maybe_env_trigger(Era::Modern, 15, &used, 1.0, &mut rng).is_none());
        // The same text in another era is a different key
        assert!(maybe_env_trigger(Era::Tang, 15, &used, 1.0, &mut rng).is_some());
    }

    #[test]
    fn test_infants_have_no_trigger() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(maybe_env_trigger(Era::Habsburg, 1, &AHashSet::new(), 1.0, &mut rng).is_none());
    }
}
