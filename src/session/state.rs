//! Session state owned by the chapter loop

use std::collections::BTreeSet;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::content::catalog::starting_stats;
use crate::core::types::{AgeBand, BirthCondition, Era, Nationality, Provenance, Tag};
use crate::life::choice::{Choice, ChoiceId};
use crate::life::stats::StatVector;
use crate::progression::environment::TriggerKey;

/// The three selections made before the first chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeSetup {
    pub birth: BirthCondition,
    pub nationality: Nationality,
    pub era: Era,
}

/// Mutable state of one life
///
/// Every set only ever grows for the lifetime of the session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub age: u32,
    pub chapter: u32,
    pub era: Era,
    pub birth: BirthCondition,
    pub nationality: Nationality,
    pub stats: StatVector,
    /// Union of the tags of every resolved choice
    pub flags: BTreeSet<Tag>,
    /// Identities offered or resolved so far
    pub used_ids: AHashSet<ChoiceId>,
    pub used_triggers: AHashSet<TriggerKey>,
    pub processed_milestones: BTreeSet<u32>,
}

impl SessionState {
    pub fn new(setup: &LifeSetup) -> Self {
        Self {
            age: 0,
            chapter: 0,
            era: setup.era,
            birth: setup.birth,
            nationality: setup.nationality,
            stats: starting_stats(setup.birth),
            flags: BTreeSet::new(),
            used_ids: AHashSet::new(),
            used_triggers: AHashSet::new(),
            processed_milestones: BTreeSet::new(),
        }
    }

    pub fn band(&self) -> AgeBand {
        AgeBand::for_age(self.age)
    }

    /// Mark every option of a presented menu as offered
    pub fn record_offered(&mut self, options: &[Choice]) {
        for choice in options {
            self.used_ids.insert(choice.id.clone());
        }
    }

    /// Bookkeeping after a choice resolves
    pub fn record_resolved(&mut self, choice: &Choice) {
        if choice.provenance == Provenance::Milestone {
            self.processed_milestones.insert(self.age);
        }
        self.used_ids.insert(choice.id.clone());
        self.flags.extend(choice.tags.iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::life::stats::StatDelta;

    fn setup() -> LifeSetup {
        LifeSetup {
            birth: BirthCondition::Poor,
            nationality: Nationality::Austria,
            era: Era::Habsburg,
        }
    }

    #[test]
    fn test_new_state_starts_at_birth() {
        let state = SessionState::new(&setup());
        assert_eq!(state.age, 0);
        assert_eq!(state.band(), AgeBand::Infant);
        assert_eq!(state.stats, starting_stats(BirthCondition::Poor));
        assert!(state.flags.is_empty());
    }

    #[test]
    fn test_record_resolved_milestone() {
        let mut state = SessionState::new(&setup());
        state.age = 7;
        let choice = Choice::new(
            "study",
            StatDelta::new(),
            &[Tag::Study],
            Provenance::Milestone,
            ChoiceId::new("mile:7:study:habsburg"),
        );
        state.record_resolved(&choice);
        assert!(state.processed_milestones.contains(&7));
        assert!(state.flags.contains(&Tag::Study));
        assert!(state.used_ids.contains(&choice.id));
    }
}
