//! Ending evaluator
//!
//! Special endings are a pure predicate over the stat vector: collapse
//! endings at zero take priority, then achievements at the target.

use serde::{Deserialize, Serialize};

use crate::core::types::Era;
use crate::life::stats::StatVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialEnding {
    // Collapse endings (a stat hit zero)
    Death,
    Bankruptcy,
    CognitiveCollapse,
    Isolation,
    Retribution,

    // Achievement endings (a stat reached the target)
    Genius,
    Tycoon,
    Chieftain,
    Ascension,
    Adoration,
}

impl SpecialEnding {
    pub fn is_achievement(&self) -> bool {
        matches!(
            self,
            SpecialEnding::Genius
                | SpecialEnding::Tycoon
                | SpecialEnding::Chieftain
                | SpecialEnding::Ascension
                | SpecialEnding::Adoration
        )
    }

    pub fn text(&self) -> &'static str {
        match self {
            SpecialEnding::Death => "Your life has come to an end. Ending: Death.",
            SpecialEnding::Bankruptcy => "You lost everything. Ending: Bankruptcy.",
            SpecialEnding::CognitiveCollapse => {
                "Your cognition collapses; you are sent to a psychiatric hospital for care. Ending: Dementia."
            }
            SpecialEnding::Isolation => "You are isolated and overwhelmed; the story ends in tragedy.",
            SpecialEnding::Retribution => "Enemies come seeking revenge; you are killed.",
            SpecialEnding::Genius => "Unmatched brilliance; you receive a Nobel Genius Prize.",
            SpecialEnding::Tycoon => {
                "You reach the top of wealth and become the richest person in the world."
            }
            SpecialEnding::Chieftain => "Vitality overflows; you become the chieftain of the undying.",
            SpecialEnding::Ascension => "Virtue perfected; you ascend and become immortal.",
            SpecialEnding::Adoration => "Your charm radiates; you are adored by all.",
        }
    }
}

/// First matching special ending, or `None`
///
/// Zero checks run in the order health, wealth, knowledge, charisma, karma.
/// Achievements only count when no stat is at zero, checked in the order
/// knowledge, wealth, health, karma, charisma.
pub fn check_special_endings(stats: &StatVector, achievement_target: i32) -> Option<SpecialEnding> {
    let collapses = [
        (stats.health, SpecialEnding::Death),
        (stats.wealth, SpecialEnding::Bankruptcy),
        (stats.knowledge, SpecialEnding::CognitiveCollapse),
        (stats.charisma, SpecialEnding::Isolation),
        (stats.karma, SpecialEnding::Retribution),
    ];
    if let Some((_, ending)) = collapses.iter().find(|(value, _)| *value == 0) {
        return Some(*ending);
    }

    let achievements = [
        (stats.knowledge, SpecialEnding::Genius),
        (stats.wealth, SpecialEnding::Tycoon),
        (stats.health, SpecialEnding::Chieftain),
        (stats.karma, SpecialEnding::Ascension),
        (stats.charisma, SpecialEnding::Adoration),
    ];
    achievements
        .iter()
        .find(|(value, _)| *value >= achievement_target)
        .map(|(_, ending)| *ending)
}

/// Narrative grade for a life that ran out of chapters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NarrativeClass {
    Faded,
    Legend(Era),
    Steady,
    Wanderer,
    RoughRoad,
}

impl NarrativeClass {
    pub fn classify(stats: &StatVector, era: Era) -> Self {
        let score = stats.score();
        if stats.health <= 0 {
            NarrativeClass::Faded
        } else if score >= 240.0 {
            NarrativeClass::Legend(era)
        } else if score >= 180.0 {
            NarrativeClass::Steady
        } else if score >= 120.0 {
            NarrativeClass::Wanderer
        } else {
            NarrativeClass::RoughRoad
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            NarrativeClass::Faded => "A life burned too fast. You fade before your tale completes.",
            NarrativeClass::Legend(Era::Modern) => {
                "You mentor others, open-access your research, and retire to the coast, content."
            }
            NarrativeClass::Legend(Era::Tang) => {
                "Your poems enter the anthology; officials whisper your name with reverence."
            }
            NarrativeClass::Legend(Era::Habsburg) => {
                "You become a deft diplomat; peace and prosperity mark your house."
            }
            NarrativeClass::Legend(Era::Prehistoric) => {
                "Tribe sings your legend: the one who stole fire twice and led the great migration."
            }
            NarrativeClass::Steady => {
                "A steady life: friendships held, lessons learned, and a few bright victories."
            }
            NarrativeClass::Wanderer => {
                "You wander, but the map grows clearer. Not perfect, not wasted, simply human."
            }
            NarrativeClass::RoughRoad => "A rough road. Yet even small kindness echoes beyond the page.",
        }
    }
}
