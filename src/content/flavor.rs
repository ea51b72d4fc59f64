//! Era flavor phrases keyed by a small fixed vocabulary

use crate::core::types::Era;

/// Vocabulary of flavor keys shared by dynamic options and milestones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    Study,
    Work,
    Retire,
    Risk,
    Health,
    Network,
    Rest,
}

/// Era-specific phrase for a flavor key
pub fn flavor(era: Era, key: Flavor) -> &'static str {
    match era {
        Era::Modern => match key {
            Flavor::Study => "Focus on study and projects.",
            Flavor::Work => "Take a full-time position.",
            Flavor::Retire => "File paperwork and plan a modest retirement.",
            Flavor::Risk => "Take a risky shortcut at work.",
            Flavor::Health => "Commit to disciplined training.",
            Flavor::Network => "Network at a meetup.",
            Flavor::Rest => "Take a mental health break.",
        },
        Era::Tang => match key {
            Flavor::Study => "Copy classics and drill essays.",
            Flavor::Work => "Enter an apprenticeship in the yamen.",
            Flavor::Retire => "Withdraw from office to a quiet garden.",
            Flavor::Risk => "Seek court favor through a bold gambit.",
            Flavor::Health => "Practice qigong at dawn.",
            Flavor::Network => "Visit a patron's salon.",
            Flavor::Rest => "Retreat to a quiet temple.",
        },
        Era::Habsburg => match key {
            Flavor::Study => "Study languages and diplomacy at a small academy.",
            Flavor::Work => "Enter civil service or manage estates.",
            Flavor::Retire => "Retire to the countryside, tend affairs.",
            Flavor::Risk => "Speculate on new trade routes.",
            Flavor::Health => "Fence and ride daily.",
            Flavor::Network => "Host a small salon.",
            Flavor::Rest => "Take the waters at a spa.",
        },
        Era::Prehistoric => match key {
            Flavor::Study => "Train in tracking, toolmaking, and star paths.",
            Flavor::Work => "Join the foraging and hunt rotations.",
            Flavor::Retire => "Step back from hunts; teach rituals.",
            Flavor::Risk => "Hunt alone at dusk.",
            Flavor::Health => "Train with weighted stones.",
            Flavor::Network => "Trade stories by the fire.",
            Flavor::Rest => "Meditate in the hot springs.",
        },
    }
}

/// Childhood milestone chore, phrased per era (no leading age prefix)
pub fn light_work(era: Era) -> &'static str {
    match era {
        Era::Modern => "help with family chores and simple responsibilities.",
        Era::Tang => "assist elders with errands and basic scripts.",
        Era::Habsburg => "shadow a steward for simple duties.",
        Era::Prehistoric => "gather berries and carry water for the camp.",
    }
}
