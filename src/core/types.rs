//! Core type definitions used throughout the codebase

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque player identity handed over by the front end
///
/// Authentication lives outside the engine; all the session needs is proof
/// that some player exists before play begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

/// The five tracked life statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Health,
    Wealth,
    Knowledge,
    Karma,
    Charisma,
}

impl Stat {
    /// Canonical order used for display, variation draws and serialization
    pub const ALL: [Stat; 5] = [
        Stat::Health,
        Stat::Wealth,
        Stat::Knowledge,
        Stat::Karma,
        Stat::Charisma,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::Wealth => "wealth",
            Stat::Knowledge => "knowledge",
            Stat::Karma => "karma",
            Stat::Charisma => "charisma",
        }
    }

    /// Short label for compact stat lines (H10 W5 ...)
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Stat::Health => "H",
            Stat::Wealth => "W",
            Stat::Knowledge => "K",
            Stat::Karma => "Ka",
            Stat::Charisma => "Ch",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stat::ALL
            .iter()
            .copied()
            .find(|stat| stat.name() == s)
            .ok_or_else(|| format!("unknown stat: {}", s))
    }
}

/// Historical setting that selects which content pools apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Era {
    Modern,
    Tang,
    Habsburg,
    Prehistoric,
}

impl Era {
    pub const ALL: [Era; 4] = [Era::Modern, Era::Tang, Era::Habsburg, Era::Prehistoric];

    pub fn key(&self) -> &'static str {
        match self {
            Era::Modern => "modern",
            Era::Tang => "tang",
            Era::Habsburg => "habsburg",
            Era::Prehistoric => "prehistoric",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Era::Modern => "Modern (2000s)",
            Era::Tang => "Ancient China - Tang Dynasty",
            Era::Habsburg => "Habsburg Europe (1700s)",
            Era::Prehistoric => "Mythic Prehistory",
        }
    }
}

impl fmt::Display for Era {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nationality {
    China,
    Australia,
    Austria,
    UnitedStates,
    Wanderer,
}

impl Nationality {
    pub const ALL: [Nationality; 5] = [
        Nationality::China,
        Nationality::Australia,
        Nationality::Austria,
        Nationality::UnitedStates,
        Nationality::Wanderer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Nationality::China => "China",
            Nationality::Australia => "Australia",
            Nationality::Austria => "Austria",
            Nationality::UnitedStates => "United States",
            Nationality::Wanderer => "Wanderer (no fixed nation)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BirthCondition {
    Rich,
    Middle,
    Poor,
}

impl BirthCondition {
    pub const ALL: [BirthCondition; 3] =
        [BirthCondition::Rich, BirthCondition::Middle, BirthCondition::Poor];

    pub fn key(&self) -> &'static str {
        match self {
            BirthCondition::Rich => "rich",
            BirthCondition::Middle => "middle",
            BirthCondition::Poor => "poor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BirthCondition::Rich => "Born Noble/Rich",
            BirthCondition::Middle => "Born Middle Class",
            BirthCondition::Poor => "Born Poor",
        }
    }
}

/// Ordered, non-overlapping age ranges covering 0..=120
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Infant,
    Child,
    Teen,
    YoungAdult,
    Adult,
    Elder,
}

impl AgeBand {
    pub const ALL: [AgeBand; 6] = [
        AgeBand::Infant,
        AgeBand::Child,
        AgeBand::Teen,
        AgeBand::YoungAdult,
        AgeBand::Adult,
        AgeBand::Elder,
    ];

    /// Inclusive age bounds
    pub fn bounds(&self) -> (u32, u32) {
        match self {
            AgeBand::Infant => (0, 2),
            AgeBand::Child => (3, 12),
            AgeBand::Teen => (13, 17),
            AgeBand::YoungAdult => (18, 29),
            AgeBand::Adult => (30, 59),
            AgeBand::Elder => (60, 120),
        }
    }

    /// Band containing `age`; anything past the last bound counts as elder
    pub fn for_age(age: u32) -> AgeBand {
        AgeBand::ALL
            .iter()
            .copied()
            .find(|band| {
                let (lo, hi) = band.bounds();
                lo <= age && age <= hi
            })
            .unwrap_or(AgeBand::Elder)
    }

    pub fn key(&self) -> &'static str {
        match self {
            AgeBand::Infant => "infant",
            AgeBand::Child => "child",
            AgeBand::Teen => "teen",
            AgeBand::YoungAdult => "young_adult",
            AgeBand::Adult => "adult",
            AgeBand::Elder => "elder",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Semantic capability attached to a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    Study,
    Network,
    Health,
    Risk,
    Rest,
    Work,
    Retire,
}

impl Tag {
    pub fn key(&self) -> &'static str {
        match self {
            Tag::Study => "study",
            Tag::Network => "network",
            Tag::Health => "health",
            Tag::Risk => "risk",
            Tag::Rest => "rest",
            Tag::Work => "work",
            Tag::Retire => "retire",
        }
    }
}

/// Where a choice came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Reference content for the era and age band
    Base,
    /// Procedurally flavored archetype
    Dynamic,
    /// Fixed milestone schedule
    Milestone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_band_boundaries() {
        assert_eq!(AgeBand::for_age(0), AgeBand::Infant);
        assert_eq!(AgeBand::for_age(2), AgeBand::Infant);
        assert_eq!(AgeBand::for_age(3), AgeBand::Child);
        assert_eq!(AgeBand::for_age(12), AgeBand::Child);
        assert_eq!(AgeBand::for_age(13), AgeBand::Teen);
        assert_eq!(AgeBand::for_age(18), AgeBand::YoungAdult);
        assert_eq!(AgeBand::for_age(30), AgeBand::Adult);
        assert_eq!(AgeBand::for_age(60), AgeBand::Elder);
        assert_eq!(AgeBand::for_age(120), AgeBand::Elder);
        // Past the last bound still resolves to elder
        assert_eq!(AgeBand::for_age(500), AgeBand::Elder);
    }

    #[test]
    fn test_age_bands_are_contiguous() {
        let mut expected_start = 0;
        for band in AgeBand::ALL {
            let (lo, hi) = band.bounds();
            assert_eq!(lo, expected_start, "{} should start at {}", band, expected_start);
            assert!(hi >= lo);
            expected_start = hi + 1;
        }
        assert_eq!(expected_start, 121);
    }

    #[test]
    fn test_stat_parse() {
        assert_eq!("karma".parse::<Stat>(), Ok(Stat::Karma));
        assert!("luck".parse::<Stat>().is_err());
    }

    #[test]
    fn test_player_ids_are_unique() {
        assert_ne!(PlayerId::new(), PlayerId::new());
    }
}
