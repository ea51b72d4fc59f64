//! Bounded stat vector and sparse deltas

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::Stat;

pub const STAT_MIN: i32 = 0;
pub const STAT_MAX: i32 = 100;

/// Sparse mapping from stat to signed change; absent stats mean zero
///
/// Zero entries are never stored, so two deltas compare equal exactly when
/// they change the same stats by the same amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatDelta(BTreeMap<Stat, i32>);

impl StatDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: &[(Stat, i32)]) -> Self {
        let mut delta = Self::new();
        for &(stat, amount) in pairs {
            delta.add(stat, amount);
        }
        delta
    }

    /// Build from loosely typed names; unknown names are ignored
    #[cfg(test)]
    pub(crate) fn from_named<'a>(pairs: impl IntoIterator<Item = (&'a str, i32)>) -> Self {
        let mut delta = Self::new();
        for (name, amount) in pairs {
            if let Ok(stat) = name.parse::<Stat>() {
                delta.add(stat, amount);
            }
        }
        delta
    }

    pub fn get(&self, stat: Stat) -> i32 {
        self.0.get(&stat).copied().unwrap_or(0)
    }

    /// Add `amount` to one stat, dropping the entry if it nets to zero
    pub fn add(&mut self, stat: Stat, amount: i32) {
        let value = self.get(stat) + amount;
        if value == 0 {
            self.0.remove(&stat);
        } else {
            self.0.insert(stat, value);
        }
    }

    /// Field-wise sum of two deltas
    pub fn merged(&self, other: &StatDelta) -> StatDelta {
        let mut out = self.clone();
        for (stat, amount) in other.iter() {
            out.add(stat, amount);
        }
        out
    }

    /// Sum of all entries; drives the swing condition and preview hints
    pub fn total(&self) -> i32 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in canonical stat order
    pub fn iter(&self) -> impl Iterator<Item = (Stat, i32)> + '_ {
        self.0.iter().map(|(stat, amount)| (*stat, *amount))
    }
}

impl fmt::Display for StatDelta {
    /// `knowledge:+2, health:-1`, or `no change`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("no change");
        }
        let parts: Vec<String> = self
            .iter()
            .map(|(stat, amount)| format!("{}:{:+}", stat, amount))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

/// The five life stats, each kept within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatVector {
    pub health: i32,
    pub wealth: i32,
    pub knowledge: i32,
    pub karma: i32,
    pub charisma: i32,
}

impl StatVector {
    /// Construct a vector, clamping every field into bounds
    pub fn new(health: i32, wealth: i32, knowledge: i32, karma: i32, charisma: i32) -> Self {
        Self {
            health,
            wealth,
            knowledge,
            karma,
            charisma,
        }
        .clamped()
    }

    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Health => self.health,
            Stat::Wealth => self.wealth,
            Stat::Knowledge => self.knowledge,
            Stat::Karma => self.karma,
            Stat::Charisma => self.charisma,
        }
    }

    fn slot(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Health => &mut self.health,
            Stat::Wealth => &mut self.wealth,
            Stat::Knowledge => &mut self.knowledge,
            Stat::Karma => &mut self.karma,
            Stat::Charisma => &mut self.charisma,
        }
    }

    fn clamped(mut self) -> Self {
        for stat in Stat::ALL {
            let slot = self.slot(stat);
            *slot = (*slot).clamp(STAT_MIN, STAT_MAX);
        }
        self
    }

    /// Field-wise addition followed by clamping; returns a new vector
    pub fn apply(&self, delta: &StatDelta) -> StatVector {
        let mut next = *self;
        for (stat, amount) in delta.iter() {
            let slot = next.slot(stat);
            *slot = slot.saturating_add(amount);
        }
        next.clamped()
    }

    /// Weighted summary used to grade a life that ran out of chapters
    pub fn score(&self) -> f64 {
        self.health as f64 * 1.1
            + self.wealth as f64 * 1.2
            + self.knowledge as f64 * 1.1
            + self.karma as f64 * 0.8
            + self.charisma as f64 * 0.9
    }
}

impl fmt::Display for StatVector {
    /// Compact form: `H10 W5 K5 Ka5 Ch5`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = Stat::ALL
            .iter()
            .map(|stat| format!("{}{}", stat.abbreviation(), self.get(*stat)))
            .collect();
        f.write_str(&parts.join(" "))
    }
}
