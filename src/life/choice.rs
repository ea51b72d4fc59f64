//! A single selectable turn

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::types::{Provenance, Tag};
use crate::life::stats::StatDelta;

/// Stable identity token used to keep options from repeating in a session
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChoiceId(pub String);

impl ChoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One option offered to the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub text: String,
    pub delta: StatDelta,
    pub tags: BTreeSet<Tag>,
    /// Tags the player should already hold for a bias bonus (advisory only)
    pub requires: BTreeSet<Tag>,
    pub death_risk: f64,
    pub swing_prob: f64,
    pub provenance: Provenance,
    pub id: ChoiceId,
}

impl Choice {
    /// A choice with no requirements and no risk
    pub fn new(
        text: impl Into<String>,
        delta: StatDelta,
        tags: &[Tag],
        provenance: Provenance,
        id: ChoiceId,
    ) -> Self {
        Self {
            text: text.into(),
            delta,
            tags: tags.iter().copied().collect(),
            requires: BTreeSet::new(),
            death_risk: 0.0,
            swing_prob: 0.0,
            provenance,
            id,
        }
    }

    pub fn with_risk(mut self, death_risk: f64, swing_prob: f64) -> Self {
        self.death_risk = death_risk;
        self.swing_prob = swing_prob;
        self
    }

    pub fn with_requires(mut self, requires: &[Tag]) -> Self {
        self.requires = requires.iter().copied().collect();
        self
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// `+`, `-` or `~` depending on the sign of the delta sum
    pub fn sign_hint(&self) -> char {
        match self.delta.total() {
            t if t > 0 => '+',
            t if t < 0 => '-',
            _ => '~',
        }
    }

    /// Delta preview with risk and swing hints, e.g. `wealth:-2  [risk~8% swing~35%]`
    pub fn preview(&self) -> String {
        let mut tips = Vec::new();
        if self.death_risk > 0.0 {
            tips.push(format!("risk~{}%", percent(self.death_risk)));
        }
        if self.swing_prob > 0.0 && self.delta.total() < 0 {
            tips.push(format!("swing~{}%", percent(self.swing_prob)));
        }
        if tips.is_empty() {
            self.delta.to_string()
        } else {
            format!("{}  [{}]", self.delta, tips.join(" "))
        }
    }
}

/// Whole percent, truncated
fn percent(p: f64) -> u32 {
    (p * 100.0) as u32
}
