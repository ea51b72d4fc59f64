//! Chronological life log

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{BirthCondition, Era, Nationality};
use crate::life::stats::{StatDelta, StatVector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LogEntry {
    Birth {
        birth: BirthCondition,
        nationality: Nationality,
        era: Era,
        age: u32,
    },
    Choice {
        age: u32,
        text: String,
        note: String,
        result: StatDelta,
        /// `None` when an ending fired before the variation was drawn
        variation: Option<StatDelta>,
        total: StatDelta,
        stats: StatVector,
    },
    Rift {
        age: u32,
        label: String,
        from: Era,
        to: Era,
    },
    Environment {
        age: u32,
        text: String,
        impact: StatDelta,
        stats: StatVector,
    },
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Birth {
                birth,
                nationality,
                era,
                age,
            } => write!(
                f,
                "You are reborn ({}) in {} during {} at age {}.",
                birth.key().to_uppercase(),
                nationality.label(),
                era.label(),
                age
            ),
            LogEntry::Choice {
                age,
                text,
                note,
                result,
                variation,
                total,
                stats,
            } => {
                write!(f, "[age {}] {}", age, text)?;
                if !note.is_empty() {
                    write!(f, " {}", note)?;
                }
                let rnd = variation
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "none".to_string());
                write!(
                    f,
                    " | result {} | rnd {} | total {} -> {}",
                    result, rnd, total, stats
                )
            }
            LogEntry::Rift {
                age,
                label,
                from,
                to,
            } => write!(f, "[age {}] RIFT {} | {} -> {}", age, label, from.label(), to.label()),
            LogEntry::Environment {
                age,
                text,
                impact,
                stats,
            } => write!(f, "[age {}] ENV {} | impact {} -> {}", age, text, impact, stats),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifeLog {
    pub entries: Vec<LogEntry>,
}

impl LifeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Stat;

    #[test]
    fn test_birth_line() {
        let entry = LogEntry::Birth {
            birth: BirthCondition::Rich,
            nationality: Nationality::China,
            era: Era::Tang,
            age: 0,
        };
        assert_eq!(
            entry.to_string(),
            "You are reborn (RICH) in China during Ancient China - Tang Dynasty at age 0."
        );
    }

    #[test]
    fn test_choice_line() {
        let result = StatDelta::from_pairs(&[(Stat::Knowledge, 3)]);
        let variation = StatDelta::from_pairs(&[(Stat::Health, -1)]);
        let entry = LogEntry::Choice {
            age: 5,
            text: "At age 5, You discover the library's kids corner.".into(),
            note: String::new(),
            total: result.merged(&variation),
            result,
            variation: Some(variation),
            stats: StatVector::new(9, 5, 8, 5, 5),
        };
        assert_eq!(
            entry.to_string(),
            "[age 5] At age 5, You discover the library's kids corner. | result knowledge:+3 \
             | rnd health:-1 | total health:-1, knowledge:+3 -> H9 W5 K8 Ka5 Ch5"
        );
    }

    #[test]
    fn test_log_serializes() {
        let mut log = LifeLog::new();
        log.push(LogEntry::Environment {
            age: 14,
            text: "Local magistrate posts a new edict.".into(),
            impact: StatDelta::from_pairs(&[(Stat::Knowledge, 1)]),
            stats: StatVector::new(10, 5, 6, 5, 5),
        });
        let json = log.to_json().expect("serializable");
        assert!(json.contains("Local magistrate"));
        assert_eq!(log.lines().len(), 1);
    }
}
