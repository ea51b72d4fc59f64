//! Milestone scheduler
//!
//! Milestone ages get a fixed two-option menu instead of the regular one,
//! and age steps are capped so that every milestone is landed on exactly.

use std::collections::BTreeSet;

use crate::content::flavor::{flavor, light_work, Flavor};
use crate::core::types::{Era, Provenance, Stat, Tag};
use crate::life::choice::{Choice, ChoiceId};
use crate::life::stats::StatDelta;

/// Which fixed pair a milestone offers, derived from its list position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneKind {
    /// First milestone: study or light chores
    Childhood,
    /// Study or work, with costs escalating by tier (1..=3)
    Career { tier: u8 },
    /// Last milestone: keep working or retire
    Retirement,
}

impl MilestoneKind {
    pub fn for_index(index: usize, count: usize) -> Self {
        if index == 0 {
            MilestoneKind::Childhood
        } else if index + 1 == count {
            MilestoneKind::Retirement
        } else {
            MilestoneKind::Career {
                tier: index.min(3) as u8,
            }
        }
    }
}

/// True when `age` is a milestone that has not fired yet
pub fn is_pending_milestone(age: u32, milestones: &[u32], processed: &BTreeSet<u32>) -> bool {
    milestones.contains(&age) && !processed.contains(&age)
}

fn milestone_id(age: u32, archetype: Tag, era: Era) -> ChoiceId {
    ChoiceId::new(format!("mile:{}:{}:{}", age, archetype.key(), era))
}

fn prefixed(age: u32, text: &str) -> String {
    format!("At age {}, {}", age, text)
}

/// Fixed pair for a milestone age, or `None` when `age` is not a milestone
pub fn build_milestone_menu(era: Era, age: u32, milestones: &[u32]) -> Option<Vec<Choice>> {
    let index = milestones.iter().position(|&m| m == age)?;
    let kind = MilestoneKind::for_index(index, milestones.len());

    let study = |delta: StatDelta| {
        Choice::new(
            prefixed(age, flavor(era, Flavor::Study)),
            delta,
            &[Tag::Study],
            Provenance::Milestone,
            milestone_id(age, Tag::Study, era),
        )
    };
    let work = |delta: StatDelta, death: f64, swing: f64| {
        Choice::new(
            prefixed(age, flavor(era, Flavor::Work)),
            delta,
            &[Tag::Work],
            Provenance::Milestone,
            milestone_id(age, Tag::Work, era),
        )
        .with_risk(death, swing)
    };

    let menu = match kind {
        MilestoneKind::Childhood => vec![
            study(StatDelta::from_pairs(&[(Stat::Knowledge, 2)])),
            Choice::new(
                prefixed(age, light_work(era)),
                StatDelta::from_pairs(&[(Stat::Charisma, 1), (Stat::Karma, 1), (Stat::Health, -1)]),
                &[Tag::Work],
                Provenance::Milestone,
                milestone_id(age, Tag::Work, era),
            )
            .with_risk(0.0, 0.10),
        ],
        MilestoneKind::Career { tier } if tier < 3 => {
            let study_health = if tier == 2 { -1 } else { 0 };
            vec![
                study(StatDelta::from_pairs(&[
                    (Stat::Knowledge, 3),
                    (Stat::Wealth, -1),
                    (Stat::Health, study_health),
                ])),
                work(
                    StatDelta::from_pairs(&[(Stat::Wealth, 2), (Stat::Health, -1)]),
                    0.04,
                    0.25,
                ),
            ]
        }
        MilestoneKind::Career { .. } => vec![
            study(StatDelta::from_pairs(&[(Stat::Knowledge, 2), (Stat::Wealth, -1)])),
            work(
                StatDelta::from_pairs(&[(Stat::Wealth, 3), (Stat::Health, -1)]),
                0.05,
                0.25,
            ),
        ],
        MilestoneKind::Retirement => vec![
            work(
                StatDelta::from_pairs(&[(Stat::Wealth, 2), (Stat::Health, -1)]),
                0.04,
                0.15,
            ),
            Choice::new(
                prefixed(age, flavor(era, Flavor::Retire)),
                StatDelta::from_pairs(&[(Stat::Health, 2), (Stat::Karma, 1), (Stat::Wealth, -2)]),
                &[Tag::Retire],
                Provenance::Milestone,
                milestone_id(age, Tag::Retire, era),
            ),
        ],
    };
    Some(menu)
}

/// Smallest unprocessed milestone strictly after `age`
pub fn next_unprocessed_milestone(age: u32, milestones: &[u32], processed: &BTreeSet<u32>) -> Option<u32> {
    milestones
        .iter()
        .copied()
        .filter(|m| *m > age && !processed.contains(m))
        .min()
}

/// Clamp `step` so the next age never skips past an unprocessed milestone
pub fn cap_age_step_to_milestone(
    age: u32,
    step: u32,
    milestones: &[u32],
    processed: &BTreeSet<u32>,
) -> u32 {
    match next_unprocessed_milestone(age, milestones, processed) {
        Some(next) if age + step > next => (next - age).max(1),
        _ => step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MILESTONES: [u32; 5] = [7, 18, 24, 30, 50];

    #[test]
    fn test_cap_lands_on_milestone() {
        assert_eq!(cap_age_step_to_milestone(5, 6, &MILESTONES, &BTreeSet::new()), 2);
    }

    #[test]
    fn test_cap_unchanged_without_future_milestone() {
        let milestones = [7];
        let processed = BTreeSet::from([7]);
        assert_eq!(cap_age_step_to_milestone(8, 4, &milestones, &processed), 4);
    }

    #[test]
    fn test_cap_skips_processed_milestones() {
        let processed = BTreeSet::from([7, 18]);
        // Next unprocessed is 24
        assert_eq!(cap_age_step_to_milestone(16, 6, &MILESTONES, &processed), 6);
        assert_eq!(cap_age_step_to_milestone(20, 6, &MILESTONES, &processed), 4);
    }

    #[test]
    fn test_cap_exact_landing_is_unchanged() {
        assert_eq!(cap_age_step_to_milestone(3, 4, &MILESTONES, &BTreeSet::new()), 4);
    }

    #[test]
    fn test_cap_minimum_of_one() {
        // Unprocessed milestones behind the current age are ignored
        let processed = BTreeSet::new();
        assert_eq!(cap_age_step_to_milestone(29, 6, &MILESTONES, &processed), 1);
    }

    #[test]
    fn test_pending_milestone() {
        let processed = BTreeSet::from([7]);
        assert!(!is_pending_milestone(7, &MILESTONES, &processed));
        assert!(is_pending_milestone(18, &MILESTONES, &processed));
        assert!(!is_pending_milestone(19, &MILESTONES, &processed));
    }

    #[test]
    fn test_milestone_kinds() {
        assert_eq!(MilestoneKind::for_index(0, 5), MilestoneKind::Childhood);
        assert_eq!(MilestoneKind::for_index(1, 5), MilestoneKind::Career { tier: 1 });
        assert_eq!(MilestoneKind::for_index(2, 5), MilestoneKind::Career { tier: 2 });
        assert_eq!(MilestoneKind::for_index(3, 5), MilestoneKind::Career { tier: 3 });
        assert_eq!(MilestoneKind::for_index(4, 5), MilestoneKind::Retirement);
        assert_eq!(MilestoneKind::for_index(0, 1), MilestoneKind::Childhood);
    }

    #[test]
    fn test_childhood_menu() {
        let menu = build_milestone_menu(Era::Prehistoric, 7, &MILESTONES).expect("milestone");
        assert_eq!(menu.len(), 2);
        assert_eq!(menu[0].delta, StatDelta::from_pairs(&[(Stat::Knowledge, 2)]));
        assert_eq!(menu[1].text, "At age 7, gather berries and carry water for the camp.");
        assert_eq!(menu[1].swing_prob, 0.10);
        assert_eq!(menu[1].id.as_str(), "mile:7:work:prehistoric");
        assert!(menu.iter().all(|c| c.provenance == Provenance::Milestone));
    }

    #[test]
    fn test_career_escalation() {
        let m18 = build_milestone_menu(Era::Modern, 18, &MILESTONES).expect("milestone");
        let m24 = build_milestone_menu(Era::Modern, 24, &MILESTONES).expect("milestone");
        let m30 = build_milestone_menu(Era::Modern, 30, &MILESTONES).expect("milestone");
        assert_eq!(m18[0].delta.get(Stat::Health), 0);
        assert_eq!(m24[0].delta.get(Stat::Health), -1);
        assert_eq!(m18[1].death_risk, 0.04);
        assert_eq!(m30[1].death_risk, 0.05);
        assert_eq!(m30[1].delta.get(Stat::Wealth), 3);
    }

    #[test]
    fn test_retirement_menu() {
        let menu = build_milestone_menu(Era::Tang, 50, &MILESTONES).expect("milestone");
        assert!(menu[0].has_tag(Tag::Work));
        assert!(menu[1].has_tag(Tag::Retire));
        assert_eq!(menu[1].text, "At age 50, Withdraw from office to a quiet garden.");
    }

    #[test]
    fn test_non_milestone_age() {
        assert!(build_milestone_menu(Era::Tang, 8, &MILESTONES).is_none());
    }
}
