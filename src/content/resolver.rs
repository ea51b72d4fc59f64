//! Content resolver: raw reference entries -> typed choices
//!
//! Base entries are tagged by keyword heuristics, dynamic entries are built
//! from five fixed archetypes flavored by era. Identities already used in the
//! session are filtered out here, before the menu builder ranks anything.

use std::collections::BTreeSet;

use ahash::AHashSet;

use crate::content::events::{base_events, EventEntry};
use crate::content::flavor::{flavor, Flavor};
use crate::core::hashing::fnv1a;
use crate::core::types::{AgeBand, Era, Provenance, Stat, Tag};
use crate::life::choice::{Choice, ChoiceId};
use crate::life::stats::StatDelta;

/// Swing chance given to keyword-tagged risky base events
pub const BASE_RISK_SWING: f64 = 0.2;

const STUDY_KEYWORDS: &[&str] = &["exam", "study", "copy", "science", "tutor", "project", "tool"];
const NETWORK_KEYWORDS: &[&str] = &["ball", "salon", "meetup", "team", "patron", "donate"];
const HEALTH_KEYWORDS: &[&str] = &["hunt", "walks", "qigong", "train", "exercise"];
const RISK_KEYWORDS: &[&str] = &["bandit", "burns", "drought", "storm"];

/// Where in the session a pool or menu is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterContext {
    pub era: Era,
    pub band: AgeBand,
    pub age: u32,
    /// Monotonic per-session menu counter; keeps filler identities unique
    pub serial: u32,
}

impl ChapterContext {
    pub fn new(era: Era, age: u32, serial: u32) -> Self {
        Self {
            era,
            band: AgeBand::for_age(age),
            age,
            serial,
        }
    }
}

/// Keyword classification of a base event text
///
/// Case-insensitive substring matching against four vocabularies. A text
/// may land in several categories or none.
pub fn classify_text(text: &str) -> BTreeSet<Tag> {
    let lowered = text.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    let mut tags = BTreeSet::new();
    if matches(STUDY_KEYWORDS) {
        tags.insert(Tag::Study);
    }
    if matches(NETWORK_KEYWORDS) {
        tags.insert(Tag::Network);
    }
    if matches(HEALTH_KEYWORDS) {
        tags.insert(Tag::Health);
    }
    if matches(RISK_KEYWORDS) {
        tags.insert(Tag::Risk);
    }
    tags
}

/// Identity of a base entry; stable across runs and content reordering
pub fn base_choice_id(era: Era, band: AgeBand, text: &str) -> ChoiceId {
    ChoiceId::new(format!("base:{}:{}:{:016x}", era, band, fnv1a(text)))
}

pub fn base_choice(era: Era, band: AgeBand, entry: &EventEntry) -> Choice {
    let tags = classify_text(entry.text);
    let swing = if tags.contains(&Tag::Risk) {
        BASE_RISK_SWING
    } else {
        0.0
    };
    Choice {
        text: entry.text.to_string(),
        delta: entry.stat_delta(),
        tags,
        requires: BTreeSet::new(),
        death_risk: 0.0,
        swing_prob: swing,
        provenance: Provenance::Base,
        id: base_choice_id(era, band, entry.text),
    }
}

fn dynamic_id(era: Era, band: AgeBand, archetype: Tag) -> ChoiceId {
    ChoiceId::new(format!("dyn:{}:{}:{}", era, band, archetype.key()))
}

/// The five flavored archetype options for an era and age band
pub fn dynamic_choices(era: Era, band: AgeBand) -> Vec<Choice> {
    let study_knowledge = if band == AgeBand::Infant { 1 } else { 2 };
    let study_health = if band == AgeBand::Teen { -1 } else { 0 };
    let network_wealth = if matches!(era, Era::Habsburg | Era::Modern) { 1 } else { 0 };
    let rest_knowledge = if matches!(band, AgeBand::Teen | AgeBand::YoungAdult) { -1 } else { 0 };

    // Elders take a milder version of the risky gamble
    let (risk_delta, risk_death) = if band == AgeBand::Elder {
        (StatDelta::from_pairs(&[(Stat::Wealth, -1), (Stat::Health, -1)]), 0.05)
    } else {
        (StatDelta::from_pairs(&[(Stat::Wealth, -2), (Stat::Health, -1)]), 0.08)
    };

    vec![
        Choice::new(
            flavor(era, Flavor::Study),
            StatDelta::from_pairs(&[(Stat::Knowledge, study_knowledge), (Stat::Health, study_health)]),
            &[Tag::Study],
            Provenance::Dynamic,
            dynamic_id(era, band, Tag::Study),
        ),
        Choice::new(
            flavor(era, Flavor::Network),
            StatDelta::from_pairs(&[(Stat::Charisma, 2), (Stat::Wealth, network_wealth)]),
            &[Tag::Network],
            Provenance::Dynamic,
            dynamic_id(era, band, Tag::Network),
        ),
        Choice::new(
            flavor(era, Flavor::Risk),
            risk_delta,
            &[Tag::Risk],
            Provenance::Dynamic,
            dynamic_id(era, band, Tag::Risk),
        )
        .with_risk(risk_death, 0.35),
        Choice::new(
            flavor(era, Flavor::Health),
            StatDelta::from_pairs(&[(Stat::Health, 2)]),
            &[Tag::Health],
            Provenance::Dynamic,
            dynamic_id(era, band, Tag::Health),
        ),
        Choice::new(
            flavor(era, Flavor::Rest),
            StatDelta::from_pairs(&[(Stat::Health, 1), (Stat::Karma, 1), (Stat::Knowledge, rest_knowledge)]),
            &[Tag::Rest],
            Provenance::Dynamic,
            dynamic_id(era, band, Tag::Rest),
        ),
    ]
}

/// Stand-in option used when every pool is exhausted
pub fn routine_filler(ctx: &ChapterContext) -> Choice {
    Choice::new(
        "Quiet year of routines.",
        StatDelta::from_pairs(&[(Stat::Karma, 1)]),
        &[Tag::Rest],
        Provenance::Dynamic,
        ChoiceId::new(format!(
            "filler:{}:{}:routine:{}:{}",
            ctx.era, ctx.band, ctx.age, ctx.serial
        )),
    )
}

/// Merged base + dynamic pool minus used identities; never empty
pub fn resolve_pool(ctx: &ChapterContext, used: &AHashSet<ChoiceId>) -> Vec<Choice> {
    let mut seen_texts: BTreeSet<&str> = BTreeSet::new();
    let mut pool: Vec<Choice> = Vec::new();

    for entry in base_events(ctx.era, ctx.band) {
        if !seen_texts.insert(entry.text) {
            continue;
        }
        let choice = base_choice(ctx.era, ctx.band, entry);
        if !used.contains(&choice.id) {
            pool.push(choice);
        }
    }
    let base_count = pool.len();

    pool.extend(
        dynamic_choices(ctx.era, ctx.band)
            .into_iter()
            .filter(|choice| !used.contains(&choice.id)),
    );

    tracing::debug!(
        "Resolved pool for {} / {} at age {}: {} base, {} dynamic",
        ctx.era,
        ctx.band,
        ctx.age,
        base_count,
        pool.len() - base_count
    );

    if pool.is_empty() {
        pool.push(routine_filler(ctx));
    }
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_literal_content() {
        let tags = classify_text("You win a science fair with a scrappy project.");
        assert_eq!(tags, BTreeSet::from([Tag::Study]));

        let tags = classify_text("Bandits harry the road; you escape wounded.");
        assert_eq!(tags, BTreeSet::from([Tag::Risk]));

        let tags = classify_text("You join a weekend sport team.");
        assert_eq!(tags, BTreeSet::from([Tag::Network]));

        let tags = classify_text("You take up brisk walks by the coast.");
        assert_eq!(tags, BTreeSet::from([Tag::Health]));
    }

    #[test]
    fn test_classify_multiple_and_none() {
        // "Start-up burns cash" matches risk; nothing else
        assert_eq!(
            classify_text("Start-up burns cash; you learn resilience."),
            BTreeSet::from([Tag::Risk])
        );
        // "tool" (study) and nothing else, despite "stars"
        assert_eq!(
            classify_text("You build an open-source tool that gains stars."),
            BTreeSet::from([Tag::Study])
        );
        // Hunting through a storm is both health and risk
        assert_eq!(
            classify_text("Hunt through the STORM"),
            BTreeSet::from([Tag::Health, Tag::Risk])
        );
        assert!(classify_text("You learn a simple minuet.").is_empty());
    }

    #[test]
    fn test_risky_base_event_gets_swing() {
        let entry = base_events(Era::Tang, AgeBand::Adult)[1];
        let choice = base_choice(Era::Tang, AgeBand::Adult, &entry);
        assert!(choice.has_tag(Tag::Risk));
        assert_eq!(choice.swing_prob, BASE_RISK_SWING);
        assert_eq!(choice.death_risk, 0.0);
        assert_eq!(choice.provenance, Provenance::Base);
    }

    #[test]
    fn test_base_id_depends_on_era_band_and_text() {
        let text = "You learn a simple minuet.";
        let a = base_choice_id(Era::Habsburg, AgeBand::Child, text);
        assert_eq!(a, base_choice_id(Era::Habsburg, AgeBand::Child, text));
        assert_ne!(a, base_choice_id(Era::Habsburg, AgeBand::Teen, text));
        assert_ne!(a, base_choice_id(Era::Modern, AgeBand::Child, text));
        assert!(a.as_str().starts_with("base:habsburg:child:"));
    }

    #[test]
    fn test_dynamic_archetypes() {
        let teen = dynamic_choices(Era::Tang, AgeBand::Teen);
        assert_eq!(teen.len(), 5);
        assert_eq!(teen[0].delta.get(Stat::Health), -1);
        // Tang networking brings no wealth
        assert_eq!(teen[1].delta.get(Stat::Wealth), 0);
        assert_eq!(teen[4].delta.get(Stat::Knowledge), -1);

        let infant = dynamic_choices(Era::Modern, AgeBand::Infant);
        assert_eq!(infant[0].delta, StatDelta::from_pairs(&[(Stat::Knowledge, 1)]));
        assert_eq!(infant[1].delta.get(Stat::Wealth), 1);
    }

    #[test]
    fn test_elder_risk_override() {
        let adult = dynamic_choices(Era::Modern, AgeBand::Adult);
        let elder = dynamic_choices(Era::Modern, AgeBand::Elder);
        assert_eq!(adult[2].death_risk, 0.08);
        assert_eq!(adult[2].delta.get(Stat::Wealth), -2);
        assert_eq!(elder[2].death_risk, 0.05);
        assert_eq!(elder[2].delta, StatDelta::from_pairs(&[(Stat::Wealth, -1), (Stat::Health, -1)]));
        assert_eq!(elder[2].swing_prob, 0.35);
    }

    #[test]
    fn test_pool_skips_used_identities() {
        let ctx = ChapterContext::new(Era::Modern, 10, 0);
        let full = resolve_pool(&ctx, &AHashSet::new());
        assert_eq!(full.len(), 8);

        let used: AHashSet<ChoiceId> = full.iter().take(3).map(|c| c.id.clone()).collect();
        let rest = resolve_pool(&ctx, &used);
        assert_eq!(rest.len(), 5);
        assert!(rest.iter().all(|c| !used.contains(&c.id)));
    }

    #[test]
    fn test_exhausted_pool_yields_routine_filler() {
        let ctx = ChapterContext::new(Era::Prehistoric, 70, 4);
        let used: AHashSet<ChoiceId> = resolve_pool(&ctx, &AHashSet::new())
            .into_iter()
            .map(|c| c.id)
            .collect();
        let pool = resolve_pool(&ctx, &used);
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].text, "Quiet year of routines.");
        assert_eq!(pool[0].delta, StatDelta::from_pairs(&[(Stat::Karma, 1)]));
    }
}
