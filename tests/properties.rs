//! Property tests for the stat model, menu construction and outcome rolls

use std::collections::BTreeSet;

use ahash::AHashSet;
use life_rewind::content::resolver::{resolve_pool, ChapterContext};
use life_rewind::core::types::{Era, Provenance, Stat, Tag};
use life_rewind::life::choice::{Choice, ChoiceId};
use life_rewind::life::stats::{StatDelta, StatVector, STAT_MAX, STAT_MIN};
use life_rewind::progression::menu::build_option_menu;
use life_rewind::progression::outcome::resolve_outcome;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const TAGS: [Tag; 7] = [
    Tag::Study,
    Tag::Network,
    Tag::Health,
    Tag::Risk,
    Tag::Rest,
    Tag::Work,
    Tag::Retire,
];

fn delta_from(entries: &[(usize, i32)]) -> StatDelta {
    let pairs: Vec<(Stat, i32)> = entries
        .iter()
        .map(|(stat, amount)| (Stat::ALL[*stat], *amount))
        .collect();
    StatDelta::from_pairs(&pairs)
}

fn vector_from(values: &[i32]) -> StatVector {
    StatVector::new(values[0], values[1], values[2], values[3], values[4])
}

proptest! {
    #[test]
    fn property_apply_stays_in_bounds(
        start in prop::collection::vec(STAT_MIN..=STAT_MAX, 5),
        entries in prop::collection::vec((0_usize..5, -500_i32..500), 0..8),
    ) {
        let stats = vector_from(&start).apply(&delta_from(&entries));
        for stat in Stat::ALL {
            prop_assert!((STAT_MIN..=STAT_MAX).contains(&stats.get(stat)));
        }
    }

    #[test]
    fn property_apply_commutes_away_from_bounds(
        start in prop::collection::vec(20_i32..=80, 5),
        a in prop::collection::vec((0_usize..5, -5_i32..=5), 0..4),
        b in prop::collection::vec((0_usize..5, -5_i32..=5), 0..4),
    ) {
        let stats = vector_from(&start);
        let (da, db) = (delta_from(&a), delta_from(&b));
        prop_assert_eq!(stats.apply(&da).apply(&db), stats.apply(&db).apply(&da));
        prop_assert_eq!(stats.apply(&da).apply(&db), stats.apply(&da.merged(&db)));
    }

    #[test]
    fn property_menu_has_distinct_identities(
        seed in any::<u64>(),
        era in 0_usize..4,
        age in 0_u32..100,
        flag_mask in 0_u8..128,
        used_mask in any::<u64>(),
    ) {
        let ctx = ChapterContext::new(Era::ALL[era], age, 0);
        let flags: BTreeSet<Tag> = TAGS
            .iter()
            .enumerate()
            .filter(|(i, _)| (flag_mask & (1 << i)) != 0)
            .map(|(_, tag)| *tag)
            .collect();

        // Mark a random subset of the fresh pool as already used
        let used: AHashSet<ChoiceId> = resolve_pool(&ctx, &AHashSet::new())
            .into_iter()
            .enumerate()
            .filter(|(i, _)| (used_mask & (1 << (i % 64))) != 0)
            .map(|(_, choice)| choice.id)
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let menu = build_option_menu(&ctx, &used, &flags, 3, &mut rng);
        prop_assert_eq!(menu.len(), 3);

        let ids: AHashSet<&ChoiceId> = menu.iter().map(|c| &c.id).collect();
        prop_assert_eq!(ids.len(), 3);
        for choice in &menu {
            prop_assert!(!used.contains(&choice.id));
        }
    }

    #[test]
    fn property_riskless_outcome_applies_exact_delta(
        seed in any::<u64>(),
        start in prop::collection::vec(20_i32..=80, 5),
        entries in prop::collection::vec((0_usize..5, -5_i32..=5), 0..5),
    ) {
        let delta = delta_from(&entries);
        let choice = Choice::new("steady", delta.clone(), &[], Provenance::Dynamic, ChoiceId::new("steady"))
            .with_risk(0.0, 0.0);
        let stats = vector_from(&start);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let outcome = resolve_outcome(&choice, &stats, &mut rng);
        prop_assert!(!outcome.died);
        prop_assert!(outcome.swing.is_none());
        prop_assert_eq!(&outcome.net_delta, &delta);
        prop_assert_eq!(outcome.stats, stats.apply(&delta));
    }
}
