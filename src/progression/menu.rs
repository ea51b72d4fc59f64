//! Menu builder: rank, deduplicate, personalize and pad the option pool

use std::collections::BTreeSet;

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::content::resolver::{resolve_pool, ChapterContext};
use crate::core::types::{AgeBand, Provenance, Stat, Tag};
use crate::life::choice::{Choice, ChoiceId};
use crate::life::stats::StatDelta;

/// Tag overlap with the accumulated flags, +1 when a non-empty requirement
/// set is fully satisfied
pub fn bias_score(choice: &Choice, flags: &BTreeSet<Tag>) -> usize {
    let overlap = choice.tags.intersection(flags).count();
    let requirement_bonus =
        usize::from(!choice.requires.is_empty() && choice.requires.is_subset(flags));
    overlap + requirement_bonus
}

/// Age-band adjustment to a selected option's delta
pub fn personalize_delta(choice: &Choice, band: AgeBand) -> StatDelta {
    let mut delta = choice.delta.clone();
    match band {
        AgeBand::Teen => {
            if choice.has_tag(Tag::Rest) {
                delta.add(Stat::Health, 1);
            }
            if choice.has_tag(Tag::Risk) {
                delta.add(Stat::Health, -1);
            }
        }
        AgeBand::YoungAdult => {
            if choice.has_tag(Tag::Study) {
                delta.add(Stat::Knowledge, 1);
            }
            if choice.has_tag(Tag::Work) {
                delta.add(Stat::Wealth, 1);
            }
        }
        AgeBand::Elder => {
            if choice.has_tag(Tag::Health) {
                delta.add(Stat::Health, 1);
            }
            if choice.has_tag(Tag::Risk) {
                delta.add(Stat::Health, -1);
            }
        }
        _ => {}
    }
    delta
}

/// Copy of `choice` with the age prefix and band adjustments applied
pub fn personalize(choice: &Choice, age: u32, band: AgeBand) -> Choice {
    Choice {
        text: format!("At age {}, {}", age, choice.text),
        delta: personalize_delta(choice, band),
        ..choice.clone()
    }
}

fn padding_filler(ctx: &ChapterContext, position: usize) -> Choice {
    Choice::new(
        format!("At age {}, keep humble habits.", ctx.age),
        StatDelta::from_pairs(&[(Stat::Karma, 1)]),
        &[Tag::Rest],
        Provenance::Dynamic,
        ChoiceId::new(format!(
            "filler:{}:{}:{}:{}",
            ctx.era, ctx.age, ctx.serial, position
        )),
    )
}

/// Build a regular chapter menu of exactly `menu_size` distinct options
///
/// The pool is shuffled before a stable sort on bias score, so equally
/// biased options break ties randomly but reproducibly for a given seed.
pub fn build_option_menu(
    ctx: &ChapterContext,
    used: &AHashSet<ChoiceId>,
    flags: &BTreeSet<Tag>,
    menu_size: usize,
    rng: &mut ChaCha8Rng,
) -> Vec<Choice> {
    let mut pool = resolve_pool(ctx, used);
    pool.shuffle(rng);
    pool.sort_by_key(|choice| std::cmp::Reverse(bias_score(choice, flags)));

    let mut menu: Vec<Choice> = Vec::with_capacity(menu_size);
    let mut seen: AHashSet<ChoiceId> = AHashSet::new();
    for choice in &pool {
        if menu.len() == menu_size {
            break;
        }
        if !seen.insert(choice.id.clone()) {
            continue;
        }
        menu.push(personalize(choice, ctx.age, ctx.band));
    }

    while menu.len() < menu_size {
        menu.push(padding_filler(ctx, menu.len()));
    }

    tracing::debug!(
        "Menu at age {} ({}): {:?}",
        ctx.age,
        ctx.band,
        menu.iter().map(|c| c.id.as_str()).collect::<Vec<_>>()
    );
    menu
}
