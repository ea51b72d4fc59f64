//! Birth conditions and starting stats

use crate::core::types::{BirthCondition, Stat};
use crate::life::stats::{StatDelta, StatVector};

/// Stats every life starts from before the birth modifier
pub const BASE_STATS: StatVector = StatVector {
    health: 10,
    wealth: 5,
    knowledge: 5,
    karma: 5,
    charisma: 5,
};

/// Starting modifier for a birth condition
pub fn birth_modifier(birth: BirthCondition) -> StatDelta {
    match birth {
        BirthCondition::Rich => StatDelta::from_pairs(&[
            (Stat::Wealth, 10),
            (Stat::Health, 2),
            (Stat::Charisma, 2),
        ]),
        BirthCondition::Middle => StatDelta::from_pairs(&[(Stat::Wealth, 4)]),
        BirthCondition::Poor => StatDelta::from_pairs(&[
            (Stat::Wealth, 1),
            (Stat::Knowledge, 1),
            (Stat::Karma, 1),
        ]),
    }
}

pub fn starting_stats(birth: BirthCondition) -> StatVector {
    BASE_STATS.apply(&birth_modifier(birth))
}
