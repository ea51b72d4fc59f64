//! Per-era, per-age-band event tables
//!
//! Immutable reference data: base events become regular menu options,
//! environment triggers fire on their own after a choice resolves.

use crate::core::types::{AgeBand, Era, Stat};
use crate::life::stats::StatDelta;

use Stat::{Charisma, Health, Karma, Knowledge, Wealth};

/// Raw (text, delta) reference entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventEntry {
    pub text: &'static str,
    pub delta: &'static [(Stat, i32)],
}

impl EventEntry {
    pub fn stat_delta(&self) -> StatDelta {
        StatDelta::from_pairs(self.delta)
    }
}

/// Struct literal form so table slices are promoted to `'static`
macro_rules! ev {
    ($text:expr, $delta:expr $(,)?) => {
        EventEntry {
            text: $text,
            delta: $delta,
        }
    };
}

/// Base events for an era and age band
pub fn base_events(era: Era, band: AgeBand) -> &'static [EventEntry] {
    match (era, band) {
        (Era::Modern, AgeBand::Infant) => &[
            ev!("You babble at a mobile of planets.", &[(Knowledge, 1)]),
            ev!("You catch a cold but recover quickly.", &[(Health, -1), (Karma, 1)]),
            ev!("A caregiver reads picture books to you.", &[(Knowledge, 1), (Charisma, 1)]),
        ],
        (Era::Modern, AgeBand::Child) => &[
            ev!("You discover the library's kids corner.", &[(Knowledge, 3)]),
            ev!("You join a weekend sport team.", &[(Health, 2), (Charisma, 1)]),
            ev!("You share snacks at recess.", &[(Wealth, -1), (Karma, 1), (Charisma, 1)]),
        ],
        (Era::Modern, AgeBand::Teen) => &[
            ev!("You win a science fair with a scrappy project.", &[(Knowledge, 4), (Charisma, 1)]),
            ev!("You doomscroll late into the night.", &[(Knowledge, -2), (Health, -2)]),
            ev!("You volunteer for a local shelter.", &[(Karma, 2), (Charisma, 1)]),
        ],
        (Era::Modern, AgeBand::YoungAdult) => &[
            ev!("A scholarship offer appears in your inbox.", &[(Knowledge, 6), (Karma, 1)]),
            ev!("You build an open-source tool that gains stars.", &[(Knowledge, 5), (Wealth, 3)]),
            ev!("Start-up burns cash; you learn resilience.", &[(Wealth, -4), (Knowledge, 2)]),
        ],
        (Era::Modern, AgeBand::Adult) => &[
            ev!("You lead a small team through a tough release.", &[(Charisma, 2), (Knowledge, 2)]),
            ev!("You invest steadily and rebalance your portfolio.", &[(Wealth, 3)]),
            ev!("You neglect exercise during crunch time.", &[(Health, -2)]),
        ],
        (Era::Modern, AgeBand::Elder) => &[
            ev!("You mentor juniors and publish tutorials.", &[(Knowledge, 2), (Karma, 2)]),
            ev!("You take up brisk walks by the coast.", &[(Health, 2)]),
            ev!("You donate to an open access initiative.", &[(Wealth, -2), (Karma, 2)]),
        ],

        (Era::Tang, AgeBand::Infant) => &[
            ev!("A gentle lullaby soothes your sleep.", &[(Health, 1)]),
            ev!("A village healer blesses you with herbs.", &[(Karma, 1), (Health, 1)]),
            ev!("Neighbors gift you a silk charm.", &[(Charisma, 1)]),
        ],
        (Era::Tang, AgeBand::Child) => &[
            ev!("A poet teaches you regulated verse basics.", &[(Knowledge, 3), (Charisma, 1)]),
            ev!("You practice calligraphy on scrap bamboo.", &[(Knowledge, 2)]),
            ev!("You learn zithers' simple scales.", &[(Charisma, 1)]),
        ],
        (Era::Tang, AgeBand::Teen) => &[
            ev!("Rumors of imperial exams reach your county.", &[(Knowledge, 3)]),
            ev!("You learn courtesy rites from a traveling scholar.", &[(Charisma, 2)]),
            ev!("You copy classics by lamplight.", &[(Knowledge, 2), (Health, -1)]),
        ],
        (Era::Tang, AgeBand::YoungAdult) => &[
            ev!("You journey to the capital for the exams.", &[(Knowledge, 4), (Charisma, 1)]),
            ev!("Court intrigue: choose allies carefully.", &[(Charisma, 1), (Wealth, 2)]),
            ev!("You study under a stern examiner.", &[(Knowledge, 3), (Health, -1)]),
        ],
        (Era::Tang, AgeBand::Adult) => &[
            ev!("You mentor village pupils for the shengyuan.", &[(Knowledge, 3), (Karma, 1)]),
            ev!("Bandits harry the road; you escape wounded.", &[(Health, -3), (Karma, 1)]),
            ev!("You manage granary ledgers in a famine year.", &[(Wealth, 1), (Karma, -1)]),
        ],
        (Era::Tang, AgeBand::Elder) => &[
            ev!("Your verses enter a local anthology.", &[(Charisma, 2), (Knowledge, 2)]),
            ev!("You advise younger scholars under the plum tree.", &[(Karma, 2)]),
            ev!("You retire to quiet tea and bamboo shadows.", &[(Health, 1)]),
        ],

        (Era::Habsburg, AgeBand::Infant) => &[
            ev!("A nursemaid hums a courtly tune.", &[(Health, 1)]),
            ev!("A family crest is embroidered for you.", &[(Charisma, 1)]),
            ev!("A physician checks your temperament.", &[(Health, 1)]),
        ],
        (Era::Habsburg, AgeBand::Child) => &[
            ev!("A tutor drills you in etiquette and letters.", &[(Charisma, 2), (Knowledge, 1)]),
            ev!("You learn a simple minuet.", &[(Charisma, 1)]),
            ev!("You tour the city market with a steward.", &[(Knowledge, 1), (Wealth, 1)]),
        ],
        (Era::Habsburg, AgeBand::Teen) => &[
            ev!("You observe a salon from the side of the room.", &[(Knowledge, 2), (Charisma, 1)]),
            ev!("You study trade ledgers with a steward.", &[(Knowledge, 2), (Wealth, 1)]),
            ev!("You practice languages with visiting cousins.", &[(Charisma, 1), (Knowledge, 1)]),
        ],
        (Era::Habsburg, AgeBand::YoungAdult) => &[
            ev!("A diplomatic ball opens trade opportunities.", &[(Wealth, 4), (Charisma, 1)]),
            ev!("Patron a composer; salons praise your taste.", &[(Charisma, 3), (Knowledge, 2)]),
            ev!("You shadow an envoy in negotiations.", &[(Knowledge, 2), (Charisma, 1)]),
        ],
        (Era::Habsburg, AgeBand::Adult) => &[
            ev!("Inheritance dispute among cousins.", &[(Wealth, -3), (Charisma, 1)]),
            ev!("You negotiate a minor border tariff.", &[(Wealth, 3), (Charisma, 1)]),
            ev!("You sponsor an artisans' guild.", &[(Charisma, 1), (Karma, 1)]),
        ],
        (Era::Habsburg, AgeBand::Elder) => &[
            ev!("You sponsor a charity hospital in the city.", &[(Karma, 2), (Wealth, -2)]),
            ev!("Your household becomes a haven for artists.", &[(Charisma, 2)]),
            ev!("You compile letters into a family chronicle.", &[(Knowledge, 2)]),
        ],

        (Era::Prehistoric, AgeBand::Infant) => &[
            ev!("You nap by the hearth; embers crackle.", &[(Health, 1)]),
            ev!("Elders draw a spiral on your brow.", &[(Karma, 1)]),
            ev!("You grasp at beads made of bone.", &[(Charisma, 1)]),
        ],
        (Era::Prehistoric, AgeBand::Child) => &[
            ev!("You learn to weave grasses into cord.", &[(Knowledge, 2)]),
            ev!("You chase lizards between sun-warmed rocks.", &[(Health, 1)]),
            ev!("You collect bright stones for elders.", &[(Karma, 1)]),
        ],
        (Era::Prehistoric, AgeBand::Teen) => &[
            ev!("Hunt small game with an elder.", &[(Health, -1), (Charisma, 1)]),
            ev!("Cave paintings whisper patterns.", &[(Knowledge, 3)]),
            ev!("You keep the fire through a storm.", &[(Karma, 1), (Health, -1)]),
        ],
        (Era::Prehistoric, AgeBand::YoungAdult) => &[
            ev!("You befriend a fire spirit.", &[(Health, 2), (Karma, 2)]),
            ev!("Hunt a thunder-beast with obsidian spear.", &[(Health, -3), (Charisma, 2)]),
            ev!("You map a new pass across the ridge.", &[(Knowledge, 2), (Charisma, 1)]),
        ],
        (Era::Prehistoric, AgeBand::Adult) => &[
            ev!("You discover a rich flint seam by the river.", &[(Wealth, 3), (Knowledge, 1)]),
            ev!("A rival clan tests your borders.", &[(Charisma, 1), (Health, -1)]),
            ev!("You tame pack beasts for travel.", &[(Wealth, 1), (Health, 1)]),
        ],
        (Era::Prehistoric, AgeBand::Elder) => &[
            ev!("A shaman marks you as twice-born.", &[(Karma, 3)]),
            ev!("You teach star paths to the young.", &[(Knowledge, 2), (Karma, 1)]),
            ev!("You guide a migration to gentler lands.", &[(Charisma, 1), (Knowledge, 1)]),
        ],
    }
}

/// Environment triggers for an era and age band; infants have none
pub fn environment_triggers(era: Era, band: AgeBand) -> &'static [EventEntry] {
    match (era, band) {
        (_, AgeBand::Infant) => &[],

        (Era::Modern, AgeBand::Child) => &[ev!("Neighborhood fair boosts your mood.", &[(Karma, 1), (Charisma, 1)])],
        (Era::Modern, AgeBand::Teen) => &[ev!("A viral challenge distracts your study.", &[(Knowledge, -1)])],
        (Era::Modern, AgeBand::YoungAdult) => &[ev!("Coworker shares a gym routine.", &[(Health, 1)])],
        (Era::Modern, AgeBand::Adult) => &[ev!("Market dip tests your patience.", &[(Wealth, -1)])],
        (Era::Modern, AgeBand::Elder) => &[ev!(
            "Community tech club invites you to speak.",
            &[(Charisma, 1), (Knowledge, 1)],
        )],

        (Era::Tang, AgeBand::Child) => &[ev!("Spring festival lanterns lift your spirit.", &[(Karma, 1)])],
        (Era::Tang, AgeBand::Teen) => &[ev!("Local magistrate posts a new edict.", &[(Knowledge, 1)])],
        (Era::Tang, AgeBand::YoungAdult) => &[ev!("Monks offer tea and quiet counsel.", &[(Karma, 1), (Health, 1)])],
        (Era::Tang, AgeBand::Adult) => &[ev!("A drought threatens harvests.", &[(Wealth, -1)])],
        (Era::Tang, AgeBand::Elder) => &[ev!("Chrysanthemum viewing clears your mind.", &[(Health, 1)])],

        (Era::Habsburg, AgeBand::Child) => &[ev!("A visiting painter sketches your profile.", &[(Charisma, 1)])],
        (Era::Habsburg, AgeBand::Teen) => &[ev!("Estate steward shares a coin trick.", &[(Wealth, 1)])],
        (Era::Habsburg, AgeBand::YoungAdult) => &[ev!("A court rumor requires discretion.", &[(Charisma, 1)])],
        (Era::Habsburg, AgeBand::Adult) => &[ev!("Merchants bring news of new routes.", &[(Knowledge, 1)])],
        (Era::Habsburg, AgeBand::Elder) => &[ev!("A chapel choir stirs old memories.", &[(Karma, 1)])],

        (Era::Prehistoric, AgeBand::Child) => &[ev!("A sudden rain fills stone basins.", &[(Wealth, 1)])],
        (Era::Prehistoric, AgeBand::Teen) => &[ev!("You learn a safer way to tan hides.", &[(Knowledge, 1)])],
        (Era::Prehistoric, AgeBand::YoungAdult) => &[ev!("Aurora ripples; the camp feels blessed.", &[(Karma, 1)])],
        (Era::Prehistoric, AgeBand::Adult) => &[ev!("A new berry patch is found.", &[(Wealth, 1)])],
        (Era::Prehistoric, AgeBand::Elder) => &[ev!("Warm springs ease your joints.", &[(Health, 1)])],
    }
}
