//! Chapter pipeline
//!
//! Each chapter:
//! 1. Present a milestone menu if the age is a pending milestone, else a regular menu
//! 2. Take the player's pick (or open a time rift and auto-pick)
//! 3. Resolve the outcome (delta, swing, death), then check endings
//! 4. Apply random variation, then check endings
//! 5. Maybe fire an environment trigger, then check endings
//! 6. Advance the age, capped so no milestone is skipped
//!
//! All randomness comes from one seeded `ChaCha8Rng`, consumed in this order.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::content::resolver::ChapterContext;
use crate::core::config::EngineConfig;
use crate::core::error::{LifeError, Result};
use crate::core::types::{AgeBand, Era, PlayerId};
use crate::life::choice::Choice;
use crate::life::stats::{StatDelta, StatVector};
use crate::progression::ending::{check_special_endings, NarrativeClass, SpecialEnding};
use crate::progression::environment::{maybe_env_trigger, TriggerKey};
use crate::progression::menu::build_option_menu;
use crate::progression::milestone::{build_milestone_menu, cap_age_step_to_milestone, is_pending_milestone};
use crate::progression::outcome::resolve_outcome;
use crate::progression::rift::{open_time_rift, RiftOutcome};
use crate::progression::variation::{random_age_step, random_variation};
use crate::session::log::{LifeLog, LogEntry};
use crate::session::state::{LifeSetup, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuKind {
    Regular,
    Milestone,
}

/// Options presented for one chapter
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterMenu {
    pub chapter: u32,
    pub age: u32,
    pub band: AgeBand,
    pub era: Era,
    pub kind: MenuKind,
    pub options: Vec<Choice>,
}

impl ChapterMenu {
    /// Rifts are only offered on regular chapters
    pub fn allows_rift(&self) -> bool {
        self.kind == MenuKind::Regular
    }
}

/// What the player did at the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// Zero-based index into the current menu
    Pick(usize),
    /// Open a time rift and let the engine pick
    Rift,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Conclusion {
    Special(SpecialEnding),
    /// Reached the maximum age
    NaturalEndpoint,
    /// Ran out of chapters first
    ChapterLimit(NarrativeClass),
}

impl Conclusion {
    pub fn title(&self) -> &'static str {
        match self {
            Conclusion::Special(_) => "Special Ending",
            Conclusion::NaturalEndpoint => "Final Ending",
            Conclusion::ChapterLimit(_) => "Final Page",
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Conclusion::Special(ending) => ending.text(),
            Conclusion::NaturalEndpoint => "You lived a brilliant life.",
            Conclusion::ChapterLimit(class) => class.text(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentEvent {
    pub text: String,
    pub impact: StatDelta,
    pub stats: StatVector,
}

/// Everything that happened in one resolved chapter
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterReport {
    pub chapter: u32,
    pub age: u32,
    pub rift: Option<RiftOutcome>,
    /// True when the engine picked the option after a rift
    pub auto_picked: bool,
    pub choice: Choice,
    pub note: String,
    pub died: bool,
    /// Net delta from the outcome resolver
    pub option_delta: StatDelta,
    pub variation: Option<StatDelta>,
    pub total: StatDelta,
    /// Stats after the choice and variation, before any environment trigger
    pub stats: StatVector,
    pub environment: Option<EnvironmentEvent>,
    /// Years advanced; `None` when the session ended before aging
    pub age_step: Option<u32>,
    pub new_age: u32,
    pub conclusion: Option<Conclusion>,
}

/// One life, from birth to its ending
pub struct Session {
    config: EngineConfig,
    player: PlayerId,
    seed: u64,
    rng: ChaCha8Rng,
    state: SessionState,
    log: LifeLog,
    pending: Option<ChapterMenu>,
    menu_serial: u32,
    conclusion: Option<Conclusion>,
}

impl Session {
    pub fn new(config: EngineConfig, setup: LifeSetup, player: PlayerId, seed: u64) -> Result<Self> {
        config.validate().map_err(LifeError::Config)?;

        let state = SessionState::new(&setup);
        let mut log = LifeLog::new();
        log.push(LogEntry::Birth {
            birth: setup.birth,
            nationality: setup.nationality,
            era: setup.era,
            age: state.age,
        });

        tracing::info!(
            "Session started: seed {}, {:?} / {:?} / {}",
            seed,
            setup.birth,
            setup.nationality,
            setup.era
        );

        Ok(Self {
            config,
            player,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state,
            log,
            pending: None,
            menu_serial: 0,
            conclusion: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn player(&self) -> PlayerId {
        self.player
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn log(&self) -> &LifeLog {
        &self.log
    }

    pub fn conclusion(&self) -> Option<Conclusion> {
        self.conclusion
    }

    pub fn is_finished(&self) -> bool {
        self.conclusion.is_some()
    }

    /// Menu for the current chapter, starting a new chapter if none is pending
    pub fn current_menu(&mut self) -> Result<&ChapterMenu> {
        if self.is_finished() {
            return Err(LifeError::SessionFinished);
        }
        if self.pending.is_none() {
            self.state.chapter += 1;
            let menu = self.build_menu();
            self.pending = Some(menu);
        }
        self.pending.as_ref().ok_or(LifeError::SessionFinished)
    }

    /// Resolve the current chapter
    ///
    /// Invalid picks and rifts on milestone chapters are rejected before any
    /// state changes; the same menu stays pending.
    pub fn act(&mut self, action: PlayerAction) -> Result<ChapterReport> {
        let menu = self.current_menu()?;

        match action {
            PlayerAction::Pick(index) => {
                let menu_len = menu.options.len();
                let Some(choice) = menu.options.get(index).cloned() else {
                    tracing::warn!("Rejected selection {} (menu has {})", index, menu_len);
                    return Err(LifeError::InvalidSelection { index, menu_len });
                };
                self.pending = None;
                Ok(self.resolve(choice, None, false))
            }
            PlayerAction::Rift => {
                if !menu.allows_rift() {
                    tracing::warn!("Rejected rift on milestone chapter at age {}", self.state.age);
                    return Err(LifeError::RiftUnavailable);
                }
                self.pending = None;

                let rift = open_time_rift(self.state.era, &mut self.rng);
                self.state.era = rift.to;
                self.log.push(LogEntry::Rift {
                    age: self.state.age,
                    label: rift.label.clone(),
                    from: rift.from,
                    to: rift.to,
                });

                let menu = self.build_regular_menu();
                let choice = match menu.options.choose(&mut self.rng) {
                    Some(choice) => choice.clone(),
                    None => return Err(LifeError::InvalidSelection { index: 0, menu_len: 0 }),
                };
                Ok(self.resolve(choice, Some(rift), true))
            }
        }
    }

    fn build_menu(&mut self) -> ChapterMenu {
        let age = self.state.age;
        if is_pending_milestone(age, &self.config.milestones, &self.state.processed_milestones) {
            if let Some(options) = build_milestone_menu(self.state.era, age, &self.config.milestones) {
                self.state.record_offered(&options);
                return ChapterMenu {
                    chapter: self.state.chapter,
                    age,
                    band: self.state.band(),
                    era: self.state.era,
                    kind: MenuKind::Milestone,
                    options,
                };
            }
        }
        self.build_regular_menu()
    }

    fn build_regular_menu(&mut self) -> ChapterMenu {
        let ctx = ChapterContext::new(self.state.era, self.state.age, self.menu_serial);
        self.menu_serial += 1;
        let options = build_option_menu(
            &ctx,
            &self.state.used_ids,
            &self.state.flags,
            self.config.menu_size,
            &mut self.rng,
        );
        self.state.record_offered(&options);
        ChapterMenu {
            chapter: self.state.chapter,
            age: ctx.age,
            band: ctx.band,
            era: ctx.era,
            kind: MenuKind::Regular,
            options,
        }
    }

    fn check_ending(&self) -> Option<Conclusion> {
        check_special_endings(&self.state.stats, self.config.achievement_target).map(Conclusion::Special)
    }

    fn conclude(&mut self, conclusion: Conclusion) {
        tracing::info!(
            "Session concluded at age {} after {} chapters: {:?}",
            self.state.age,
            self.state.chapter,
            conclusion
        );
        self.conclusion = Some(conclusion);
    }

    fn resolve(&mut self, choice: Choice, rift: Option<RiftOutcome>, auto_picked: bool) -> ChapterReport {
        let age = self.state.age;
        let outcome = resolve_outcome(&choice, &self.state.stats, &mut self.rng);
        self.state.stats = outcome.stats;
        self.state.record_resolved(&choice);

        let mut report = ChapterReport {
            chapter: self.state.chapter,
            age,
            rift,
            auto_picked,
            choice: choice.clone(),
            note: outcome.note.clone(),
            died: outcome.died,
            option_delta: outcome.net_delta.clone(),
            variation: None,
            total: outcome.net_delta.clone(),
            stats: self.state.stats,
            environment: None,
            age_step: None,
            new_age: age,
            conclusion: None,
        };

        // A death or zeroed stat ends the life before variation can mask it
        if let Some(conclusion) = self.check_ending() {
            self.log_choice(&report);
            self.conclude(conclusion);
            report.conclusion = Some(conclusion);
            return report;
        }

        let variation = random_variation(self.config.variation_span, &mut self.rng);
        self.state.stats = self.state.stats.apply(&variation);
        report.total = outcome.net_delta.merged(&variation);
        report.variation = Some(variation);
        report.stats = self.state.stats;
        self.log_choice(&report);

        if let Some(conclusion) = self.check_ending() {
            self.conclude(conclusion);
            report.conclusion = Some(conclusion);
            return report;
        }

        if let Some(entry) = maybe_env_trigger(
            self.state.era,
            age,
            &self.state.used_triggers,
            self.config.env_trigger_prob,
            &mut self.rng,
        ) {
            let impact = entry.stat_delta();
            self.state.stats = self.state.stats.apply(&impact);
            self.state
                .used_triggers
                .insert(TriggerKey::new(self.state.era, AgeBand::for_age(age), &entry));
            self.log.push(LogEntry::Environment {
                age,
                text: entry.text.to_string(),
                impact: impact.clone(),
                stats: self.state.stats,
            });
            report.environment = Some(EnvironmentEvent {
                text: entry.text.to_string(),
                impact,
                stats: self.state.stats,
            });

            if let Some(conclusion) = self.check_ending() {
                self.conclude(conclusion);
                report.conclusion = Some(conclusion);
                return report;
            }
        }

        let step = random_age_step(age, &self.config, &mut self.rng);
        let capped = cap_age_step_to_milestone(
            age,
            step,
            &self.config.milestones,
            &self.state.processed_milestones,
        );
        if capped != step {
            tracing::debug!("Age step {} capped to {} at age {}", step, capped, age);
        }
        self.state.age = (age + capped).min(self.config.max_age);
        report.age_step = Some(capped);
        report.new_age = self.state.age;

        if self.state.age >= self.config.max_age {
            self.conclude(Conclusion::NaturalEndpoint);
            report.conclusion = Some(Conclusion::NaturalEndpoint);
        } else if self.state.chapter >= self.config.chapter_limit {
            let conclusion =
                Conclusion::ChapterLimit(NarrativeClass::classify(&self.state.stats, self.state.era));
            self.conclude(conclusion);
            report.conclusion = Some(conclusion);
        }
        report
    }

    fn log_choice(&mut self, report: &ChapterReport) {
        self.log.push(LogEntry::Choice {
            age: report.age,
            text: report.choice.text.clone(),
            note: report.note.clone(),
            result: report.option_delta.clone(),
            variation: report.variation.clone(),
            total: report.total.clone(),
            stats: report.stats,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{BirthCondition, Nationality, Provenance, Stat};

    fn setup() -> LifeSetup {
        LifeSetup {
            birth: BirthCondition::Middle,
            nationality: Nationality::UnitedStates,
            era: Era::Modern,
        }
    }

    fn session(seed: u64) -> Session {
        Session::new(EngineConfig::default(), setup(), PlayerId::new(), seed).expect("valid session")
    }

    #[test]
    fn test_first_menu_is_regular_with_three_options() {
        let mut session = session(42);
        let menu = session.current_menu().expect("menu");
        assert_eq!(menu.chapter, 1);
        assert_eq!(menu.age, 0);
        assert_eq!(menu.kind, MenuKind::Regular);
        assert_eq!(menu.options.len(), 3);
    }

    #[test]
    fn test_current_menu_is_stable_until_resolved() {
        let mut session = session(42);
        let first = session.current_menu().expect("menu").clone();
        let again = session.current_menu().expect("menu").clone();
        assert_eq!(first, again);
        assert_eq!(session.state().chapter, 1);
    }

    #[test]
    fn test_invalid_pick_does_not_mutate() {
        let mut session = session(42);
        let menu = session.current_menu().expect("menu").clone();
        let stats = session.state().stats;

        let err = session.act(PlayerAction::Pick(7)).unwrap_err();
        assert!(matches!(err, LifeError::InvalidSelection { index: 7, menu_len: 3 }));
        assert!(err.is_recoverable());
        assert_eq!(session.state().stats, stats);
        assert_eq!(session.state().age, 0);
        assert_eq!(session.current_menu().expect("menu"), &menu);
    }

    #[test]
    fn test_rift_rejected_on_milestone() {
        let config = EngineConfig {
            milestones: vec![0, 50],
            ..Default::default()
        };
        let mut session = Session::new(config, setup(), PlayerId::new(), 1).expect("valid session");
        assert_eq!(session.current_menu().expect("menu").kind, MenuKind::Milestone);
        assert!(matches!(session.act(PlayerAction::Rift), Err(LifeError::RiftUnavailable)));
        assert_eq!(session.state().age, 0);
    }

    #[test]
    fn test_milestone_is_processed_once() {
        let config = EngineConfig {
            milestones: vec![0, 50],
            env_trigger_prob: 0.0,
            variation_span: 0,
            ..Default::default()
        };
        let mut session = Session::new(config, setup(), PlayerId::new(), 5).expect("valid session");
        let menu = session.current_menu().expect("menu");
        assert_eq!(menu.options.len(), 2);
        assert!(menu.options.iter().all(|c| c.provenance == Provenance::Milestone));
        session.act(PlayerAction::Pick(0)).expect("resolved");
        assert!(session.state().processed_milestones.contains(&0));
        if !session.is_finished() {
            assert_eq!(session.current_menu().expect("menu").kind, MenuKind::Regular);
        }
    }

    #[test]
    fn test_rift_auto_picks_and_logs() {
        let mut session = session(11);
        let report = session.act(PlayerAction::Rift).expect("rift resolves");
        assert!(report.auto_picked);
        let rift = report.rift.expect("rift outcome");
        assert_eq!(rift.from, Era::Modern);
        assert_eq!(session.state().era, rift.to);
        assert!(matches!(session.log().entries[1], LogEntry::Rift { .. }));
    }

    #[test]
    fn test_finished_session_rejects_actions() {
        let config = EngineConfig {
            chapter_limit: 1,
            ..Default::default()
        };
        let mut session = Session::new(config, setup(), PlayerId::new(), 3).expect("valid session");
        let report = session.act(PlayerAction::Pick(0)).expect("resolved");
        assert!(report.conclusion.is_some());
        assert!(session.is_finished());
        assert!(matches!(session.act(PlayerAction::Pick(0)), Err(LifeError::SessionFinished)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            menu_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(config, setup(), PlayerId::new(), 1),
            Err(LifeError::Config(_))
        ));
    }

    #[test]
    fn test_environment_trigger_can_end_session() {
        let config = EngineConfig {
            env_trigger_prob: 1.0,
            variation_span: 0,
            ..Default::default()
        };
        let mut ended = 0;
        for seed in 0..50 {
            let mut session = Session::new(config.clone(), setup(), PlayerId::new(), seed).expect("valid session");
            // Modern adults draw "Market dip tests your patience." (wealth -1)
            session.state.age = 40;
            session.state.stats = StatVector::new(20, 1, 20, 20, 20);

            let menu = session.current_menu().expect("menu").clone();
            let Some(index) = menu.options.iter().position(|c| {
                c.delta.get(Stat::Wealth) == 0 && c.death_risk == 0.0 && c.delta.total() >= 0
            }) else {
                continue;
            };

            let report = session.act(PlayerAction::Pick(index)).expect("resolved");
            let env = report.environment.as_ref().expect("trigger fires at p=1");
            assert_eq!(env.text, "Market dip tests your patience.");
            assert_eq!(session.state().stats.wealth, 0);
            assert_eq!(
                report.conclusion,
                Some(Conclusion::Special(SpecialEnding::Bankruptcy))
            );
            assert_eq!(report.age_step, None);
            assert_eq!(session.state().age, 40);
            assert_eq!(session.state().used_triggers.len(), 1);
            assert!(matches!(session.log().entries.last(), Some(LogEntry::Environment { .. })));
            ended += 1;
        }
        assert!(ended > 0);
    }
}
