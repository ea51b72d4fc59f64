//! A single life session: state, log and the chapter pipeline

pub mod log;
pub mod runner;
pub mod state;

pub use log::{LifeLog, LogEntry};
pub use runner::{ChapterMenu, ChapterReport, Conclusion, EnvironmentEvent, MenuKind, PlayerAction, Session};
pub use state::{LifeSetup, SessionState};
