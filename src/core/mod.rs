pub mod config;
pub mod error;
pub mod hashing;
pub mod types;

pub use config::EngineConfig;
pub use error::{LifeError, Result};
pub use types::{AgeBand, BirthCondition, Era, Nationality, PlayerId, Provenance, Stat, Tag};
