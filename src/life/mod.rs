//! Life state primitives: the stat vector and the option model

pub mod choice;
pub mod stats;

pub use choice::{Choice, ChoiceId};
pub use stats::{StatDelta, StatVector};
