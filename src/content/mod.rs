//! Reference content and the resolver that turns it into choices
//!
//! The tables are immutable; the engine consumes them but never edits them.

pub mod catalog;
pub mod events;
pub mod flavor;
pub mod resolver;

pub use catalog::starting_stats;
pub use events::{base_events, environment_triggers, EventEntry};
pub use resolver::{classify_text, resolve_pool, ChapterContext};
