//! Life Rewind - turn-based life simulation engine

pub mod content;
pub mod core;
pub mod life;
pub mod progression;
pub mod session;
