//! Time rift (dimension shift): pick a new era by one of three weighted modes

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Era;

/// How a rift chooses the next era
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiftMode {
    /// Uniform among every era except the current one
    Other,
    /// Stay with p=0.5, otherwise uniform among all eras
    Maybe,
    /// Uniform among all eras
    Any,
}

impl RiftMode {
    pub fn draw_era(&self, current: Era, rng: &mut ChaCha8Rng) -> Era {
        match self {
            RiftMode::Other => {
                let others: Vec<Era> = Era::ALL.iter().copied().filter(|e| *e != current).collect();
                others.choose(rng).copied().unwrap_or(current)
            }
            RiftMode::Maybe => {
                if rng.gen::<f64>() < 0.5 {
                    current
                } else {
                    Era::ALL.choose(rng).copied().unwrap_or(current)
                }
            }
            RiftMode::Any => Era::ALL.choose(rng).copied().unwrap_or(current),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rift {
    pub label: &'static str,
    pub mode: RiftMode,
}

/// The three rifts, drawn with equal weight
pub const TIME_RIFTS: [Rift; 3] = [
    Rift {
        label: "A shimmering rift appears...",
        mode: RiftMode::Other,
    },
    Rift {
        label: "A clockwork phoenix offers a second chance.",
        mode: RiftMode::Maybe,
    },
    Rift {
        label: "The Moon turns, years rewind like silk.",
        mode: RiftMode::Any,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiftOutcome {
    pub label: String,
    pub mode: RiftMode,
    pub from: Era,
    pub to: Era,
}

/// Draw a rift, then the destination era under that rift's mode
pub fn open_time_rift(current: Era, rng: &mut ChaCha8Rng) -> RiftOutcome {
    let rift = TIME_RIFTS.choose(rng).copied().unwrap_or(TIME_RIFTS[2]);
    let to = rift.mode.draw_era(current, rng);
    tracing::debug!("Rift {:?}: {} -> {}", rift.mode, current, to);
    RiftOutcome {
        label: rift.label.to_string(),
        mode: rift.mode,
        from: current,
        to,
    }
}
