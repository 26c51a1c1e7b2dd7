use super::food::FoodId;
use serde::{Deserialize, Serialize};

/// Stable arena index of a bacterium in the all-time roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BacteriumId(pub u32);

/// A mobile forager. `speed` and `max_energy` are fixed at birth and only
/// change across generations through inheritance; `energy`, the meal
/// reference and the lineage bookkeeping are the mutable parts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bacterium {
    pub id: BacteriumId,
    pub parent: Option<BacteriumId>,
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub max_energy: f64,
    pub energy: f64,
    /// Food currently being eaten, if any. `Some` implies this bacterium is
    /// registered in that food's eater set.
    pub meal: Option<FoodId>,
    pub birth_step: u64,
    pub death_step: Option<u64>,
    pub children: Vec<BacteriumId>,
}

impl Bacterium {
    pub fn is_eating(&self) -> bool {
        self.meal.is_some()
    }

    pub fn is_alive(&self) -> bool {
        self.death_step.is_none()
    }

    /// Render color: speed and max energy normalized against the configured
    /// founder maxima and clamped to `[0, 1]`, blue channel fixed.
    pub fn color(&self, max_start_speed: f64, max_start_energy: f64) -> [f64; 3] {
        [
            (self.speed / max_start_speed).clamp(0.0, 1.0),
            (self.max_energy / max_start_energy).clamp(0.0, 1.0),
            1.0,
        ]
    }
}

/// Transient record of where an agent died, kept visible for a fixed window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeathMarker {
    pub x: f64,
    pub y: f64,
    pub expiry_step: u64,
}
