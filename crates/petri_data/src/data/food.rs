use super::entity::BacteriumId;
use serde::{Deserialize, Serialize};

/// Divisor tying a food's radius to its energy at creation.
pub const FOOD_RADIUS_DIVISOR: f64 = 20.0;

/// Stable id of a food source, unique for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(pub u32);

/// A passive energy source. The radius is derived from the initial energy
/// and stays fixed while eaters drain the energy down.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub x: f64,
    pub y: f64,
    pub energy: i32,
    pub radius: f64,
    /// Bacteria currently attached to this food, all draining it each step.
    pub eaters: Vec<BacteriumId>,
}

impl Food {
    pub fn new(id: FoodId, x: f64, y: f64, energy: i32) -> Self {
        Self {
            id,
            x,
            y,
            energy,
            radius: energy as f64 / FOOD_RADIUS_DIVISOR,
            eaters: Vec::new(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.energy <= 0
    }
}
