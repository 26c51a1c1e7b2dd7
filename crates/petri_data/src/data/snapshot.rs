//! Read-only per-step views handed to visualization sinks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodView {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub energy: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacteriumView {
    pub x: f64,
    pub y: f64,
    pub color: [f64; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkerView {
    pub x: f64,
    pub y: f64,
    /// Steps this marker stays visible, counting the current one.
    pub remaining: u64,
}

/// Immutable picture of the world at the end of one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSnapshot {
    pub step: u64,
    pub food: Vec<FoodView>,
    pub bacteria: Vec<BacteriumView>,
    pub markers: Vec<MarkerView>,
}
