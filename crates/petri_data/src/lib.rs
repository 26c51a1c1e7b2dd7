//! Plain data types shared between the simulation core and its sinks.

pub mod data;

pub use data::entity::{Bacterium, BacteriumId, DeathMarker};
pub use data::food::{Food, FoodId, FOOD_RADIUS_DIVISOR};
pub use data::snapshot::{BacteriumView, FoodView, MarkerView, StepSnapshot};
