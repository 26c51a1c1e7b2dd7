//! Forage geometry: boundary-relative nearest-food lookup and movement.
//!
//! With every radius treated as zero the lookup degenerates to a plain
//! center-distance scan, so the simpler scheme is a restricted case of this
//! one rather than a second code path.

use crate::model::error::SimError;
use petri_data::{Bacterium, Food, FoodId};

/// Outcome of a nearest-food query: the chosen food and how far the agent's
/// center is from its boundary along the connecting line. A gap of zero
/// means the agent is already inside the radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Approach {
    pub food: FoodId,
    pub gap: f64,
}

pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Boundary-relative nearest-food lookup.
///
/// An agent whose center already lies within some food's radius (within
/// `tolerance`) gets that food immediately with zero gap, taking the first
/// such food in iteration order. Otherwise the food whose boundary point along the
/// center line is closest wins; ties break to the first food in iteration
/// order. Returns `None` when no food exists.
pub fn nearest_food(b: &Bacterium, foods: &[Food], tolerance: f64) -> Option<Approach> {
    for f in foods {
        if distance(b.x, b.y, f.x, f.y) <= f.radius + tolerance {
            return Some(Approach {
                food: f.id,
                gap: 0.0,
            });
        }
    }

    let mut best: Option<Approach> = None;
    for f in foods {
        let gap = distance(b.x, b.y, f.x, f.y) - f.radius;
        match best {
            Some(ref current) if gap >= current.gap => {}
            _ => {
                best = Some(Approach { food: f.id, gap });
            }
        }
    }
    best
}

/// Moves the agent `travel` units straight toward the food center using the
/// unit direction `(dx/dist, dy/dist)`. The caller caps `travel` at the
/// boundary gap, so a move never overshoots into the food.
pub fn advance(b: &mut Bacterium, food: &Food, travel: f64) -> Result<(), SimError> {
    let dx = food.x - b.x;
    let dy = food.y - b.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if !dist.is_finite() || dist <= 0.0 {
        return Err(SimError::DegenerateGeometry {
            bacterium: b.id,
            food: food.id,
        });
    }
    b.x += dx / dist * travel;
    b.y += dy / dist * travel;
    Ok(())
}
