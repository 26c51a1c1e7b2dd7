//! Entity factories. Every factory takes the RNG it draws from; nothing in
//! here touches global state.

use crate::model::config::SimConfig;
use petri_data::{Bacterium, BacteriumId, Food, FoodId};
use rand::Rng;

/// Uniform position within the world bounds.
pub fn drop_position<R: Rng>(rng: &mut R, xlim: [f64; 2], ylim: [f64; 2]) -> (f64, f64) {
    (
        rng.gen_range(xlim[0]..=xlim[1]),
        rng.gen_range(ylim[0]..=ylim[1]),
    )
}

pub fn create_food<R: Rng>(rng: &mut R, config: &SimConfig, id: FoodId) -> Food {
    let (x, y) = drop_position(rng, config.world.xlim, config.world.ylim);
    let energy = rng.gen_range(config.food.min_energy..=config.food.max_energy);
    Food::new(id, x, y, energy)
}

/// Founder with randomly drawn traits and no parent.
pub fn create_founder<R: Rng>(
    rng: &mut R,
    config: &SimConfig,
    id: BacteriumId,
    step: u64,
) -> Bacterium {
    let (x, y) = drop_position(rng, config.world.xlim, config.world.ylim);
    let speed = rng.gen_range(1.0..=config.colony.max_start_speed);
    let max_energy = rng.gen_range(1.0..=config.colony.max_start_energy);
    create_bacterium(id, None, x, y, speed, max_energy, step)
}

/// Offspring next to its parent; speed and max energy are supplied by the
/// caller as already-mutated copies of the parent's.
pub fn create_offspring(
    id: BacteriumId,
    parent: BacteriumId,
    x: f64,
    y: f64,
    speed: f64,
    max_energy: f64,
    step: u64,
) -> Bacterium {
    create_bacterium(id, Some(parent), x, y, speed, max_energy, step)
}

fn create_bacterium(
    id: BacteriumId,
    parent: Option<BacteriumId>,
    x: f64,
    y: f64,
    speed: f64,
    max_energy: f64,
    step: u64,
) -> Bacterium {
    Bacterium {
        id,
        parent,
        x,
        y,
        speed,
        max_energy,
        // Both founders and offspring hatch at half their capacity.
        energy: max_energy / 2.0,
        meal: None,
        birth_step: step,
        death_step: None,
        children: Vec::new(),
    }
}
