use crate::model::config::EvolutionConfig;
use rand::Rng;

/// Mutated copy of an inherited attribute.
///
/// With probability `mutation_chance` the value is redrawn uniformly within
/// ±`mutation_variance` of itself; otherwise it is inherited unchanged. A
/// chance of zero never consumes randomness, so the no-mutation guarantee
/// holds for every seed.
pub fn mutate<R: Rng>(rng: &mut R, cfg: &EvolutionConfig, attr: f64) -> f64 {
    if cfg.mutation_chance <= 0.0 || rng.gen::<f64>() > cfg.mutation_chance {
        return attr;
    }
    let spread = attr * cfg.mutation_variance;
    rng.gen_range(attr - spread..=attr + spread)
}
