use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WorldConfig {
    /// Horizontal bounds of the plane, `[min, max]`.
    pub xlim: [f64; 2],
    /// Vertical bounds of the plane, `[min, max]`.
    pub ylim: [f64; 2],
    /// Step limit; the run stops once the step counter reaches it.
    pub steps: u64,
    /// RNG seed. `None` seeds from entropy and makes the run unrepeatable.
    pub seed: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FoodConfig {
    /// Food sources placed at world init.
    pub initial: usize,
    /// Drop one food every this many steps. Zero disables interval drops.
    pub spawn_interval: u64,
    /// Also drop food whenever none is left on the plane.
    pub spawn_when_exhausted: bool,
    pub min_energy: i32,
    pub max_energy: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ColonyConfig {
    /// Bacteria created at world init with no parent.
    pub founders: usize,
    pub max_start_speed: f64,
    pub max_start_energy: f64,
    /// Extra multiplier on the `distance × speed` movement cost.
    pub move_cost_mult: f64,
    /// When true, a move is paid for even if it drives energy below zero
    /// (death follows); when false a fatal move is refused outright and the
    /// agent dies in place without paying.
    pub movement_overdraft: bool,
    /// Flat energy drain applied to every live bacterium each step.
    pub ambient_decay: f64,
    /// Slack on the boundary-distance comparison that decides arrival.
    pub arrival_tolerance: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EvolutionConfig {
    pub mutation_chance: f64,
    /// Fractional half-width of the uniform redraw around the parent value.
    pub mutation_variance: f64,
    /// Offspring spawn within ± this distance of the parent, per axis.
    pub offspring_jitter: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MarkerConfig {
    /// Steps a death marker stays visible. Zero disables markers.
    pub window: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub food: FoodConfig,
    pub colony: ColonyConfig,
    pub evolution: EvolutionConfig,
    pub markers: MarkerConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                xlim: [-5.0, 5.0],
                ylim: [-5.0, 5.0],
                steps: 100,
                seed: None,
            },
            food: FoodConfig {
                initial: 1,
                spawn_interval: 30,
                spawn_when_exhausted: true,
                min_energy: 10,
                max_energy: 100,
            },
            colony: ColonyConfig {
                founders: 10,
                max_start_speed: 5.0,
                max_start_energy: 100.0,
                move_cost_mult: 1.0,
                movement_overdraft: false,
                ambient_decay: 0.1,
                arrival_tolerance: 1e-9,
            },
            evolution: EvolutionConfig {
                mutation_chance: 1.0,
                mutation_variance: 0.1,
                offspring_jitter: 1.0,
            },
            markers: MarkerConfig { window: 20 },
        }
    }
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        if let Ok(content) = fs::read_to_string(&path) {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
        }
        let default = Self::default();
        // Create default config file if missing
        if let Ok(rendered) = toml::to_string(&default) {
            let _ = fs::write(&path, rendered);
        }
        default
    }
}
