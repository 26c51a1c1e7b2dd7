use petri_lib::model::config::SimConfig;
use petri_lib::model::world::World;

/// Builds a stripped-down world for scenario tests with no founders, food,
/// decay or marker noise; everything is placed explicitly.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: SimConfig,
    bacteria: Vec<(f64, f64, f64, f64)>,
    foods: Vec<(f64, f64, i32)>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = SimConfig::default();
        config.world.seed = Some(0);
        config.colony.founders = 0;
        config.colony.ambient_decay = 0.0;
        config.food.initial = 0;
        config.food.spawn_interval = 0;
        config.food.spawn_when_exhausted = false;
        config.markers.window = 0;
        config.evolution.mutation_chance = 0.0;
        Self {
            config,
            bacteria: Vec::new(),
            foods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_bacterium(mut self, x: f64, y: f64, speed: f64, max_energy: f64) -> Self {
        self.bacteria.push((x, y, speed, max_energy));
        self
    }

    pub fn with_food(mut self, x: f64, y: f64, energy: i32) -> Self {
        self.foods.push((x, y, energy));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new_headless(self.config).expect("failed to create test world");
        for (x, y, energy) in self.foods {
            world.insert_food(x, y, energy);
        }
        for (x, y, speed, max_energy) in self.bacteria {
            world.insert_bacterium(x, y, speed, max_energy);
        }
        world
    }
}

/// Runs until the world reports an outcome, with a hard cap against hangs.
#[allow(dead_code)]
pub fn run_to_completion(world: &mut World) {
    for _ in 0..100_000 {
        world.update().expect("world update failed");
        if world.outcome.is_some() {
            return;
        }
    }
    panic!("simulation did not terminate");
}
