use crate::model::config::SimConfig;
use crate::model::history::{HistoryLogger, PopulationSeries};
use crate::model::lifecycle;
use crate::model::world::World;
use petri_data::{BacteriumId, FoodId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

impl World {
    pub fn new_at(config: SimConfig, log_dir: &str) -> anyhow::Result<Self> {
        let logger = HistoryLogger::new_at(log_dir)?;
        Self::with_logger(config, logger)
    }

    pub fn new(config: SimConfig) -> anyhow::Result<Self> {
        Self::new_at(config, "logs")
    }

    /// World without an event log on disk; tests and library embedders.
    pub fn new_headless(config: SimConfig) -> anyhow::Result<Self> {
        Self::with_logger(config, HistoryLogger::new_dummy())
    }

    fn with_logger(config: SimConfig, logger: HistoryLogger) -> anyhow::Result<Self> {
        let mut rng = match config.world.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut roster = Vec::with_capacity(config.colony.founders);
        let mut alive = Vec::with_capacity(config.colony.founders);
        for i in 0..config.colony.founders {
            let id = BacteriumId(i as u32);
            roster.push(lifecycle::create_founder(&mut rng, &config, id, 0));
            alive.push(id);
        }

        let mut foods = Vec::with_capacity(config.food.initial);
        for i in 0..config.food.initial {
            foods.push(lifecycle::create_food(&mut rng, &config, FoodId(i as u32)));
        }
        let next_food_id = foods.len() as u32;

        Ok(Self {
            config,
            step: 0,
            foods,
            roster,
            alive,
            markers: Vec::new(),
            series: PopulationSeries::default(),
            reproduced: 0,
            died: 0,
            outcome: None,
            logger,
            rng,
            next_food_id,
            death_row: Vec::new(),
        })
    }
}
