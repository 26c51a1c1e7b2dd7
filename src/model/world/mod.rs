use crate::model::config::SimConfig;
use crate::model::history::{HistoryLogger, PopulationSeries, RunOutcome};
use petri_data::{
    Bacterium, BacteriumId, BacteriumView, DeathMarker, Food, FoodId, FoodView, MarkerView,
    StepSnapshot,
};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

pub mod finalize;
pub mod init;
pub mod logic;
pub mod update;

pub use finalize::RunReport;
pub use logic::Approach;

/// The whole simulation state, exclusively owned by the engine for the
/// duration of a run. Sinks only ever see `StepSnapshot`s.
pub struct World {
    pub config: SimConfig,
    /// Step counter; 0 before the first update, then monotonically rising.
    pub step: u64,
    /// Live food sources, insertion order.
    pub foods: Vec<Food>,
    /// Every bacterium ever created, indexed by its `BacteriumId`. Dead
    /// agents stay here with their death step recorded.
    pub roster: Vec<Bacterium>,
    /// Ids of live bacteria. Iteration order is the order agents act in
    /// within a step: deterministic per run, not significant across runs.
    pub alive: Vec<BacteriumId>,
    pub markers: Vec<DeathMarker>,
    pub series: PopulationSeries,
    pub reproduced: u64,
    pub died: u64,
    pub outcome: Option<RunOutcome>,
    pub logger: HistoryLogger,
    pub rng: ChaCha8Rng,
    pub(crate) next_food_id: u32,
    /// Agents marked for death this step; removal is batched at the death
    /// phase so marks never disturb the in-flight iteration.
    pub(crate) death_row: Vec<BacteriumId>,
}

impl World {
    pub fn population_count(&self) -> usize {
        self.alive.len()
    }

    pub fn food_count(&self) -> usize {
        self.foods.len()
    }

    pub fn bacterium(&self, id: BacteriumId) -> &Bacterium {
        &self.roster[id.0 as usize]
    }

    pub fn live_bacteria(&self) -> impl Iterator<Item = &Bacterium> {
        self.alive.iter().map(|id| &self.roster[id.0 as usize])
    }

    pub fn food(&self, id: FoodId) -> Option<&Food> {
        self.foods.iter().find(|f| f.id == id)
    }

    pub(crate) fn food_index(&self, id: FoodId) -> Option<usize> {
        self.foods.iter().position(|f| f.id == id)
    }

    /// Registers a food source at an explicit position. Scenario support;
    /// the step loop spawns through the factory instead.
    pub fn insert_food(&mut self, x: f64, y: f64, energy: i32) -> FoodId {
        let id = FoodId(self.next_food_id);
        self.next_food_id += 1;
        self.foods.push(Food::new(id, x, y, energy));
        id
    }

    /// Registers a parentless bacterium with explicit traits. Energy starts
    /// at half capacity as with any freshly created agent.
    pub fn insert_bacterium(&mut self, x: f64, y: f64, speed: f64, max_energy: f64) -> BacteriumId {
        let id = BacteriumId(self.roster.len() as u32);
        self.roster.push(Bacterium {
            id,
            parent: None,
            x,
            y,
            speed,
            max_energy,
            energy: max_energy / 2.0,
            meal: None,
            birth_step: self.step,
            death_step: None,
            children: Vec::new(),
        });
        self.alive.push(id);
        id
    }

    /// Immutable picture of the world for the visualization sink.
    pub fn create_snapshot(&self) -> StepSnapshot {
        let colony = &self.config.colony;
        StepSnapshot {
            step: self.step,
            food: self
                .foods
                .iter()
                .map(|f| FoodView {
                    x: f.x,
                    y: f.y,
                    radius: f.radius,
                    energy: f.energy,
                })
                .collect(),
            bacteria: self
                .live_bacteria()
                .map(|b| BacteriumView {
                    x: b.x,
                    y: b.y,
                    color: b.color(colony.max_start_speed, colony.max_start_energy),
                })
                .collect(),
            markers: self
                .markers
                .iter()
                .map(|m| MarkerView {
                    x: m.x,
                    y: m.y,
                    remaining: m.expiry_step - self.step,
                })
                .collect(),
        }
    }

    /// SHA-256 digest of the live state, for determinism audits. Floats are
    /// hashed by their bit patterns.
    pub fn state_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.step.to_le_bytes());

        for b in self.live_bacteria() {
            hasher.update(b.id.0.to_le_bytes());
            hasher.update(b.x.to_bits().to_le_bytes());
            hasher.update(b.y.to_bits().to_le_bytes());
            hasher.update(b.energy.to_bits().to_le_bytes());
            hasher.update(b.speed.to_bits().to_le_bytes());
            hasher.update(b.max_energy.to_bits().to_le_bytes());
        }

        for f in &self.foods {
            hasher.update(f.id.0.to_le_bytes());
            hasher.update(f.x.to_bits().to_le_bytes());
            hasher.update(f.y.to_bits().to_le_bytes());
            hasher.update(f.energy.to_le_bytes());
        }

        hex::encode(hasher.finalize())
    }
}
