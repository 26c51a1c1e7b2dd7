use crate::model::error::SimError;
use crate::model::history::{LiveEvent, RunOutcome};
use crate::model::world::{logic, World};
use crate::model::{genetics, lifecycle};
use petri_data::{BacteriumId, DeathMarker, FoodId};
use rand::Rng;

impl World {
    /// Advances the simulation by one step.
    ///
    /// Phases run in fixed order, each completing before the next begins:
    /// food spawn, ambient decay, movement/eating (reproduction fires
    /// inline while eating), batched death processing, marker expiry,
    /// history recording, termination check. Agents act in live-list order;
    /// children born mid-step are appended and act later in the same pass.
    ///
    /// Returns the lifecycle events of this step.
    pub fn update(&mut self) -> anyhow::Result<Vec<LiveEvent>> {
        self.step += 1;
        let mut events = Vec::new();

        self.spawn_food_phase(&mut events);
        self.decay_phase();
        self.forage_phase(&mut events)?;
        self.death_phase(&mut events);
        self.markers.retain(|m| m.expiry_step > self.step);
        self.series.record(self.step, self.alive.len());

        if self.step >= self.config.world.steps {
            self.outcome = Some(RunOutcome::StepLimit);
        } else if self.alive.is_empty() {
            events.push(LiveEvent::Extinction { step: self.step });
            self.outcome = Some(RunOutcome::Extinction);
            tracing::info!(step = self.step, "extinction");
        }

        for event in &events {
            self.logger.log_event(event)?;
        }
        Ok(events)
    }

    fn spawn_food_phase(&mut self, events: &mut Vec<LiveEvent>) {
        let interval = self.config.food.spawn_interval;
        let due = interval > 0 && self.step.is_multiple_of(interval);
        let exhausted = self.config.food.spawn_when_exhausted && self.foods.is_empty();
        if !(due || exhausted) {
            return;
        }
        let id = FoodId(self.next_food_id);
        self.next_food_id += 1;
        let food = lifecycle::create_food(&mut self.rng, &self.config, id);
        events.push(LiveEvent::FoodSpawned {
            id,
            energy: food.energy,
            step: self.step,
        });
        tracing::debug!(step = self.step, energy = food.energy, "food spawned");
        self.foods.push(food);
    }

    fn decay_phase(&mut self) {
        let decay = self.config.colony.ambient_decay;
        if decay <= 0.0 {
            return;
        }
        for &id in &self.alive {
            let b = &mut self.roster[id.0 as usize];
            b.energy -= decay;
            if b.energy <= 0.0 {
                self.death_row.push(id);
            }
        }
    }

    fn forage_phase(&mut self, events: &mut Vec<LiveEvent>) -> anyhow::Result<()> {
        // Indexed loop: reproduction appends to `alive` mid-pass and the
        // newborn takes its turn at the end of the same pass.
        let mut i = 0;
        while i < self.alive.len() {
            let id = self.alive[i];
            i += 1;
            if self.death_row.contains(&id) {
                continue;
            }
            if self.roster[id.0 as usize].is_eating() {
                self.eat(id, events)?;
            } else {
                self.seek(id)?;
            }
        }
        Ok(())
    }

    /// Non-eating agent: find the nearest food, arrive or move toward it.
    fn seek(&mut self, id: BacteriumId) -> anyhow::Result<()> {
        let tolerance = self.config.colony.arrival_tolerance;
        let Some(approach) =
            logic::nearest_food(&self.roster[id.0 as usize], &self.foods, tolerance)
        else {
            // nothing to forage anywhere: idle this step
            return Ok(());
        };
        let food_idx =
            self.food_index(approach.food)
                .ok_or(SimError::InconsistentFoodReference {
                    bacterium: id,
                    food: approach.food,
                })?;

        if approach.gap <= tolerance {
            // arrived: attach, no movement this step
            self.roster[id.0 as usize].meal = Some(approach.food);
            self.foods[food_idx].eaters.push(id);
            return Ok(());
        }

        let (speed, energy) = {
            let b = &self.roster[id.0 as usize];
            (b.speed, b.energy)
        };
        let travel = speed.min(approach.gap);
        let cost = travel * speed * self.config.colony.move_cost_mult;

        if !self.config.colony.movement_overdraft && energy - cost <= 0.0 {
            // a fatal move is refused outright; the agent dies in place
            // without paying for motion that never happened
            self.death_row.push(id);
            return Ok(());
        }

        logic::advance(
            &mut self.roster[id.0 as usize],
            &self.foods[food_idx],
            travel,
        )?;
        let broke = {
            let b = &mut self.roster[id.0 as usize];
            b.energy -= cost;
            b.energy <= 0.0
        };
        if broke {
            self.death_row.push(id);
        }
        Ok(())
    }

    /// Eating agent: 1:1 energy transfer, food exhaustion, reproduction.
    fn eat(&mut self, id: BacteriumId, events: &mut Vec<LiveEvent>) -> anyhow::Result<()> {
        let Some(food_id) = self.roster[id.0 as usize].meal else {
            return Ok(());
        };
        let food_idx = self
            .food_index(food_id)
            .ok_or(SimError::InconsistentFoodReference {
                bacterium: id,
                food: food_id,
            })?;

        self.foods[food_idx].energy -= 1;
        self.roster[id.0 as usize].energy += 1.0;

        if self.foods[food_idx].is_exhausted() {
            let food = self.foods.remove(food_idx);
            for eater in &food.eaters {
                if let Some(b) = self.roster.get_mut(eater.0 as usize) {
                    b.meal = None;
                }
            }
            events.push(LiveEvent::FoodExhausted {
                id: food_id,
                step: self.step,
            });
            tracing::debug!(step = self.step, food = food_id.0, "food exhausted");
        }

        let b = &self.roster[id.0 as usize];
        if b.energy >= b.max_energy {
            self.reproduce(id, events);
        }
        Ok(())
    }

    /// One mutated child next to the parent. The parent keeps its energy and
    /// eating state untouched, so it may split again on the very next step.
    fn reproduce(&mut self, parent_id: BacteriumId, events: &mut Vec<LiveEvent>) {
        let child_id = BacteriumId(self.roster.len() as u32);
        let (speed, max_energy, x, y) = {
            let parent = &self.roster[parent_id.0 as usize];
            let speed = genetics::mutate(&mut self.rng, &self.config.evolution, parent.speed);
            let max_energy =
                genetics::mutate(&mut self.rng, &self.config.evolution, parent.max_energy);
            let jitter = self.config.evolution.offspring_jitter;
            let x = parent.x + self.rng.gen_range(-jitter..=jitter);
            let y = parent.y + self.rng.gen_range(-jitter..=jitter);
            (speed, max_energy, x, y)
        };

        let child =
            lifecycle::create_offspring(child_id, parent_id, x, y, speed, max_energy, self.step);
        self.roster[parent_id.0 as usize].children.push(child_id);
        self.roster.push(child);
        self.alive.push(child_id);
        self.reproduced += 1;
        events.push(LiveEvent::Birth {
            id: child_id,
            parent: parent_id,
            step: self.step,
        });
        tracing::info!(
            step = self.step,
            parent = parent_id.0,
            child = child_id.0,
            "reproduction"
        );
    }

    /// Batched removal of everyone marked this step.
    fn death_phase(&mut self, events: &mut Vec<LiveEvent>) {
        if self.death_row.is_empty() {
            return;
        }
        let doomed = std::mem::take(&mut self.death_row);
        for id in doomed {
            if self.roster[id.0 as usize].death_step.is_some() {
                continue;
            }
            // The meal reference may already be gone if the food was
            // exhausted this same step; a missing food is fine here.
            if let Some(food_id) = self.roster[id.0 as usize].meal.take() {
                if let Some(food_idx) = self.food_index(food_id) {
                    self.foods[food_idx].eaters.retain(|e| *e != id);
                }
            }
            let (x, y, age) = {
                let b = &mut self.roster[id.0 as usize];
                b.death_step = Some(self.step);
                (b.x, b.y, self.step - b.birth_step)
            };
            if self.config.markers.window > 0 {
                self.markers.push(DeathMarker {
                    x,
                    y,
                    expiry_step: self.step + self.config.markers.window,
                });
            }
            self.alive.retain(|a| *a != id);
            self.died += 1;
            events.push(LiveEvent::Death {
                id,
                age,
                step: self.step,
            });
            tracing::info!(step = self.step, id = id.0, age, "death");
        }
    }
}
