use crate::model::history::{self, PopulationSeries, RunOutcome, RunSummary};
use crate::model::lineage::LineageForest;
use crate::model::world::World;

/// Everything a run leaves behind for reporting.
pub struct RunReport {
    pub series: PopulationSeries,
    pub forest: LineageForest,
    pub summary: RunSummary,
}

impl World {
    /// Closes the run: seals every survivor's death step to the final step
    /// so each lifespan interval is defined, then builds the lineage forest
    /// and the survivor summary.
    pub fn finish(&mut self) -> RunReport {
        let final_step = self.step;
        for &id in &self.alive {
            self.roster[id.0 as usize].death_step.get_or_insert(final_step);
        }

        let forest = LineageForest::build(
            &self.roster,
            final_step,
            self.config.colony.max_start_speed,
            self.config.colony.max_start_energy,
        );

        let survivor_traits: Vec<(f64, f64)> = self
            .alive
            .iter()
            .map(|id| {
                let b = &self.roster[id.0 as usize];
                (b.speed, b.max_energy)
            })
            .collect();
        // Zero survivors short-circuits to a "no survivors" report instead
        // of dividing by zero.
        let mean_speed = history::mean(survivor_traits.iter().map(|t| t.0)).ok();
        let mean_max_energy = history::mean(survivor_traits.iter().map(|t| t.1)).ok();

        let summary = RunSummary {
            outcome: self.outcome.unwrap_or(RunOutcome::StepLimit),
            final_step,
            founders: self.config.colony.founders,
            survived: self.alive.len(),
            reproduced: self.reproduced,
            died: self.died,
            survivor_traits,
            mean_speed,
            mean_max_energy,
        };

        RunReport {
            series: self.series.clone(),
            forest,
            summary,
        }
    }
}
