use crate::model::error::SimError;
use petri_data::{BacteriumId, FoodId};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum LiveEvent {
    Birth {
        id: BacteriumId,
        parent: BacteriumId,
        step: u64,
    },
    Death {
        id: BacteriumId,
        age: u64,
        step: u64,
    },
    FoodSpawned {
        id: FoodId,
        energy: i32,
        step: u64,
    },
    FoodExhausted {
        id: FoodId,
        step: u64,
    },
    Extinction {
        step: u64,
    },
}

/// How a run ended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The step limit was reached with bacteria still alive.
    StepLimit,
    /// The live set emptied before the step limit.
    Extinction,
}

/// Population size per step, sampled at every step boundary.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct PopulationSeries {
    pub samples: Vec<(u64, usize)>,
}

impl PopulationSeries {
    pub fn record(&mut self, step: u64, population: usize) {
        self.samples.push((step, population));
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Arithmetic mean, refusing the empty case instead of dividing by zero.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> Result<f64, SimError> {
    let (mut sum, mut count) = (0.0, 0usize);
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        return Err(SimError::EmptyPopulationStatistics);
    }
    Ok(sum / count as f64)
}

/// End-of-run report over the final state and the run counters.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub final_step: u64,
    pub founders: usize,
    pub survived: usize,
    pub reproduced: u64,
    pub died: u64,
    /// `(speed, max_energy)` per survivor, live-set order.
    pub survivor_traits: Vec<(f64, f64)>,
    pub mean_speed: Option<f64>,
    pub mean_max_energy: Option<f64>,
}

impl RunSummary {
    pub fn render(&self) -> String {
        let mut out = String::new();
        match self.outcome {
            RunOutcome::Extinction => {
                let _ = writeln!(out, "Everyone died!");
            }
            RunOutcome::StepLimit => {
                let _ = writeln!(out, "Survivors (speed, max energy):");
                for (speed, max_energy) in &self.survivor_traits {
                    let _ = writeln!(out, "{speed:.2} {max_energy:.2}");
                }
                match (self.mean_speed, self.mean_max_energy) {
                    (Some(speed), Some(max_energy)) => {
                        let _ = writeln!(
                            out,
                            "Survivors mean speed: {speed:.2}; Survivors mean max energy: {max_energy:.2}"
                        );
                    }
                    _ => {
                        let _ = writeln!(out, "No survivors.");
                    }
                }
            }
        }
        let _ = writeln!(
            out,
            "Initial number: {}; Survived: {}; Reproduced: {}; Died: {}",
            self.founders, self.survived, self.reproduced, self.died
        );
        out
    }
}

/// Appends `LiveEvent`s as JSON Lines into the run directory.
pub struct HistoryLogger {
    live_file: Option<BufWriter<File>>,
}

impl HistoryLogger {
    pub fn new_at(dir: &str) -> anyhow::Result<Self> {
        if !std::path::Path::new(dir).exists() {
            std::fs::create_dir_all(dir)?;
        }
        let file_path = format!("{}/events.jsonl", dir);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        Ok(Self {
            live_file: Some(BufWriter::new(file)),
        })
    }

    /// Logger that drops everything; used by headless tests.
    pub fn new_dummy() -> Self {
        Self { live_file: None }
    }

    pub fn log_event(&mut self, event: &LiveEvent) -> anyhow::Result<()> {
        if let Some(ref mut file) = self.live_file {
            let json = serde_json::to_string(event)?;
            writeln!(file, "{}", json)?;
            file.flush()?;
        }
        Ok(())
    }
}

/// `<base>/<local timestamp>`, the per-run artifact directory.
pub fn timestamped_run_dir(base: &str) -> String {
    format!("{}/{}", base, chrono::Local::now().format("%Y-%m-%d_%H-%M-%S"))
}
