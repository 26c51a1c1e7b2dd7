//! The boundary between the engine and whatever renders a run. Sinks get
//! read-only snapshots each step and the aggregate artifacts at the end;
//! they never mutate engine state.

use crate::model::history::{PopulationSeries, RunSummary};
use crate::model::lineage::LineageForest;
use petri_data::StepSnapshot;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub trait SnapshotSink {
    fn on_step(&mut self, snapshot: &StepSnapshot) -> anyhow::Result<()>;

    fn on_finish(
        &mut self,
        series: &PopulationSeries,
        forest: &LineageForest,
        summary: &RunSummary,
    ) -> anyhow::Result<()>;
}

/// Discards everything.
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn on_step(&mut self, _snapshot: &StepSnapshot) -> anyhow::Result<()> {
        Ok(())
    }

    fn on_finish(
        &mut self,
        _series: &PopulationSeries,
        _forest: &LineageForest,
        _summary: &RunSummary,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes one JSON line per step into `frames.jsonl` and the end-of-run
/// artifacts (`population.json`, `lineage.json`, `lineage.dot`,
/// `summary.json`) into the same directory.
pub struct JsonlSink {
    frames: BufWriter<File>,
    dir: PathBuf,
}

impl JsonlSink {
    pub fn create<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&dir)?;
        let file = File::create(dir.as_ref().join("frames.jsonl"))?;
        Ok(Self {
            frames: BufWriter::new(file),
            dir: dir.as_ref().to_path_buf(),
        })
    }
}

impl SnapshotSink for JsonlSink {
    fn on_step(&mut self, snapshot: &StepSnapshot) -> anyhow::Result<()> {
        writeln!(self.frames, "{}", serde_json::to_string(snapshot)?)?;
        Ok(())
    }

    fn on_finish(
        &mut self,
        series: &PopulationSeries,
        forest: &LineageForest,
        summary: &RunSummary,
    ) -> anyhow::Result<()> {
        self.frames.flush()?;
        std::fs::write(
            self.dir.join("population.json"),
            serde_json::to_string_pretty(series)?,
        )?;
        std::fs::write(
            self.dir.join("lineage.json"),
            serde_json::to_string_pretty(forest)?,
        )?;
        std::fs::write(self.dir.join("lineage.dot"), forest.to_dot())?;
        std::fs::write(
            self.dir.join("summary.json"),
            serde_json::to_string_pretty(summary)?,
        )?;
        Ok(())
    }
}

/// Keeps everything in memory; test support.
#[derive(Default)]
pub struct MemorySink {
    pub frames: Vec<StepSnapshot>,
    pub finished: Option<(PopulationSeries, LineageForest, RunSummary)>,
}

impl SnapshotSink for MemorySink {
    fn on_step(&mut self, snapshot: &StepSnapshot) -> anyhow::Result<()> {
        self.frames.push(snapshot.clone());
        Ok(())
    }

    fn on_finish(
        &mut self,
        series: &PopulationSeries,
        forest: &LineageForest,
        summary: &RunSummary,
    ) -> anyhow::Result<()> {
        self.finished = Some((series.clone(), forest.clone(), summary.clone()));
        Ok(())
    }
}
