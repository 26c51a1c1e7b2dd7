use anyhow::Result;
use clap::Parser;
use petri_lib::model::config::SimConfig;
use petri_lib::model::history;
use petri_lib::model::observer::{JsonlSink, NullSink, SnapshotSink};
use petri_lib::model::world::World;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Override the configured RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured step limit
    #[arg(long)]
    steps: Option<u64>,

    /// Base directory for run artifacts (events, frames, lineage)
    #[arg(long, default_value = "runs")]
    out: String,

    /// Skip writing per-step frame snapshots
    #[arg(long)]
    no_frames: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut config = SimConfig::load(&args.config);
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(steps) = args.steps {
        config.world.steps = steps;
    }

    let run_dir = history::timestamped_run_dir(&args.out);
    let mut world = World::new_at(config, &run_dir)?;
    let mut sink: Box<dyn SnapshotSink> = if args.no_frames {
        Box::new(NullSink)
    } else {
        Box::new(JsonlSink::create(&run_dir)?)
    };

    tracing::info!(dir = %run_dir, "run started");
    loop {
        world.update()?;
        sink.on_step(&world.create_snapshot())?;
        if world.outcome.is_some() {
            break;
        }
    }

    let report = world.finish();
    sink.on_finish(&report.series, &report.forest, &report.summary)?;
    println!("{}", report.summary.render());
    Ok(())
}
