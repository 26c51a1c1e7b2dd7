mod common;

use common::{run_to_completion, WorldBuilder};
use petri_lib::model::config::SimConfig;
use petri_lib::model::history::{LiveEvent, RunOutcome};
use petri_lib::model::world::World;

#[test]
fn run_terminates_at_the_step_limit() {
    // No food and no decay: ten founders idle through the whole run.
    let mut config = SimConfig::default();
    config.world.seed = Some(42);
    config.world.steps = 50;
    config.food.initial = 0;
    config.food.spawn_interval = 0;
    config.food.spawn_when_exhausted = false;
    config.colony.ambient_decay = 0.0;
    let mut world = World::new_headless(config).expect("failed to create world");

    run_to_completion(&mut world);

    assert_eq!(world.step, 50);
    assert_eq!(world.outcome, Some(RunOutcome::StepLimit));
    assert_eq!(world.population_count(), 10);
    // one population sample per step
    assert_eq!(world.series.len(), 50);
    assert_eq!(world.series.samples[0].0, 1);
}

#[test]
fn agent_on_the_boundary_starts_eating_without_moving() {
    // Food radius is 60/20 = 3, agent sits exactly 3 from the center.
    let mut world = WorldBuilder::new()
        .with_food(3.0, 0.0, 60)
        .with_bacterium(0.0, 0.0, 1.0, 10.0)
        .build();

    world.update().unwrap();

    let b = world.bacterium(petri_data::BacteriumId(0));
    assert!(b.is_eating());
    assert_eq!((b.x, b.y), (0.0, 0.0));
    // attachment step transfers nothing
    assert_eq!(b.energy, 5.0);
    let food = world.foods.first().unwrap();
    assert_eq!(food.energy, 60);
    assert_eq!(food.eaters, vec![petri_data::BacteriumId(0)]);
}

#[test]
fn eating_transfers_exactly_one_unit_per_step() {
    let mut world = WorldBuilder::new()
        .with_food(3.0, 0.0, 60)
        .with_bacterium(0.0, 0.0, 1.0, 10.0)
        .build();

    world.update().unwrap(); // attach
    let food_before = world.foods[0].energy;
    let agent_before = world.bacterium(petri_data::BacteriumId(0)).energy;

    world.update().unwrap(); // first transfer

    assert_eq!(world.foods[0].energy, food_before - 1);
    assert_eq!(
        world.bacterium(petri_data::BacteriumId(0)).energy,
        agent_before + 1.0
    );
}

#[test]
fn eating_to_capacity_triggers_reproduction() {
    // Energy starts at 5; five transfers after the attachment step reach
    // max_energy = 10 on step 6.
    let mut world = WorldBuilder::new()
        .with_food(3.0, 0.0, 60)
        .with_bacterium(0.0, 0.0, 1.0, 10.0)
        .build();

    let mut birth_step = None;
    for _ in 0..6 {
        let events = world.update().unwrap();
        if let Some(LiveEvent::Birth { step, .. }) = events
            .iter()
            .find(|e| matches!(e, LiveEvent::Birth { .. }))
        {
            birth_step = Some(*step);
        }
    }

    assert_eq!(birth_step, Some(6));
    assert_eq!(world.reproduced, 1);

    let child = world.bacterium(petri_data::BacteriumId(1));
    assert_eq!(child.birth_step, 6);
    assert_eq!(child.parent, Some(petri_data::BacteriumId(0)));
    // mutation chance is zero in the builder: traits inherited exactly
    assert_eq!(child.speed, 1.0);
    assert_eq!(child.max_energy, 10.0);
    assert_eq!(child.energy, child.max_energy / 2.0);
    // offspring spawns within the jitter box around the parent
    assert!(child.x.abs() <= 1.0 && child.y.abs() <= 1.0);

    let parent = world.bacterium(petri_data::BacteriumId(0));
    assert_eq!(parent.children, vec![petri_data::BacteriumId(1)]);
    // the parent is not reset by reproducing
    assert_eq!(parent.energy, 10.0);
    assert!(parent.is_eating());
}

#[test]
fn parent_keeps_reproducing_while_still_at_capacity() {
    let mut world = WorldBuilder::new()
        .with_food(3.0, 0.0, 1000)
        .with_bacterium(0.0, 0.0, 1.0, 10.0)
        .build();

    for _ in 0..8 {
        world.update().unwrap();
    }

    // First split at step 6, then 11 >= 10 on step 7 and 12 >= 10 on step 8.
    let parent = world.bacterium(petri_data::BacteriumId(0));
    assert_eq!(parent.children.len(), 3);
    assert!(parent.energy > parent.max_energy);
    let birth_steps: Vec<u64> = parent
        .children
        .iter()
        .map(|id| world.bacterium(*id).birth_step)
        .collect();
    assert_eq!(birth_steps, vec![6, 7, 8]);
}

#[test]
fn mutated_offspring_stays_within_the_variance_band() {
    let mut world = WorldBuilder::new()
        .with_seed(9)
        .with_config(|c| {
            c.evolution.mutation_chance = 1.0;
            c.evolution.mutation_variance = 0.1;
        })
        .with_food(3.0, 0.0, 1000)
        .with_bacterium(0.0, 0.0, 2.0, 10.0)
        .build();

    for _ in 0..6 {
        world.update().unwrap();
    }

    assert_eq!(world.reproduced, 1);
    let child = world.bacterium(petri_data::BacteriumId(1));
    assert!((1.8..=2.2).contains(&child.speed), "speed {}", child.speed);
    assert!(
        (9.0..=11.0).contains(&child.max_energy),
        "max_energy {}",
        child.max_energy
    );
    assert_eq!(child.energy, child.max_energy / 2.0);
}

#[test]
fn movement_pays_distance_times_speed_and_never_overshoots() {
    // Food at distance 10, radius 1: boundary gap 9. Speed 2 covers 2 per
    // step at a cost of 2 x 2 = 4.
    let mut world = WorldBuilder::new()
        .with_food(10.0, 0.0, 20)
        .with_bacterium(0.0, 0.0, 2.0, 100.0)
        .build();

    world.update().unwrap();
    let b = world.bacterium(petri_data::BacteriumId(0));
    assert!((b.x - 2.0).abs() < 1e-12);
    assert_eq!(b.y, 0.0);
    assert!((b.energy - 46.0).abs() < 1e-12);

    // Four more steps land exactly on the boundary, never beyond it.
    for _ in 0..4 {
        world.update().unwrap();
    }
    let b = world.bacterium(petri_data::BacteriumId(0));
    assert!(b.x <= 9.0 + 1e-12);
    assert!((b.x - 9.0).abs() < 1e-12);

    world.update().unwrap();
    assert!(world.bacterium(petri_data::BacteriumId(0)).is_eating());
}

#[test]
fn agent_idles_when_no_food_exists() {
    let mut world = WorldBuilder::new()
        .with_config(|c| c.world.steps = 10)
        .with_bacterium(1.5, -2.0, 3.0, 50.0)
        .build();

    run_to_completion(&mut world);

    let b = world.bacterium(petri_data::BacteriumId(0));
    assert_eq!((b.x, b.y), (1.5, -2.0));
    assert_eq!(b.energy, 25.0);
    assert_eq!(world.outcome, Some(RunOutcome::StepLimit));
}
