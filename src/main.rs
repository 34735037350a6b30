//! Gearswap - item swap trials
//!
//! Loads a loadout, builds the character and runs the scripted swap
//! timeline for a number of independent iterations.

mod settings;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gearswap_core::{SimTime, Simulation};
use gearswap_sim::{Character, ItemDatabase};

use settings::Loadout;

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let path = Loadout::resolve_path(std::env::args().nth(1))?;
    let loadout = Loadout::load(&path)?;
    run(&loadout)
}

fn run(loadout: &Loadout) -> Result<()> {
    let database = Arc::new(ItemDatabase::from(loadout.database.clone()));
    let mut character =
        Character::from_config(&loadout.character, database).context("Failed to build character")?;
    let mut sim = Simulation::new(loadout.sim.clone());
    let timeline = loadout.sorted_timeline();

    info!(
        "Running {} iteration(s) with {} swap event(s)",
        loadout.iterations,
        timeline.len()
    );

    for iteration in 0..loadout.iterations {
        sim.reset();
        character.reset(&sim);

        for event in &timeline {
            let at = SimTime::from_secs_f64(event.at_secs);
            if at < sim.current_time() {
                warn!("Skipping swap at {} before the iteration start {}", at, sim.current_time());
                continue;
            }
            sim.advance_to(at)?;
            character.swap_items(&sim, &event.slots);
            info!(
                iteration,
                time = %at,
                swapped = character.item_swap.is_swapped(),
                "Stats: {}",
                character.unit.stats().flat_string()
            );
        }

        character.done_iteration(&sim);
    }

    Ok(())
}
