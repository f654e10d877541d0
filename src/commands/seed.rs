//! Implementation of the `seed` command.

use anyhow::{Context, Result};

use super::CommandOutcome;
use crate::logger::Log;
use crate::seed::SeedOutcome;
use crate::service::CityMap;
use crate::utils::path_for_display;

pub fn handle_seed_command(service: &CityMap, force: bool) -> Result<CommandOutcome> {
    let database = path_for_display(service.database().path());
    Log::log_block_start(&format!("Seeding catalog in {}", database));

    let outcome = service.seed(force).context("Failed to seed the city catalog")?;
    match outcome {
        SeedOutcome::Inserted(count) => {
            Log::log_decorated(&format!("Inserted {} cities", count));
        }
        SeedOutcome::AlreadySeeded(count) => {
            Log::log_decorated(&format!("Catalog already holds {} cities", count));
            Log::log_indented("Use `citymap seed --force` to add bundled cities missing from it");
        }
    }

    Ok(CommandOutcome::Completed)
}
