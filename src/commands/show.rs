//! Implementation of the `show` command.

use anyhow::{Context, Result};
use std::path::Path;

use super::CommandOutcome;
use crate::logger::Log;
use crate::service::CityMap;
use crate::utils::{MapKind, format_coordinates, map_output_path, path_for_display};

/// Look up a city and render it alone on the world map.
pub fn handle_show_command(
    service: &CityMap,
    output_dir: &Path,
    user_id: i64,
    city: &str,
) -> Result<CommandOutcome> {
    let Some(found) = service.lookup(city).context("Failed to look up city")? else {
        Log::log_warning(&format!("City not found: {}", city));
        return Ok(CommandOutcome::NotFound);
    };

    Log::log_block_start(&format!("{}, {}", found.name, found.country));
    Log::log_indented(&format_coordinates(found.latitude, found.longitude));

    let output_path = map_output_path(output_dir, user_id, MapKind::Single);
    let written = service
        .render_city(&found.name, &output_path)
        .with_context(|| format!("Failed to render map for {}", found.name))?;

    match written {
        Some(path) => {
            Log::log_decorated(&format!("Map written to {}", path_for_display(&path)));
            Ok(CommandOutcome::Completed)
        }
        None => {
            Log::log_warning(&format!("City not found: {}", city));
            Ok(CommandOutcome::NotFound)
        }
    }
}
