//! Implementation of the `my-cities` command.

use anyhow::{Context, Result};
use std::path::Path;

use super::CommandOutcome;
use crate::logger::Log;
use crate::service::CityMap;
use crate::utils::{MapKind, format_coordinates, map_output_path, path_for_display};

/// List the user's favorites and render them together.
pub fn handle_my_cities_command(
    service: &CityMap,
    output_dir: &Path,
    user_id: i64,
) -> Result<CommandOutcome> {
    let favorites = service
        .favorites(user_id)
        .with_context(|| format!("Failed to list favorites of user {}", user_id))?;

    if favorites.is_empty() {
        Log::log_warning(&format!("User {} has no saved cities", user_id));
        return Ok(CommandOutcome::NotFound);
    }

    Log::log_block_start(&format!("Saved cities of user {}:", user_id));
    for city in &favorites {
        Log::log_indented(&format!(
            "{}, {} ({})",
            city.name,
            city.country,
            format_coordinates(city.latitude, city.longitude)
        ));
    }

    let output_path = map_output_path(output_dir, user_id, MapKind::All);
    let written = service
        .render_favorites(user_id, &output_path)
        .context("Failed to render favorites map")?;

    match written {
        Some(path) => {
            Log::log_decorated(&format!("Map written to {}", path_for_display(&path)));
            Ok(CommandOutcome::Completed)
        }
        None => Ok(CommandOutcome::NotFound),
    }
}
