//! Implementation of the `distance` command.

use anyhow::{Context, Result};
use std::path::Path;

use super::CommandOutcome;
use crate::logger::Log;
use crate::service::CityMap;
use crate::utils::{MapKind, map_output_path, path_for_display};

/// Draw a straight route between two cities.
///
/// Each name is looked up once; every unknown name is reported.
pub fn handle_distance_command(
    service: &CityMap,
    output_dir: &Path,
    user_id: i64,
    from: &str,
    to: &str,
) -> Result<CommandOutcome> {
    let resolve = |city: &str| -> Result<_> {
        let point = service.resolve_point(city).context("Failed to look up city")?;
        if point.is_none() {
            Log::log_warning(&format!("City not found: {}", city));
        }
        Ok(point)
    };
    let (Some(start), Some(end)) = (resolve(from)?, resolve(to)?) else {
        return Ok(CommandOutcome::NotFound);
    };

    let output_path = map_output_path(output_dir, user_id, MapKind::Distance);
    let written = service
        .render_route(&output_path, &start, &end)
        .with_context(|| format!("Failed to render route {} -> {}", start.label, end.label))?;

    Log::log_block_start(&format!("Route {} -> {}", start.label, end.label));
    Log::log_decorated(&format!("Map written to {}", path_for_display(&written)));
    Ok(CommandOutcome::Completed)
}
