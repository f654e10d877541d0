//! Implementation of the `render` command.
//!
//! Reads a JSON array of point records, for example
//! `[{"city": "Paris", "lat": 48.8566, "lng": 2.3522}]`, and plots them.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::CommandOutcome;
use crate::logger::Log;
use crate::render::points_from_json;
use crate::service::CityMap;
use crate::utils::path_for_display;

pub fn handle_render_command(
    service: &CityMap,
    points_path: &Path,
    output_path: &Path,
) -> Result<CommandOutcome> {
    let content = fs::read_to_string(points_path)
        .with_context(|| format!("Failed to read points from {}", points_path.display()))?;
    let points = points_from_json(&content)
        .with_context(|| format!("Failed to parse points from {}", points_path.display()))?;

    Log::log_block_start(&format!("Rendering {} point(s)", points.len()));
    let written = service
        .render_points(output_path, &points)
        .with_context(|| format!("Failed to render {}", output_path.display()))?;
    Log::log_decorated(&format!("Map written to {}", path_for_display(&written)));

    Ok(CommandOutcome::Completed)
}
