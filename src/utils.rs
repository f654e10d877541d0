//! Utility functions shared across the codebase.
//!
//! Formatting helpers for paths and coordinates, and the naming scheme for
//! rendered map files.

use std::path::{Path, PathBuf};

/// Which kind of map a rendered file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    /// One city looked up by name.
    Single,
    /// Every favorite of a user.
    All,
    /// A route between two cities.
    Distance,
}

impl MapKind {
    pub fn suffix(self) -> &'static str {
        match self {
            MapKind::Single => "single",
            MapKind::All => "all",
            MapKind::Distance => "distance",
        }
    }
}

/// File name for a user's rendered map.
///
/// # Examples
/// ```
/// use citymap::utils::{map_file_name, MapKind};
/// assert_eq!(map_file_name(42, MapKind::Single), "map_42_single.png");
/// assert_eq!(map_file_name(-7, MapKind::All), "map_-7_all.png");
/// ```
pub fn map_file_name(user_id: i64, kind: MapKind) -> String {
    format!("map_{}_{}.png", user_id, kind.suffix())
}

/// Full output path for a user's rendered map inside `output_dir`.
pub fn map_output_path(output_dir: &Path, user_id: i64, kind: MapKind) -> PathBuf {
    output_dir.join(map_file_name(user_id, kind))
}

/// Render a path for log output, abbreviating the home directory to `~`.
pub fn path_for_display(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(rest) = path.strip_prefix(&home) {
            if rest.as_os_str().is_empty() {
                return "~".to_string();
            }
            return format!("~/{}", rest.display());
        }
    }
    path.display().to_string()
}

/// Format a position as `48.8566°N, 2.3522°E`.
///
/// # Examples
/// ```
/// use citymap::utils::format_coordinates;
/// assert_eq!(format_coordinates(-33.8688, 151.2093), "33.8688°S, 151.2093°E");
/// ```
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    let lat_dir = if latitude >= 0.0 { 'N' } else { 'S' };
    let lon_dir = if longitude >= 0.0 { 'E' } else { 'W' };
    format!(
        "{:.4}°{}, {:.4}°{}",
        latitude.abs(),
        lat_dir,
        longitude.abs(),
        lon_dir
    )
}
