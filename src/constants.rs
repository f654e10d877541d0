//! Application constants and default values for citymap.
//!
//! This module contains the configuration defaults, validation limits,
//! and rendering constants used throughout the crate.

// ═══ Configuration Defaults ═══
// Used when options are not specified in citymap.toml

pub const CONFIG_DIR_NAME: &str = "citymap";
pub const CONFIG_FILE_NAME: &str = "citymap.toml";
pub const DEFAULT_DATABASE: &str = "citymap.db";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_DPI: u32 = 200;
pub const DEFAULT_WIDTH_INCHES: f32 = 10.0;
pub const DEFAULT_HEIGHT_INCHES: f32 = 5.0;
pub const DEFAULT_USER_ID: i64 = 0;

// ═══ Validation Limits ═══

pub const MINIMUM_DPI: u32 = 50;
pub const MAXIMUM_DPI: u32 = 600;
pub const MINIMUM_CANVAS_INCHES: f32 = 1.0;
pub const MAXIMUM_CANVAS_INCHES: f32 = 40.0;

// ═══ Rendering Constants ═══
// Sizes are in typographic points (1/72 inch) and scale with the DPI

pub const POINTS_PER_INCH: f32 = 72.0;
pub const MARKER_SIZE_PT: f32 = 4.0; // marker diameter
pub const LABEL_SIZE_PT: f32 = 7.0; // label font size for city maps
pub const ROUTE_LABEL_SIZE_PT: f32 = 8.0; // label font size for route maps
pub const ROUTE_WIDTH_PT: f32 = 1.5;
pub const BORDER_DOT_PT: f32 = 1.0; // length of one border dash and of the gap after it

/// Labels are placed this many degrees east and north of their marker.
pub const LABEL_OFFSET_DEGREES: f64 = 1.0;

pub const OCEAN_COLOR: [u8; 3] = [0x97, 0xb6, 0xe1];
pub const LAND_COLOR: [u8; 3] = [0xef, 0xef, 0xdb];
pub const COASTLINE_COLOR: [u8; 3] = [0x00, 0x00, 0x00];
pub const BORDER_COLOR: [u8; 3] = [0x00, 0x00, 0x00];
pub const MARKER_COLOR: [u8; 3] = [0x1f, 0x77, 0xb4];
pub const ROUTE_COLOR: [u8; 3] = [0x1f, 0x77, 0xb4];
pub const ROUTE_MARKER_COLOR: [u8; 3] = [0xff, 0x7f, 0x0e];
pub const LABEL_COLOR: [u8; 3] = [0x00, 0x00, 0x00];

/// Fonts tried, in order, when the configuration does not name one.
pub const FALLBACK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

// ═══ Exit Codes ═══

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_NOT_FOUND: i32 = 2; // city unknown or no favorites
