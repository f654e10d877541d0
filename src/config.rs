//! Configuration loading, default generation and validation.
//!
//! citymap reads `citymap.toml` from `$XDG_CONFIG_HOME/citymap/` (or the
//! platform equivalent), or from a path given with `--config`. A commented
//! default file is written the first time the default location is used.
//!
//! ```toml
//! database = "citymap.db"       # SQLite store holding the catalog and favorites
//! output_dir = "."              # Where rendered maps are written
//! # basemap = "countries.geojson" # Optional country boundaries
//! # font = "DejaVuSans.ttf"       # Optional label font
//! dpi = 200                     # Image resolution
//! width_inches = 10.0           # Canvas width
//! height_inches = 5.0           # Canvas height
//! ```
//!
//! `database`, `basemap` and `font` are resolved relative to the directory of
//! the configuration file. `output_dir` is resolved relative to the working
//! directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::*;
use crate::logger::Log;
use crate::utils::path_for_display;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// SQLite file holding the `cities` catalog and `users_cities`.
    pub database: Option<PathBuf>,
    /// Directory that CLI-rendered maps are written to.
    pub output_dir: Option<PathBuf>,
    /// GeoJSON country polygons used instead of the built-in outlines.
    pub basemap: Option<PathBuf>,
    /// TrueType font for labels. System fonts are tried when absent.
    pub font: Option<PathBuf>,
    pub dpi: Option<u32>,
    pub width_inches: Option<f32>,
    pub height_inches: Option<f32>,

    /// Directory relative paths are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Write a commented default configuration to `path`.
    pub fn create_default_config(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = ConfigBuilder::new()
            .add_section("Storage")
            .add_setting(
                "database",
                &format!("\"{}\"", DEFAULT_DATABASE),
                "SQLite file with the city catalog and favorites",
            )
            .add_section("Rendering")
            .add_setting(
                "output_dir",
                &format!("\"{}\"", DEFAULT_OUTPUT_DIR),
                "Directory rendered maps are written to",
            )
            .add_setting(
                "dpi",
                &DEFAULT_DPI.to_string(),
                &format!("Image resolution ({}-{})", MINIMUM_DPI, MAXIMUM_DPI),
            )
            .add_setting(
                "width_inches",
                &format!("{:.1}", DEFAULT_WIDTH_INCHES),
                "Canvas width in inches",
            )
            .add_setting(
                "height_inches",
                &format!("{:.1}", DEFAULT_HEIGHT_INCHES),
                "Canvas height in inches",
            )
            .add_comment("basemap = \"countries.geojson\"", "GeoJSON country borders (optional)")
            .add_comment("font = \"DejaVuSans.ttf\"", "Label font (optional)")
            .build();

        fs::write(path, content)
            .with_context(|| format!("Failed to write default config to {}", path.display()))?;
        Log::log_indented(&format!("Created default config at {}", path_for_display(path)));
        Ok(())
    }

    /// Load a configuration file that must already exist.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!(
                "Configuration file not found at specified path: {}",
                path.display()
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        validate_config(&config)?;

        Ok(config)
    }

    /// Load from the default location, creating a default file if missing.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)
                .context("Failed to create default config during load")?;
        }

        Self::load_from_path(&config_path).with_context(|| {
            format!(
                "Failed to load configuration from {}",
                config_path.display()
            )
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn database_path(&self) -> PathBuf {
        let database = self
            .database
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));
        self.resolve(&database)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }

    pub fn basemap_path(&self) -> Option<PathBuf> {
        self.basemap.as_deref().map(|path| self.resolve(path))
    }

    pub fn font_path(&self) -> Option<PathBuf> {
        self.font.as_deref().map(|path| self.resolve(path))
    }

    pub fn dpi(&self) -> u32 {
        self.dpi.unwrap_or(DEFAULT_DPI)
    }

    pub fn width_inches(&self) -> f32 {
        self.width_inches.unwrap_or(DEFAULT_WIDTH_INCHES)
    }

    pub fn height_inches(&self) -> f32 {
        self.height_inches.unwrap_or(DEFAULT_HEIGHT_INCHES)
    }

    pub fn log_config(&self) {
        Log::log_block_start("Configuration");
        Log::log_indented(&format!("Database: {}", path_for_display(&self.database_path())));
        Log::log_indented(&format!("Output directory: {}", path_for_display(&self.output_dir())));
        match self.basemap_path() {
            Some(path) => Log::log_indented(&format!("Basemap: {}", path_for_display(&path))),
            None => Log::log_indented("Basemap: built-in outlines"),
        }
        if let Some(path) = self.font_path() {
            Log::log_indented(&format!("Font: {}", path_for_display(&path)));
        }
        Log::log_indented(&format!(
            "Canvas: {}x{} in at {} DPI",
            self.width_inches(),
            self.height_inches(),
            self.dpi()
        ));
    }
}

/// Check that rendering options are within usable ranges.
pub fn validate_config(config: &Config) -> Result<()> {
    let dpi = config.dpi();
    if !(MINIMUM_DPI..=MAXIMUM_DPI).contains(&dpi) {
        anyhow::bail!(
            "dpi must be between {} and {} (got {})",
            MINIMUM_DPI,
            MAXIMUM_DPI,
            dpi
        );
    }

    for (key, value) in [
        ("width_inches", config.width_inches()),
        ("height_inches", config.height_inches()),
    ] {
        if !(MINIMUM_CANVAS_INCHES..=MAXIMUM_CANVAS_INCHES).contains(&value) {
            anyhow::bail!(
                "{} must be between {} and {} (got {})",
                key,
                MINIMUM_CANVAS_INCHES,
                MAXIMUM_CANVAS_INCHES,
                value
            );
        }
    }

    if let Some(database) = &config.database {
        if database.as_os_str().is_empty() {
            anyhow::bail!("database must not be empty");
        }
    }

    Ok(())
}

/// Builder for configuration files with aligned trailing comments.
struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{}]", title)));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{} = {}", key, value),
            comment: format!("# {}", comment),
        });
        self
    }

    /// A commented-out setting, for optional keys.
    fn add_comment(mut self, line: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("# {}", line),
            comment: format!("# {}", comment),
        });
        self
    }

    fn build(self) -> String {
        let max_width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut result = Vec::new();
        let mut first_section = true;

        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !first_section {
                        result.push(String::new());
                    }
                    result.push(title);
                    first_section = false;
                }
                ConfigEntry::Setting { line, comment } => {
                    let padding = " ".repeat(max_width - line.len());
                    result.push(format!("{}{}{}", line, padding, comment));
                }
            }
        }

        result.push(String::new());
        result.join("\n")
    }
}
