//! # citymap
//!
//! Look up world cities, keep per-user lists of favorites and plot them on a
//! world map.
//!
//! ## Architecture
//!
//! - **catalog**: Case-insensitive lookups in the read-only `cities` table
//! - **favorites**: Per-user saved cities in `users_cities`
//! - **render**: Equirectangular world-map PNG rendering
//! - **service**: The `CityMap` value tying storage and rendering together
//! - **seed**: Loading the bundled world-cities database into the catalog
//! - **database**: Per-call SQLite connections
//! - **config**: Configuration loading, validation, and default generation
//! - **args** / **commands**: Command-line parsing and command handlers
//! - **logger**: Structured logging with visual formatting
//! - **constants**: Application-wide constants and defaults
//! - **utils**: Formatting and output naming helpers

pub mod args;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod favorites;
pub mod logger;
pub mod render;
pub mod seed;
pub mod service;
pub mod utils;

// Re-export important types for easier access
pub use catalog::{CatalogStore, City};
pub use config::Config;
pub use database::Database;
pub use error::{CityMapError, Result};
pub use favorites::{FavoriteCity, FavoritesStore};
pub use logger::{Log, LogLevel};
pub use render::{MapRenderer, PointRecord, RenderPoint, RenderSettings};
pub use service::CityMap;
