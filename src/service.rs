//! The `CityMap` service: catalog, favorites and renderer behind one value.
//!
//! Front ends construct one `CityMap` and hand it to their request handlers.
//! It holds no open connections, only the database path and the renderer.

use std::path::{Path, PathBuf};

use crate::catalog::{CatalogStore, City};
use crate::config::Config;
use crate::database::Database;
use crate::error::Result;
use crate::favorites::{FavoriteCity, FavoritesStore};
use crate::logger::Log;
use crate::render::{Basemap, MapRenderer, RenderPoint, RenderSettings, load_font};
use crate::seed::{self, SeedOutcome};

pub struct CityMap {
    database: Database,
    catalog: CatalogStore,
    favorites: FavoritesStore,
    renderer: MapRenderer,
}

impl CityMap {
    pub fn new(database: Database, renderer: MapRenderer) -> Self {
        let catalog = CatalogStore::new(database.clone());
        let favorites = FavoritesStore::new(database.clone(), catalog.clone());
        Self {
            database,
            catalog,
            favorites,
            renderer,
        }
    }

    /// Build the service from configuration and make sure the favorites
    /// table exists.
    pub fn open(config: &Config) -> Result<Self> {
        let basemap = match config.basemap_path() {
            Some(path) => {
                Log::log_debug(&format!("Loading basemap {}", path.display()));
                Basemap::from_geojson_file(&path)?
            }
            None => Basemap::builtin()?,
        };
        let settings = RenderSettings {
            dpi: config.dpi(),
            width_inches: config.width_inches(),
            height_inches: config.height_inches(),
        };
        let font = load_font(config.font_path().as_deref());
        let renderer = MapRenderer::new(settings, basemap, font);

        let service = Self::new(Database::new(config.database_path()), renderer);
        service.ensure_schema()?;
        Ok(service)
    }

    pub fn ensure_schema(&self) -> Result<()> {
        self.favorites.ensure_schema()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn renderer(&self) -> &MapRenderer {
        &self.renderer
    }

    pub fn lookup(&self, name: &str) -> Result<Option<City>> {
        self.catalog.lookup_by_name(name)
    }

    /// `(latitude, longitude, canonical_name)` of a city, if known.
    pub fn coordinates(&self, name: &str) -> Result<Option<(f64, f64, String)>> {
        self.catalog.coordinates_by_name(name)
    }

    pub fn add_favorite(&self, user_id: i64, name: &str) -> Result<bool> {
        self.favorites.add_favorite(user_id, name)
    }

    pub fn favorites(&self, user_id: i64) -> Result<Vec<FavoriteCity>> {
        self.favorites.list_favorites(user_id)
    }

    /// A catalog city as a labeled point, under its canonical name.
    pub fn resolve_point(&self, name: &str) -> Result<Option<RenderPoint>> {
        Ok(self
            .coordinates(name)?
            .map(|(latitude, longitude, canonical)| RenderPoint::new(canonical, latitude, longitude)))
    }

    /// Render a single city. `None` if the name is not in the catalog.
    pub fn render_city(&self, name: &str, output_path: &Path) -> Result<Option<PathBuf>> {
        let Some(point) = self.resolve_point(name)? else {
            return Ok(None);
        };
        self.renderer.render(output_path, &[point]).map(Some)
    }

    /// Render every favorite of a user. `None` if the user has none.
    pub fn render_favorites(&self, user_id: i64, output_path: &Path) -> Result<Option<PathBuf>> {
        let cities = self.favorites(user_id)?;
        if cities.is_empty() {
            return Ok(None);
        }
        let points: Vec<RenderPoint> = cities.iter().map(RenderPoint::from).collect();
        self.renderer.render(output_path, &points).map(Some)
    }

    /// Render a straight line between two cities. `None` unless both are known.
    pub fn draw_distance(&self, from: &str, to: &str, output_path: &Path) -> Result<Option<PathBuf>> {
        let (Some(from), Some(to)) = (self.resolve_point(from)?, self.resolve_point(to)?) else {
            return Ok(None);
        };
        self.render_route(output_path, &from, &to).map(Some)
    }

    /// Render a route between two already resolved points.
    pub fn render_route(&self, output_path: &Path, from: &RenderPoint, to: &RenderPoint) -> Result<PathBuf> {
        self.renderer.render_route(output_path, from, to)
    }

    /// Fill the catalog from the bundled world-cities database.
    pub fn seed(&self, force: bool) -> Result<SeedOutcome> {
        seed::seed_bundled(&self.database, force)
    }

    pub fn render_points(&self, output_path: &Path, points: &[RenderPoint]) -> Result<PathBuf> {
        self.renderer.render(output_path, points)
    }
}
