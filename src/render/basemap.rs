//! World base map: land, ocean, coastlines and national borders.
//!
//! Natural Earth's 110m admin-0 country polygons are compiled in, so every
//! map has coastlines and dotted national borders. A GeoJSON file of country
//! polygons can be configured to replace them.

use geojson::{GeoJson, Geometry, Value};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

use super::draw::{draw_dotted_polyline, fill_ring, trace_edges};
use super::projection::PlateCarree;
use crate::error::{CityMapError, Result};

const BUILTIN_COUNTRIES: &str = include_str!("../../assets/countries.geojson");

/// A closed ring of (longitude, latitude) vertices.
pub type Ring = Vec<(f64, f64)>;

/// Colors and line sizes, in pixels, used to paint a base map.
#[derive(Debug, Clone, Copy)]
pub struct BasemapStyle {
    pub ocean: Rgb<u8>,
    pub land: Rgb<u8>,
    pub coastline: Rgb<u8>,
    pub border: Rgb<u8>,
    pub border_dash: f32,
}

#[derive(Debug, Clone)]
pub struct Basemap {
    land: Vec<Ring>,
    borders: Vec<Ring>,
}

impl Basemap {
    /// The compiled-in country polygons.
    pub fn builtin() -> Result<Self> {
        Self::from_geojson_str(BUILTIN_COUNTRIES).map_err(|reason| CityMapError::Basemap {
            path: PathBuf::from("<built-in countries>"),
            reason,
        })
    }

    pub fn from_geojson_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| CityMapError::Basemap {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_geojson_str(&text).map_err(|reason| CityMapError::Basemap {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Build a base map from GeoJSON polygons.
    ///
    /// The outer ring of every polygon becomes both land and a border. Holes
    /// are ignored since neighbouring countries fill them.
    pub fn from_geojson_str(text: &str) -> std::result::Result<Self, String> {
        let geojson: GeoJson = text.parse().map_err(|e: geojson::Error| e.to_string())?;

        let mut rings = Vec::new();
        match geojson {
            GeoJson::FeatureCollection(collection) => {
                for feature in collection.features {
                    if let Some(geometry) = feature.geometry {
                        collect_outer_rings(&geometry, &mut rings);
                    }
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = feature.geometry {
                    collect_outer_rings(&geometry, &mut rings);
                }
            }
            GeoJson::Geometry(geometry) => collect_outer_rings(&geometry, &mut rings),
        }

        if rings.is_empty() {
            return Err("no polygons found".to_string());
        }

        Ok(Self {
            land: rings.clone(),
            borders: rings,
        })
    }

    pub fn land(&self) -> &[Ring] {
        &self.land
    }

    pub fn borders(&self) -> &[Ring] {
        &self.borders
    }

    /// Paint the base map over the whole canvas.
    pub fn paint(&self, canvas: &mut RgbImage, projection: &PlateCarree, style: &BasemapStyle) {
        for pixel in canvas.pixels_mut() {
            *pixel = style.ocean;
        }

        for ring in &self.land {
            fill_ring(canvas, &project_ring(ring, projection), style.land);
        }
        trace_edges(canvas, style.land, style.coastline);

        for ring in &self.borders {
            draw_dotted_polyline(canvas, &project_ring(ring, projection), style.border, style.border_dash);
        }
    }
}

fn project_ring(ring: &[(f64, f64)], projection: &PlateCarree) -> Vec<(f32, f32)> {
    ring.iter()
        .map(|&(lon, lat)| projection.project(lon, lat))
        .collect()
}

fn collect_outer_rings(geometry: &Geometry, rings: &mut Vec<Ring>) {
    match &geometry.value {
        Value::Polygon(polygon) => {
            if let Some(outer) = polygon.first() {
                rings.push(positions_to_ring(outer));
            }
        }
        Value::MultiPolygon(polygons) => {
            for polygon in polygons {
                if let Some(outer) = polygon.first() {
                    rings.push(positions_to_ring(outer));
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_outer_rings(geometry, rings);
            }
        }
        // Points and lines have no area to fill
        _ => {}
    }
}

fn positions_to_ring(positions: &[Vec<f64>]) -> Ring {
    positions
        .iter()
        .filter(|position| position.len() >= 2)
        .map(|position| (position[0], position[1]))
        .collect()
}
