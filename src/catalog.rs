//! Read-only lookups over the `cities` catalog table.
//!
//! The catalog is populated out-of-band (see `seed`). Names are matched
//! case-insensitively after trimming, with no partial or fuzzy matching: a
//! typo is simply an unknown city.

use rusqlite::{OptionalExtension, Row, params};

use crate::database::Database;
use crate::error::Result;

/// A row of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct City {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub population: i64,
}

impl City {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            latitude: row.get(2)?,
            longitude: row.get(3)?,
            country: row.get(4)?,
            population: row.get(5)?,
        })
    }
}

// Duplicate names resolve to the lowest id.
const LOOKUP_BY_NAME: &str = "SELECT id, city, lat, lng, country, population
     FROM cities
     WHERE LOWER(city) = LOWER(?1)
     ORDER BY id
     LIMIT 1";

#[derive(Debug, Clone)]
pub struct CatalogStore {
    db: Database,
}

impl CatalogStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Find a city by name, ignoring case and surrounding whitespace.
    ///
    /// # Returns
    /// * `Ok(Some(city))` - The full catalog record
    /// * `Ok(None)` - No catalog name matches
    /// * `Err(_)` - The store could not be read
    pub fn lookup_by_name(&self, name: &str) -> Result<Option<City>> {
        let name = name.trim();
        self.db.with_connection(|conn| {
            conn.query_row(LOOKUP_BY_NAME, params![name], City::from_row)
                .optional()
        })
    }

    /// Coordinates plus the catalog's own spelling of the name.
    ///
    /// Returns `(latitude, longitude, canonical_name)`.
    pub fn coordinates_by_name(&self, name: &str) -> Result<Option<(f64, f64, String)>> {
        Ok(self
            .lookup_by_name(name)?
            .map(|city| (city.latitude, city.longitude, city.name)))
    }

    /// Number of cities in the catalog.
    pub fn count(&self) -> Result<usize> {
        self.db.with_connection(|conn| {
            conn.query_row("SELECT COUNT(*) FROM cities", [], |row| row.get::<_, i64>(0))
                .map(|count| count as usize)
        })
    }
}
