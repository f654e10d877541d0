//! Out-of-band catalog population.
//!
//! Nothing in the lookup, favorites or rendering paths creates or writes the
//! `cities` table. This module does, either from an explicit list of rows or
//! from the world-cities database bundled with the `cities` crate.

use rusqlite::params;

use crate::catalog::CatalogStore;
use crate::database::Database;
use crate::error::Result;
use crate::logger::Log;

/// A catalog row to be inserted. The id is assigned by SQLite.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub population: i64,
}

impl NewCity {
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        country: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            country: country.into(),
            population: 0,
        }
    }

    pub fn with_population(mut self, population: i64) -> Self {
        self.population = population;
        self
    }
}

/// Outcome of `seed_bundled`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedOutcome {
    Inserted(usize),
    /// The catalog already had this many rows and `force` was not set.
    AlreadySeeded(usize),
}

pub fn create_catalog_table(db: &Database) -> Result<()> {
    db.with_connection(|conn| {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cities (
                id INTEGER PRIMARY KEY,
                city TEXT NOT NULL,
                lat REAL NOT NULL,
                lng REAL NOT NULL,
                country TEXT NOT NULL,
                population INTEGER NOT NULL DEFAULT 0
            );
            CREATE INDEX IF NOT EXISTS cities_city_country ON cities (city, country);",
        )
    })
}

/// Insert all rows in one transaction and return how many were written.
pub fn insert_cities(db: &Database, rows: &[NewCity]) -> Result<usize> {
    db.with_transaction(|tx| {
        let mut stmt = tx.prepare(
            "INSERT INTO cities (city, lat, lng, country, population) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for row in rows {
            stmt.execute(params![
                row.name,
                row.latitude,
                row.longitude,
                row.country,
                row.population
            ])?;
        }
        Ok(rows.len())
    })
}

/// Insert the rows whose name and country are not in the catalog yet.
///
/// Existing rows keep their ids, so saved favorites stay valid. Returns how
/// many rows were written.
pub fn insert_missing_cities(db: &Database, rows: &[NewCity]) -> Result<usize> {
    db.with_transaction(|tx| {
        let mut stmt = tx.prepare(
            "INSERT INTO cities (city, lat, lng, country, population)
             SELECT ?1, ?2, ?3, ?4, ?5
             WHERE NOT EXISTS (SELECT 1 FROM cities WHERE city = ?1 AND country = ?4)",
        )?;
        let mut inserted = 0;
        for row in rows {
            inserted += stmt.execute(params![
                row.name,
                row.latitude,
                row.longitude,
                row.country,
                row.population
            ])?;
        }
        Ok(inserted)
    })
}

/// All named cities from the bundled database.
///
/// The bundled data has no population figures, so population is 0.
pub fn bundled_cities() -> Vec<NewCity> {
    IntoIterator::into_iter(cities::all())
        .filter_map(|city| {
            let name = city.city.trim();
            if name.is_empty() {
                return None;
            }
            Some(NewCity::new(
                name,
                city.latitude,
                city.longitude,
                city.country.to_string(),
            ))
        })
        .collect()
}

/// Create the catalog table and load the bundled world cities into it.
///
/// A catalog that already has rows is left alone unless `force` is set, in
/// which case only bundled cities missing from it (by name and country) are
/// added. Forcing never duplicates rows or changes existing ids.
pub fn seed_bundled(db: &Database, force: bool) -> Result<SeedOutcome> {
    create_catalog_table(db)?;

    let existing = CatalogStore::new(db.clone()).count()?;
    let rows = bundled_cities();
    if existing == 0 {
        Log::log_debug(&format!("Seeding {} bundled cities", rows.len()));
        return insert_cities(db, &rows).map(SeedOutcome::Inserted);
    }
    if !force {
        return Ok(SeedOutcome::AlreadySeeded(existing));
    }

    Log::log_debug(&format!(
        "Topping up a catalog of {} rows from {} bundled cities",
        existing,
        rows.len()
    ));
    insert_missing_cities(db, &rows).map(SeedOutcome::Inserted)
}
