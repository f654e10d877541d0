//! Per-user favorite cities.
//!
//! `users_cities` maps user ids to catalog ids. Rows are only ever inserted,
//! and inserting a pair that already exists is a no-op.

use rusqlite::params;

use crate::catalog::CatalogStore;
use crate::database::Database;
use crate::error::Result;
use crate::logger::Log;

/// A favorite joined with its catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
}

#[derive(Debug, Clone)]
pub struct FavoritesStore {
    db: Database,
    catalog: CatalogStore,
}

impl FavoritesStore {
    pub fn new(db: Database, catalog: CatalogStore) -> Self {
        Self { db, catalog }
    }

    /// Create `users_cities` if it does not exist yet. Safe on every start.
    pub fn ensure_schema(&self) -> Result<()> {
        Log::log_debug("Ensuring users_cities table exists");
        self.db.with_connection(|conn| {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS users_cities (
                    user_id INTEGER NOT NULL,
                    city_id INTEGER NOT NULL,
                    PRIMARY KEY (user_id, city_id)
                )",
            )
        })
    }

    /// Save a city for a user.
    ///
    /// Returns `false` without touching the store when the name is not in the
    /// catalog. Returns `true` when the city is known, whether or not the user
    /// already had it.
    pub fn add_favorite(&self, user_id: i64, city_name: &str) -> Result<bool> {
        let Some(city) = self.catalog.lookup_by_name(city_name)? else {
            return Ok(false);
        };

        let inserted = self.db.with_connection(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO users_cities (user_id, city_id) VALUES (?1, ?2)",
                params![user_id, city.id],
            )
        })?;
        Log::log_debug(&format!(
            "User {} favorite {} (id {}): {}",
            user_id,
            city.name,
            city.id,
            if inserted == 0 { "already saved" } else { "saved" }
        ));

        Ok(true)
    }

    /// The user's favorites, sorted by city name.
    pub fn list_favorites(&self, user_id: i64) -> Result<Vec<FavoriteCity>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT c.city, c.lat, c.lng, c.country
                 FROM users_cities uc
                 JOIN cities c ON c.id = uc.city_id
                 WHERE uc.user_id = ?1
                 ORDER BY c.city",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                Ok(FavoriteCity {
                    name: row.get(0)?,
                    latitude: row.get(1)?,
                    longitude: row.get(2)?,
                    country: row.get(3)?,
                })
            })?;
            rows.collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{NewCity, create_catalog_table, insert_cities};
    use tempfile::{TempDir, tempdir};

    fn store() -> (TempDir, Database, FavoritesStore) {
        let dir = tempdir().unwrap();
        let db = Database::new(dir.path().join("favorites.db"));
        create_catalog_table(&db).unwrap();
        insert_cities(
            &db,
            &[
                NewCity::new("London", 51.5072, -0.1275, "United Kingdom"),
                NewCity::new("Zurich", 47.3744, 8.5411, "Switzerland"),
                NewCity::new("Amsterdam", 52.3728, 4.8936, "Netherlands"),
            ],
        )
        .unwrap();
        let favorites = FavoritesStore::new(db.clone(), CatalogStore::new(db.clone()));
        favorites.ensure_schema().unwrap();
        (dir, db, favorites)
    }

    fn row_count(db: &Database) -> i64 {
        db.with_connection(|conn| {
            conn.query_row("SELECT COUNT(*) FROM users_cities", [], |row| row.get(0))
        })
        .unwrap()
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let (_dir, _db, favorites) = store();
        favorites.ensure_schema().unwrap();
        favorites.ensure_schema().unwrap();
    }

    #[test]
    fn test_unknown_city_is_not_saved() {
        let (_dir, db, favorites) = store();

        assert!(!favorites.add_favorite(7, "Nonexistent City").unwrap());
        assert!(favorites.list_favorites(7).unwrap().is_empty());
        assert_eq!(row_count(&db), 0);
    }

    #[test]
    fn test_add_favorite_twice_keeps_one_row() {
        let (_dir, db, favorites) = store();

        assert!(favorites.add_favorite(7, "London").unwrap());
        assert!(favorites.add_favorite(7, "london").unwrap());

        let listed = favorites.list_favorites(7).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "London");
        assert_eq!(row_count(&db), 1);
    }

    #[test]
    fn test_favorites_sorted_by_name() {
        let (_dir, _db, favorites) = store();

        favorites.add_favorite(7, "Zurich").unwrap();
        favorites.add_favorite(7, "Amsterdam").unwrap();

        let names: Vec<String> = favorites
            .list_favorites(7)
            .unwrap()
            .into_iter()
            .map(|city| city.name)
            .collect();
        assert_eq!(names, vec!["Amsterdam", "Zurich"]);
    }

    #[test]
    fn test_favorites_are_per_user() {
        let (_dir, _db, favorites) = store();

        favorites.add_favorite(1, "London").unwrap();
        favorites.add_favorite(2, "Zurich").unwrap();

        let first = favorites.list_favorites(1).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].country, "United Kingdom");
        assert!(favorites.list_favorites(3).unwrap().is_empty());
    }
}
