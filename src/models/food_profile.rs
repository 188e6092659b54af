//! Food Profile model
//!
//! Normalized per-serving macro profile for one food, together with the
//! named measures scoped to it. Loaded once at the data-access boundary
//! and handed to the engine as a plain value.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult};
use super::Nutrition;

/// Grams a food's values are defined per when nothing else is known
pub const DEFAULT_SERVING_GRAMS: f64 = 100.0;

/// A named unit -> grams mapping scoped to one food (e.g. "cup" -> 148g)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureDefinition {
    pub measure_name: String,
    pub grams: Option<f64>,
}

impl MeasureDefinition {
    pub fn new(measure_name: impl Into<String>, grams: f64) -> Self {
        Self {
            measure_name: measure_name.into(),
            grams: Some(grams),
        }
    }

    /// Gram weight if the measure carries a usable (positive) value
    pub fn usable_grams(&self) -> Option<f64> {
        self.grams.filter(|g| *g > 0.0)
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            measure_name: row.get("measure_name")?,
            grams: row.get("grams")?,
        })
    }

    /// List the measures defined for a food
    pub fn list_for_food(conn: &Connection, food_id: i64) -> DbResult<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT measure_name, grams FROM food_measures WHERE food_id = ?1 ORDER BY id ASC",
        )?;

        let measures = stmt
            .query_map([food_id], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(measures)
    }

    /// Attach a measure to a food; the name is stored lowercase
    pub fn create(conn: &Connection, food_id: i64, data: &MeasureDefinition) -> DbResult<()> {
        conn.execute(
            "INSERT INTO food_measures (food_id, measure_name, grams) VALUES (?1, ?2, ?3)",
            params![food_id, data.measure_name.trim().to_lowercase(), data.grams],
        )?;
        Ok(())
    }
}

/// Per-serving nutrient values and serving basis for one food
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodProfile {
    pub id: i64,
    pub name: String,
    pub calories: Option<f64>, // kcal per serving
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fats_g: Option<f64>,
    pub serving_size: Option<f64>,
    pub grams_per_unit: Option<f64>,
    #[serde(default)]
    pub measures: Vec<MeasureDefinition>,
}

/// Data for creating a food
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodProfileCreate {
    pub name: String,
    pub calories: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fats_g: Option<f64>,
    pub serving_size: Option<f64>,
    pub grams_per_unit: Option<f64>,
}

impl FoodProfile {
    /// Grams the stated values are defined per
    ///
    /// `serving_size` if positive, else `grams_per_unit` if positive, else 100.
    pub fn serving_basis(&self) -> f64 {
        [self.serving_size, self.grams_per_unit]
            .into_iter()
            .flatten()
            .find(|v| *v > 0.0)
            .unwrap_or(DEFAULT_SERVING_GRAMS)
    }

    /// Per-serving values with unset fields read as zero
    pub fn per_serving(&self) -> Nutrition {
        Nutrition {
            calories: self.calories.unwrap_or(0.0),
            protein: self.protein_g.unwrap_or(0.0),
            carbs: self.carbs_g.unwrap_or(0.0),
            fats: self.fats_g.unwrap_or(0.0),
        }
    }

    /// Create a FoodProfile from a database row (measures not loaded)
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            calories: row.get("calories")?,
            protein_g: row.get("protein_g")?,
            carbs_g: row.get("carbs_g")?,
            fats_g: row.get("fats_g")?,
            serving_size: row.get("serving_size")?,
            grams_per_unit: row.get("grams_per_unit")?,
            measures: Vec::new(),
        })
    }

    /// Insert a new food
    pub fn create(conn: &Connection, data: &FoodProfileCreate) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO foods (
                name, calories, protein_g, carbs_g, fats_g,
                serving_size, grams_per_unit
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                data.name,
                data.calories,
                data.protein_g,
                data.carbs_g,
                data.fats_g,
                data.serving_size,
                data.grams_per_unit,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get a food by ID together with its measures
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM foods WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        let mut food = match result {
            Ok(food) => food,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        food.measures = MeasureDefinition::list_for_food(conn, id)?;
        Ok(Some(food))
    }

    /// Load a food for the engine, treating any store failure as a miss
    ///
    /// The engine never retries; a miss simply lets the unit resolver fall
    /// through to its generic tiers.
    pub fn fetch(db: &Database, id: i64) -> Option<Self> {
        match db.with_conn(|conn| Self::get_by_id(conn, id)) {
            Ok(food) => food,
            Err(e) => {
                tracing::warn!("Food lookup failed for id {}: {}", id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Database {
        let db = Database::in_memory().unwrap();
        db.with_conn(run_migrations).unwrap();
        db
    }

    #[test]
    fn test_serving_basis_fallbacks() {
        let mut food = FoodProfile::default();
        assert_eq!(food.serving_basis(), 100.0);

        food.grams_per_unit = Some(50.0);
        assert_eq!(food.serving_basis(), 50.0);

        food.serving_size = Some(0.0);
        assert_eq!(food.serving_basis(), 50.0);

        food.serving_size = Some(-5.0);
        food.grams_per_unit = Some(-1.0);
        assert_eq!(food.serving_basis(), 100.0);

        food.serving_size = Some(30.0);
        assert_eq!(food.serving_basis(), 30.0);
    }

    #[test]
    fn test_create_and_fetch_with_measures() {
        let db = setup();

        let id = db
            .with_conn(|conn| {
                let food = FoodProfile::create(
                    conn,
                    &FoodProfileCreate {
                        name: "Blueberries, raw".to_string(),
                        calories: Some(57.0),
                        protein_g: Some(0.7),
                        carbs_g: Some(14.5),
                        fats_g: Some(0.3),
                        ..Default::default()
                    },
                )?;
                MeasureDefinition::create(conn, food.id, &MeasureDefinition::new("Cup", 148.0))?;
                MeasureDefinition::create(conn, food.id, &MeasureDefinition::new("pint", 312.0))?;
                Ok(food.id)
            })
            .unwrap();

        let food = FoodProfile::fetch(&db, id).unwrap();
        assert_eq!(food.name, "Blueberries, raw");
        assert_eq!(food.serving_size, None);
        assert_eq!(food.serving_basis(), 100.0);
        assert_eq!(food.measures.len(), 2);
        assert_eq!(food.measures[0], MeasureDefinition::new("cup", 148.0));
    }

    #[test]
    fn test_fetch_missing_food_is_none() {
        let db = setup();
        assert!(FoodProfile::fetch(&db, 42).is_none());
    }

    #[test]
    fn test_fetch_without_schema_degrades_to_none() {
        let db = Database::in_memory().unwrap();
        assert!(FoodProfile::fetch(&db, 1).is_none());
    }
}
