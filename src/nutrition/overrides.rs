//! Curated per-food measure overrides
//!
//! A document mapping food name -> list of `{measure_name, grams}` records,
//! loaded once at startup. A missing or malformed source yields an empty
//! table; a bad record only drops itself. Loading never fails.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::units::{candidate_units, normalize_unit};

/// Override document bundled with the crate
static BUNDLED_OVERRIDES_JSON: &str = include_str!("../../data/measure_overrides.json");

/// Food name (lowercase) -> unit (lowercase) -> grams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasureOverrideTable {
    foods: HashMap<String, HashMap<String, f64>>,
}

impl MeasureOverrideTable {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// The curated overrides shipped with the crate
    pub fn bundled() -> Self {
        Self::from_json_str(BUNDLED_OVERRIDES_JSON)
    }

    /// Parse an override document; malformed input yields an empty table
    pub fn from_json_str(json: &str) -> Self {
        match serde_json::from_str::<HashMap<String, Value>>(json) {
            Ok(raw) => Self::from_document(raw),
            Err(e) => {
                tracing::warn!("Ignoring malformed measure override document: {}", e);
                Self::empty()
            }
        }
    }

    /// Load an override document from disk; a missing file yields an empty table
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json_str(&contents),
            Err(e) => {
                tracing::debug!("No measure overrides at {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    fn from_document(raw: HashMap<String, Value>) -> Self {
        let mut foods: HashMap<String, HashMap<String, f64>> = HashMap::new();

        for (food_name, records) in raw {
            let Some(records) = records.as_array() else {
                tracing::warn!("Skipping measure overrides for {}: expected a list", food_name);
                continue;
            };

            let units = foods.entry(food_name.to_lowercase()).or_default();
            for record in records {
                let Some((name, grams)) = parse_record(record) else {
                    tracing::debug!("Skipping incomplete override record for {}", food_name);
                    continue;
                };
                let unit = normalize_unit(name);
                if unit.is_empty() {
                    continue;
                }
                units.insert(unit, grams);
            }
        }

        Self { foods }
    }

    /// Override grams for one unit of `unit` on the named food
    pub fn lookup(&self, food_name: &str, unit: &str) -> Option<f64> {
        let units = self.foods.get(&food_name.to_lowercase())?;
        candidate_units(unit)
            .iter()
            .filter_map(|c| units.get(c).copied())
            .find(|grams| *grams > 0.0)
    }

    /// Number of foods with at least one entry
    pub fn len(&self) -> usize {
        self.foods.values().filter(|units| !units.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Measure name and grams of one record; grams may be a number or a numeric string
fn parse_record(record: &Value) -> Option<(&str, f64)> {
    let name = record.get("measure_name")?.as_str()?;
    let grams = match record.get("grams")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some((name, grams))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_overrides() {
        let table = MeasureOverrideTable::bundled();
        assert_eq!(table.len(), 10);
        assert_eq!(table.lookup("blueberries, RAW", "cup"), Some(148.0));
        assert_eq!(table.lookup("Blueberries, raw", "Cups"), Some(148.0));
        assert_eq!(table.lookup("Milk, whole", "fl. oz"), Some(30.5));
        assert_eq!(table.lookup("Oats, dry", "half cup"), Some(40.5));
        assert_eq!(table.lookup("Oats, dry", "scoop"), None);
        assert_eq!(table.lookup("Unknown food", "cup"), None);
    }

    #[test]
    fn test_incomplete_records_are_skipped() {
        let json = r#"{
            "Protein Powder": [
                {"measure_name": "Scoop", "grams": 31},
                {"measure_name": "bag"},
                {"grams": 12},
                {"measure_name": "pinch", "grams": 0}
            ]
        }"#;
        let table = MeasureOverrideTable::from_json_str(json);
        assert_eq!(table.lookup("protein powder", "scoop"), Some(31.0));
        assert_eq!(table.lookup("protein powder", "bag"), None);
        assert_eq!(table.lookup("protein powder", "pinch"), None);
    }

    #[test]
    fn test_bad_record_does_not_drop_the_document() {
        let json = r#"{
            "Blueberries, raw": [
                {"measure_name": "handful", "grams": "75"},
                {"measure_name": "cup", "grams": "lots"},
                {"measure_name": "pint", "grams": [312]}
            ],
            "Bagel": [{"measure_name": "each", "grams": 105}],
            "Broken": {"measure_name": "each", "grams": 10}
        }"#;
        let table = MeasureOverrideTable::from_json_str(json);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup("blueberries, raw", "handful"), Some(75.0));
        assert_eq!(table.lookup("blueberries, raw", "cup"), None);
        assert_eq!(table.lookup("blueberries, raw", "pint"), None);
        assert_eq!(table.lookup("bagel", "each"), Some(105.0));
        assert_eq!(table.lookup("broken", "each"), None);
    }

    #[test]
    fn test_malformed_document_is_empty() {
        assert!(MeasureOverrideTable::from_json_str("{not json").is_empty());
        assert!(MeasureOverrideTable::from_json_str("[1, 2, 3]").is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Bagel": [{{"measure_name": "each", "grams": 105}}]}}"#).unwrap();

        let table = MeasureOverrideTable::load(file.path());
        assert_eq!(table.lookup("bagel", "each"), Some(105.0));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let table = MeasureOverrideTable::load(dir.path().join("absent.json"));
        assert!(table.is_empty());
    }
}
