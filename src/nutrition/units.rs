//! Unit tables and unit-string normalization
//!
//! Provides the process-wide unit -> grams and unit -> milliliter tables and
//! the candidate-key expansion used when matching user-typed unit strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{round1, round2};

// ============================================================================
// Weight Conversion Constants (to grams)
// ============================================================================

/// Grams per milligram
pub const G_PER_MG: f64 = 0.001;
/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Grams per ounce, as used by the generic table
pub const G_PER_OZ: f64 = 28.35;
/// Grams per ounce, for display conversions
pub const WEIGHT_OUNCE_IN_GRAMS: f64 = 28.3495;
/// Grams per pound
pub const G_PER_LB: f64 = 453.592;
/// Grams per teaspoon (typical dry ingredient)
pub const G_PER_TSP: f64 = 4.2;
/// Grams per tablespoon (typical dry ingredient)
pub const G_PER_TBSP: f64 = 14.3;
/// Grams per cup
pub const G_PER_CUP: f64 = 240.0;

// ============================================================================
// Volume Conversion Constants (to milliliters)
// ============================================================================

/// Milliliters per teaspoon
pub const ML_PER_TSP: f64 = 5.0;
/// Milliliters per tablespoon
pub const ML_PER_TBSP: f64 = 15.0;
/// Milliliters per fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per cup
pub const ML_PER_CUP: f64 = 240.0;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

const GRAM_UNITS: &[(&[&str], f64)] = &[
    (&["g", "gram", "grams"], 1.0),
    (&["mg", "milligram", "milligrams"], G_PER_MG),
    (&["kg", "kilogram", "kilograms"], G_PER_KG),
    (&["oz", "ounce", "ounces"], G_PER_OZ),
    (&["lb", "lbs", "pound", "pounds"], G_PER_LB),
    (&["tsp", "teaspoon", "teaspoons"], G_PER_TSP),
    (&["tbsp", "tablespoon", "tablespoons"], G_PER_TBSP),
    (&["cup", "cups"], G_PER_CUP),
    (&["ml", "milliliter", "milliliters", "millilitre", "millilitres"], 1.0),
    (&["l", "liter", "liters", "litre", "litres"], ML_PER_LITER),
    (&["fl oz", "floz", "fluid ounce", "fluid ounces"], ML_PER_FL_OZ),
];

const VOLUME_UNITS: &[(&[&str], f64)] = &[
    (&["ml", "milliliter", "milliliters", "millilitre", "millilitres"], 1.0),
    (&["l", "liter", "liters", "litre", "litres"], ML_PER_LITER),
    (&["cup", "cups"], ML_PER_CUP),
    (&["tbsp", "tablespoon", "tablespoons"], ML_PER_TBSP),
    (&["tsp", "teaspoon", "teaspoons"], ML_PER_TSP),
    (&["fl oz", "floz", "fluid ounce", "fluid ounces"], ML_PER_FL_OZ),
];

fn expand(groups: &[(&[&str], f64)]) -> HashMap<String, f64> {
    groups
        .iter()
        .flat_map(|(names, factor)| names.iter().map(move |n| (n.to_string(), *factor)))
        .collect()
}

/// Generic unit -> grams table with a parallel unit -> ml table
///
/// Immutable once built; pass a custom instance to substitute values in tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitTable {
    grams: HashMap<String, f64>,
    milliliters: HashMap<String, f64>,
}

impl Default for UnitTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl UnitTable {
    /// Built-in weight and volume units with common plural/abbreviated forms
    pub fn standard() -> Self {
        Self {
            grams: expand(GRAM_UNITS),
            milliliters: expand(VOLUME_UNITS),
        }
    }

    /// Build a table from explicit entries; keys are normalized
    pub fn from_entries<G, M>(grams: G, milliliters: M) -> Self
    where
        G: IntoIterator<Item = (String, f64)>,
        M: IntoIterator<Item = (String, f64)>,
    {
        Self {
            grams: grams.into_iter().map(|(k, v)| (normalize_unit(&k), v)).collect(),
            milliliters: milliliters
                .into_iter()
                .map(|(k, v)| (normalize_unit(&k), v))
                .collect(),
        }
    }

    /// Grams per one of `unit`, trying each candidate spelling
    pub fn grams_per_unit(&self, unit: &str) -> Option<f64> {
        candidate_units(unit)
            .iter()
            .find_map(|c| self.grams.get(c).copied())
    }

    /// Milliliters per one of `unit`; None for units without a volume meaning
    pub fn ml_per_unit(&self, unit: &str) -> Option<f64> {
        candidate_units(unit)
            .iter()
            .find_map(|c| self.milliliters.get(c).copied())
    }
}

/// Trim and lowercase a unit string; absent units normalize to ""
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase()
}

/// Candidate keys for matching a unit string against named measures
///
/// In order: the normalized unit, trailing "s" stripped, periods removed,
/// spaces removed. Duplicates are dropped; an empty unit yields no candidates.
pub fn candidate_units(unit: &str) -> Vec<String> {
    let base = normalize_unit(unit);
    if base.is_empty() {
        return Vec::new();
    }

    let mut candidates = vec![base.clone()];
    let mut push = |c: String| {
        if !c.is_empty() && !candidates.contains(&c) {
            candidates.push(c);
        }
    };

    if let Some(singular) = base.strip_suffix('s') {
        push(singular.to_string());
    }
    push(base.replace('.', ""));
    push(base.replace(' ', ""));

    candidates
}

/// Which resolution tier produced a gram weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GramSource {
    /// Caller-supplied grams per unit
    GramsOverride,
    /// Unit was empty or already grams
    Grams,
    /// Measure defined on the food itself
    FoodMeasure,
    /// Generic unit table
    GenericUnit,
    /// Curated per-food override table
    CuratedOverride,
    /// Nothing matched; the quantity was taken as grams
    Fallback,
}

/// Result of unit resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedQuantity {
    pub grams: f64,
    pub volume_ml: Option<f64>,
    pub source: GramSource,
}

/// Display-ready amounts for a resolved quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountDisplay {
    pub grams: f64,
    pub ounces: Option<f64>,
    pub volume_ml: Option<f64>,
    pub fluid_oz: Option<f64>,
}

impl ResolvedQuantity {
    /// Grams and ml rounded to one decimal, ounces and fluid ounces to two;
    /// zero or absent amounts show as None
    pub fn display(&self) -> AmountDisplay {
        let ounces = (self.grams != 0.0).then(|| round2(self.grams / WEIGHT_OUNCE_IN_GRAMS));
        let volume = self.volume_ml.filter(|ml| *ml != 0.0);

        AmountDisplay {
            grams: round1(self.grams),
            ounces,
            volume_ml: volume.map(round1),
            fluid_oz: volume.map(|ml| round2(ml / ML_PER_FL_OZ)),
        }
    }
}
