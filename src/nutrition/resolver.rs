//! Unit resolution
//!
//! Converts a logged (food, quantity, unit) triple into grams, plus a volume
//! in milliliters where the unit has one. Resolution degrades through a fixed
//! chain of lookups and always ends in a finite gram value.

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{FoodProfile, LoggedQuantity, MeasureDefinition};

use super::units::{candidate_units, normalize_unit, GramSource, ResolvedQuantity};

/// Find the food's own measure matching `unit` under any candidate spelling
///
/// Only measures with a positive gram weight are considered.
pub fn find_measure<'a>(food: &'a FoodProfile, unit: &str) -> Option<&'a MeasureDefinition> {
    candidate_units(unit).iter().find_map(|candidate| {
        food.measures.iter().find(|m| {
            m.usable_grams().is_some() && normalize_unit(&m.measure_name) == *candidate
        })
    })
}

/// Resolve a quantity and unit to grams (and optional volume)
///
/// Order: `grams_override`; empty unit or "g"; the food's own measures; the
/// generic unit table; the curated override table keyed by food name; and
/// finally the quantity itself taken as grams. Volume comes from
/// `volume_override` when given, otherwise from the volume table, and is
/// absent when the gram weight fell back to the raw quantity.
///
/// Fails only when `quantity` is absent.
pub fn resolve_grams(
    config: &EngineConfig,
    food: Option<&FoodProfile>,
    quantity: Option<f64>,
    unit: Option<&str>,
    grams_override: Option<f64>,
    volume_override: Option<f64>,
) -> EngineResult<ResolvedQuantity> {
    let quantity = quantity.ok_or(EngineError::InvalidQuantity)?;
    let unit = normalize_unit(unit.unwrap_or_default());

    let (grams, source) = match grams_override {
        Some(per_unit) => (quantity * per_unit, GramSource::GramsOverride),
        None => resolve_weight(config, food, quantity, &unit),
    };

    let volume_ml = match volume_override {
        Some(per_unit) => Some(quantity * per_unit),
        None if source == GramSource::Fallback => None,
        None => config.units.ml_per_unit(&unit).map(|ml| quantity * ml),
    };

    tracing::debug!(
        "Resolved {} '{}' -> {}g via {:?} (volume {:?})",
        quantity,
        unit,
        grams,
        source,
        volume_ml
    );

    Ok(ResolvedQuantity {
        grams,
        volume_ml,
        source,
    })
}

fn resolve_weight(
    config: &EngineConfig,
    food: Option<&FoodProfile>,
    quantity: f64,
    unit: &str,
) -> (f64, GramSource) {
    if unit.is_empty() || unit == "g" {
        return (quantity, GramSource::Grams);
    }

    if let Some(per_unit) = food
        .and_then(|f| find_measure(f, unit))
        .and_then(MeasureDefinition::usable_grams)
    {
        return (quantity * per_unit, GramSource::FoodMeasure);
    }

    if let Some(per_unit) = config.units.grams_per_unit(unit) {
        return (quantity * per_unit, GramSource::GenericUnit);
    }

    if let Some(per_unit) = food.and_then(|f| config.overrides.lookup(&f.name, unit)) {
        return (quantity * per_unit, GramSource::CuratedOverride);
    }

    tracing::debug!(
        "No conversion for unit '{}'; treating {} as grams",
        unit,
        quantity
    );
    (quantity, GramSource::Fallback)
}

/// Resolve a logged entry in place, filling its grams and volume
pub fn resolve_logged(
    config: &EngineConfig,
    entry: &mut LoggedQuantity,
) -> EngineResult<ResolvedQuantity> {
    let resolved = resolve_grams(
        config,
        entry.food.as_ref(),
        entry.quantity,
        entry.unit.as_deref(),
        None,
        None,
    )?;
    entry.grams = Some(resolved.grams);
    entry.volume_ml = resolved.volume_ml;
    Ok(resolved)
}
