//! Macro target derivation
//!
//! Turns a calorie target plus optional gram targets and ratio overrides into
//! per-macro gram targets.
//!
//! Percent mode reads only the ratios the caller overrode: a macro without an
//! override has no target. The grams path falls back to the default ratio
//! table for any macro without an explicit gram value. Keep the two paths
//! distinct until product confirms which handling of a missing value is
//! intended.
//!
//! Overrides and default ratios alike are clamped into [0, 1].

use crate::models::{
    round1, MacroMode, MacroRatioOverrides, MacroRatios, MacroTargetSpec, MacroTargets,
    KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};

/// Clamp a ratio into [0, 1]; NaN is treated as unspecified
fn clamp_ratio(ratio: Option<f64>) -> Option<f64> {
    ratio.filter(|r| !r.is_nan()).map(|r| r.clamp(0.0, 1.0))
}

/// Grams of a macro supplying `ratio` of `calorie_target`
fn grams_from_ratio(
    calorie_target: Option<f64>,
    ratio: Option<f64>,
    kcal_per_gram: f64,
) -> Option<f64> {
    let calories = calorie_target.filter(|c| *c != 0.0)?;
    let ratio = ratio.filter(|r| *r > 0.0)?;
    Some(round1(calories * ratio / kcal_per_gram))
}

/// Derive per-macro gram targets; calories pass through unchanged
pub fn derive_targets(spec: &MacroTargetSpec, defaults: &MacroRatios) -> MacroTargets {
    let MacroRatioOverrides {
        protein: protein_ratio,
        carbs: carbs_ratio,
        fats: fats_ratio,
    } = spec.ratio_overrides;

    let macros = [
        (spec.protein_g, clamp_ratio(protein_ratio), defaults.protein, KCAL_PER_G_PROTEIN),
        (spec.carbs_g, clamp_ratio(carbs_ratio), defaults.carbs, KCAL_PER_G_CARBS),
        (spec.fats_g, clamp_ratio(fats_ratio), defaults.fats, KCAL_PER_G_FAT),
    ];

    let [protein, carbs, fats] = macros.map(|(explicit, ratio, default_ratio, kcal)| {
        match spec.mode {
            MacroMode::Percent => grams_from_ratio(spec.calorie_target, ratio, kcal),
            MacroMode::Grams => match explicit {
                Some(grams) => Some(round1(grams)),
                None => grams_from_ratio(
                    spec.calorie_target,
                    ratio.or_else(|| clamp_ratio(Some(default_ratio))),
                    kcal,
                ),
            },
        }
    });

    MacroTargets {
        calories: spec.calorie_target,
        protein,
        carbs,
        fats,
    }
}
