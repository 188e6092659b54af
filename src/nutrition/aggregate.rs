//! Nutrition aggregation
//!
//! Sums scaled nutrient contributions across logged entries for a meal, a
//! day or a week. Sums are kept at full precision; only the final totals
//! are rounded.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{LoggedQuantity, MacroTotals, MealSlot, Nutrition};

use super::scaler::{scale, ReconciliationPolicy};

/// Scaled nutrients for one logged entry at its resolved grams
pub fn scale_entry(entry: &LoggedQuantity, policy: &ReconciliationPolicy) -> Nutrition {
    scale(entry.food.as_ref(), entry.resolved_grams(), policy)
}

fn finish(sum: Nutrition) -> MacroTotals {
    let rounded = sum.rounded();
    MacroTotals {
        calories: rounded.calories,
        protein: rounded.protein,
        carbs: rounded.carbs,
        fats: rounded.fats,
        macro_calories: rounded.macro_calories(),
    }
}

/// Aggregate entries into rounded totals
///
/// Entries are not deduplicated; passing an edited entry alongside the one
/// it replaced counts both.
pub fn aggregate<'a, I>(entries: I, policy: &ReconciliationPolicy) -> MacroTotals
where
    I: IntoIterator<Item = &'a LoggedQuantity>,
{
    finish(entries.into_iter().map(|e| scale_entry(e, policy)).sum())
}

/// Totals per meal slot; slots without entries are absent
pub fn aggregate_by_slot<'a, I>(
    entries: I,
    policy: &ReconciliationPolicy,
) -> BTreeMap<MealSlot, MacroTotals>
where
    I: IntoIterator<Item = &'a LoggedQuantity>,
{
    let mut sums: BTreeMap<MealSlot, Nutrition> = BTreeMap::new();
    for entry in entries {
        let sum = sums.entry(entry.meal_slot).or_default();
        *sum = *sum + scale_entry(entry, policy);
    }
    sums.into_iter().map(|(slot, sum)| (slot, finish(sum))).collect()
}

/// Totals per log date; undated entries are skipped
pub fn aggregate_by_day<'a, I>(
    entries: I,
    policy: &ReconciliationPolicy,
) -> BTreeMap<NaiveDate, MacroTotals>
where
    I: IntoIterator<Item = &'a LoggedQuantity>,
{
    let mut sums: BTreeMap<NaiveDate, Nutrition> = BTreeMap::new();
    for entry in entries {
        let Some(date) = entry.log_date else {
            tracing::debug!("Skipping undated entry in daily aggregation");
            continue;
        };
        let sum = sums.entry(date).or_default();
        *sum = *sum + scale_entry(entry, policy);
    }
    sums.into_iter().map(|(date, sum)| (date, finish(sum))).collect()
}

/// The Sunday on or before `date`
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Totals for one calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    pub date: NaiveDate,
    pub totals: MacroTotals,
}

/// Seven consecutive days of totals plus the week total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: Vec<DayTotals>,
    /// Aggregated from the entries, not from the rounded daily totals
    pub total: MacroTotals,
}

/// Summarize the seven days starting at `week_start`
///
/// Days without entries appear with zero totals; entries outside the week
/// or without a date are ignored.
pub fn aggregate_week<'a, I>(
    entries: I,
    week_start: NaiveDate,
    policy: &ReconciliationPolicy,
) -> WeekSummary
where
    I: IntoIterator<Item = &'a LoggedQuantity>,
{
    let end = week_start + Duration::days(6);
    let in_week: Vec<&LoggedQuantity> = entries
        .into_iter()
        .filter(|e| e.log_date.is_some_and(|d| d >= week_start && d <= end))
        .collect();

    let by_day = aggregate_by_day(in_week.iter().copied(), policy);
    let days = (0..7)
        .map(|offset| {
            let date = week_start + Duration::days(offset);
            DayTotals {
                date,
                totals: by_day.get(&date).copied().unwrap_or_default(),
            }
        })
        .collect();

    WeekSummary {
        start: week_start,
        end,
        days,
        total: aggregate(in_week.iter().copied(), policy),
    }
}
