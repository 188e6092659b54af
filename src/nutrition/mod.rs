//! Nutrition calculation module
//!
//! Unit resolution, nutrient scaling, macro targets and aggregation.

pub mod aggregate;
pub mod overrides;
pub mod resolver;
pub mod scaler;
pub mod targets;
pub mod units;

pub use aggregate::{
    aggregate, aggregate_by_day, aggregate_by_slot, aggregate_week, scale_entry, week_start_for,
    DayTotals, WeekSummary,
};
pub use overrides::MeasureOverrideTable;
pub use resolver::{find_measure, resolve_grams, resolve_logged};
pub use scaler::{scale, ReconciliationPolicy};
pub use targets::derive_targets;
pub use units::{
    candidate_units, normalize_unit, AmountDisplay, GramSource, ResolvedQuantity, UnitTable,
};
