//! Engine configuration
//!
//! Immutable lookup tables and policies handed to the engine entry points.
//! Built once at startup and shared read-only across concurrent callers.

use std::path::PathBuf;

use crate::models::MacroRatios;
use crate::nutrition::{MeasureOverrideTable, ReconciliationPolicy, UnitTable};

/// Path to an override document replacing the bundled one
pub const ENV_OVERRIDES_PATH: &str = "MACROCALC_OVERRIDES_PATH";
/// Upper stated/macro calorie ratio before the stated label is distrusted
pub const ENV_RECONCILE_UPPER: &str = "MACROCALC_RECONCILE_UPPER";
/// Lower stated/macro calorie ratio before the stated label is distrusted
pub const ENV_RECONCILE_LOWER: &str = "MACROCALC_RECONCILE_LOWER";

/// Everything the engine reads besides its per-call arguments
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub units: UnitTable,
    pub overrides: MeasureOverrideTable,
    pub reconciliation: ReconciliationPolicy,
    pub default_ratios: MacroRatios,
}

impl EngineConfig {
    /// Built-in unit tables, bundled overrides, default policies
    pub fn standard() -> Self {
        Self {
            units: UnitTable::standard(),
            overrides: MeasureOverrideTable::bundled(),
            reconciliation: ReconciliationPolicy::default(),
            default_ratios: MacroRatios::default(),
        }
    }

    /// Standard configuration adjusted by environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment or otherwise)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::standard();

        if let Some(path) = lookup(ENV_OVERRIDES_PATH).filter(|p| !p.trim().is_empty()) {
            let path = PathBuf::from(path);
            tracing::debug!("Loading measure overrides from {}", path.display());
            config.overrides = MeasureOverrideTable::load(&path);
        }

        if let Some(upper) = parse_threshold(&lookup, ENV_RECONCILE_UPPER) {
            config.reconciliation.upper_ratio = upper;
        }
        if let Some(lower) = parse_threshold(&lookup, ENV_RECONCILE_LOWER) {
            config.reconciliation.lower_ratio = lower;
        }

        config
    }

    pub fn with_units(mut self, units: UnitTable) -> Self {
        self.units = units;
        self
    }

    pub fn with_overrides(mut self, overrides: MeasureOverrideTable) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_reconciliation(mut self, policy: ReconciliationPolicy) -> Self {
        self.reconciliation = policy;
        self
    }

    pub fn with_default_ratios(mut self, ratios: MacroRatios) -> Self {
        self.default_ratios = ratios;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn parse_threshold<F>(lookup: &F, key: &str) -> Option<f64>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Some(v),
        _ => {
            tracing::warn!("Ignoring invalid {}={:?}", key, raw);
            None
        }
    }
}
