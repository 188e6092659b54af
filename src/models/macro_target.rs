//! Macro target types
//!
//! Inputs and outputs of macro target derivation.

use serde::{Deserialize, Serialize};

use super::nutrition::round1;

/// How explicit macro targets should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MacroMode {
    /// Targets come from calorie percentages only
    Percent,
    /// Explicit grams win, ratios fill the gaps
    #[default]
    Grams,
}

impl MacroMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MacroMode::Percent => "percent",
            MacroMode::Grams => "grams",
        }
    }

    /// Anything other than "percent" selects the grams path
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "percent" => MacroMode::Percent,
            _ => MacroMode::Grams,
        }
    }
}

/// Share of calories assigned to each macro
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroRatios {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Default for MacroRatios {
    fn default() -> Self {
        Self {
            protein: 0.25,
            carbs: 0.45,
            fats: 0.30,
        }
    }
}

/// Per-macro ratio overrides; None leaves a macro unspecified
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroRatioOverrides {
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

impl MacroRatioOverrides {
    pub fn all(protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            protein: Some(protein),
            carbs: Some(carbs),
            fats: Some(fats),
        }
    }
}

/// Per-request target specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTargetSpec {
    pub calorie_target: Option<f64>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fats_g: Option<f64>,
    #[serde(default)]
    pub ratio_overrides: MacroRatioOverrides,
    #[serde(default)]
    pub mode: MacroMode,
}

/// Derived targets in grams (calories passed through)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

/// What is left of each target after the consumed totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroRemaining {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
}

/// Aggregated, display-rounded totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    /// 4/4/9 cross-check computed from the rounded macro sums
    pub macro_calories: f64,
}

impl MacroTargets {
    /// Remaining amount per macro; negative once a target is exceeded
    pub fn remaining(&self, consumed: &MacroTotals) -> MacroRemaining {
        let left = |target: Option<f64>, used: f64| target.map(|t| round1(t - used));
        MacroRemaining {
            calories: left(self.calories, consumed.calories),
            protein: left(self.protein, consumed.protein),
            carbs: left(self.carbs, consumed.carbs),
            fats: left(self.fats, consumed.fats),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(MacroMode::from_str("percent"), MacroMode::Percent);
        assert_eq!(MacroMode::from_str(" PERCENT "), MacroMode::Percent);
        assert_eq!(MacroMode::from_str("grams"), MacroMode::Grams);
        assert_eq!(MacroMode::from_str(""), MacroMode::Grams);
    }

    #[test]
    fn test_remaining_skips_missing_targets() {
        let targets = MacroTargets {
            calories: Some(2000.0),
            protein: Some(125.0),
            carbs: None,
            fats: Some(66.7),
        };
        let consumed = MacroTotals {
            calories: 1500.5,
            protein: 130.0,
            carbs: 100.0,
            fats: 20.0,
            macro_calories: 1100.0,
        };

        let left = targets.remaining(&consumed);
        assert_eq!(left.calories, Some(499.5));
        assert_eq!(left.protein, Some(-5.0));
        assert_eq!(left.carbs, None);
        assert_eq!(left.fats, Some(46.7));
    }
}
