//! Nutrient scaling
//!
//! Scales a food's per-serving macro profile to a gram quantity, replacing
//! calorie labels that disagree badly with the food's own macros.

use serde::{Deserialize, Serialize};

use crate::models::{macro_calories, FoodProfile, Nutrition};

/// When a stated calorie label is distrusted in favor of 4/4/9 arithmetic
///
/// The default 2x / 0.5x bounds are a data-quality heuristic, not a
/// physical constant; both are tunable through `EngineConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationPolicy {
    /// stated / macro ratios above this use macro calories
    pub upper_ratio: f64,
    /// stated / macro ratios below this use macro calories
    pub lower_ratio: f64,
}

impl Default for ReconciliationPolicy {
    fn default() -> Self {
        Self {
            upper_ratio: 2.0,
            lower_ratio: 0.5,
        }
    }
}

impl ReconciliationPolicy {
    /// Per-serving calorie basis for a stated label and its macro-derived value
    pub fn calorie_basis(&self, stated: f64, macro_calories: f64) -> f64 {
        if stated == 0.0 {
            return macro_calories;
        }
        if macro_calories > 0.0 {
            let ratio = stated / macro_calories;
            if ratio > self.upper_ratio || ratio < self.lower_ratio {
                tracing::debug!(
                    "Stated calories {} disagree with macros {} (ratio {:.2}); using macros",
                    stated,
                    macro_calories,
                    ratio
                );
                return macro_calories;
            }
        }
        stated
    }
}

/// Scale a food's nutrients to `grams`, reconciling its calorie label
///
/// Results are unrounded. A missing food scales to zero; negative grams are
/// not rejected and produce a negative result.
pub fn scale(food: Option<&FoodProfile>, grams: f64, policy: &ReconciliationPolicy) -> Nutrition {
    let Some(food) = food else {
        return Nutrition::zero();
    };

    let factor = grams / food.serving_basis();
    let base = food.per_serving();
    let derived = macro_calories(base.protein, base.carbs, base.fats);

    Nutrition {
        calories: policy.calorie_basis(base.calories, derived),
        ..base
    }
    .scale(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(calories: Option<f64>, protein: f64, carbs: f64, fats: f64) -> FoodProfile {
        FoodProfile {
            id: 1,
            name: "Test food".to_string(),
            calories,
            protein_g: Some(protein),
            carbs_g: Some(carbs),
            fats_g: Some(fats),
            serving_size: Some(100.0),
            ..Default::default()
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_chicken_breast_keeps_stated_calories() {
        let chicken = food(Some(165.0), 31.0, 0.0, 3.6);
        let scaled = scale(Some(&chicken), 150.0, &ReconciliationPolicy::default());

        assert!(close(scaled.calories, 247.5));
        assert!(close(scaled.protein, 46.5));
        assert!(close(scaled.carbs, 0.0));
        assert!(close(scaled.fats, 5.4));
    }

    #[test]
    fn test_corrupt_label_uses_macro_calories() {
        let corrupt = food(Some(800.0), 2.0, 2.0, 1.0);
        let scaled = scale(Some(&corrupt), 100.0, &ReconciliationPolicy::default());
        assert!(close(scaled.calories, 25.0));
    }

    #[test]
    fn test_low_label_uses_macro_calories() {
        // 40 / 100 = 0.4 < 0.5
        let low = food(Some(40.0), 10.0, 10.0, 20.0 / 9.0);
        let scaled = scale(Some(&low), 100.0, &ReconciliationPolicy::default());
        assert!(close(scaled.calories, 100.0));
    }

    #[test]
    fn test_missing_label_uses_macro_calories_exactly() {
        let unlabeled = food(None, 10.0, 20.0, 5.0);
        let grams = 37.0;
        let scaled = scale(Some(&unlabeled), grams, &ReconciliationPolicy::default());
        assert_eq!(scaled.calories, (10.0 * 4.0 + 20.0 * 4.0 + 5.0 * 9.0) * (grams / 100.0));

        let zero_label = food(Some(0.0), 10.0, 20.0, 5.0);
        let scaled = scale(Some(&zero_label), grams, &ReconciliationPolicy::default());
        assert!(close(scaled.calories, 165.0 * 0.37));
    }

    #[test]
    fn test_ratio_bounds_are_inclusive() {
        let policy = ReconciliationPolicy::default();
        assert_eq!(policy.calorie_basis(200.0, 100.0), 200.0);
        assert_eq!(policy.calorie_basis(50.0, 100.0), 50.0);
        assert_eq!(policy.calorie_basis(200.1, 100.0), 100.0);
        assert_eq!(policy.calorie_basis(49.9, 100.0), 100.0);
    }

    #[test]
    fn test_label_without_macros_is_kept() {
        let policy = ReconciliationPolicy::default();
        assert_eq!(policy.calorie_basis(120.0, 0.0), 120.0);

        let water = food(Some(0.0), 0.0, 0.0, 0.0);
        assert_eq!(scale(Some(&water), 500.0, &policy), Nutrition::zero());
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = ReconciliationPolicy { upper_ratio: 1.05, lower_ratio: 0.95 };
        let chicken = food(Some(165.0), 31.0, 0.0, 3.6);
        let scaled = scale(Some(&chicken), 100.0, &strict);
        assert!(close(scaled.calories, 156.4));
    }

    #[test]
    fn test_missing_food_is_zero() {
        let scaled = scale(None, 250.0, &ReconciliationPolicy::default());
        assert_eq!(scaled, Nutrition::zero());
    }

    #[test]
    fn test_serving_basis_scaling_and_negative_grams() {
        let mut bar = food(Some(200.0), 20.0, 20.0, 5.0);
        bar.serving_size = None;
        bar.grams_per_unit = Some(50.0);

        let scaled = scale(Some(&bar), 25.0, &ReconciliationPolicy::default());
        assert!(close(scaled.calories, 100.0));
        assert!(close(scaled.protein, 10.0));

        let negative = scale(Some(&bar), -50.0, &ReconciliationPolicy::default());
        assert!(close(negative.calories, -200.0));
        assert!(close(negative.fats, -5.0));
    }
}
