//! Shared nutrition data structure
//!
//! Used for scaled food portions and running aggregation sums.

use serde::{Deserialize, Serialize};

/// Kilocalories per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Kilocalories per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Kilocalories per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

/// Calories implied by macro grams (4/4/9 kcal per gram)
pub fn macro_calories(protein: f64, carbs: f64, fats: f64) -> f64 {
    protein * KCAL_PER_G_PROTEIN + carbs * KCAL_PER_G_CARBS + fats * KCAL_PER_G_FAT
}

/// Round to one decimal place (half away from zero)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places (half away from zero)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Macro nutrient values
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fats: f64,    // grams
}

impl Nutrition {
    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fats: self.fats * multiplier,
        }
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fats: self.fats + other.fats,
        }
    }

    /// Calories implied by this value's macro grams
    pub fn macro_calories(&self) -> f64 {
        macro_calories(self.protein, self.carbs, self.fats)
    }

    /// Copy with every field rounded to one decimal
    pub fn rounded(&self) -> Self {
        Self {
            calories: round1(self.calories),
            protein: round1(self.protein),
            carbs: round1(self.carbs),
            fats: round1(self.fats),
        }
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}
