//! Logged quantity model
//!
//! One logged portion of a food: what the user typed (quantity + unit) and,
//! once resolved, its weight in grams.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::FoodProfile;

/// Meal slot a portion was logged under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Meal1,
    Meal2,
    Meal3,
    Snacks,
    #[default]
    Unspecified,
}

impl MealSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Meal1 => "meal1",
            MealSlot::Meal2 => "meal2",
            MealSlot::Meal3 => "meal3",
            MealSlot::Snacks => "snacks",
            MealSlot::Unspecified => "unspecified",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "meal1" => MealSlot::Meal1,
            "meal2" => MealSlot::Meal2,
            "meal3" => MealSlot::Meal3,
            "snacks" | "snack" => MealSlot::Snacks,
            _ => MealSlot::Unspecified,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            MealSlot::Meal1 => "Meal 1",
            MealSlot::Meal2 => "Meal 2",
            MealSlot::Meal3 => "Meal 3",
            MealSlot::Snacks => "Snacks",
            MealSlot::Unspecified => "Unspecified",
        }
    }
}

/// A food portion as logged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggedQuantity {
    /// None when the food could not be loaded; contributes zero
    pub food: Option<FoodProfile>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    /// Resolved weight; unresolved entries count as 0g
    pub grams: Option<f64>,
    pub volume_ml: Option<f64>,
    #[serde(default)]
    pub meal_slot: MealSlot,
    pub log_date: Option<NaiveDate>,
}

impl LoggedQuantity {
    /// An entry whose grams are already known
    pub fn with_grams(food: FoodProfile, grams: f64) -> Self {
        Self {
            food: Some(food),
            quantity: Some(grams),
            unit: Some("g".to_string()),
            grams: Some(grams),
            ..Default::default()
        }
    }

    pub fn in_slot(mut self, slot: MealSlot) -> Self {
        self.meal_slot = slot;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.log_date = Some(date);
        self
    }

    /// Resolved grams, zero when unresolved
    pub fn resolved_grams(&self) -> f64 {
        self.grams.unwrap_or(0.0)
    }
}
