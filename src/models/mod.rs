//! Data models
//!
//! Value types passed into and out of the nutrition engine.

mod food_profile;
mod logged_quantity;
mod macro_target;
mod nutrition;

pub use food_profile::{FoodProfile, FoodProfileCreate, MeasureDefinition, DEFAULT_SERVING_GRAMS};
pub use logged_quantity::{LoggedQuantity, MealSlot};
pub use macro_target::{
    MacroMode, MacroRatioOverrides, MacroRatios, MacroRemaining, MacroTargetSpec, MacroTargets,
    MacroTotals,
};
pub use nutrition::{
    macro_calories, round1, round2, Nutrition, KCAL_PER_G_CARBS, KCAL_PER_G_FAT,
    KCAL_PER_G_PROTEIN,
};
