//! macrocalc Library
//!
//! Nutrition computation engine: unit resolution, nutrient scaling,
//! macro target derivation and aggregation of logged food entries.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod nutrition;

pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
