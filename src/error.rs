//! Engine error types

use thiserror::Error;

/// Hard failures raised by the nutrition engine
///
/// Everything else (unknown units, missing measures, incomplete nutrient data)
/// is resolved through fallbacks and never surfaces as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Quantity is required")]
    InvalidQuantity,
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
