//! The module contains the errors the engine can throw.
//!
//! Every variant is a validation failure raised at the boundary of the
//! offending calculator. None of them is transient: the caller (a UI form)
//! is expected to surface them as field-level messages, not retry.
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A preparation declared a yield of zero or fewer portions. Dividing by
    /// it would produce Infinity, so the calculation is refused instead.
    #[error("Invalid yield: {0}")]
    InvalidYield(String),
    /// Margin below -100% would price the dish negative.
    #[error("Invalid margin: {0}")]
    InvalidMargin(String),
    #[error("Invalid menu parameters: {0}")]
    InvalidMenuParameters(String),
    /// An enrollment row names a modality absent from the rate table. There
    /// is no default rate; pricing an unknown modality silently would hide a
    /// data error.
    #[error("\"{0}\" modality not found in the rate table!")]
    UnknownModality(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
