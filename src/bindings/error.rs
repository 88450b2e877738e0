//! Binding error types

use thiserror::Error;

use crate::chart::UnknownChartKind;
use crate::layout::PropId;

/// Errors raised while computing a binding's outputs.
///
/// These never leave the dispatcher: each one becomes an error state on the
/// affected outputs.
#[derive(Error, Debug)]
pub enum BindingError {
    /// An input value has the wrong shape
    #[error("Invalid value for {prop}: {reason}")]
    InvalidValue { prop: PropId, reason: String },

    /// The chart-type input names no known chart
    #[error(transparent)]
    ChartKind(#[from] UnknownChartKind),

    /// Output could not be converted to JSON
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    /// The binding returned the wrong number of values
    #[error("Binding {name} returned {actual} values for {expected} outputs")]
    OutputArity {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type for binding computations
pub type BindingResult<T> = Result<T, BindingError>;

/// Binding declarations that do not fit the layout.
///
/// Detected once at startup; any of these is fatal.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Binding {binding} refers to unknown property {prop}")]
    UnknownProperty { binding: &'static str, prop: PropId },

    #[error("Output {prop} is claimed by both {first} and {second}")]
    DuplicateOutput {
        prop: PropId,
        first: &'static str,
        second: &'static str,
    },

    #[error("Binding {binding} is triggered by unknown interval {interval}")]
    UnknownInterval {
        binding: &'static str,
        interval: String,
    },

    #[error("Binding {0} has no triggers")]
    NoTriggers(&'static str),

    #[error("Chart-type dropdown offers {offered:?}, expected every chart kind exactly once")]
    ChartKindMismatch { offered: Vec<String> },
}
