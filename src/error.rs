// src/error.rs

use thiserror::Error;

/// Errors raised while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// A value handed to a constructor breaks its contract (e.g. a shipment of 0 units).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The base-stock formula produced a negative order-up-to level.
    #[error("Negative base stock {value} computed for {node}")]
    NegativeBaseStock { node: String, value: f64 },

    /// The base-stock formula produced a non-finite level or one beyond `u32::MAX` units.
    #[error("Base stock {value} computed for {node} is not a representable unit count")]
    BaseStockOutOfRange { node: String, value: f64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
