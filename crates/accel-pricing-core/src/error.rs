//! Error types for accelerator pricing.

/// Result type for accelerator pricing operations.
pub type Result<T> = std::result::Result<T, PricingError>;

/// Errors that can occur while reading usage or resolving prices.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    /// A region identifier outside the supported set.
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// A two-letter billing code outside the supported set.
    #[error("unknown region code: {0}")]
    UnknownRegionCode(String),

    /// A usage key that is not of the form `from_<region>_to_<region>`.
    #[error("invalid usage key: {0}")]
    InvalidUsageKey(String),

    /// Usage quantities are volumes and cannot be negative.
    #[error("negative quantity for {key}: {quantity}")]
    NegativeQuantity {
        /// The usage key carrying the value.
        key: String,
        /// The rejected quantity.
        quantity: f64,
    },

    /// A usage quantity too large to hold as a decimal volume.
    #[error("quantity out of range for {key}: {quantity}")]
    QuantityOutOfRange {
        /// The usage key carrying the value.
        key: String,
        /// The rejected quantity.
        quantity: f64,
    },

    /// A component's monthly cost does not fit in a decimal.
    #[error("cost overflow for {component}")]
    CostOverflow {
        /// Component name.
        component: String,
    },

    /// The catalog has no price for a component's product filter.
    #[error("no price found for {filter}")]
    NoPriceFound {
        /// Rendered product filter.
        filter: String,
    },

    /// The catalog has more than one price for a component's product filter.
    #[error("multiple prices found for {filter}: {count} matches")]
    MultiplePricesFound {
        /// Rendered product filter.
        filter: String,
        /// Number of matching catalog entries.
        count: usize,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PricingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
