//! Estimator configuration.

use std::path::PathBuf;

use accel_pricing_core::DEFAULT_HOURS_PER_MONTH;
use rust_decimal::Decimal;

/// Estimator configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Currency label written to reports (default: "USD").
    pub currency: String,

    /// Hours used to project hourly components onto a month (default: 730).
    pub hours_per_month: Decimal,

    /// Price list used when `--catalog` is not given.
    pub catalog_path: Option<PathBuf>,
}

impl EstimatorConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// Unset or unparsable values fall back to their defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let hours_per_month = match lookup("ACCEL_PRICING_HOURS_PER_MONTH") {
            Some(raw) => match raw.trim().parse::<Decimal>() {
                Ok(hours) if hours > Decimal::ZERO => hours,
                _ => {
                    tracing::warn!(value = %raw, "Ignoring invalid ACCEL_PRICING_HOURS_PER_MONTH");
                    defaults.hours_per_month
                }
            },
            None => defaults.hours_per_month,
        };

        Self {
            currency: lookup("ACCEL_PRICING_CURRENCY").unwrap_or(defaults.currency),
            hours_per_month,
            catalog_path: lookup("ACCEL_PRICING_CATALOG").map(PathBuf::from),
        }
    }

    /// Set the currency label.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the hours per month.
    #[must_use]
    pub fn with_hours_per_month(mut self, hours: Decimal) -> Self {
        self.hours_per_month = hours;
        self
    }

    /// Set the default price list.
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            currency: "USD".into(),
            hours_per_month: DEFAULT_HOURS_PER_MONTH,
            catalog_path: None,
        }
    }
}
