//! Cost components and their catalog product filters.
//!
//! A [`CostComponent`] is one priced line of an estimate: a quantity, a unit,
//! and the [`ProductFilter`] that selects its unit price from the AWS price
//! catalog. Attribute keys and values must match the catalog's schema
//! exactly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::PriceCatalog;
use crate::error::{PricingError, Result};
use crate::usage::DataTransferEntry;

/// Catalog vendor for every accelerator component.
pub const VENDOR_NAME: &str = "aws";

/// Catalog service code for Global Accelerator.
pub const SERVICE_NAME: &str = "AWSGlobalAccelerator";

/// Hours used to project hourly components onto a month.
pub const DEFAULT_HOURS_PER_MONTH: Decimal = dec!(730);

/// A single `key = value` condition on a catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    /// Catalog attribute name (e.g. `usagetype`).
    pub key: String,
    /// Required attribute value.
    pub value: String,
}

impl AttributeFilter {
    /// Create a new attribute filter.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Selects exactly one product in the price catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Vendor name (always `aws` here).
    pub vendor_name: String,
    /// Service code.
    pub service: String,
    /// Attribute conditions, all of which must match.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_filters: Vec<AttributeFilter>,
}

impl ProductFilter {
    /// A filter on the Global Accelerator service with no attribute
    /// conditions.
    #[must_use]
    pub fn global_accelerator() -> Self {
        Self {
            vendor_name: VENDOR_NAME.to_string(),
            service: SERVICE_NAME.to_string(),
            attribute_filters: Vec::new(),
        }
    }

    /// Add an attribute condition.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attribute_filters.push(AttributeFilter::new(key, value));
        self
    }

    /// Look up the required value of an attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attribute_filters
            .iter()
            .find(|filter| filter.key == key)
            .map(|filter| filter.value.as_str())
    }
}

impl fmt::Display for ProductFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor_name, self.service)?;
        if !self.attribute_filters.is_empty() {
            let attributes: Vec<String> = self
                .attribute_filters
                .iter()
                .map(|filter| format!("{}={}", filter.key, filter.value))
                .collect();
            write!(f, " [{}]", attributes.join(", "))?;
        }
        Ok(())
    }
}

/// One priced line of an accelerator estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    /// Display name.
    pub name: String,
    /// Billing unit (`hours`, `GB`).
    pub unit: String,
    /// Units the catalog price is quoted per.
    pub unit_multiplier: Decimal,
    /// Quantity billed per hour, for time-based components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_quantity: Option<Decimal>,
    /// Quantity billed per month, for usage-based components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_quantity: Option<Decimal>,
    /// Catalog lookup key.
    pub product_filter: ProductFilter,
    /// Price to use instead of a catalog lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_price: Option<Decimal>,
}

impl CostComponent {
    /// Build the premium data-transfer component for one decoded entry.
    ///
    /// The catalog lists a `-Bytes-Internet` and a `-Bytes-AWS` usage type
    /// per region pair at the same price; the filter pins `-Bytes-Internet`
    /// so the lookup matches a single product.
    #[must_use]
    pub fn data_transfer(resource_name: &str, entry: &DataTransferEntry) -> Self {
        let from = entry.origin.as_str();
        let to = entry.destination.as_str();
        let label = entry.direction.label();

        Self {
            name: format!(
                "AWS Global Accelerator {resource_name} DT-Premium Usage {label} from {from} to {to}"
            ),
            unit: "GB".to_string(),
            unit_multiplier: Decimal::ONE,
            hourly_quantity: None,
            monthly_quantity: Some(entry.quantity),
            product_filter: ProductFilter::global_accelerator()
                .with_attribute("trafficDirection", entry.direction.as_str())
                .with_attribute("fromLocation", from)
                .with_attribute("toLocation", to)
                .with_attribute("operation", "Dominant")
                .with_attribute("usagetype", format!("{from}-{to}-{label}-Bytes-Internet")),
            custom_price: None,
        }
    }

    /// Set a price that bypasses the catalog.
    #[must_use]
    pub fn with_custom_price(mut self, price: Decimal) -> Self {
        self.custom_price = Some(price);
        self
    }

    /// Resolve the unit price, from the custom price if set, otherwise from
    /// the catalog.
    ///
    /// A failed lookup is kept on the returned component rather than
    /// returned, so every component of an estimate reports its own outcome.
    #[must_use]
    pub fn resolve(&self, catalog: &dyn PriceCatalog) -> PricedComponent {
        let unit_price = match self.custom_price {
            Some(price) => Ok(price),
            None => catalog.find_price(&self.product_filter),
        };

        if let Err(ref e) = unit_price {
            tracing::warn!(component = %self.name, error = %e, "Price lookup failed");
        }

        PricedComponent {
            component: self.clone(),
            unit_price,
        }
    }
}

/// A cost component paired with the outcome of its price lookup.
#[derive(Debug)]
pub struct PricedComponent {
    /// The component that was priced.
    pub component: CostComponent,
    /// Unit price, or why none could be resolved.
    pub unit_price: Result<Decimal>,
}

impl PricedComponent {
    /// Monthly cost of this component alone.
    ///
    /// Hourly quantities are projected over `hours_per_month`. Returns
    /// `Ok(None)` when the price lookup failed or the component has no
    /// quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::CostOverflow`] when the cost exceeds the
    /// decimal range.
    pub fn monthly_cost(&self, hours_per_month: Decimal) -> Result<Option<Decimal>> {
        let Ok(price) = self.unit_price.as_ref() else {
            return Ok(None);
        };
        let component = &self.component;

        let cost = match (component.monthly_quantity, component.hourly_quantity) {
            (Some(monthly), _) => price.checked_mul(monthly),
            (None, Some(hourly)) => price
                .checked_mul(hourly)
                .and_then(|cost| cost.checked_mul(hours_per_month)),
            (None, None) => return Ok(None),
        };

        cost.map(Some).ok_or_else(|| PricingError::CostOverflow {
            component: component.name.clone(),
        })
    }
}
