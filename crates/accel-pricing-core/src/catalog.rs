//! Price catalog lookup.
//!
//! The estimate only builds [`ProductFilter`]s; turning one into a unit price
//! is the catalog's job. [`StaticPriceCatalog`] is an in-memory catalog loaded
//! from an exported price list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cost::ProductFilter;
use crate::error::{PricingError, Result};

/// Resolves a product filter to a unit price.
pub trait PriceCatalog {
    /// Find the single price matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::NoPriceFound`] when nothing matches and
    /// [`PricingError::MultiplePricesFound`] when the filter is ambiguous.
    fn find_price(&self, filter: &ProductFilter) -> Result<Decimal>;
}

/// One priced product from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Vendor name (e.g. `aws`).
    pub vendor_name: String,
    /// Service code (e.g. `AWSGlobalAccelerator`).
    pub service: String,
    /// Product attributes.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Unit price in USD.
    pub price: Decimal,
}

impl CatalogEntry {
    /// An entry carrying exactly the attributes a filter requires.
    #[must_use]
    pub fn for_filter(filter: &ProductFilter, price: Decimal) -> Self {
        Self {
            vendor_name: filter.vendor_name.clone(),
            service: filter.service.clone(),
            attributes: filter
                .attribute_filters
                .iter()
                .map(|f| (f.key.clone(), f.value.clone()))
                .collect(),
            price,
        }
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        self.vendor_name == filter.vendor_name
            && self.service == filter.service
            && filter
                .attribute_filters
                .iter()
                .all(|f| self.attributes.get(&f.key) == Some(&f.value))
    }
}

/// In-memory price catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticPriceCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticPriceCatalog {
    /// Create a catalog from a list of entries.
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Parse a catalog from a JSON array of entries.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Serialization`] if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PriceCatalog for StaticPriceCatalog {
    fn find_price(&self, filter: &ProductFilter) -> Result<Decimal> {
        let mut matches = self.entries.iter().filter(|entry| entry.matches(filter));

        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry.price),
            (None, _) => Err(PricingError::NoPriceFound {
                filter: filter.to_string(),
            }),
            (Some(_), Some(_)) => Err(PricingError::MultiplePricesFound {
                filter: filter.to_string(),
                count: 2 + matches.count(),
            }),
        }
    }
}
