//! JSON report of an accelerator's cost components.

use rust_decimal::Decimal;
use serde::Serialize;

use accel_pricing_core::{
    AcceleratorResource, CostComponent, PriceCatalog, PricedComponent, ProductFilter,
    StaticPriceCatalog,
};

use crate::config::EstimatorConfig;

/// Cost components of one accelerator, as printed by `estimate`.
#[derive(Debug, Serialize)]
pub struct EstimateReport {
    /// Resource name.
    pub name: String,
    /// Currency of every price and cost.
    pub currency: String,
    /// Components, fixed fee first.
    pub cost_components: Vec<ComponentReport>,
}

/// One cost component with its price, when known.
#[derive(Debug, Serialize)]
pub struct ComponentReport {
    /// Display name.
    pub name: String,
    /// Billing unit.
    pub unit: String,
    /// Quantity billed per hour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_quantity: Option<Decimal>,
    /// Quantity billed per month.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_quantity: Option<Decimal>,
    /// Catalog lookup key.
    pub product_filter: ProductFilter,
    /// Resolved unit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
    /// Monthly cost of this component.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_cost: Option<Decimal>,
    /// Why the unit price could not be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_error: Option<String>,
}

impl EstimateReport {
    /// Build a report, resolving prices against `catalog` when one is given.
    ///
    /// Without a catalog only custom prices (the fixed fee) are filled in.
    #[must_use]
    pub fn build<C: PriceCatalog>(
        resource: &AcceleratorResource,
        catalog: Option<&C>,
        config: &EstimatorConfig,
    ) -> Self {
        let cost_components = resource
            .components()
            .map(|component| match catalog {
                Some(catalog) => {
                    ComponentReport::priced(&component.resolve(catalog), config.hours_per_month)
                }
                None if component.custom_price.is_some() => ComponentReport::priced(
                    &component.resolve(&StaticPriceCatalog::default()),
                    config.hours_per_month,
                ),
                None => ComponentReport::unpriced(component),
            })
            .collect();

        Self {
            name: resource.name.clone(),
            currency: config.currency.clone(),
            cost_components,
        }
    }
}

impl ComponentReport {
    fn unpriced(component: &CostComponent) -> Self {
        Self {
            name: component.name.clone(),
            unit: component.unit.clone(),
            hourly_quantity: component.hourly_quantity,
            monthly_quantity: component.monthly_quantity,
            product_filter: component.product_filter.clone(),
            unit_price: None,
            monthly_cost: None,
            price_error: None,
        }
    }

    fn priced(priced: &PricedComponent, hours_per_month: Decimal) -> Self {
        let (monthly_cost, cost_error) = match priced.monthly_cost(hours_per_month) {
            Ok(cost) => (cost, None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            unit_price: priced.unit_price.as_ref().ok().copied(),
            monthly_cost,
            price_error: priced
                .unit_price
                .as_ref()
                .err()
                .map(ToString::to_string)
                .or(cost_error),
            ..Self::unpriced(&priced.component)
        }
    }
}
