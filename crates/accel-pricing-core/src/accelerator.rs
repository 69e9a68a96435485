//! The Global Accelerator resource and its cost components.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::{debug, instrument};

use crate::cost::{CostComponent, ProductFilter};
use crate::direction::Direction;
use crate::schema::{UsageItem, UsageSchema, UsageValue};
use crate::usage::{RegionPair, UsageRecord};

/// Fixed accelerator fee in USD per hour.
///
/// The AWS pricing API does not list this fee, so it is set as a custom price.
pub const FIXED_HOURLY_FEE: Decimal = dec!(0.025);

/// Usage-file key for inbound volumes.
pub const INBOUND_USAGE_KEY: &str = "monthly_inbound_data_transfer_gb";

/// Usage-file key for outbound volumes.
pub const OUTBOUND_USAGE_KEY: &str = "monthly_outbound_data_transfer_gb";

const USAGE_SECTIONS: &[&str] = &[INBOUND_USAGE_KEY, OUTBOUND_USAGE_KEY];

/// IP address type of the accelerator's listeners.
///
/// Does not affect pricing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IpAddressType {
    /// IPv4 only.
    #[default]
    Ipv4,
    /// IPv4 and IPv6.
    DualStack,
}

/// Monthly usage of an accelerator, one record per direction.
///
/// Serialized under [`INBOUND_USAGE_KEY`] and [`OUTBOUND_USAGE_KEY`]; both
/// sections are optional and any other key is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceleratorUsage {
    /// Inbound volumes per region pair.
    pub inbound: Option<UsageRecord>,

    /// Outbound volumes per region pair.
    pub outbound: Option<UsageRecord>,
}

impl AcceleratorUsage {
    /// A usage document listing every key of the accelerator's usage schema
    /// at its default.
    #[must_use]
    pub fn template() -> Self {
        Self::from_schema(UsageSchema::global_accelerator())
    }

    /// A usage document holding the defaults of `schema`'s direction
    /// sections. Sections and keys the document cannot hold are ignored.
    #[must_use]
    pub fn from_schema(schema: &UsageSchema) -> Self {
        Self {
            inbound: schema.item(INBOUND_USAGE_KEY).map(section_defaults),
            outbound: schema.item(OUTBOUND_USAGE_KEY).map(section_defaults),
        }
    }

    /// The record reported for a direction.
    #[must_use]
    pub fn record(&self, direction: Direction) -> Option<&UsageRecord> {
        match direction {
            Direction::Inbound => self.inbound.as_ref(),
            Direction::Outbound => self.outbound.as_ref(),
        }
    }

    /// Total volume reported for a direction, zero when absent.
    #[must_use]
    pub fn total_gb(&self, direction: Direction) -> Decimal {
        self.record(direction)
            .map_or(Decimal::ZERO, UsageRecord::total_gb)
    }
}

fn section_defaults(section: &UsageItem) -> UsageRecord {
    let mut record = UsageRecord::default();
    for item in section.items() {
        if let (UsageValue::Float64(default), Ok(pair)) =
            (&item.default_value, RegionPair::from_usage_key(&item.key))
        {
            record.set(pair, Some(*default));
        }
    }
    record
}

impl Serialize for AcceleratorUsage {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let sections = [
            (INBOUND_USAGE_KEY, &self.inbound),
            (OUTBOUND_USAGE_KEY, &self.outbound),
        ];
        let present = sections.iter().filter(|(_, record)| record.is_some()).count();

        let mut map = serializer.serialize_map(Some(present))?;
        for (key, record) in sections {
            if let Some(record) = record {
                map.serialize_entry(key, record)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AcceleratorUsage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(AcceleratorUsageVisitor)
    }
}

struct AcceleratorUsageVisitor;

impl<'de> Visitor<'de> for AcceleratorUsageVisitor {
    type Value = AcceleratorUsage;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of usage sections")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<AcceleratorUsage, A::Error> {
        let mut usage = AcceleratorUsage::default();
        let mut seen = [false; 2];

        while let Some(key) = access.next_key::<String>()? {
            let (index, section) = match key.as_str() {
                INBOUND_USAGE_KEY => (0, &mut usage.inbound),
                OUTBOUND_USAGE_KEY => (1, &mut usage.outbound),
                _ => return Err(de::Error::unknown_field(&key, USAGE_SECTIONS)),
            };
            if std::mem::replace(&mut seen[index], true) {
                return Err(de::Error::custom(format!("duplicate usage section: {key}")));
            }
            *section = access.next_value()?;
        }

        Ok(usage)
    }
}

/// An AWS Global Accelerator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAccelerator {
    /// Resource name.
    pub name: String,

    /// Listener IP address type.
    #[serde(default)]
    pub ip_address_type: IpAddressType,

    /// Whether the accelerator is enabled. Disabled accelerators cost nothing.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Monthly usage.
    #[serde(default)]
    pub usage: AcceleratorUsage,
}

fn default_enabled() -> bool {
    true
}

impl GlobalAccelerator {
    /// Create an enabled accelerator with no usage.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ip_address_type: IpAddressType::default(),
            enabled: true,
            usage: AcceleratorUsage::default(),
        }
    }

    /// Set whether the accelerator is enabled.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the listener IP address type.
    #[must_use]
    pub fn with_ip_address_type(mut self, ip_address_type: IpAddressType) -> Self {
        self.ip_address_type = ip_address_type;
        self
    }

    /// Set the whole usage document.
    #[must_use]
    pub fn with_usage(mut self, usage: AcceleratorUsage) -> Self {
        self.usage = usage;
        self
    }

    /// Set the inbound usage record.
    #[must_use]
    pub fn with_inbound(mut self, record: UsageRecord) -> Self {
        self.usage.inbound = Some(record);
        self
    }

    /// Set the outbound usage record.
    #[must_use]
    pub fn with_outbound(mut self, record: UsageRecord) -> Self {
        self.usage.outbound = Some(record);
        self
    }

    /// The keys an accelerator's usage document may carry.
    #[must_use]
    pub fn usage_schema() -> &'static UsageSchema {
        UsageSchema::global_accelerator()
    }

    /// Build the accelerator's cost components.
    ///
    /// Enabled accelerators always carry the fixed hourly fee. Data transfer
    /// is billed only for the dominant direction, one component per region
    /// pair with a positive volume, in region-pair table order.
    #[must_use]
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn price(&self) -> AcceleratorResource {
        if !self.enabled {
            debug!("Accelerator disabled, no cost components");
            return AcceleratorResource::empty(&self.name);
        }

        let inbound_total = self.usage.total_gb(Direction::Inbound);
        let outbound_total = self.usage.total_gb(Direction::Outbound);

        let mut data_transfer = Vec::new();
        if inbound_total > Decimal::ZERO || outbound_total > Decimal::ZERO {
            let direction = Direction::select(inbound_total, outbound_total);
            debug!(
                inbound_gb = %inbound_total,
                outbound_gb = %outbound_total,
                direction = %direction,
                "Selected dominant direction"
            );

            if let Some(record) = self.usage.record(direction) {
                data_transfer = record
                    .entries(direction)
                    .filter(|entry| {
                        let billable = entry.quantity > Decimal::ZERO;
                        if !billable {
                            debug!(
                                from = %entry.origin,
                                to = %entry.destination,
                                quantity = %entry.quantity,
                                "Skipping non-positive volume"
                            );
                        }
                        billable
                    })
                    .map(|entry| CostComponent::data_transfer(&self.name, &entry))
                    .collect();
            }
        }

        AcceleratorResource {
            name: self.name.clone(),
            fixed_fee: Some(self.fixed_fee_component()),
            data_transfer,
        }
    }

    fn fixed_fee_component(&self) -> CostComponent {
        CostComponent {
            name: format!("AWS Global Accelerator {} Fixed Fee", self.name),
            unit: "hours".to_string(),
            unit_multiplier: Decimal::ONE,
            hourly_quantity: Some(Decimal::ONE),
            monthly_quantity: None,
            product_filter: ProductFilter::global_accelerator(),
            custom_price: None,
        }
        .with_custom_price(FIXED_HOURLY_FEE)
    }
}

/// Cost components of one accelerator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceleratorResource {
    /// Resource name.
    pub name: String,

    /// Fixed hourly fee, absent for disabled accelerators.
    pub fixed_fee: Option<CostComponent>,

    /// Dominant-direction data transfer, one component per region pair.
    pub data_transfer: Vec<CostComponent>,
}

impl AcceleratorResource {
    /// A resource with no cost components.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixed_fee: None,
            data_transfer: Vec::new(),
        }
    }

    /// Every component, fixed fee first.
    pub fn components(&self) -> impl Iterator<Item = &CostComponent> {
        self.fixed_fee.iter().chain(self.data_transfer.iter())
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.fixed_fee.is_some()) + self.data_transfer.len()
    }

    /// Check whether the resource has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::AttributeFilter;
    use crate::region::Region;
    use crate::usage::REGION_PAIRS;

    fn pair(origin: Region, destination: Region) -> RegionPair {
        RegionPair::new(origin, destination)
    }

    #[test]
    fn fixed_fee_only_without_usage() {
        let resource = GlobalAccelerator::new("edge").price();

        assert_eq!(resource.len(), 1);
        let fee = resource.fixed_fee.as_ref().unwrap();
        assert_eq!(fee.name, "AWS Global Accelerator edge Fixed Fee");
        assert_eq!(fee.unit, "hours");
        assert_eq!(fee.hourly_quantity, Some(Decimal::ONE));
        assert_eq!(fee.custom_price, Some(dec!(0.025)));
        assert_eq!(fee.product_filter.service, "AWSGlobalAccelerator");
        assert!(resource.data_transfer.is_empty());
    }

    #[test]
    fn zero_usage_template_yields_fixed_fee_only() {
        let resource = GlobalAccelerator::new("edge")
            .with_usage(AcceleratorUsage::template())
            .price();
        assert_eq!(resource.len(), 1);
        assert!(resource.fixed_fee.is_some());
    }

    #[test]
    fn disabled_accelerator_is_empty() {
        let busy = UsageRecord::default().with(pair(Region::Europe, Region::India), dec!(500));
        let resource = GlobalAccelerator::new("edge")
            .with_enabled(false)
            .with_inbound(busy.clone())
            .with_outbound(busy)
            .price();

        assert!(resource.is_empty());
        assert_eq!(resource.components().count(), 0);
    }

    #[test]
    fn single_inbound_pair() {
        let inbound = UsageRecord::default().with(pair(Region::Europe, Region::India), dec!(12.5));
        let resource = GlobalAccelerator::new("edge").with_inbound(inbound).price();

        assert_eq!(resource.len(), 2);
        let component = &resource.data_transfer[0];
        assert_eq!(
            component.name,
            "AWS Global Accelerator edge DT-Premium Usage INBOUND from EU to IN"
        );
        assert_eq!(component.monthly_quantity, Some(dec!(12.5)));
        assert_eq!(component.unit, "GB");
        assert_eq!(
            component.product_filter.attribute_filters,
            vec![
                AttributeFilter::new("trafficDirection", "Inbound"),
                AttributeFilter::new("fromLocation", "EU"),
                AttributeFilter::new("toLocation", "IN"),
                AttributeFilter::new("operation", "Dominant"),
                AttributeFilter::new("usagetype", "EU-IN-INBOUND-Bytes-Internet"),
            ]
        );
    }

    #[test]
    fn only_dominant_direction_is_billed() {
        // 5 GB inbound in a single large pair vs 7 GB outbound spread over two.
        let inbound = UsageRecord::default().with(pair(Region::Europe, Region::India), dec!(5));
        let outbound = UsageRecord::default()
            .with(pair(Region::NorthAmerica, Region::Europe), dec!(3))
            .with(pair(Region::AsiaPacific, Region::Australia), dec!(4));

        let resource = GlobalAccelerator::new("edge")
            .with_inbound(inbound)
            .with_outbound(outbound)
            .price();

        let names: Vec<_> = resource.data_transfer.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "AWS Global Accelerator edge DT-Premium Usage OUTBOUND from AP to AU",
                "AWS Global Accelerator edge DT-Premium Usage OUTBOUND from NA to EU",
            ]
        );
    }

    #[test]
    fn tie_bills_inbound() {
        let inbound = UsageRecord::default().with(pair(Region::India, Region::Europe), dec!(10));
        let outbound = UsageRecord::default().with(pair(Region::Europe, Region::India), dec!(10));

        let resource = GlobalAccelerator::new("edge")
            .with_inbound(inbound)
            .with_outbound(outbound)
            .price();

        assert_eq!(resource.data_transfer.len(), 1);
        assert_eq!(
            resource.data_transfer[0].product_filter.attribute("trafficDirection"),
            Some("Inbound")
        );
    }

    #[test]
    fn decimal_tie_bills_inbound() {
        let usage: AcceleratorUsage = serde_json::from_str(
            r#"{
                "monthly_inbound_data_transfer_gb": {"from_europe_to_india": 0.3},
                "monthly_outbound_data_transfer_gb": {
                    "from_india_to_europe": 0.1,
                    "from_india_to_india": 0.2
                }
            }"#,
        )
        .unwrap();

        let resource = GlobalAccelerator::new("edge").with_usage(usage).price();
        let names: Vec<_> = resource.data_transfer.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["AWS Global Accelerator edge DT-Premium Usage INBOUND from EU to IN"]
        );
    }

    #[test]
    fn negative_volumes_count_toward_totals_but_are_not_billed() {
        // Inbound totals 5 - 4 = 1 GB, so 3 GB outbound dominates.
        let inbound = UsageRecord::default()
            .with(pair(Region::Europe, Region::India), dec!(5))
            .with(pair(Region::India, Region::Europe), dec!(-4));
        let outbound = UsageRecord::default().with(pair(Region::AsiaPacific, Region::Australia), dec!(3));
        let resource = GlobalAccelerator::new("edge")
            .with_inbound(inbound.clone())
            .with_outbound(outbound)
            .price();

        assert_eq!(resource.data_transfer.len(), 1);
        assert!(resource.data_transfer[0].name.ends_with("OUTBOUND from AP to AU"));

        // Alone, the inbound record is billed for its positive pair only.
        let resource = GlobalAccelerator::new("edge").with_inbound(inbound).price();
        assert_eq!(resource.data_transfer.len(), 1);
        assert!(resource.data_transfer[0].name.ends_with("INBOUND from EU to IN"));
    }

    #[test]
    fn absent_inbound_record_counts_as_zero() {
        let outbound = UsageRecord::default().with(pair(Region::SouthAfrica, Region::India), dec!(1));
        let resource = GlobalAccelerator::new("edge").with_outbound(outbound).price();

        assert_eq!(resource.data_transfer.len(), 1);
        assert_eq!(
            resource.data_transfer[0].product_filter.attribute("usagetype"),
            Some("ZA-IN-OUTBOUND-Bytes-Internet")
        );
    }

    #[test]
    fn explicit_zero_pairs_are_not_billed() {
        let inbound = UsageRecord::with_defaults().with(pair(Region::SouthKorea, Region::MiddleEast), dec!(2));
        let resource = GlobalAccelerator::new("edge").with_inbound(inbound).price();

        assert_eq!(resource.data_transfer.len(), 1);
        assert!(resource.data_transfer[0].name.ends_with("from KR to ME"));
    }

    #[test]
    fn every_pair_follows_table_order() {
        let mut inbound = UsageRecord::default();
        for pair in REGION_PAIRS {
            inbound.set(pair, Some(Decimal::ONE));
        }
        let resource = GlobalAccelerator::new("edge").with_inbound(inbound).price();

        assert_eq!(resource.data_transfer.len(), 81);
        for (component, pair) in resource.data_transfer.iter().zip(REGION_PAIRS.iter()) {
            assert_eq!(
                component.product_filter.attribute("fromLocation"),
                Some(pair.origin.code().as_str())
            );
            assert_eq!(
                component.product_filter.attribute("toLocation"),
                Some(pair.destination.code().as_str())
            );
        }
    }

    #[test]
    fn pricing_is_repeatable() {
        let accelerator = GlobalAccelerator::new("edge")
            .with_inbound(UsageRecord::default().with(pair(Region::Europe, Region::India), dec!(12.5)));
        assert_eq!(accelerator.price(), accelerator.price());
    }

    #[test]
    fn usage_document_round_trip() {
        let json = r#"{
            "monthly_inbound_data_transfer_gb": {
                "from_europe_to_india": 12.5,
                "from_south_korea_to_middle_east": 0
            }
        }"#;
        let usage: AcceleratorUsage = serde_json::from_str(json).unwrap();
        assert!(usage.outbound.is_none());
        assert_eq!(usage.total_gb(Direction::Inbound), dec!(12.5));
        assert_eq!(usage.total_gb(Direction::Outbound), Decimal::ZERO);

        let value = serde_json::to_value(&usage).unwrap();
        let inbound = value[INBOUND_USAGE_KEY].as_object().unwrap();
        assert_eq!(inbound.len(), 2);
        assert!(value.get(OUTBOUND_USAGE_KEY).is_none());
    }

    #[test]
    fn usage_document_rejects_unknown_sections() {
        let err = serde_json::from_str::<AcceleratorUsage>(r#"{"monthly_sideways_gb": {}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn usage_document_rejects_duplicate_sections() {
        let err = serde_json::from_str::<AcceleratorUsage>(
            r#"{"monthly_inbound_data_transfer_gb": {}, "monthly_inbound_data_transfer_gb": {}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate usage section"));
    }

    #[test]
    fn template_lists_every_key() {
        let value = serde_json::to_value(AcceleratorUsage::template()).unwrap();
        for key in [INBOUND_USAGE_KEY, OUTBOUND_USAGE_KEY] {
            let section = value[key].as_object().unwrap();
            assert_eq!(section.len(), 81);
            assert!(section.values().all(|v| v == 0.0));
        }
    }

    #[test]
    fn template_follows_usage_schema() {
        let schema = GlobalAccelerator::usage_schema();
        let value = serde_json::to_value(AcceleratorUsage::template()).unwrap();
        let sections = value.as_object().unwrap();

        assert_eq!(sections.len(), schema.items().len());
        for section in schema.items() {
            let rendered = sections[&section.key].as_object().unwrap();
            let keys: Vec<_> = section.items().iter().map(|item| item.key.as_str()).collect();
            assert_eq!(rendered.len(), keys.len());
            for key in keys {
                assert_eq!(rendered[key], 0.0);
            }
        }
    }

    #[test]
    fn partial_schema_yields_partial_template() {
        let schema = UsageSchema::new(vec![UsageItem::sub_resource(
            OUTBOUND_USAGE_KEY,
            vec![
                UsageItem::float("from_europe_to_india", dec!(2)),
                UsageItem::float("not_a_pair", Decimal::ONE),
            ],
        )]);
        let usage = AcceleratorUsage::from_schema(&schema);

        assert!(usage.inbound.is_none());
        let outbound = usage.outbound.unwrap();
        assert_eq!(outbound.iter().count(), 1);
        assert_eq!(outbound.get(pair(Region::Europe, Region::India)), Some(dec!(2)));
    }

    #[test]
    fn accelerator_deserializes_with_defaults() {
        let accelerator: GlobalAccelerator = serde_json::from_str(r#"{"name": "edge"}"#).unwrap();
        assert!(accelerator.enabled);
        assert_eq!(accelerator.ip_address_type, IpAddressType::Ipv4);

        let dual: GlobalAccelerator =
            serde_json::from_str(r#"{"name": "edge", "ip_address_type": "DUAL_STACK"}"#).unwrap();
        assert_eq!(dual.ip_address_type, IpAddressType::DualStack);
    }
}
