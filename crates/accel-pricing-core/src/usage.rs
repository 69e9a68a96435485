//! Per-direction data-transfer usage.
//!
//! A [`UsageRecord`] holds one optional monthly volume for each of the 81
//! ordered region pairs. Pairs are enumerated through the static
//! [`REGION_PAIRS`] table; the record stores its values in table order so the
//! table index is the accessor for every slot.
//!
//! Usage files key each value as `from_<origin>_to_<destination>`. Keys are
//! only parsed at the serialization boundary, anchored against the closed
//! region set so multi-word identifiers such as `south_korea` are never split.
//!
//! Volumes are held as [`Decimal`]. Usage files carry plain JSON numbers,
//! converted once when the file is read; values a `Decimal` cannot represent
//! are rejected there.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::direction::Direction;
use crate::error::{PricingError, Result};
use crate::region::{Region, RegionCode, REGION_COUNT};

/// Number of ordered region pairs.
pub const PAIR_COUNT: usize = REGION_COUNT * REGION_COUNT;

/// Every ordered region pair, origin-major in [`Region::ALL`] order.
pub static REGION_PAIRS: [RegionPair; PAIR_COUNT] = build_pair_table();

const fn build_pair_table() -> [RegionPair; PAIR_COUNT] {
    let mut table = [RegionPair::new(Region::AsiaPacific, Region::AsiaPacific); PAIR_COUNT];
    let mut i = 0;
    while i < PAIR_COUNT {
        table[i] = RegionPair::new(Region::ALL[i / REGION_COUNT], Region::ALL[i % REGION_COUNT]);
        i += 1;
    }
    table
}

/// An ordered (origin, destination) region pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionPair {
    /// Region the traffic originates from.
    pub origin: Region,
    /// Region the traffic is delivered to.
    pub destination: Region,
}

impl RegionPair {
    /// Create a new region pair.
    #[must_use]
    pub const fn new(origin: Region, destination: Region) -> Self {
        Self {
            origin,
            destination,
        }
    }

    /// Position of the pair in [`REGION_PAIRS`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.origin.index() * REGION_COUNT + self.destination.index()
    }

    /// The usage-file key for this pair, e.g. `from_europe_to_india`.
    #[must_use]
    pub fn usage_key(self) -> String {
        format!(
            "from_{}_to_{}",
            self.origin.identifier(),
            self.destination.identifier()
        )
    }

    /// Parse a `from_<origin>_to_<destination>` usage key.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidUsageKey`] unless the key is exactly
    /// `from_`, a known region, `_to_`, and a known region.
    pub fn from_usage_key(key: &str) -> Result<Self> {
        let invalid = || PricingError::InvalidUsageKey(key.to_string());
        let rest = key.strip_prefix("from_").ok_or_else(invalid)?;

        Region::ALL
            .into_iter()
            .find_map(|origin| {
                let tail = rest
                    .strip_prefix(origin.identifier())?
                    .strip_prefix("_to_")?;
                Region::from_identifier(tail)
                    .ok()
                    .map(|destination| Self::new(origin, destination))
            })
            .ok_or_else(invalid)
    }
}

impl fmt::Display for RegionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "from_{}_to_{}", self.origin, self.destination)
    }
}

/// One decoded usage value: a directional volume between two regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataTransferEntry {
    /// Billing code of the origin region.
    pub origin: RegionCode,
    /// Billing code of the destination region.
    pub destination: RegionCode,
    /// Direction the volume was reported for.
    pub direction: Direction,
    /// Monthly volume in GB, exactly as reported.
    pub quantity: Decimal,
}

/// Monthly data-transfer volumes in GB for one direction.
///
/// Every pair is independently optional. An absent pair and an explicit zero
/// both contribute nothing, but only present pairs are written back out.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageRecord {
    slots: [Option<Decimal>; PAIR_COUNT],
}

impl Default for UsageRecord {
    fn default() -> Self {
        Self {
            slots: [None; PAIR_COUNT],
        }
    }
}

impl UsageRecord {
    /// A record with every pair explicitly set to zero, as written to usage
    /// templates.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            slots: [Some(Decimal::ZERO); PAIR_COUNT],
        }
    }

    /// Set a pair's volume.
    #[must_use]
    pub fn with(mut self, pair: RegionPair, quantity_gb: Decimal) -> Self {
        self.set(pair, Some(quantity_gb));
        self
    }

    /// Set or clear a pair's volume.
    pub fn set(&mut self, pair: RegionPair, quantity_gb: Option<Decimal>) {
        self.slots[pair.index()] = quantity_gb;
    }

    /// Get a pair's volume, if one was reported.
    #[must_use]
    pub fn get(&self, pair: RegionPair) -> Option<Decimal> {
        self.slots[pair.index()]
    }

    /// Check whether no pair has a reported volume.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterate the pairs that carry a value, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (RegionPair, Decimal)> + '_ {
        REGION_PAIRS
            .iter()
            .zip(self.slots.iter())
            .filter_map(|(pair, slot)| slot.map(|quantity| (*pair, quantity)))
    }

    /// Decode every pair with a value into a [`DataTransferEntry`].
    ///
    /// Values are passed through verbatim; zero and negative volumes are not
    /// filtered here.
    pub fn entries(&self, direction: Direction) -> impl Iterator<Item = DataTransferEntry> + '_ {
        self.iter().map(move |(pair, quantity)| DataTransferEntry {
            origin: pair.origin.code(),
            destination: pair.destination.code(),
            direction,
            quantity,
        })
    }

    /// Sum of every reported volume in GB.
    ///
    /// Saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn total_gb(&self) -> Decimal {
        self.slots
            .iter()
            .flatten()
            .fold(Decimal::ZERO, |total, quantity| total.saturating_add(*quantity))
    }
}

impl Serialize for UsageRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let present = self.slots.iter().filter(|slot| slot.is_some()).count();
        let mut map = serializer.serialize_map(Some(present))?;
        for (pair, quantity) in self.iter() {
            map.serialize_entry(&pair.usage_key(), &quantity.to_f64())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for UsageRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(UsageRecordVisitor)
    }
}

struct UsageRecordVisitor;

impl<'de> Visitor<'de> for UsageRecordVisitor {
    type Value = UsageRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of from_<region>_to_<region> keys to volumes in GB")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<UsageRecord, A::Error> {
        let mut record = UsageRecord::default();
        let mut seen = [false; PAIR_COUNT];

        while let Some(key) = access.next_key::<String>()? {
            let pair = RegionPair::from_usage_key(&key).map_err(de::Error::custom)?;
            if std::mem::replace(&mut seen[pair.index()], true) {
                return Err(de::Error::custom(format!("duplicate usage key: {key}")));
            }

            let quantity = match access.next_value::<Option<f64>>()? {
                Some(value) => Some(parse_quantity(&key, value).map_err(de::Error::custom)?),
                None => None,
            };
            record.set(pair, quantity);
        }

        Ok(record)
    }
}

fn parse_quantity(key: &str, value: f64) -> Result<Decimal> {
    if value < 0.0 {
        return Err(PricingError::NegativeQuantity {
            key: key.to_string(),
            quantity: value,
        });
    }
    Decimal::from_f64(value).ok_or_else(|| PricingError::QuantityOutOfRange {
        key: key.to_string(),
        quantity: value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn table_is_origin_major() {
        assert_eq!(REGION_PAIRS.len(), 81);
        assert_eq!(
            REGION_PAIRS[0],
            RegionPair::new(Region::AsiaPacific, Region::AsiaPacific)
        );
        assert_eq!(
            REGION_PAIRS[1],
            RegionPair::new(Region::AsiaPacific, Region::Australia)
        );
        assert_eq!(
            REGION_PAIRS[80],
            RegionPair::new(Region::SouthAfrica, Region::SouthAfrica)
        );
        for (i, pair) in REGION_PAIRS.iter().enumerate() {
            assert_eq!(pair.index(), i);
        }
    }

    #[test]
    fn usage_key_round_trip() {
        for pair in REGION_PAIRS {
            assert_eq!(RegionPair::from_usage_key(&pair.usage_key()).unwrap(), pair);
        }
    }

    #[test]
    fn multi_word_regions_split_on_known_identifiers() {
        let pair = RegionPair::from_usage_key("from_south_korea_to_middle_east").unwrap();
        assert_eq!(pair, RegionPair::new(Region::SouthKorea, Region::MiddleEast));

        let pair = RegionPair::from_usage_key("from_south_africa_to_south_america").unwrap();
        assert_eq!(
            pair,
            RegionPair::new(Region::SouthAfrica, Region::SouthAmerica)
        );
    }

    #[test]
    fn malformed_keys_rejected() {
        for key in [
            "",
            "europe_to_india",
            "from_europe_india",
            "from_europe_to_",
            "from_europe_to_india_extra",
            "from_south_to_korea",
            "from_mars_to_india",
            "to_india_from_europe",
        ] {
            assert!(
                matches!(
                    RegionPair::from_usage_key(key),
                    Err(PricingError::InvalidUsageKey(_))
                ),
                "{key} should be rejected"
            );
        }
    }

    #[test]
    fn entries_carry_codes_and_raw_quantities() {
        let record = UsageRecord::default()
            .with(RegionPair::new(Region::NorthAmerica, Region::Europe), Decimal::ZERO)
            .with(RegionPair::new(Region::Europe, Region::India), dec!(12.5));

        let entries: Vec<_> = record.entries(Direction::Outbound).collect();
        assert_eq!(entries.len(), 2);

        // Table order: Europe (2) before North America (6).
        assert_eq!(entries[0].origin.as_str(), "EU");
        assert_eq!(entries[0].destination.as_str(), "IN");
        assert_eq!(entries[0].quantity, dec!(12.5));
        assert_eq!(entries[0].direction, Direction::Outbound);
        assert_eq!(entries[1].origin.as_str(), "NA");
        assert_eq!(entries[1].quantity, Decimal::ZERO);
    }

    #[test]
    fn total_sums_present_values() {
        let record = UsageRecord::default()
            .with(RegionPair::new(Region::India, Region::India), dec!(2.5))
            .with(RegionPair::new(Region::Australia, Region::SouthAfrica), dec!(7.5));
        assert_eq!(record.total_gb(), dec!(10));
        assert_eq!(UsageRecord::default().total_gb(), Decimal::ZERO);
        assert_eq!(UsageRecord::with_defaults().total_gb(), Decimal::ZERO);
    }

    #[test]
    fn total_is_exact_for_decimal_fractions() {
        let record: UsageRecord = serde_json::from_str(
            r#"{"from_india_to_europe": 0.1, "from_india_to_india": 0.2}"#,
        )
        .unwrap();
        assert_eq!(record.total_gb(), dec!(0.3));
    }

    #[test]
    fn total_saturates_instead_of_overflowing() {
        let record = UsageRecord::default()
            .with(RegionPair::new(Region::Europe, Region::India), Decimal::MAX)
            .with(RegionPair::new(Region::India, Region::Europe), Decimal::MAX);
        assert_eq!(record.total_gb(), Decimal::MAX);
    }

    #[test]
    fn set_and_clear() {
        let pair = RegionPair::new(Region::Europe, Region::Europe);
        let mut record = UsageRecord::default();
        assert!(record.is_empty());

        record.set(pair, Some(dec!(3)));
        assert_eq!(record.get(pair), Some(dec!(3)));
        assert!(!record.is_empty());

        record.set(pair, None);
        assert_eq!(record.get(pair), None);
        assert!(record.is_empty());
    }

    #[test]
    fn serialization_keeps_only_present_keys() {
        let record = UsageRecord::default()
            .with(RegionPair::new(Region::Europe, Region::India), Decimal::ZERO)
            .with(RegionPair::new(Region::AsiaPacific, Region::Europe), dec!(4));

        let value = serde_json::to_value(&record).unwrap();
        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["from_europe_to_india"], 0.0);
        assert_eq!(map["from_asia_pacific_to_europe"], 4.0);

        let back: UsageRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn deserialize_null_is_absent() {
        let record: UsageRecord =
            serde_json::from_str(r#"{"from_europe_to_india": null, "from_india_to_europe": 1}"#)
                .unwrap();
        let europe_india = RegionPair::new(Region::Europe, Region::India);
        let india_europe = RegionPair::new(Region::India, Region::Europe);
        assert_eq!(record.get(europe_india), None);
        assert_eq!(record.get(india_europe), Some(Decimal::ONE));
    }

    #[test]
    fn deserialize_rejects_bad_input() {
        let unknown = serde_json::from_str::<UsageRecord>(r#"{"from_mars_to_india": 1}"#);
        assert!(unknown.unwrap_err().to_string().contains("invalid usage key"));

        let negative = serde_json::from_str::<UsageRecord>(r#"{"from_europe_to_india": -3}"#);
        assert!(negative.unwrap_err().to_string().contains("negative quantity"));

        let duplicate = serde_json::from_str::<UsageRecord>(
            r#"{"from_europe_to_india": 1, "from_europe_to_india": 2}"#,
        );
        assert!(duplicate.unwrap_err().to_string().contains("duplicate usage key"));
    }

    #[test]
    fn deserialize_rejects_volumes_beyond_decimal_range() {
        let err = serde_json::from_str::<UsageRecord>(r#"{"from_europe_to_india": 1e30}"#)
            .unwrap_err();
        assert!(err.to_string().contains("quantity out of range"));

        let largest: UsageRecord =
            serde_json::from_str(r#"{"from_europe_to_india": 5e28}"#).unwrap();
        assert!(largest
            .get(RegionPair::new(Region::Europe, Region::India))
            .is_some());
    }
}
