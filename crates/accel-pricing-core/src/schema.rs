//! Usage schema: the keys a usage document may carry and their defaults.

use rust_decimal::Decimal;
use std::sync::OnceLock;

use crate::accelerator::{INBOUND_USAGE_KEY, OUTBOUND_USAGE_KEY};
use crate::usage::REGION_PAIRS;

static GLOBAL_ACCELERATOR_SCHEMA: OnceLock<UsageSchema> = OnceLock::new();

/// Kind of value a usage item holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageValueType {
    /// A number.
    Float64,
    /// A nested map of usage items.
    SubResourceUsage,
}

/// Default value of a usage item.
#[derive(Debug, Clone, PartialEq)]
pub enum UsageValue {
    /// A number.
    Float64(Decimal),
    /// Nested items, each with its own default.
    SubResourceUsage(Vec<UsageItem>),
}

/// One key of a usage document.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageItem {
    /// Key in the usage document.
    pub key: String,
    /// Value used when the document omits the key.
    pub default_value: UsageValue,
}

impl UsageItem {
    /// A numeric item.
    #[must_use]
    pub fn float(key: impl Into<String>, default: Decimal) -> Self {
        Self {
            key: key.into(),
            default_value: UsageValue::Float64(default),
        }
    }

    /// A nested item.
    #[must_use]
    pub fn sub_resource(key: impl Into<String>, items: Vec<UsageItem>) -> Self {
        Self {
            key: key.into(),
            default_value: UsageValue::SubResourceUsage(items),
        }
    }

    /// Kind of value the item holds.
    #[must_use]
    pub fn value_type(&self) -> UsageValueType {
        match self.default_value {
            UsageValue::Float64(_) => UsageValueType::Float64,
            UsageValue::SubResourceUsage(_) => UsageValueType::SubResourceUsage,
        }
    }

    /// Nested items; empty for numeric items.
    #[must_use]
    pub fn items(&self) -> &[UsageItem] {
        match &self.default_value {
            UsageValue::Float64(_) => &[],
            UsageValue::SubResourceUsage(items) => items,
        }
    }
}

/// The usage items of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageSchema {
    items: Vec<UsageItem>,
}

impl UsageSchema {
    /// Create a schema from its top-level items.
    #[must_use]
    pub fn new(items: Vec<UsageItem>) -> Self {
        Self { items }
    }

    /// Schema of the Global Accelerator resource: one section per direction,
    /// each listing every region pair at zero GB.
    #[must_use]
    pub fn global_accelerator() -> &'static Self {
        GLOBAL_ACCELERATOR_SCHEMA.get_or_init(|| {
            Self::new(vec![
                region_pair_section(INBOUND_USAGE_KEY),
                region_pair_section(OUTBOUND_USAGE_KEY),
            ])
        })
    }

    /// Top-level items.
    #[must_use]
    pub fn items(&self) -> &[UsageItem] {
        &self.items
    }

    /// Look up a top-level item by key.
    #[must_use]
    pub fn item(&self, key: &str) -> Option<&UsageItem> {
        self.items.iter().find(|item| item.key == key)
    }
}

fn region_pair_section(key: &str) -> UsageItem {
    let items = REGION_PAIRS
        .iter()
        .map(|pair| UsageItem::float(pair.usage_key(), Decimal::ZERO))
        .collect();
    UsageItem::sub_resource(key, items)
}
