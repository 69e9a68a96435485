//! Cost components for AWS Global Accelerator.
//!
//! This crate turns an accelerator's monthly usage profile into the cost
//! components a cost-estimation pipeline prices against the AWS catalog:
//!
//! - **Regions**: `Region`, `RegionCode`
//! - **Usage**: `UsageRecord`, `RegionPair`, `DataTransferEntry`, `AcceleratorUsage`
//! - **Schema**: `UsageSchema`, `UsageItem`, `UsageValue`
//! - **Direction**: `Direction`
//! - **Components**: `CostComponent`, `ProductFilter`, `AttributeFilter`
//! - **Catalog**: `PriceCatalog`, `StaticPriceCatalog`
//! - **Resource**: `GlobalAccelerator`, `AcceleratorResource`
//!
//! # Dominant direction
//!
//! AWS bills Global Accelerator data transfer only in the dominant direction:
//! whichever of inbound or outbound carries more traffic in the month. Only
//! the region pairs of that direction become cost components; ties go to
//! inbound.
//!
//! # Example
//!
//! ```
//! use accel_pricing_core::{GlobalAccelerator, Region, RegionPair, UsageRecord};
//! use rust_decimal_macros::dec;
//!
//! let inbound = UsageRecord::default()
//!     .with(RegionPair::new(Region::Europe, Region::India), dec!(12.5));
//!
//! let accelerator = GlobalAccelerator::new("edge").with_inbound(inbound);
//! let resource = accelerator.price();
//!
//! assert!(resource.fixed_fee.is_some());
//! assert_eq!(resource.data_transfer.len(), 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod accelerator;
pub mod catalog;
pub mod cost;
pub mod direction;
pub mod error;
pub mod region;
pub mod schema;
pub mod usage;

pub use accelerator::{
    AcceleratorResource, AcceleratorUsage, GlobalAccelerator, IpAddressType,
    FIXED_HOURLY_FEE, INBOUND_USAGE_KEY, OUTBOUND_USAGE_KEY,
};
pub use catalog::{CatalogEntry, PriceCatalog, StaticPriceCatalog};
pub use cost::{
    AttributeFilter, CostComponent, PricedComponent, ProductFilter, DEFAULT_HOURS_PER_MONTH,
    SERVICE_NAME, VENDOR_NAME,
};
pub use direction::Direction;
pub use error::{PricingError, Result};
pub use region::{Region, RegionCode, REGION_COUNT};
pub use schema::{UsageItem, UsageSchema, UsageValue, UsageValueType};
pub use usage::{DataTransferEntry, RegionPair, UsageRecord, PAIR_COUNT, REGION_PAIRS};
