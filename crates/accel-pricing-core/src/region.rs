//! Accelerator billing regions.
//!
//! Global Accelerator prices data transfer between nine geographic regions,
//! each identified in usage files by a snake_case identifier and in the AWS
//! catalog by a two-letter code.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PricingError, Result};

/// Number of supported regions.
pub const REGION_COUNT: usize = 9;

/// A geographic region Global Accelerator bills data transfer between.
///
/// Declaration order is the order usage keys are enumerated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Asia Pacific (`AP`).
    AsiaPacific,
    /// Australia (`AU`).
    Australia,
    /// Europe (`EU`).
    Europe,
    /// India (`IN`).
    India,
    /// South Korea (`KR`).
    SouthKorea,
    /// Middle East (`ME`).
    MiddleEast,
    /// North America (`NA`).
    NorthAmerica,
    /// South America (`SA`).
    SouthAmerica,
    /// South Africa (`ZA`).
    SouthAfrica,
}

impl Region {
    /// Every region, in declaration order.
    pub const ALL: [Self; REGION_COUNT] = [
        Self::AsiaPacific,
        Self::Australia,
        Self::Europe,
        Self::India,
        Self::SouthKorea,
        Self::MiddleEast,
        Self::NorthAmerica,
        Self::SouthAmerica,
        Self::SouthAfrica,
    ];

    /// The identifier used in usage keys (e.g. `south_korea`).
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::AsiaPacific => "asia_pacific",
            Self::Australia => "australia",
            Self::Europe => "europe",
            Self::India => "india",
            Self::SouthKorea => "south_korea",
            Self::MiddleEast => "middle_east",
            Self::NorthAmerica => "north_america",
            Self::SouthAmerica => "south_america",
            Self::SouthAfrica => "south_africa",
        }
    }

    /// The two-letter billing code used by the AWS catalog.
    #[must_use]
    pub const fn code(self) -> RegionCode {
        RegionCode(match self {
            Self::AsiaPacific => "AP",
            Self::Australia => "AU",
            Self::Europe => "EU",
            Self::India => "IN",
            Self::SouthKorea => "KR",
            Self::MiddleEast => "ME",
            Self::NorthAmerica => "NA",
            Self::SouthAmerica => "SA",
            Self::SouthAfrica => "ZA",
        })
    }

    /// Position of the region in [`Region::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parse a usage-key identifier such as `middle_east`.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownRegion`] for identifiers outside the set.
    pub fn from_identifier(identifier: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|region| region.identifier() == identifier)
            .ok_or_else(|| PricingError::UnknownRegion(identifier.to_string()))
    }

    /// Look up the region for a two-letter billing code.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::UnknownRegionCode`] for codes outside the set.
    pub fn from_code(code: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|region| region.code().as_str() == code)
            .ok_or_else(|| PricingError::UnknownRegionCode(code.to_string()))
    }
}

impl FromStr for Region {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_identifier(s)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Two-letter billing code of a [`Region`] (e.g. `EU`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionCode(&'static str);

impl RegionCode {
    /// Return the code as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<Region> for RegionCode {
    fn from(region: Region) -> Self {
        region.code()
    }
}
