//! Traffic direction and dominant-direction selection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of accelerated traffic relative to the application endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Traffic from clients into the accelerator's endpoints.
    Inbound,
    /// Traffic from the endpoints back out to clients.
    Outbound,
}

impl Direction {
    /// The catalog's `trafficDirection` value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "Inbound",
            Self::Outbound => "Outbound",
        }
    }

    /// Upper-cased label used in component names and usage types.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Inbound => "INBOUND",
            Self::Outbound => "OUTBOUND",
        }
    }

    /// Pick the dominant direction for a month of traffic.
    ///
    /// Outbound only wins with strictly more volume; equal totals (including
    /// no traffic at all) bill as inbound.
    #[must_use]
    pub fn select(inbound_total_gb: Decimal, outbound_total_gb: Decimal) -> Self {
        if outbound_total_gb > inbound_total_gb {
            Self::Outbound
        } else {
            Self::Inbound
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tie_goes_to_inbound() {
        assert_eq!(Direction::select(dec!(10), dec!(10)), Direction::Inbound);
        assert_eq!(Direction::select(Decimal::ZERO, Decimal::ZERO), Direction::Inbound);
        assert_eq!(
            Direction::select(dec!(0.3), dec!(0.1) + dec!(0.2)),
            Direction::Inbound
        );
    }

    #[test]
    fn larger_outbound_wins() {
        assert_eq!(Direction::select(dec!(5), dec!(7)), Direction::Outbound);
        assert_eq!(Direction::select(dec!(7), dec!(5)), Direction::Inbound);
    }

    #[test]
    fn labels() {
        assert_eq!(Direction::Inbound.as_str(), "Inbound");
        assert_eq!(Direction::Outbound.label(), "OUTBOUND");
        assert_eq!(Direction::Outbound.to_string(), "Outbound");
    }
}
