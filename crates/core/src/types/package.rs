//! Subscription package tiers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Subscription package tier.
///
/// Each tier maps to a fixed monthly price. The price is snapshotted onto
/// the customer record at write time - a later change to this table does
/// not reprice existing records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "billing.package_kind", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PackageKind {
    /// Entry tier, 500 TK/month.
    #[default]
    Basic,
    /// Mid tier, 700 TK/month.
    Standard,
    /// Top tier, 1000 TK/month.
    Premium,
}

impl PackageKind {
    /// The fixed monthly price for this tier, in TK.
    #[must_use]
    pub fn price(self) -> Decimal {
        Decimal::from(match self {
            Self::Basic => 500_u32,
            Self::Standard => 700_u32,
            Self::Premium => 1000_u32,
        })
    }
}

impl std::fmt::Display for PackageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic => write!(f, "BASIC"),
            Self::Standard => write!(f, "STANDARD"),
            Self::Premium => write!(f, "PREMIUM"),
        }
    }
}

impl std::str::FromStr for PackageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BASIC" => Ok(Self::Basic),
            "STANDARD" => Ok(Self::Standard),
            "PREMIUM" => Ok(Self::Premium),
            _ => Err(format!("invalid package: {s}")),
        }
    }
}
