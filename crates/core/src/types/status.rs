//! Payment lifecycle status.

use serde::{Deserialize, Serialize};

/// Payment status of a customer record.
///
/// Forms a one-directional lifecycle: PENDING → PAID → COMPLETED. A record
/// never moves backward; a customer "restarting" for a new billing period
/// is a brand-new record for the next month, not a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "billing.payment_status", rename_all = "UPPERCASE")
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    /// Awaiting payment for the current billing month.
    #[default]
    Pending,
    /// Paid; completes automatically once 30 days have accrued.
    Paid,
    /// Terminal state. No transition leads out of it.
    Completed,
}

impl PaymentStatus {
    /// Position in the lifecycle ordering PENDING < PAID < COMPLETED.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Paid => 1,
            Self::Completed => 2,
        }
    }

    /// Whether the lifecycle has reached its terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether moving from `self` to `next` goes against the lifecycle
    /// direction. Staying in place is not backward.
    #[must_use]
    pub const fn is_backward(self, next: Self) -> bool {
        next.rank() < self.rank()
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Paid => write!(f, "PAID"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(format!("invalid payment status: {s}")),
        }
    }
}
