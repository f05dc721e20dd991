//! Payment lifecycle policy.
//!
//! Status moves forward only: PENDING → PAID → COMPLETED. The single
//! automatic transition lives here so the rule is testable in isolation.

use wavelink_core::PaymentStatus;

/// Day threshold at which a PAID subscription is considered served out.
pub const AUTO_COMPLETE_DAYS: i32 = 30;

/// Whether a record should be moved to COMPLETED automatically.
///
/// Fires when the post-update state is PAID with at least
/// [`AUTO_COMPLETE_DAYS`] days accrued. COMPLETED records never re-trigger.
#[must_use]
pub const fn auto_completes(status: PaymentStatus, days: i32) -> bool {
    matches!(status, PaymentStatus::Paid) && days >= AUTO_COMPLETE_DAYS
}
