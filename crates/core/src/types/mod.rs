//! Shared newtype wrappers and domain enums.

pub mod id;
pub mod month;
pub mod package;
pub mod status;

pub use id::{CustomerId, HistoryEntryId};
pub use month::{MonthKey, MonthKeyError};
pub use package::PackageKind;
pub use status::PaymentStatus;
