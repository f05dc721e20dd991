//! Business logic services.

pub mod customers;
pub mod history;
pub mod lifecycle;
pub mod reporting;

pub use customers::CustomerService;
