//! Domain and wire models.

pub mod customer;

pub use customer::{
    Customer, CustomerBucket, CustomerHistoryEntry, CustomerUpdate, FieldChange, NewCustomer,
};
