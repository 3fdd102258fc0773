//! Record filtering.
//!
//! Filters are descriptors (field, operator, value) combined with And/Or
//! logic, evaluated against anything implementing [`Fields`](crate::Fields).

pub mod descriptor;

pub use descriptor::{CompositeFilter, FilterDescriptor, FilterLogic, FilterOperator};
