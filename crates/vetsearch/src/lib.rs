//! Vetsearch - composable search specifications for clinic appointments.
//!
//! Vetsearch provides a small algebra for "match the records satisfying X"
//! that is independent of how the condition is finally evaluated:
//!
//! - Strongly typed field factories: by id, customer, employee, pet,
//!   service, status, clinic, date range, scheduled day
//! - Combination with `and` / `or`, flattening same-operator chains
//! - Pagination carried on the outermost specification
//! - Evaluation against in-memory records, or translation to SQL
//!
//! # Quick Start
//!
//! ```rust
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use vetsearch::{
//!     Appointment, AppointmentId, AppointmentStatus, ClinicId, CustomerId, PetId,
//!     ServiceType, Specification,
//! };
//!
//! let appointments = vec![Appointment {
//!     id: AppointmentId(1),
//!     customer_id: CustomerId(42),
//!     employee_id: None,
//!     pet_id: PetId(3),
//!     clinic_id: ClinicId(1),
//!     service: ServiceType::Deworming,
//!     status: AppointmentStatus::Confirmed,
//!     scheduled_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
//!     reason: String::new(),
//! }];
//!
//! let spec = Specification::by_status(AppointmentStatus::Confirmed).and(
//!     Specification::by_date_range_days(
//!         NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//!     ),
//! );
//!
//! assert!(spec.is_satisfied_by(&appointments[0]));
//! assert_eq!(spec.filter(&appointments).len(), 1);
//! ```
//!
//! # Evaluation Semantics
//!
//! | Node | Holds when | Empty |
//! |------|------------|-------|
//! | field spec | the record's field equals / lies within the value | n/a |
//! | AND composite | every child holds | true |
//! | OR composite | at least one child holds | false |
//!
//! A record reporting [`Value::None`] for a field never matches a spec on
//! that field.

// Lets `#[derive(Searchable)]` expand to `::vetsearch::...` inside this crate.
extern crate self as vetsearch;

mod config;
mod domain;
mod error;
mod field;
mod field_type;
mod operator;
mod pagination;
mod range;
mod repository;
mod spec;
pub mod sql;
mod traits;
mod value;

// Re-export public API
pub use config::{SearchConfig, DEFAULT_MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE};
pub use domain::{
    Appointment, AppointmentId, AppointmentStatus, ClinicId, CustomerId, EmployeeId, PetId,
    ServiceType,
};
pub use error::{Result, SearchError};
pub use field::{Field, FieldSpec};
pub use operator::Operator;
pub use pagination::{Page, Pagination};
pub use range::DateRange;
pub use repository::{MemoryRepository, SearchRepository};
pub use spec::{CompositeSpec, Specification};
pub use traits::Searchable;
pub use value::{ToValue, Value};
pub use vetsearch_macros::Searchable;

// Support items for `#[derive(Searchable)]`; not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::field_type::*;
}
