//! Proc macros for vetsearch.
//!
//! - [`Searchable`] - Generate record accessors for search specifications

mod search;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Searchable` trait for record structs.
///
/// This macro generates an implementation of the `Searchable` trait from
/// `vetsearch`, mapping annotated struct fields to search fields.
///
/// # Field Attributes
///
/// | Attribute | Search field | Expected type |
/// |-----------|--------------|---------------|
/// | `id` | `Field::Id` | `AppointmentId` |
/// | `customer` / `owner` | `Field::Customer` | `CustomerId` |
/// | `employee` / `vet` / `veterinarian` | `Field::Employee` | `EmployeeId` |
/// | `pet` | `Field::Pet` | `PetId` |
/// | `service` | `Field::Service` | `ServiceType` |
/// | `status` | `Field::Status` | `AppointmentStatus` |
/// | `clinic` | `Field::Clinic` | `ClinicId` |
/// | `scheduled_at` / `date` | `Field::ScheduledAt` | `DateTime<Utc>` |
/// | `skip` | not exposed | any |
///
/// Any of the expected types may also be wrapped in `Option`; an unset
/// option reports `Value::None` and never matches.
///
/// A mapped field of any other type is a compile error.
///
/// # Generated Code
///
/// 1. A `SEARCH_FIELDS` constant listing the mapped fields
/// 2. A hidden, never-called method asserting each mapped field's type
/// 3. Implementation of `Searchable::search_value()`
///
/// # Example
///
/// ```ignore
/// use vetsearch::{CustomerId, EmployeeId, Searchable, Specification};
///
/// #[derive(Searchable)]
/// struct Booking {
///     #[search(owner)]
///     owner: CustomerId,
///
///     #[search(vet)]
///     vet: Option<EmployeeId>,
///
///     #[search(skip)]
///     internal_note: String,
/// }
///
/// let spec = Specification::by_customer(CustomerId(42));
/// let bookings: Vec<Booking> = load();
/// let mine = spec.filter(&bookings);
/// ```
#[proc_macro_derive(Searchable, attributes(search))]
pub fn searchable_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    search::searchable_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
