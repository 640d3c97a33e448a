//! Record access for specification evaluation.
//!
//! This module provides the [`Searchable`] trait, which is implemented by
//! the `#[derive(Searchable)]` macro to expose a record's fields to
//! specifications.

use crate::field::Field;
use crate::value::Value;

/// Trait for records that specifications can be evaluated against.
///
/// Usually derived with `#[derive(Searchable)]`, but can be implemented by
/// hand for rows, DTOs or views that store their fields differently.
///
/// # Derive Usage
///
/// ```
/// use vetsearch::{AppointmentStatus, CustomerId, PetId, Searchable, Specification};
///
/// #[derive(Searchable)]
/// struct VisitRow {
///     #[search(owner)]
///     owner: CustomerId,
///     #[search(pet)]
///     pet: PetId,
///     #[search(status)]
///     status: AppointmentStatus,
///     note: String,
/// }
///
/// let rows = vec![
///     VisitRow {
///         owner: CustomerId(42),
///         pet: PetId(1),
///         status: AppointmentStatus::Confirmed,
///         note: String::new(),
///     },
///     VisitRow {
///         owner: CustomerId(7),
///         pet: PetId(2),
///         status: AppointmentStatus::Confirmed,
///         note: String::new(),
///     },
/// ];
///
/// let spec = Specification::by_customer(CustomerId(42))
///     .and(Specification::by_status(AppointmentStatus::Confirmed));
/// assert_eq!(spec.count(&rows), 1);
/// ```
///
/// # Field Types
///
/// The derive checks that each mapped field has the type of its search
/// field (or an `Option` of it). A pet id mapped as a customer is rejected:
///
/// ```compile_fail
/// use vetsearch::{PetId, Searchable};
///
/// #[derive(Searchable)]
/// struct Mislabeled {
///     #[search(customer)]
///     pet: PetId,
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use vetsearch::{Field, PetId, Searchable, Value};
///
/// struct Vaccination {
///     pet: PetId,
/// }
///
/// impl Searchable for Vaccination {
///     fn search_value(&self, field: Field) -> Value {
///         match field {
///             Field::Pet => Value::Pet(self.pet),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Searchable {
    /// Returns the value of `field` for comparison, or [`Value::None`] if
    /// the record does not expose it.
    fn search_value(&self, field: Field) -> Value;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn search_value(&self, field: Field) -> Value {
        (**self).search_value(field)
    }
}

impl<T: Searchable + ?Sized> Searchable for Box<T> {
    fn search_value(&self, field: Field) -> Value {
        (**self).search_value(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClinicId, PetId};

    struct Kennel {
        clinic: ClinicId,
    }

    impl Searchable for Kennel {
        fn search_value(&self, field: Field) -> Value {
            match field {
                Field::Clinic => Value::Clinic(self.clinic),
                _ => Value::None,
            }
        }
    }

    #[test]
    fn manual_impl() {
        let kennel = Kennel {
            clinic: ClinicId(4),
        };
        assert_eq!(kennel.search_value(Field::Clinic), Value::Clinic(ClinicId(4)));
        assert_eq!(kennel.search_value(Field::Pet), Value::None);
    }

    #[test]
    fn references_and_boxes_forward() {
        let kennel = Kennel {
            clinic: ClinicId(4),
        };
        let boxed: Box<dyn Searchable> = Box::new(Kennel {
            clinic: ClinicId(5),
        });

        assert_eq!((&kennel).search_value(Field::Clinic), Value::Clinic(ClinicId(4)));
        assert_eq!(boxed.search_value(Field::Clinic), Value::Clinic(ClinicId(5)));
        assert_ne!(boxed.search_value(Field::Pet), Value::Pet(PetId(5)));
    }
}
