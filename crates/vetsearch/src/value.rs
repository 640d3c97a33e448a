//! Runtime values reported by records for field comparison.
//!
//! The [`Value`] enum is what a [`Searchable`](crate::Searchable) record
//! returns for a [`Field`](crate::Field). Each kind has its own variant so a
//! customer id is never mistaken for a pet id during evaluation.

use chrono::{DateTime, Utc};

use crate::domain::{
    AppointmentId, AppointmentStatus, ClinicId, CustomerId, EmployeeId, PetId, ServiceType,
};

/// Runtime value of a record field.
///
/// # Example
///
/// ```
/// use vetsearch::{CustomerId, Field, Searchable, Value};
///
/// struct Invoice {
///     customer: CustomerId,
/// }
///
/// impl Searchable for Invoice {
///     fn search_value(&self, field: Field) -> Value {
///         match field {
///             Field::Customer => Value::Customer(self.customer),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    /// Appointment identifier.
    Id(AppointmentId),
    /// Customer reference.
    Customer(CustomerId),
    /// Employee reference.
    Employee(EmployeeId),
    /// Pet reference.
    Pet(PetId),
    /// Clinic reference.
    Clinic(ClinicId),
    /// Service type.
    Service(ServiceType),
    /// Appointment status.
    Status(AppointmentStatus),
    /// Point in time (UTC).
    Timestamp(DateTime<Utc>),
    /// Field not present, unset, or not exposed by the record.
    None,
}

impl Value {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

/// Conversion from a record's field type into a [`Value`].
///
/// Implemented for every domain type a record can expose, and for `Option`
/// of those types (an unset option reports [`Value::None`]). The
/// `#[derive(Searchable)]` macro calls this for each mapped field.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! to_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

to_value! {
    AppointmentId => Id,
    CustomerId => Customer,
    EmployeeId => Employee,
    PetId => Pet,
    ClinicId => Clinic,
    ServiceType => Service,
    AppointmentStatus => Status,
    DateTime<Utc> => Timestamp,
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::None,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}
