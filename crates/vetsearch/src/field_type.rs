//! Compile-time checks that a record field has the type of the search field
//! it is mapped to.
//!
//! `#[derive(Searchable)]` emits one `assert_*` call per mapped field, so
//! `#[search(customer)] pet: PetId` fails to build instead of silently
//! never matching.

use chrono::{DateTime, Utc};

use crate::domain::{
    AppointmentId, AppointmentStatus, ClinicId, CustomerId, EmployeeId, PetId, ServiceType,
};

macro_rules! field_types {
    ($($marker:ident, $assert:ident => $ty:ty;)*) => {
        $(
            #[doc = concat!("Implemented by `", stringify!($ty), "` and its `Option`.")]
            pub trait $marker {}

            impl $marker for $ty {}
            impl $marker for Option<$ty> {}

            #[inline(always)]
            pub fn $assert<T: $marker + ?Sized>(_: &T) {}
        )*
    };
}

field_types! {
    IdField, assert_id => AppointmentId;
    CustomerField, assert_customer => CustomerId;
    EmployeeField, assert_employee => EmployeeId;
    PetField, assert_pet => PetId;
    ServiceField, assert_service => ServiceType;
    StatusField, assert_status => AppointmentStatus;
    ClinicField, assert_clinic => ClinicId;
    ScheduledAtField, assert_scheduled_at => DateTime<Utc>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_and_optional_types_are_accepted() {
        assert_customer(&CustomerId(42));
        assert_employee(&Some(EmployeeId(7)));
        assert_employee(&None::<EmployeeId>);
        assert_scheduled_at(&Utc::now());
        assert_status(&AppointmentStatus::Pending);
    }
}
