//! Clinic domain types referenced by search specifications.
//!
//! Identifiers are distinct newtypes so that a customer id can never be
//! passed where a pet id is expected. Enumerations parse case-insensitively
//! from their snake_case names.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::Searchable;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Returns the raw identifier.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                $name(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of an appointment.
    AppointmentId
);
id_type!(
    /// Identifier of a customer (pet owner).
    CustomerId
);
id_type!(
    /// Identifier of an employee (veterinarian or clinic staff).
    EmployeeId
);
id_type!(
    /// Identifier of a pet.
    PetId
);
id_type!(
    /// Identifier of a clinic.
    ClinicId
);

/// Kind of service an appointment is booked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Consultation,
    Vaccination,
    Deworming,
    Surgery,
    Grooming,
    Dental,
    Emergency,
    Checkup,
}

impl ServiceType {
    /// Every service type, in declaration order.
    pub const ALL: [ServiceType; 8] = [
        ServiceType::Consultation,
        ServiceType::Vaccination,
        ServiceType::Deworming,
        ServiceType::Surgery,
        ServiceType::Grooming,
        ServiceType::Dental,
        ServiceType::Emergency,
        ServiceType::Checkup,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceType::Consultation => "consultation",
            ServiceType::Vaccination => "vaccination",
            ServiceType::Deworming => "deworming",
            ServiceType::Surgery => "surgery",
            ServiceType::Grooming => "grooming",
            ServiceType::Dental => "dental",
            ServiceType::Emergency => "emergency",
            ServiceType::Checkup => "checkup",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ServiceType::ALL
            .into_iter()
            .find(|service| service.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SearchError::UnknownService(s.to_string()))
    }
}

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Every status, in declaration order.
    pub const ALL: [AppointmentStatus; 6] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::InProgress => "in_progress",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no_show",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        AppointmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| SearchError::UnknownStatus(s.to_string()))
    }
}

/// A booked visit of a pet to a clinic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Searchable)]
pub struct Appointment {
    #[search(id)]
    pub id: AppointmentId,
    #[search(customer)]
    pub customer_id: CustomerId,
    /// Unassigned until a veterinarian picks the appointment up.
    #[search(employee)]
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
    #[search(pet)]
    pub pet_id: PetId,
    #[search(clinic)]
    pub clinic_id: ClinicId,
    #[search(service)]
    pub service: ServiceType,
    #[search(status)]
    pub status: AppointmentStatus,
    #[search(scheduled_at)]
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub reason: String,
}
