//! Searchable fields and leaf field specifications.
//!
//! A [`FieldSpec`] is a single predicate: one field compared against one
//! strongly typed value or range. Every variant knows which [`Field`] it
//! reads, so an evaluator only needs the record's [`Value`] for that field.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AppointmentId, AppointmentStatus, ClinicId, CustomerId, EmployeeId, PetId, ServiceType,
};
use crate::error::SearchError;
use crate::range::DateRange;
use crate::value::Value;

/// A field a record can expose to searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Customer,
    Employee,
    Pet,
    Service,
    Status,
    Clinic,
    ScheduledAt,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Field; 8] = [
        Field::Id,
        Field::Customer,
        Field::Employee,
        Field::Pet,
        Field::Service,
        Field::Status,
        Field::Clinic,
        Field::ScheduledAt,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Customer => "customer",
            Field::Employee => "employee",
            Field::Pet => "pet",
            Field::Service => "service",
            Field::Status => "status",
            Field::Clinic => "clinic",
            Field::ScheduledAt => "scheduled_at",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Field {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SearchError::UnknownField(s.to_string()))
    }
}

/// A leaf predicate over a single field.
///
/// Each variant carries the semantic type of its field, so passing a pet id
/// where a customer id is expected does not compile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSpec {
    /// Appointment identifier equals.
    Id(AppointmentId),
    /// Customer reference equals.
    Customer(CustomerId),
    /// Employee reference equals.
    Employee(EmployeeId),
    /// Pet reference equals.
    Pet(PetId),
    /// Service type equals.
    Service(ServiceType),
    /// Status equals.
    Status(AppointmentStatus),
    /// Clinic reference equals.
    Clinic(ClinicId),
    /// Scheduled time lies within the inclusive range.
    DateRange(DateRange),
    /// Scheduled time falls on the given UTC calendar day.
    ScheduledOn(NaiveDate),
}

impl FieldSpec {
    /// Returns the field this predicate reads.
    pub fn field(&self) -> Field {
        match self {
            FieldSpec::Id(_) => Field::Id,
            FieldSpec::Customer(_) => Field::Customer,
            FieldSpec::Employee(_) => Field::Employee,
            FieldSpec::Pet(_) => Field::Pet,
            FieldSpec::Service(_) => Field::Service,
            FieldSpec::Status(_) => Field::Status,
            FieldSpec::Clinic(_) => Field::Clinic,
            FieldSpec::DateRange(_) | FieldSpec::ScheduledOn(_) => Field::ScheduledAt,
        }
    }

    /// Evaluates this predicate against a field value.
    ///
    /// Returns `false` for [`Value::None`] and for values of another kind.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldSpec::Id(want), Value::Id(got)) => want == got,
            (FieldSpec::Customer(want), Value::Customer(got)) => want == got,
            (FieldSpec::Employee(want), Value::Employee(got)) => want == got,
            (FieldSpec::Pet(want), Value::Pet(got)) => want == got,
            (FieldSpec::Service(want), Value::Service(got)) => want == got,
            (FieldSpec::Status(want), Value::Status(got)) => want == got,
            (FieldSpec::Clinic(want), Value::Clinic(got)) => want == got,
            (FieldSpec::DateRange(range), Value::Timestamp(ts)) => range.contains(*ts),
            (FieldSpec::ScheduledOn(day), Value::Timestamp(ts)) => ts.date_naive() == *day,

            // Missing value or another kind
            (FieldSpec::Id(_), _)
            | (FieldSpec::Customer(_), _)
            | (FieldSpec::Employee(_), _)
            | (FieldSpec::Pet(_), _)
            | (FieldSpec::Service(_), _)
            | (FieldSpec::Status(_), _)
            | (FieldSpec::Clinic(_), _)
            | (FieldSpec::DateRange(_), _)
            | (FieldSpec::ScheduledOn(_), _) => false,
        }
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.field();
        match self {
            FieldSpec::Id(v) => write!(f, "{field} = {v}"),
            FieldSpec::Customer(v) => write!(f, "{field} = {v}"),
            FieldSpec::Employee(v) => write!(f, "{field} = {v}"),
            FieldSpec::Pet(v) => write!(f, "{field} = {v}"),
            FieldSpec::Service(v) => write!(f, "{field} = {v}"),
            FieldSpec::Status(v) => write!(f, "{field} = {v}"),
            FieldSpec::Clinic(v) => write!(f, "{field} = {v}"),
            FieldSpec::DateRange(range) => write!(f, "{field} in {range}"),
            FieldSpec::ScheduledOn(day) => write!(f, "{field} on {day}"),
        }
    }
}
