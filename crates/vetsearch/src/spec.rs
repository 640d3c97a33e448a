//! Specification builder and evaluator.
//!
//! A [`Specification`] is an immutable predicate tree. Leaves are
//! [`FieldSpec`]s; inner nodes are [`CompositeSpec`]s combining children
//! under one [`Operator`]. Combinators consume the receiver and return a new
//! tree.
//!
//! # Combination rules
//!
//! - `a.and(b)` appends `b` to `a`'s children when `a` is already an AND
//!   composite; otherwise it wraps `a` and `b` in a new two-child AND
//!   composite. `or` mirrors this with OR.
//! - Pagination lives on the outermost node only. Both branches keep the
//!   receiver's pagination on the result and strip it from the operands
//!   that become children.
//! - `with_pagination` replaces any previous pagination. On a bare field
//!   spec it produces a one-child AND composite carrying the window.
//!
//! # Evaluation
//!
//! ```text
//! field     = record value equals (or lies within) the spec value
//! AND [..]  = every child holds       (empty: true)
//! OR  [..]  = some child holds        (empty: false)
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::SearchConfig;
use crate::domain::{
    AppointmentId, AppointmentStatus, ClinicId, CustomerId, EmployeeId, PetId, ServiceType,
};
use crate::field::FieldSpec;
use crate::operator::Operator;
use crate::pagination::{Page, Pagination};
use crate::range::DateRange;
use crate::traits::Searchable;

/// A composable filter predicate over records.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use vetsearch::{AppointmentStatus, Pagination, Specification};
///
/// let january = Specification::by_date_range_days(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// );
///
/// let spec = Specification::by_status(AppointmentStatus::Confirmed)
///     .and(january)
///     .with_pagination(Pagination::new(10, 0));
///
/// assert_eq!(spec.children().len(), 2);
/// assert_eq!(spec.pagination(), Some(Pagination::new(10, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specification {
    /// A single-field predicate.
    Field(FieldSpec),
    /// Children combined under one operator.
    Composite(CompositeSpec),
}

/// Ordered children combined under one operator, with optional pagination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompositeSpec {
    operator: Operator,
    children: Vec<Specification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pagination: Option<Pagination>,
}

impl CompositeSpec {
    /// Creates an unpaginated composite. Pagination on the children is
    /// dropped; only the outermost node carries a window.
    pub fn new<I>(operator: Operator, children: I) -> Self
    where
        I: IntoIterator<Item = Specification>,
    {
        CompositeSpec {
            operator,
            children: children
                .into_iter()
                .map(Specification::without_pagination)
                .collect(),
            pagination: None,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn children(&self) -> &[Specification] {
        &self.children
    }

    pub fn pagination(&self) -> Option<Pagination> {
        self.pagination
    }

    pub fn is_satisfied_by<R>(&self, record: &R) -> bool
    where
        R: Searchable + ?Sized,
    {
        self.operator.combine(
            self.children
                .iter()
                .map(|child| child.is_satisfied_by(record)),
        )
    }
}

impl Specification {
    // ========================================================================
    // Field factories
    // ========================================================================

    /// Matches the appointment with this identifier.
    pub fn by_id(id: AppointmentId) -> Self {
        Specification::Field(FieldSpec::Id(id))
    }

    /// Matches appointments booked by this customer.
    pub fn by_customer(customer: CustomerId) -> Self {
        Specification::Field(FieldSpec::Customer(customer))
    }

    /// Matches appointments assigned to this employee.
    pub fn by_employee(employee: EmployeeId) -> Self {
        Specification::Field(FieldSpec::Employee(employee))
    }

    /// Matches appointments for this pet.
    pub fn by_pet(pet: PetId) -> Self {
        Specification::Field(FieldSpec::Pet(pet))
    }

    /// Matches appointments booked for this service.
    pub fn by_service(service: ServiceType) -> Self {
        Specification::Field(FieldSpec::Service(service))
    }

    /// Matches appointments in this status.
    pub fn by_status(status: AppointmentStatus) -> Self {
        Specification::Field(FieldSpec::Status(status))
    }

    /// Matches appointments at this clinic.
    pub fn by_clinic(clinic: ClinicId) -> Self {
        Specification::Field(FieldSpec::Clinic(clinic))
    }

    /// Matches appointments scheduled within `[start, end]`.
    ///
    /// An inverted range is accepted and matches nothing.
    pub fn by_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Specification::in_range(DateRange::new(start, end))
    }

    /// Matches appointments scheduled on any day from `first` to `last`,
    /// both inclusive.
    pub fn by_date_range_days(first: NaiveDate, last: NaiveDate) -> Self {
        Specification::in_range(DateRange::days(first, last))
    }

    /// Matches appointments scheduled within `range`.
    pub fn in_range(range: DateRange) -> Self {
        Specification::Field(FieldSpec::DateRange(range))
    }

    /// Matches appointments scheduled on this UTC calendar day.
    pub fn by_scheduled_date(day: NaiveDate) -> Self {
        Specification::Field(FieldSpec::ScheduledOn(day))
    }

    // ========================================================================
    // Composite constructors
    // ========================================================================

    /// An AND composite with no children and the configured default window.
    ///
    /// Matches every record.
    pub fn empty(config: &SearchConfig) -> Self {
        Specification::all().with_pagination(config.default_pagination())
    }

    /// An unpaginated AND composite with no children. Matches every record.
    pub fn all() -> Self {
        Specification::Composite(CompositeSpec::new(Operator::And, []))
    }

    /// An unpaginated OR composite with no children. Matches no record.
    pub fn none() -> Self {
        Specification::Composite(CompositeSpec::new(Operator::Or, []))
    }

    /// An AND composite over the given children.
    pub fn all_of<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Specification>,
    {
        Specification::Composite(CompositeSpec::new(Operator::And, children))
    }

    /// An OR composite over the given children.
    pub fn any_of<I>(children: I) -> Self
    where
        I: IntoIterator<Item = Specification>,
    {
        Specification::Composite(CompositeSpec::new(Operator::Or, children))
    }

    // ========================================================================
    // Combinators
    // ========================================================================

    /// Requires both `self` and `other` to hold.
    pub fn and(self, other: Specification) -> Self {
        self.combine(Operator::And, other)
    }

    /// Requires `self` or `other` to hold.
    pub fn or(self, other: Specification) -> Self {
        self.combine(Operator::Or, other)
    }

    /// Combines under `operator`, flattening into the receiver when it is a
    /// composite with the same operator.
    pub fn combine(self, operator: Operator, other: Specification) -> Self {
        let other = other.without_pagination();
        match self {
            Specification::Composite(mut composite) if composite.operator == operator => {
                composite.children.push(other);
                Specification::Composite(composite)
            }
            receiver => {
                let pagination = receiver.pagination();
                Specification::Composite(CompositeSpec {
                    operator,
                    children: vec![receiver.without_pagination(), other],
                    pagination,
                })
            }
        }
    }

    /// Attaches a result window, replacing any previous one.
    pub fn with_pagination(self, pagination: Pagination) -> Self {
        match self {
            Specification::Composite(mut composite) => {
                composite.pagination = Some(pagination);
                Specification::Composite(composite)
            }
            field @ Specification::Field(_) => Specification::Composite(CompositeSpec {
                operator: Operator::And,
                children: vec![field],
                pagination: Some(pagination),
            }),
        }
    }

    /// Removes the result window, keeping the predicate unchanged.
    pub fn without_pagination(self) -> Self {
        match self {
            Specification::Composite(mut composite) => {
                composite.pagination = None;
                Specification::Composite(composite)
            }
            field => field,
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Returns the operator, or `None` for a field spec.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Specification::Composite(composite) => Some(composite.operator),
            Specification::Field(_) => None,
        }
    }

    /// Returns the children; empty for a field spec.
    pub fn children(&self) -> &[Specification] {
        match self {
            Specification::Composite(composite) => &composite.children,
            Specification::Field(_) => &[],
        }
    }

    /// Returns the result window, if one is attached.
    pub fn pagination(&self) -> Option<Pagination> {
        match self {
            Specification::Composite(composite) => composite.pagination,
            Specification::Field(_) => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldSpec> {
        match self {
            Specification::Field(field) => Some(field),
            Specification::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeSpec> {
        match self {
            Specification::Composite(composite) => Some(composite),
            Specification::Field(_) => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Specification::Composite(_))
    }

    /// Number of field specs in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Specification::Field(_) => 1,
            Specification::Composite(composite) => {
                composite.children.iter().map(Specification::leaf_count).sum()
            }
        }
    }

    /// Height of the tree; a field spec has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Specification::Field(_) => 1,
            Specification::Composite(composite) => {
                1 + composite
                    .children
                    .iter()
                    .map(Specification::depth)
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single record satisfies this specification.
    pub fn is_satisfied_by<R>(&self, record: &R) -> bool
    where
        R: Searchable + ?Sized,
    {
        match self {
            Specification::Field(field) => field.matches(&record.search_value(field.field())),
            Specification::Composite(composite) => composite.is_satisfied_by(record),
        }
    }

    /// Filters a slice, returning references to matching records inside the
    /// attached window (all matches when no window is attached).
    pub fn filter<'a, R: Searchable>(&self, records: &'a [R]) -> Vec<&'a R> {
        self.page(records).items
    }

    /// Filters and clones matching records inside the attached window.
    pub fn filter_cloned<R: Searchable + Clone>(&self, records: &[R]) -> Vec<R> {
        self.filter(records).into_iter().cloned().collect()
    }

    /// Filters a slice into a [`Page`] that also reports the total number of
    /// matches before the window was applied.
    pub fn page<'a, R: Searchable>(&self, records: &'a [R]) -> Page<&'a R> {
        self.page_with(records, self.pagination())
    }

    /// Like [`page`](Self::page), with an explicit window overriding the
    /// attached one.
    pub fn page_with<'a, R: Searchable>(
        &self,
        records: &'a [R],
        pagination: Option<Pagination>,
    ) -> Page<&'a R> {
        let mut matching: Vec<&'a R> = records
            .iter()
            .filter(|record| self.is_satisfied_by(*record))
            .collect();
        let total = matching.len();

        if let Some(window) = pagination {
            let range = window.window(total);
            matching.truncate(range.end);
            matching.drain(..range.start);
        }

        trace!(
            spec = %self,
            scanned = records.len(),
            matched = total,
            returned = matching.len(),
            "Specification evaluated"
        );

        Page {
            items: matching,
            total,
            pagination,
        }
    }

    /// Counts matching records, ignoring pagination.
    pub fn count<R: Searchable>(&self, records: &[R]) -> usize {
        records
            .iter()
            .filter(|record| self.is_satisfied_by(*record))
            .count()
    }

    /// Returns `true` if any record matches.
    pub fn any<R: Searchable>(&self, records: &[R]) -> bool {
        records.iter().any(|record| self.is_satisfied_by(record))
    }

    /// Finds the first matching record, ignoring pagination.
    pub fn find<'a, R: Searchable>(&self, records: &'a [R]) -> Option<&'a R> {
        records.iter().find(|record| self.is_satisfied_by(*record))
    }
}

impl From<FieldSpec> for Specification {
    fn from(field: FieldSpec) -> Self {
        Specification::Field(field)
    }
}

impl From<CompositeSpec> for Specification {
    fn from(composite: CompositeSpec) -> Self {
        Specification::Composite(composite)
    }
}

impl fmt::Display for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Specification::Field(field) => write!(f, "{field}"),
            Specification::Composite(composite) => write!(f, "{composite}"),
        }
    }
}

impl fmt::Display for CompositeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.children.as_slice() {
            [] if self.operator.identity() => write!(f, "TRUE"),
            [] => write!(f, "FALSE"),
            [only] => write!(f, "{only}"),
            children => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", self.operator)?;
                    }
                    write!(f, "{child}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Appointment;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn appointment(id: i64, customer: i64, status: AppointmentStatus, day: u32) -> Appointment {
        Appointment {
            id: AppointmentId(id),
            customer_id: CustomerId(customer),
            employee_id: Some(EmployeeId(id % 3)),
            pet_id: PetId(id * 10),
            clinic_id: ClinicId(1),
            service: ServiceType::Checkup,
            status,
            scheduled_at: Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap(),
            reason: String::new(),
        }
    }

    fn sample() -> Vec<Appointment> {
        vec![
            appointment(1, 42, AppointmentStatus::Confirmed, 3),
            appointment(2, 42, AppointmentStatus::Cancelled, 5),
            appointment(3, 7, AppointmentStatus::Confirmed, 10),
            appointment(4, 8, AppointmentStatus::Pending, 15),
            appointment(5, 42, AppointmentStatus::Completed, 20),
        ]
    }

    #[test]
    fn field_spec_has_no_children_or_pagination() {
        let spec = Specification::by_pet(PetId(3));
        assert!(spec.children().is_empty());
        assert_eq!(spec.pagination(), None);
        assert_eq!(spec.operator(), None);
        assert!(!spec.is_composite());
    }

    #[test]
    fn and_flattens_into_and_composite() {
        let a = Specification::by_customer(CustomerId(1));
        let b = Specification::by_status(AppointmentStatus::Pending);
        let c = Specification::by_clinic(ClinicId(2));

        let spec = a.clone().and(b.clone()).and(c.clone());

        assert_eq!(spec.operator(), Some(Operator::And));
        assert_eq!(spec.children(), &[a, b, c]);
        assert_eq!(spec.depth(), 2);
    }

    #[test]
    fn or_after_and_wraps() {
        let a = Specification::by_customer(CustomerId(1));
        let b = Specification::by_status(AppointmentStatus::Pending);
        let c = Specification::by_clinic(ClinicId(2));

        let spec = a.clone().and(b.clone()).or(c.clone());

        assert_eq!(spec.operator(), Some(Operator::Or));
        assert_eq!(spec.children(), &[a.and(b), c]);
    }

    #[test]
    fn flattening_does_not_absorb_other_composites() {
        let a = Specification::by_pet(PetId(1));
        let bc = Specification::by_pet(PetId(2)).and(Specification::by_pet(PetId(3)));

        let spec = a.and(bc.clone());
        assert_eq!(spec.children().len(), 2);
        assert_eq!(spec.children()[1], bc);
    }

    #[test]
    fn pagination_is_last_write_wins() {
        let base = Specification::by_status(AppointmentStatus::Confirmed);
        let twice = base
            .clone()
            .with_pagination(Pagination::new(5, 0))
            .with_pagination(Pagination::new(10, 20));

        assert_eq!(twice, base.with_pagination(Pagination::new(10, 20)));
        assert_eq!(twice.pagination(), Some(Pagination::new(10, 20)));
    }

    #[test]
    fn pagination_survives_flatten_and_wrap() {
        let window = Pagination::new(10, 0);

        let flattened = Specification::all()
            .with_pagination(window)
            .and(Specification::by_pet(PetId(1)));
        assert_eq!(flattened.pagination(), Some(window));
        assert_eq!(flattened.children().len(), 1);

        let wrapped = Specification::all()
            .with_pagination(window)
            .or(Specification::by_pet(PetId(1)));
        assert_eq!(wrapped.pagination(), Some(window));
        assert_eq!(wrapped.children()[0].pagination(), None);
    }

    #[test]
    fn other_operand_pagination_is_dropped() {
        let spec = Specification::by_pet(PetId(1))
            .and(Specification::by_pet(PetId(2)).with_pagination(Pagination::new(3, 3)));

        assert_eq!(spec.pagination(), None);
        assert!(spec.children().iter().all(|c| c.pagination().is_none()));
    }

    #[test]
    fn empty_uses_configured_default() {
        let spec = Specification::empty(&SearchConfig::default());
        assert_eq!(spec.operator(), Some(Operator::And));
        assert!(spec.children().is_empty());
        assert_eq!(spec.pagination(), Some(Pagination::new(50, 0)));

        let custom = SearchConfig {
            default_page_size: 25,
            ..SearchConfig::default()
        };
        assert_eq!(
            Specification::empty(&custom).pagination(),
            Some(Pagination::new(25, 0))
        );
    }

    #[test]
    fn empty_and_matches_everything_empty_or_nothing() {
        let records = sample();
        assert_eq!(Specification::all().count(&records), records.len());
        assert_eq!(Specification::none().count(&records), 0);
        assert_eq!(Specification::any_of([]).count(&records), 0);
    }

    #[test]
    fn evaluation_over_collection() {
        let records = sample();
        let spec = Specification::by_customer(CustomerId(42))
            .and(Specification::by_status(AppointmentStatus::Cancelled).or(
                Specification::by_status(AppointmentStatus::Completed),
            ));

        let ids: Vec<i64> = spec.filter(&records).iter().map(|a| a.id.get()).collect();
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn page_reports_total_and_window() {
        let records = sample();
        let spec = Specification::by_customer(CustomerId(42)).with_pagination(Pagination::new(2, 1));

        let page = spec.page(&records);
        assert_eq!(page.total, 3);
        assert_eq!(
            page.items.iter().map(|a| a.id.get()).collect::<Vec<_>>(),
            vec![2, 5]
        );
        assert!(!page.has_more());
    }

    #[test]
    fn offset_beyond_results() {
        let records = sample();
        let spec = Specification::all().with_pagination(Pagination::new(10, 100));
        assert!(spec.filter(&records).is_empty());
        assert_eq!(spec.page(&records).total, 5);
    }

    #[test]
    fn find_any_and_filter_cloned() {
        let records = sample();
        let spec = Specification::by_customer(CustomerId(7));

        assert!(spec.any(&records));
        assert_eq!(spec.find(&records).map(|a| a.id), Some(AppointmentId(3)));
        assert_eq!(spec.filter_cloned(&records), vec![records[2].clone()]);
        assert!(!Specification::by_customer(CustomerId(999)).any(&records));
    }

    #[test]
    fn scheduled_date_and_range() {
        let records = sample();
        assert_eq!(
            Specification::by_scheduled_date(date(2024, 1, 10)).count(&records),
            1
        );
        assert_eq!(
            Specification::by_date_range_days(date(2024, 1, 4), date(2024, 1, 15)).count(&records),
            3
        );
        assert_eq!(
            Specification::by_date_range_days(date(2024, 1, 15), date(2024, 1, 4)).count(&records),
            0
        );
    }

    #[test]
    fn leaf_count_and_depth() {
        let spec = Specification::by_pet(PetId(1))
            .and(Specification::by_pet(PetId(2)))
            .or(Specification::by_pet(PetId(3)));
        assert_eq!(spec.leaf_count(), 3);
        assert_eq!(spec.depth(), 3);
        assert_eq!(Specification::all().depth(), 1);
    }

    #[test]
    fn display() {
        let spec = Specification::by_status(AppointmentStatus::Confirmed)
            .and(Specification::by_customer(CustomerId(42)))
            .or(Specification::by_employee(EmployeeId(7)));
        assert_eq!(
            spec.to_string(),
            "((status = confirmed AND customer = 42) OR employee = 7)"
        );
        assert_eq!(Specification::all().to_string(), "TRUE");
        assert_eq!(Specification::none().to_string(), "FALSE");
        assert_eq!(
            Specification::by_pet(PetId(3))
                .with_pagination(Pagination::new(1, 0))
                .to_string(),
            "pet = 3"
        );
    }

    #[test]
    fn serde_round_trip_preserves_structure() {
        let spec = Specification::by_status(AppointmentStatus::Confirmed)
            .and(Specification::by_scheduled_date(date(2024, 1, 15)))
            .with_pagination(Pagination::new(10, 20));

        let json = serde_json::to_string(&spec).unwrap();
        let back: Specification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
