//! Turns command-line filters into a specification and runs it.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use vetsearch::{
    Appointment, AppointmentId, ClinicId, CustomerId, EmployeeId, MemoryRepository, Operator,
    Page, Pagination, PetId, SearchConfig, SearchRepository, Specification,
};

use crate::args::{FilterArgs, WindowArgs};

/// Builds the specification described by the filter flags.
///
/// No filters gives [`Specification::all`]. A single filter is returned as
/// a bare field spec.
pub fn build_spec(filters: &FilterArgs) -> Specification {
    let mut leaves = Vec::new();

    if let Some(id) = filters.id {
        leaves.push(Specification::by_id(AppointmentId(id)));
    }
    if let Some(customer) = filters.customer {
        leaves.push(Specification::by_customer(CustomerId(customer)));
    }
    if let Some(employee) = filters.employee {
        leaves.push(Specification::by_employee(EmployeeId(employee)));
    }
    if let Some(pet) = filters.pet {
        leaves.push(Specification::by_pet(PetId(pet)));
    }
    if let Some(service) = filters.service {
        leaves.push(Specification::by_service(service));
    }
    if let Some(status) = filters.status {
        leaves.push(Specification::by_status(status));
    }
    if let Some(clinic) = filters.clinic {
        leaves.push(Specification::by_clinic(ClinicId(clinic)));
    }
    if let (Some(from), Some(to)) = (filters.from, filters.to) {
        leaves.push(Specification::by_date_range_days(from, to));
    }
    if let Some(day) = filters.on {
        leaves.push(Specification::by_scheduled_date(day));
    }

    let operator = if filters.any {
        Operator::Or
    } else {
        Operator::And
    };

    let mut leaves = leaves.into_iter();
    match leaves.next() {
        Some(first) => leaves.fold(first, |spec, leaf| spec.combine(operator, leaf)),
        None => Specification::all(),
    }
}

/// The window requested on the command line, if any.
///
/// `--page` is sized by `--limit` when given, else by the configured default.
/// The size is clamped to the configured maximum before a page offset is
/// derived from it, so every page number stays reachable.
pub fn requested_window(window: &WindowArgs, config: &SearchConfig) -> Option<Pagination> {
    let requested = window.limit.unwrap_or(config.default_page_size);
    let size = requested.min(config.max_page_size);
    if size < requested {
        warn!(
            requested,
            max = config.max_page_size,
            "Page size above maximum, clamping"
        );
    }
    match (window.page, window.limit, window.offset) {
        (Some(page), _, _) => Some(Pagination::page(page, size)),
        (None, None, None) => None,
        (None, _, offset) => Some(Pagination::new(size, offset.unwrap_or(0))),
    }
}

/// Reads appointments from a JSON array.
pub fn load_appointments(path: &Path) -> Result<Vec<Appointment>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let appointments: Vec<Appointment> = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse appointments in {}", path.display()))?;
    info!(path = %path.display(), count = appointments.len(), "Appointments loaded");
    Ok(appointments)
}

/// Runs `spec` against `appointments`.
pub fn run(
    spec: &Specification,
    appointments: Vec<Appointment>,
    config: SearchConfig,
) -> Result<Page<Appointment>> {
    let repo = MemoryRepository::with_records(config, appointments);
    debug!(records = repo.len(), %spec, "Running search");
    let page = repo.search(spec)?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use vetsearch::AppointmentStatus;

    #[test]
    fn no_filters_matches_everything() {
        let spec = build_spec(&FilterArgs::default());
        assert_eq!(spec, Specification::all());
    }

    #[test]
    fn single_filter_stays_a_field_spec() {
        let filters = FilterArgs {
            customer: Some(42),
            ..Default::default()
        };
        assert_eq!(
            build_spec(&filters),
            Specification::by_customer(CustomerId(42))
        );
    }

    #[test]
    fn filters_combine_flat_with_and() {
        let filters = FilterArgs {
            customer: Some(42),
            status: Some(AppointmentStatus::Confirmed),
            from: NaiveDate::from_ymd_opt(2024, 1, 1),
            to: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };
        let spec = build_spec(&filters);

        assert_eq!(spec.operator(), Some(Operator::And));
        assert_eq!(spec.children().len(), 3);
        assert_eq!(spec.depth(), 2);
    }

    #[test]
    fn any_combines_with_or() {
        let filters = FilterArgs {
            customer: Some(42),
            employee: Some(7),
            any: true,
            ..Default::default()
        };
        let spec = build_spec(&filters);

        assert_eq!(spec.operator(), Some(Operator::Or));
        assert_eq!(spec.children().len(), 2);
    }

    #[test]
    fn window_defaults_to_none() {
        let config = SearchConfig::default();
        assert_eq!(requested_window(&WindowArgs::default(), &config), None);
    }

    #[test]
    fn page_uses_configured_size() {
        let config = SearchConfig::default();
        let window = WindowArgs {
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(
            requested_window(&window, &config),
            Some(Pagination::new(config.default_page_size, 2 * config.default_page_size))
        );
    }

    #[test]
    fn oversized_page_is_clamped_before_offset() {
        let config = SearchConfig::default();
        let window = WindowArgs {
            page: Some(2),
            limit: Some(1000),
            ..Default::default()
        };

        let requested = requested_window(&window, &config);
        let expected = Pagination::new(config.max_page_size, config.max_page_size);
        assert_eq!(requested, Some(expected));
        assert_eq!(config.resolve(requested).unwrap(), expected);
    }

    #[test]
    fn limit_and_offset() {
        let config = SearchConfig::default();
        let window = WindowArgs {
            limit: Some(10),
            offset: Some(20),
            ..Default::default()
        };
        assert_eq!(
            requested_window(&window, &config),
            Some(Pagination::new(10, 20))
        );
    }

    #[test]
    fn loads_and_searches_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("appointments.json");
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "customer_id": 42, "employee_id": 7, "pet_id": 3, "clinic_id": 1,
                 "service": "vaccination", "status": "confirmed",
                 "scheduled_at": "2024-01-15T10:00:00Z", "reason": "booster"},
                {"id": 2, "customer_id": 43, "pet_id": 4, "clinic_id": 1,
                 "service": "checkup", "status": "cancelled",
                 "scheduled_at": "2024-01-16T10:00:00Z"}
            ]"#,
        )
        .unwrap();

        let appointments = load_appointments(&path).unwrap();
        assert_eq!(appointments.len(), 2);
        assert_eq!(appointments[1].employee_id, None);

        let spec = Specification::by_status(AppointmentStatus::Confirmed);
        let page = run(&spec, appointments, SearchConfig::default()).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, AppointmentId(1));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_appointments(Path::new("/nonexistent/appointments.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/appointments.json"));
    }
}
