//! Output rendering for search results.
//!
//! [`OutputMode`] is the `--output` flag. Text is a line per appointment;
//! the structured modes serialize the whole [`Page`].

use std::fmt::Write as _;

use anyhow::Result;
use vetsearch::sql::SqlFilter;
use vetsearch::{Appointment, Page, Pagination, Specification};

/// Controls how results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// One line per appointment with a summary footer
    #[default]
    Text,
    /// Serialize the page as JSON
    Json,
    /// Serialize the page as YAML
    Yaml,
}

impl OutputMode {
    /// Returns true for JSON and YAML.
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml)
    }
}

/// Renders a page of results.
pub fn render(page: &Page<Appointment>, mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Text => Ok(render_text(page)),
        OutputMode::Json => Ok(serde_json::to_string_pretty(page)?),
        OutputMode::Yaml => Ok(serde_yaml::to_string(page)?),
    }
}

fn render_text(page: &Page<Appointment>) -> String {
    let mut out = String::new();
    for appt in &page.items {
        let employee = appt
            .employee_id
            .map(|e| e.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "#{:<6} {}  {:<12} {:<11} customer={} pet={} clinic={} employee={}",
            appt.id.get(),
            appt.scheduled_at.format("%Y-%m-%d %H:%M"),
            appt.service.as_str(),
            appt.status.as_str(),
            appt.customer_id,
            appt.pet_id,
            appt.clinic_id,
            employee,
        );
    }

    let first = page.pagination.map_or(0, |p| p.offset);
    if page.is_empty() {
        let _ = writeln!(out, "no appointments shown ({} matched)", page.total);
    } else {
        let _ = writeln!(
            out,
            "showing {}-{} of {}",
            first + 1,
            first + page.len(),
            page.total
        );
    }
    out
}

/// Describes a specification as an expression and as SQL.
///
/// `window` is the resolved window the search runs with, so the printed
/// statement carries the same `LIMIT`/`OFFSET`.
pub fn explain(spec: &Specification, window: Pagination, mode: OutputMode) -> Result<String> {
    let mut filter = SqlFilter::translate(spec);
    filter.pagination = Some(window);
    if mode.is_structured() {
        let doc = serde_json::json!({
            "expression": spec.to_string(),
            "sql": filter.select("appointments"),
            "params": &filter.params,
        });
        return match mode {
            OutputMode::Yaml => Ok(serde_yaml::to_string(&doc)?),
            _ => Ok(serde_json::to_string_pretty(&doc)?),
        };
    }

    let mut out = String::new();
    let _ = writeln!(out, "expression: {spec}");
    let _ = writeln!(out, "sql:        {}", filter.select("appointments"));
    for (i, param) in filter.params.iter().enumerate() {
        let _ = writeln!(out, "  ${} = {}", i + 1, serde_json::to_string(param)?);
    }
    Ok(out)
}
