//! Translation of specifications into parameterized SQL.
//!
//! Values are never inlined: every comparison value becomes a positional
//! placeholder (`$1`, `$2`, ...) with a typed [`SqlParam`]. Column names
//! come from a fixed mapping of [`Field`]s.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

use crate::field::{Field, FieldSpec};
use crate::pagination::Pagination;
use crate::range::DateRange;
use crate::spec::Specification;

/// A bound query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    BigInt(i64),
    Text(&'static str),
    Timestamp(DateTime<Utc>),
}

/// Column holding `field` in the appointments table.
pub fn column(field: Field) -> &'static str {
    match field {
        Field::Id => "id",
        Field::Customer => "customer_id",
        Field::Employee => "employee_id",
        Field::Pet => "pet_id",
        Field::Service => "service_type",
        Field::Status => "status",
        Field::Clinic => "clinic_id",
        Field::ScheduledAt => "scheduled_at",
    }
}

/// A WHERE clause with its parameters and the root pagination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SqlFilter {
    /// Boolean SQL expression, without the `WHERE` keyword.
    pub condition: String,
    /// Parameters in placeholder order.
    pub params: Vec<SqlParam>,
    /// Window taken from the outermost specification.
    pub pagination: Option<Pagination>,
}

impl SqlFilter {
    /// Translates a specification.
    pub fn translate(spec: &Specification) -> Self {
        let mut params = Vec::new();
        let condition = translate_rec(spec, &mut params);
        trace!(%condition, params = params.len(), "Specification translated to SQL");
        SqlFilter {
            condition,
            params,
            pagination: spec.pagination(),
        }
    }

    /// Builds a full `SELECT` against `table`.
    ///
    /// `table` is inserted verbatim and must be a trusted identifier.
    pub fn select(&self, table: &str) -> String {
        let mut sql = format!("SELECT * FROM {table} WHERE {}", self.condition);
        if let Some(window) = self.pagination {
            sql.push_str(&format!(" LIMIT {} OFFSET {}", window.limit, window.offset));
        }
        sql
    }
}

fn translate_rec(spec: &Specification, params: &mut Vec<SqlParam>) -> String {
    match spec {
        Specification::Field(field) => translate_field(field, params),
        Specification::Composite(composite) => {
            let children = composite.children();
            match children {
                [] if composite.operator().identity() => "TRUE".to_string(),
                [] => "FALSE".to_string(),
                [only] => translate_rec(only, params),
                _ => {
                    let joiner = format!(" {} ", composite.operator());
                    let parts: Vec<String> = children
                        .iter()
                        .map(|child| translate_rec(child, params))
                        .collect();
                    format!("({})", parts.join(&joiner))
                }
            }
        }
    }
}

fn translate_field(spec: &FieldSpec, params: &mut Vec<SqlParam>) -> String {
    let col = column(spec.field());
    let mut bind = |param: SqlParam| {
        params.push(param);
        format!("${}", params.len())
    };

    match spec {
        FieldSpec::Id(v) => format!("{col} = {}", bind(SqlParam::BigInt(v.get()))),
        FieldSpec::Customer(v) => format!("{col} = {}", bind(SqlParam::BigInt(v.get()))),
        FieldSpec::Employee(v) => format!("{col} = {}", bind(SqlParam::BigInt(v.get()))),
        FieldSpec::Pet(v) => format!("{col} = {}", bind(SqlParam::BigInt(v.get()))),
        FieldSpec::Clinic(v) => format!("{col} = {}", bind(SqlParam::BigInt(v.get()))),
        FieldSpec::Service(v) => format!("{col} = {}", bind(SqlParam::Text(v.as_str()))),
        FieldSpec::Status(v) => format!("{col} = {}", bind(SqlParam::Text(v.as_str()))),
        FieldSpec::DateRange(range) => {
            let start = bind(SqlParam::Timestamp(range.start));
            let end = bind(SqlParam::Timestamp(range.end));
            format!("{col} BETWEEN {start} AND {end}")
        }
        // UTC day bounds, independent of the session time zone
        FieldSpec::ScheduledOn(day) => {
            let range = DateRange::day(*day);
            let start = bind(SqlParam::Timestamp(range.start));
            let end = bind(SqlParam::Timestamp(range.end));
            format!("{col} BETWEEN {start} AND {end}")
        }
    }
}
