//! Per-dialect token normalization of extracted facet values.

use crate::ast::{Dialect, Facet};

/// Operator that keeps its spaces in the HSDES dialect.
const HSDES_SPACED_OPERATORS: &[&str] = &["not in"];

/// Normalize every value of `facet` for `dialect`.
///
/// ```
/// use hsdsql::ast::{Dialect, Facet};
/// use hsdsql::normalizer::normalize;
///
/// let fields = vec!["central_firmware.bug.title".to_string()];
/// assert_eq!(normalize(Facet::CriteriaField, &fields, Dialect::Dps), ["`title`"]);
/// ```
pub fn normalize(facet: Facet, values: &[String], dialect: Dialect) -> Vec<String> {
    values
        .iter()
        .map(|value| normalize_value(facet, value, dialect))
        .collect()
}

fn normalize_value(facet: Facet, value: &str, dialect: Dialect) -> String {
    match (facet, dialect) {
        (Facet::CriteriaField | Facet::DisplayField, Dialect::Dps) => quote_column(value),
        (Facet::FieldOperator, Dialect::Hsdes) => underscore_operator(value),
        (Facet::FieldValue, _) => format!("({})", value),
        _ => value.to_string(),
    }
}

/// `schema.table.column` -> `` `column` ``.
fn quote_column(value: &str) -> String {
    if is_backtick_quoted(value) && !value.contains('.') {
        return value.to_string();
    }
    let bare = value.rsplit('.').next().unwrap_or(value).trim_matches('`');
    format!("`{}`", bare)
}

fn is_backtick_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('`') && value.ends_with('`')
}

/// `greater than` -> `greater_than`.
fn underscore_operator(value: &str) -> String {
    if HSDES_SPACED_OPERATORS.contains(&value) {
        value.to_string()
    } else {
        value.replace(' ', "_")
    }
}
