//! SQL rendering for assembled queries.
//!
//! Each dialect owns a [`SqlGenerator`] that turns the subject, display
//! fields and WHERE expression into the final statement.

pub mod dialect;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use crate::ast::Dialect;
use crate::error::TranslateResult;
pub use traits::{SqlGenerator, SubstitutionRules};

/// The pieces of a SELECT statement, already normalized for the dialect.
#[derive(Debug, Clone, Copy)]
pub struct SelectParts<'a> {
    pub subject: &'a str,
    pub fields: &'a [String],
    pub where_clause: &'a str,
}

impl SelectParts<'_> {
    /// Display fields joined with `,`.
    pub fn field_list(&self) -> String {
        self.fields.join(",")
    }
}

/// Render a SELECT statement for `dialect`.
pub fn render(
    dialect: Dialect,
    subject: &str,
    fields: &[String],
    where_clause: &str,
) -> TranslateResult<String> {
    let parts = SelectParts {
        subject,
        fields,
        where_clause,
    };
    dialect.generator().render(&parts)
}
