//! Translation engine.
//!
//! Runs extraction, normalization, assembly and rendering over one query
//! document. Every call is independent; the engine holds only the namespace
//! it matches elements against.

use tracing::debug;

use crate::assembler::assemble;
use crate::ast::{Dialect, Extracted, Facet, MatchMode, QUERY_NAMESPACE};
use crate::error::{TranslateError, TranslateResult};
use crate::extractor::extract_facets;
use crate::fetcher::QueryFetcher;
use crate::normalizer::normalize;
use crate::transpiler::render;

/// Translates query documents into SQL.
#[derive(Debug, Clone)]
pub struct Translator {
    namespace: String,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(QUERY_NAMESPACE)
    }
}

impl Translator {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Translate a query document already in hand.
    pub fn translate(&self, document: &str, dialect: Dialect) -> TranslateResult<String> {
        let extracted = extract_facets(document, &self.namespace)?;
        debug!(?extracted, "extracted facets");
        self.translate_extracted(&extracted, dialect)
    }

    /// Fetch record `id` and translate it. Fetch failures produce no SQL.
    pub async fn fetch_and_translate<F: QueryFetcher>(
        &self,
        fetcher: &F,
        id: &str,
        dialect: Dialect,
    ) -> TranslateResult<String> {
        let document = fetcher.fetch(id).await?;
        self.translate(&document, dialect)
    }

    fn translate_extracted(&self, extracted: &Extracted, dialect: Dialect) -> TranslateResult<String> {
        let mode = MatchMode::from_operands(extracted.facet(Facet::WhereClause))?;
        let custom_expression = match mode {
            MatchMode::Custom => extracted.get("Expression").first().map(String::as_str),
            MatchMode::All | MatchMode::Any => None,
        };

        let fields = normalize(Facet::CriteriaField, extracted.facet(Facet::CriteriaField), dialect);
        let operators = normalize(Facet::FieldOperator, extracted.facet(Facet::FieldOperator), dialect);
        let values = normalize(Facet::FieldValue, extracted.facet(Facet::FieldValue), dialect);
        let display = normalize(Facet::DisplayField, extracted.facet(Facet::DisplayField), dialect);

        let where_clause = assemble(
            mode,
            extracted.facet(Facet::Criteria),
            &fields,
            &operators,
            &values,
            custom_expression,
        )?;
        debug!(%where_clause, "assembled where clause");

        let subject = extracted
            .facet(Facet::Subject)
            .first()
            .ok_or(TranslateError::MissingSubject)?;

        render(dialect, subject, &display, &where_clause)
    }
}
