//! # hsdsql
//!
//! Translates HSD-ES XML query definitions into SQL for the DPS warehouse or
//! the HSD-ES native query dialect.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use hsdsql::prelude::*;
//!
//! let fetcher = HttpFetcher::new(&Config::load(None)?.api)?;
//! let sql = Translator::default()
//!     .fetch_and_translate(&fetcher, "1508334611", Dialect::Dps)
//!     .await?;
//! // => "SELECT `title` FROM `calc_bug` WHERE `status` = (open);"
//! ```
//!
//! ## Pipeline
//!
//! | Stage        | Module         | Produces                       |
//! |--------------|----------------|--------------------------------|
//! | Fetch        | [`fetcher`]    | query XML                      |
//! | Extract      | [`extractor`]  | attribute values per facet     |
//! | Normalize    | [`normalizer`] | dialect-quoted tokens          |
//! | Assemble     | [`assembler`]  | WHERE expression               |
//! | Render       | [`transpiler`] | SQL text                       |

pub mod assembler;
pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod normalizer;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::{Dialect, Facet, MatchMode, NodePath, QUERY_NAMESPACE};
    pub use crate::config::Config;
    pub use crate::engine::Translator;
    pub use crate::error::*;
    pub use crate::fetcher::{HttpFetcher, QueryFetcher};
    pub use crate::translate;
}

/// Translate a query document using the default namespace.
///
/// # Example
///
/// ```
/// use hsdsql::{ast::Dialect, translate};
///
/// let xml = r#"<Query xmlns="https://hsdes.intel.com/schemas/2012/Query">
///   <Subject Value="central_firmware.bug"/>
///   <WhereClause Operand="CUSTOM" Expression="C1">
///     <Criteria Name="C1">
///       <CriteriaField Value="central_firmware.bug.status"/>
///       <FieldOperator Value="equal"/>
///       <FieldValue Value="open"/>
///     </Criteria>
///   </WhereClause>
///   <DisplayField Fullname="central_firmware.bug.title"/>
/// </Query>"#;
///
/// let sql = translate(xml, Dialect::Dps).unwrap();
/// assert_eq!(sql, "SELECT `title` FROM `calc_bug` WHERE `status` = (open);");
/// ```
pub fn translate(document: &str, dialect: ast::Dialect) -> error::TranslateResult<String> {
    engine::Translator::default().translate(document, dialect)
}
