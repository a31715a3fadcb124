//! Error types for hsdsql.

use thiserror::Error;

/// The main error type for a single query translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The query document could not be fetched.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The query document is not well-formed XML.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: u64, message: String },

    /// A node path could not be evaluated.
    #[error("Invalid path '{path}': {message}")]
    PathEvaluation { path: String, message: String },

    /// The top-level match mode is not MATCH ALL, MATCH ANY or CUSTOM.
    #[error("Unsupported match mode: {0:?}. Expected: MATCH ALL, MATCH ANY or CUSTOM")]
    UnsupportedMatchMode(String),

    /// A criterion name has no remaining occurrence in the where expression.
    #[error("Criterion '{name}' not found in where expression '{expression}'")]
    UnresolvedCriterion { name: String, expression: String },

    /// The criteria facets disagree on the number of criteria.
    #[error(
        "Criteria count mismatch: {names} names, {fields} fields, {operators} operators, {values} values"
    )]
    CriteriaMismatch {
        names: usize,
        fields: usize,
        operators: usize,
        values: usize,
    },

    /// HSDES subjects must look like `tenant.subject`.
    #[error("Malformed subject '{0}': expected exactly one '.' between tenant and subject")]
    MalformedSubject(String),

    /// The document declares no subject.
    #[error("Query has no subject")]
    MissingSubject,

    /// CUSTOM match mode without an expression.
    #[error("CUSTOM match mode without an Expression attribute")]
    MissingExpression,
}

impl TranslateError {
    /// Create a parse error at the given byte position.
    pub fn parse(position: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create a path evaluation error.
    pub fn path(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PathEvaluation {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Failure of the query fetcher. The translation core only propagates these.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport, TLS or timeout failure.
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Record {id}: HTTP {status}: {message}")]
    Status {
        id: String,
        status: u16,
        message: String,
    },

    /// The response carried no query XML for the record.
    #[error("Record {0}: response has no query.query_xml field")]
    MissingXml(String),

    /// The response body was not the expected JSON.
    #[error("Record {id}: invalid response body: {message}")]
    Decode { id: String, message: String },

    /// Local query file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Result type alias for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;
