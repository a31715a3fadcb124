//! Query model shared by the translation stages.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::TranslateError;

/// XML namespace of HSD-ES query documents.
pub const QUERY_NAMESPACE: &str = "https://hsdes.intel.com/schemas/2012/Query";

/// Target SQL dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// MySQL-flavoured DPS warehouse: backtick identifiers, aliased tables.
    Dps,
    /// HSD-ES native query language: tenant/subject predicates.
    Hsdes,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Dps => write!(f, "dps"),
            Dialect::Hsdes => write!(f, "hsdes"),
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dps" => Ok(Dialect::Dps),
            "hsdes" => Ok(Dialect::Hsdes),
            other => Err(format!("unknown dialect '{}', expected dps or hsdes", other)),
        }
    }
}

/// One semantic facet of a query document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    WhereClause,
    Subject,
    Criteria,
    CriteriaField,
    FieldOperator,
    FieldValue,
    DisplayField,
}

impl Facet {
    pub const ALL: [Facet; 7] = [
        Facet::WhereClause,
        Facet::Subject,
        Facet::Criteria,
        Facet::CriteriaField,
        Facet::FieldOperator,
        Facet::FieldValue,
        Facet::DisplayField,
    ];

    /// Element name, which is also the facet's name.
    pub fn name(&self) -> &'static str {
        match self {
            Facet::WhereClause => "WhereClause",
            Facet::Subject => "Subject",
            Facet::Criteria => "Criteria",
            Facet::CriteriaField => "CriteriaField",
            Facet::FieldOperator => "FieldOperator",
            Facet::FieldValue => "FieldValue",
            Facet::DisplayField => "DisplayField",
        }
    }

    /// Attribute holding the facet's values.
    pub fn attribute(&self) -> &'static str {
        match self {
            Facet::WhereClause => "Operand",
            Facet::Criteria => "Name",
            Facet::DisplayField => "Fullname",
            Facet::Subject | Facet::CriteriaField | Facet::FieldOperator | Facet::FieldValue => {
                "Value"
            }
        }
    }

    pub fn path(&self) -> NodePath {
        NodePath::new(self.name(), self.name(), self.attribute())
    }
}

/// Locates every `attribute` value on elements named `node`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath {
    pub name: String,
    pub node: String,
    pub attribute: String,
}

impl NodePath {
    pub fn new(name: impl Into<String>, node: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node: node.into(),
            attribute: attribute.into(),
        }
    }

    /// The `WhereClause/@Expression` path read for CUSTOM match mode.
    pub fn custom_expression() -> Self {
        Self::new("Expression", "WhereClause", "Expression")
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "//{}/@{}", self.node, self.attribute)
    }
}

/// Extracted values keyed by path name, each in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extracted {
    values: HashMap<String, Vec<String>>,
}

impl Extracted {
    /// Values for a path name; empty when the path matched nothing.
    pub fn get(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn facet(&self, facet: Facet) -> &[String] {
        self.get(facet.name())
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.values.insert(name.into(), values);
    }

    pub(crate) fn push(&mut self, name: &str, value: String) {
        self.values.entry(name.to_string()).or_default().push(value);
    }
}

/// Top-level boolean combinator of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// `MATCH ALL`: criteria joined with AND.
    All,
    /// `MATCH ANY`: criteria joined with OR.
    Any,
    /// `CUSTOM`: a raw boolean expression over criteria names.
    Custom,
}

impl MatchMode {
    /// Resolve the `WhereClause` facet. It must hold exactly one known operand.
    pub fn from_operands(operands: &[String]) -> Result<Self, TranslateError> {
        match operands {
            [one] => one.parse(),
            _ => Err(TranslateError::UnsupportedMatchMode(operands.join(","))),
        }
    }
}

impl FromStr for MatchMode {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MATCH ALL" => Ok(MatchMode::All),
            "MATCH ANY" => Ok(MatchMode::Any),
            "CUSTOM" => Ok(MatchMode::Custom),
            other => Err(TranslateError::UnsupportedMatchMode(other.to_string())),
        }
    }
}

/// One named filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Criterion<'a> {
    pub name: &'a str,
    pub field: &'a str,
    pub operator: &'a str,
    pub value: &'a str,
}

impl Criterion<'_> {
    /// `field operator value`, single-space separated.
    pub fn to_condition(&self) -> String {
        format!("{} {} {}", self.field, self.operator, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("dps".parse::<Dialect>(), Ok(Dialect::Dps));
        assert_eq!("HSDES".parse::<Dialect>(), Ok(Dialect::Hsdes));
        assert!("mysql".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_facet_paths() {
        assert_eq!(Facet::WhereClause.path().to_string(), "//WhereClause/@Operand");
        assert_eq!(Facet::DisplayField.path().to_string(), "//DisplayField/@Fullname");
        assert_eq!(Facet::Criteria.path().attribute, "Name");
        assert_eq!(Facet::ALL.len(), 7);
    }

    #[test]
    fn test_match_mode_requires_single_operand() {
        assert_eq!(
            MatchMode::from_operands(&["MATCH ANY".to_string()]).unwrap(),
            MatchMode::Any
        );
        assert!(matches!(
            MatchMode::from_operands(&[]),
            Err(TranslateError::UnsupportedMatchMode(_))
        ));
        assert!(matches!(
            MatchMode::from_operands(&["MATCH ALL".to_string(), "CUSTOM".to_string()]),
            Err(TranslateError::UnsupportedMatchMode(_))
        ));
        assert!("match all".parse::<MatchMode>().is_err());
    }

    #[test]
    fn test_extracted_missing_is_empty() {
        let mut extracted = Extracted::default();
        extracted.insert("Subject", vec!["central_firmware.bug".to_string()]);
        assert_eq!(extracted.facet(Facet::Subject), ["central_firmware.bug"]);
        assert!(extracted.facet(Facet::Criteria).is_empty());
    }
}
