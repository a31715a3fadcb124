//! Renderer trait and the ordered substitution pass.

use crate::error::TranslateResult;
use crate::transpiler::SelectParts;

/// Trait for dialect-specific SQL generation.
pub trait SqlGenerator {
    /// Render the complete statement.
    fn render(&self, parts: &SelectParts<'_>) -> TranslateResult<String>;
}

/// A fixed token substitution table, applied longest key first.
///
/// Each key is replaced everywhere in one pass before the next key is
/// considered. Multi-word phrases such as `greater than or equal to` sort
/// ahead of their prefixes (`greater than`, `equal`).
#[derive(Debug, Clone)]
pub struct SubstitutionRules {
    rules: Vec<(&'static str, &'static str)>,
}

impl SubstitutionRules {
    pub fn new(table: &[(&'static str, &'static str)]) -> Self {
        let mut rules = table.to_vec();
        // Stable: equal-length keys keep table order.
        rules.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self { rules }
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, (key, replacement)| acc.replace(key, replacement))
    }
}
