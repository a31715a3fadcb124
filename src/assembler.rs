//! WHERE-clause assembly.
//!
//! Builds the boolean skeleton from the match mode, then replaces each
//! criterion name with its `field operator value` condition.

use tracing::debug;

use crate::ast::{Criterion, MatchMode};
use crate::error::{TranslateError, TranslateResult};

/// A piece of the working expression. Resolved pieces are never searched
/// again, so a condition that happens to contain a criterion name cannot be
/// rewritten by a later substitution.
#[derive(Debug)]
enum Segment {
    Raw(String),
    Resolved(String),
}

/// Assemble the WHERE expression.
///
/// The four criteria slices are zipped positionally and must have equal
/// length. Substitutions happen in extraction order, one occurrence each.
///
/// # Example
///
/// ```
/// use hsdsql::assembler::assemble;
/// use hsdsql::ast::MatchMode;
///
/// let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<_>>();
/// let sql = assemble(
///     MatchMode::All,
///     &s(&["C1", "C2"]),
///     &s(&["f1", "f2"]),
///     &s(&["=", ">"]),
///     &s(&["(v1)", "(v2)"]),
///     None,
/// )
/// .unwrap();
/// assert_eq!(sql, "f1 = (v1) AND f2 > (v2)");
/// ```
pub fn assemble(
    mode: MatchMode,
    names: &[String],
    fields: &[String],
    operators: &[String],
    values: &[String],
    custom_expression: Option<&str>,
) -> TranslateResult<String> {
    let n = names.len();
    if fields.len() != n || operators.len() != n || values.len() != n {
        return Err(TranslateError::CriteriaMismatch {
            names: n,
            fields: fields.len(),
            operators: operators.len(),
            values: values.len(),
        });
    }

    let skeleton = match mode {
        MatchMode::All => names.join(" AND "),
        MatchMode::Any => names.join(" OR "),
        MatchMode::Custom => custom_expression
            .ok_or(TranslateError::MissingExpression)?
            .to_string(),
    };
    debug!(?mode, %skeleton, "where skeleton");

    let mut segments = vec![Segment::Raw(skeleton)];
    for (((name, field), operator), value) in names.iter().zip(fields).zip(operators).zip(values) {
        let criterion = Criterion {
            name,
            field,
            operator,
            value,
        };
        substitute(&mut segments, &criterion)?;
    }

    Ok(join(&segments))
}

fn substitute(segments: &mut Vec<Segment>, criterion: &Criterion<'_>) -> TranslateResult<()> {
    let hit = segments.iter().enumerate().find_map(|(i, segment)| match segment {
        Segment::Raw(text) => find_token(text, criterion.name).map(|at| (i, at)),
        Segment::Resolved(_) => None,
    });

    let Some((index, at)) = hit else {
        return Err(TranslateError::UnresolvedCriterion {
            name: criterion.name.to_string(),
            expression: join(segments),
        });
    };

    let Segment::Raw(text) = segments.remove(index) else {
        unreachable!("only raw segments are searched");
    };
    let condition = criterion.to_condition();
    debug!(name = criterion.name, %condition, "criterion resolved");

    let before = &text[..at];
    let after = &text[at + criterion.name.len()..];
    let mut replacement = Vec::with_capacity(3);
    if !before.is_empty() {
        replacement.push(Segment::Raw(before.to_string()));
    }
    replacement.push(Segment::Resolved(condition));
    if !after.is_empty() {
        replacement.push(Segment::Raw(after.to_string()));
    }
    segments.splice(index..index, replacement);
    Ok(())
}

/// Byte offset of the first occurrence of `token` not embedded in a longer
/// identifier (`C1` does not match inside `C10`).
fn find_token(haystack: &str, token: &str) -> Option<usize> {
    if token.is_empty() {
        return None;
    }
    haystack.match_indices(token).map(|(at, _)| at).find(|&at| {
        let before = haystack[..at].chars().next_back();
        let after = haystack[at + token.len()..].chars().next();
        !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
    })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn join(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| match s {
            Segment::Raw(text) | Segment::Resolved(text) => text.as_str(),
        })
        .collect()
}
