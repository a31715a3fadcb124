//! XML clause extraction.
//!
//! Evaluates `//x:Node/@Attribute` style paths over a query document in a
//! single streaming pass. Every element whose local name matches and whose
//! namespace resolves to the query namespace contributes its (unprefixed)
//! attribute value, in document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use crate::ast::{Extracted, Facet, NodePath};
use crate::error::{TranslateError, TranslateResult};

/// Extract the values of every path from `document`.
///
/// Paths that match nothing yield an empty sequence, not an error.
///
/// # Example
///
/// ```
/// use hsdsql::ast::{NodePath, QUERY_NAMESPACE};
/// use hsdsql::extractor::extract;
///
/// let xml = r#"<Query xmlns="https://hsdes.intel.com/schemas/2012/Query">
///     <Subject Value="central_firmware.bug"/>
/// </Query>"#;
/// let paths = [NodePath::new("Subject", "Subject", "Value")];
/// let extracted = extract(xml, &paths, QUERY_NAMESPACE).unwrap();
/// assert_eq!(extracted.get("Subject"), ["central_firmware.bug"]);
/// ```
pub fn extract(document: &str, paths: &[NodePath], namespace: &str) -> TranslateResult<Extracted> {
    for path in paths {
        validate_path(path)?;
    }

    let mut extracted = Extracted::default();
    for path in paths {
        extracted.insert(path.name.clone(), Vec::new());
    }

    let mut reader = NsReader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    let mut seen_root = false;

    loop {
        let position = reader.buffer_position() as u64;
        let (resolved, event) = reader
            .read_resolved_event()
            .map_err(|e| TranslateError::parse(position, e.to_string()))?;

        match event {
            Event::Start(ref element) | Event::Empty(ref element) => {
                if depth == 0 && seen_root {
                    return Err(TranslateError::parse(position, "multiple root elements"));
                }
                seen_root = true;

                let in_namespace = match resolved {
                    ResolveResult::Bound(Namespace(ns)) => ns == namespace.as_bytes(),
                    ResolveResult::Unbound => false,
                    ResolveResult::Unknown(prefix) => {
                        return Err(TranslateError::parse(
                            position,
                            format!("unbound namespace prefix '{}'", String::from_utf8_lossy(&prefix)),
                        ));
                    }
                };

                collect(element, in_namespace, paths, &mut extracted, position)?;

                if matches!(event, Event::Start(_)) {
                    depth += 1;
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
            }
            Event::Text(ref text) => {
                if depth == 0 && !text.is_empty() {
                    return Err(TranslateError::parse(position, "text outside the root element"));
                }
                text.unescape()
                    .map_err(|e| TranslateError::parse(position, e.to_string()))?;
            }
            Event::Eof => {
                if depth != 0 {
                    return Err(TranslateError::parse(position, "unexpected end of document"));
                }
                if !seen_root {
                    return Err(TranslateError::parse(position, "document has no root element"));
                }
                break;
            }
            _ => {}
        }
    }

    Ok(extracted)
}

/// Extract all seven query facets plus the CUSTOM expression.
pub fn extract_facets(document: &str, namespace: &str) -> TranslateResult<Extracted> {
    let mut paths: Vec<NodePath> = Facet::ALL.iter().map(Facet::path).collect();
    paths.push(NodePath::custom_expression());
    extract(document, &paths, namespace)
}

fn collect(
    element: &BytesStart<'_>,
    in_namespace: bool,
    paths: &[NodePath],
    extracted: &mut Extracted,
    position: u64,
) -> TranslateResult<()> {
    let local_name = element.local_name().into_inner();

    // Attributes are validated on every element, matched or not.
    for attr in element.attributes() {
        let attr = attr.map_err(|e| TranslateError::parse(position, e.to_string()))?;
        if attr.value.contains(&b'<') {
            return Err(TranslateError::parse(position, "'<' in attribute value"));
        }
        let value = attr
            .unescape_value()
            .map_err(|e| TranslateError::parse(position, e.to_string()))?;
        if !in_namespace {
            continue;
        }
        let key: &[u8] = attr.key.as_ref();
        for path in paths
            .iter()
            .filter(|p| p.node.as_bytes() == local_name && p.attribute.as_bytes() == key)
        {
            extracted.push(&path.name, value.to_string());
        }
    }
    Ok(())
}

fn validate_path(path: &NodePath) -> TranslateResult<()> {
    if path.name.is_empty() {
        return Err(TranslateError::path(path.to_string(), "path has no name"));
    }
    if !is_ncname(&path.node) {
        return Err(TranslateError::path(
            path.to_string(),
            format!("'{}' is not a valid element name", path.node),
        ));
    }
    if !is_ncname(&path.attribute) {
        return Err(TranslateError::path(
            path.to_string(),
            format!("'{}' is not a valid attribute name", path.attribute),
        ));
    }
    Ok(())
}

/// Unprefixed XML name.
fn is_ncname(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::QUERY_NAMESPACE;

    const DOC: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<x:Query xmlns:x="https://hsdes.intel.com/schemas/2012/Query">
  <x:Subject Value="central_firmware.bug"/>
  <x:WhereClause Operand="MATCH ALL">
    <x:Criteria Name="C1">
      <x:CriteriaField Value="central_firmware.bug.status"/>
      <x:FieldOperator Value="equal"/>
      <x:FieldValue Value="open"/>
    </x:Criteria>
    <x:Criteria Name="C2">
      <x:CriteriaField Value="central_firmware.bug.title"/>
      <x:FieldOperator Value="contains"/>
      <x:FieldValue Value="a &amp; b"/>
    </x:Criteria>
  </x:WhereClause>
  <x:DisplayField Fullname="id"/>
  <x:DisplayField Fullname="central_firmware.bug.title"/>
</x:Query>"#;

    #[test]
    fn test_extract_facets_in_document_order() {
        let extracted = extract_facets(DOC, QUERY_NAMESPACE).unwrap();
        assert_eq!(extracted.facet(Facet::WhereClause), ["MATCH ALL"]);
        assert_eq!(extracted.facet(Facet::Subject), ["central_firmware.bug"]);
        assert_eq!(extracted.facet(Facet::Criteria), ["C1", "C2"]);
        assert_eq!(extracted.facet(Facet::FieldOperator), ["equal", "contains"]);
        assert_eq!(extracted.facet(Facet::FieldValue), ["open", "a & b"]);
        assert_eq!(
            extracted.facet(Facet::DisplayField),
            ["id", "central_firmware.bug.title"]
        );
    }

    #[test]
    fn test_missing_path_yields_empty() {
        let paths = [NodePath::custom_expression()];
        let extracted = extract(DOC, &paths, QUERY_NAMESPACE).unwrap();
        assert!(extracted.get("Expression").is_empty());
    }

    #[test]
    fn test_default_namespace() {
        let xml = r#"<Query xmlns="https://hsdes.intel.com/schemas/2012/Query"><WhereClause Operand="CUSTOM" Expression="C1 OR C2"/></Query>"#;
        let paths = [Facet::WhereClause.path(), NodePath::custom_expression()];
        let extracted = extract(xml, &paths, QUERY_NAMESPACE).unwrap();
        assert_eq!(extracted.get("WhereClause"), ["CUSTOM"]);
        assert_eq!(extracted.get("Expression"), ["C1 OR C2"]);
    }

    #[test]
    fn test_other_namespace_ignored() {
        let xml = r#"<Query xmlns="urn:other"><Subject Value="central_firmware.bug"/></Query>"#;
        let extracted = extract_facets(xml, QUERY_NAMESPACE).unwrap();
        assert!(extracted.facet(Facet::Subject).is_empty());
    }

    #[test]
    fn test_malformed_documents() {
        for xml in [
            "",
            "<Query>",
            "<Query></Other>",
            "<Query/><Query/>",
            "<x:Query/>",
            "<Query Value=\"unterminated/>",
            r#"<Query xmlns="https://hsdes.intel.com/schemas/2012/Query">&bogus;</Query>"#,
            r#"<Query xmlns="https://hsdes.intel.com/schemas/2012/Query">a & b</Query>"#,
            r#"<Query xmlns="https://hsdes.intel.com/schemas/2012/Query"><Other v="&bogus;"/></Query>"#,
            r#"<Query xmlns="https://hsdes.intel.com/schemas/2012/Query"><Other v="a<b"/></Query>"#,
            r#"<Query xmlns="https://hsdes.intel.com/schemas/2012/Query"><Subject Value="a<b"/></Query>"#,
        ] {
            let err = extract_facets(xml, QUERY_NAMESPACE).unwrap_err();
            assert!(
                matches!(err, TranslateError::Parse { .. }),
                "expected parse error for {:?}, got {:?}",
                xml,
                err
            );
        }
    }

    #[test]
    fn test_invalid_path() {
        let paths = [NodePath::new("Bad", "Where Clause", "Operand")];
        let err = extract(DOC, &paths, QUERY_NAMESPACE).unwrap_err();
        assert!(matches!(err, TranslateError::PathEvaluation { .. }));

        let paths = [NodePath::new("Bad", "WhereClause", "")];
        let err = extract(DOC, &paths, QUERY_NAMESPACE).unwrap_err();
        assert!(matches!(err, TranslateError::PathEvaluation { .. }));
    }
}
