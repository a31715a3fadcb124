//! HSDES dialect rendering.

use pretty_assertions::assert_eq;

use crate::ast::Dialect;
use crate::error::TranslateError;
use crate::transpiler::render;

#[test]
fn test_tenant_and_subject_predicates() {
    let fields = vec!["id".to_string(), "central_firmware.bug.title".to_string()];
    let sql = render(Dialect::Hsdes, "central_firmware.bug", &fields, "id = (1234)").unwrap();
    assert_eq!(
        sql,
        "SELECT id,central_firmware.bug.title WHERE tenant =central_firmware AND subject =bug AND id = (1234)"
    );
}

#[test]
fn test_no_dps_substitution() {
    let fields = vec!["id".to_string()];
    let sql = render(Dialect::Hsdes, "central_firmware.bug", &fields, "title contains (x)").unwrap();
    assert!(sql.ends_with("AND title contains (x)"));
}

#[test]
fn test_malformed_subject() {
    for subject in ["central_firmwarebug", "a.b.c", ".bug", "central_firmware."] {
        let err = render(Dialect::Hsdes, subject, &[], "id = (1)").unwrap_err();
        assert!(
            matches!(err, TranslateError::MalformedSubject(ref s) if s == subject),
            "unexpected {:?}",
            err
        );
    }
}
