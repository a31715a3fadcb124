//! DPS dialect rendering.

use pretty_assertions::assert_eq;

use crate::ast::Dialect;
use crate::transpiler::render;
use crate::transpiler::sql::dps::DPS_SUBSTITUTIONS;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_table_alias_and_like_wrapping() {
    let sql = render(
        Dialect::Dps,
        "central_firmware.bug",
        &strings(&["`title`"]),
        "`title` contains (boot hang)",
    )
    .unwrap();
    assert_eq!(
        sql,
        "SELECT `title` FROM `calc_bug` WHERE `title` like (%boot hang%);"
    );
}

#[test]
fn test_not_like_and_id_alias() {
    let sql = render(
        Dialect::Dps,
        "central_firmware.test_case",
        &strings(&["`id`", "`title`"]),
        "`id` equal (42) AND `title` does not contain ('wip')",
    )
    .unwrap();
    assert_eq!(
        sql,
        "SELECT `hsd_id`,`title` FROM `calc_tc` WHERE `hsd_id` = (42) AND `title` not like ('%wip%');"
    );
}

#[test]
fn test_comparison_phrases_longest_first() {
    let sql = render(
        Dialect::Dps,
        "central_firmware.milestone",
        &strings(&["`name`"]),
        "`a` greater than or equal to (1) AND `b` less than or equal to (2) AND `c` greater than (3) AND `d` less than (4)",
    )
    .unwrap();
    assert_eq!(
        sql,
        "SELECT `name` FROM `test_cycle` WHERE `a` >= (1) AND `b` <= (2) AND `c` > (3) AND `d` < (4);"
    );
}

#[test]
fn test_every_key_is_substituted() {
    let where_clause = DPS_SUBSTITUTIONS
        .iter()
        .map(|(key, _)| format!("{} (x)", key))
        .collect::<Vec<_>>()
        .join(" AND ");
    let sql = render(Dialect::Dps, "central_firmware.bug", &strings(&["`id`"]), &where_clause).unwrap();
    for (key, _) in DPS_SUBSTITUTIONS {
        assert!(!sql.contains(key), "{} still present in {}", key, sql);
    }
}

#[test]
fn test_unknown_subject_kept() {
    let sql = render(Dialect::Dps, "other.table", &strings(&["`a`"]), "`a` = (1)").unwrap();
    assert_eq!(sql, "SELECT `a` FROM `other.table` WHERE `a` = (1);");
}
