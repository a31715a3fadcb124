use std::sync::LazyLock;

use regex::Regex;

use crate::error::TranslateResult;
use crate::transpiler::traits::{SqlGenerator, SubstitutionRules};
use crate::transpiler::SelectParts;

/// DPS table aliases and operator phrases.
pub const DPS_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("`central_firmware.bug`", "`calc_bug`"),
    ("`central_firmware.feature`", "`calc_feature`"),
    ("`central_firmware.test_case_definition`", "`calc_tcd`"),
    ("`central_firmware.test_case`", "`calc_tc`"),
    ("`central_firmware.test_result`", "`calc_tr`"),
    ("`central_firmware.integration_step_event`", "`calc_ise`"),
    ("`central_firmware.milestone`", "`test_cycle`"),
    ("`id`", "`hsd_id`"),
    ("contains", "like"),
    ("does not contain", "not like"),
    ("greater than or equal to", ">="),
    ("less than or equal to", "<="),
    ("greater than", ">"),
    ("less than", "<"),
    ("equal", "="),
];

/// Right-hand operand of `like` / `not like`, enclosed in parentheses or quotes.
static LIKE_OPERAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\blike (?P<open>[(']+)(?P<operand>.*?)(?P<close>[)']+)").unwrap()
});

/// MySQL-flavoured DPS warehouse generator.
pub struct DpsGenerator {
    rules: SubstitutionRules,
}

impl DpsGenerator {
    pub fn new() -> Self {
        Self {
            rules: SubstitutionRules::new(DPS_SUBSTITUTIONS),
        }
    }

    /// `like (abc)` -> `like (%abc%)`.
    fn wrap_like_operands(sql: &str) -> String {
        LIKE_OPERAND
            .replace_all(sql, "like ${open}%${operand}%${close}")
            .into_owned()
    }
}

impl SqlGenerator for DpsGenerator {
    fn render(&self, parts: &SelectParts<'_>) -> TranslateResult<String> {
        let sql = format!(
            "SELECT {} FROM `{}` WHERE {};",
            parts.field_list(),
            parts.subject,
            parts.where_clause
        );
        let sql = self.rules.apply(&sql);
        let sql = Self::wrap_like_operands(&sql);
        Ok(sql.trim().to_string())
    }
}
