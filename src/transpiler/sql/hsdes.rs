use crate::error::{TranslateError, TranslateResult};
use crate::transpiler::traits::SqlGenerator;
use crate::transpiler::SelectParts;

/// HSD-ES native generator: the subject becomes tenant/subject predicates.
pub struct HsdesGenerator;

impl HsdesGenerator {
    /// `central_firmware.bug` -> (`central_firmware`, `bug`).
    pub fn split_subject(subject: &str) -> TranslateResult<(&str, &str)> {
        match subject.split_once('.') {
            Some((tenant, name)) if !tenant.is_empty() && !name.is_empty() && !name.contains('.') => {
                Ok((tenant, name))
            }
            _ => Err(TranslateError::MalformedSubject(subject.to_string())),
        }
    }
}

impl SqlGenerator for HsdesGenerator {
    fn render(&self, parts: &SelectParts<'_>) -> TranslateResult<String> {
        let (tenant, subject) = Self::split_subject(parts.subject)?;
        let sql = format!(
            "SELECT {} WHERE tenant ={} AND subject ={} AND {}",
            parts.field_list(),
            tenant,
            subject,
            parts.where_clause
        );
        Ok(sql.trim().to_string())
    }
}
