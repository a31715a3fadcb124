use crate::ast::Dialect;
use crate::transpiler::sql::dps::DpsGenerator;
use crate::transpiler::sql::hsdes::HsdesGenerator;
use crate::transpiler::traits::SqlGenerator;

impl Default for Dialect {
    fn default() -> Self {
        Self::Dps
    }
}

impl Dialect {
    pub fn generator(&self) -> Box<dyn SqlGenerator> {
        match self {
            Dialect::Dps => Box::new(DpsGenerator::new()),
            Dialect::Hsdes => Box::new(HsdesGenerator),
        }
    }
}
