use std::error::Error;

use super::parse::Assembly;

pub(crate) trait Process {
    type E: Error;
    fn process(&self, markup: &str) -> Result<Assembly, Self::E>;
}
