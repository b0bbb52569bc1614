use thiserror::Error;

use crate::parse::ParseError;
use crate::CompileError;

/// Unified error type covering definition parsing, rule compilation, and I/O.
///
/// Returned by [`VariantResolverBuilder::build()`](crate::VariantResolverBuilder::build)
/// and the loaders built on it.
#[derive(Debug, Error)]
pub enum VarcodeError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("in rule '{name}': {source}")]
    Rule {
        name: String,
        /// Line of the definitions text the rule came from, if any.
        line: Option<usize>,
        source: CompileError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
