mod compile;
mod error;
mod evaluate;
pub mod parse;
mod tokenize;
mod types;

pub use compile::compile;
pub use error::VarcodeError;
pub use tokenize::tokenize;
pub use types::{
    CompileError, ListMode, LoadPolicy, Namespace, Observations, ResolutionReport, RoleSet, Rule,
    VariantResolver, VariantResolverBuilder, UNREPRESENTED,
};
