mod error;
mod namespace;
mod observations;
mod resolution_report;
mod resolver;
mod role_set;
mod rule;

pub use error::CompileError;
pub use namespace::Namespace;
pub use observations::Observations;
pub use resolution_report::ResolutionReport;
pub use resolver::{LoadPolicy, VariantResolver, VariantResolverBuilder, UNREPRESENTED};
pub use role_set::RoleSet;
pub use rule::{ListMode, Rule};
