use thiserror::Error;

/// Why a rule line failed to compile. Nothing is produced for a failed line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unresolved identifier '{name}'")]
    UnresolvedIdentifier { name: String },

    #[error("expected '{expected}' after threshold count {count}, found {found}")]
    MalformedThreshold {
        count: usize,
        expected: &'static str,
        found: String,
    },

    #[error("threshold count '{token}' is too large")]
    ThresholdTooLarge { token: String },

    #[error("'}}' without an open threshold group")]
    UnexpectedCloseBrace,

    #[error("'{{' is only allowed after 'N of'")]
    UnexpectedOpenBrace,

    #[error("')' without an open group")]
    UnbalancedClose,

    #[error("')' cannot close a threshold group; expected '}}'")]
    MismatchedClose,

    #[error("{count} unclosed group(s) at end of rule")]
    UnclosedGroup { count: usize },

    #[error("cannot attach '{param}' to {node}")]
    IllegalParameter { node: &'static str, param: String },

    #[error("'{keyword}' is missing an operand")]
    MissingOperand { keyword: &'static str },

    #[error("'{keyword}' is not allowed here")]
    UnexpectedKeyword { keyword: &'static str },

    #[error("rule is empty")]
    EmptyRule,
}
