use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogExprError {
    /// The text inside a reference does not follow the expression grammar.
    #[error("Grammar error in '{expression}' at {position}: {message}")]
    Grammar {
        expression: String,
        position: usize,
        message: String,
    },

    /// A member read on a present value names nothing the value's kind knows.
    #[error("Unknown member '{member}' on {kind}")]
    UnknownMember { kind: String, member: String },

    #[error("Unknown method '{method}' on {kind}")]
    UnknownMethod { kind: String, method: String },

    #[error("Values of kind {kind} cannot be indexed")]
    NotIndexable { kind: String },

    #[error("{method}: {message}")]
    InvalidArgument { method: String, message: String },
}

impl LogExprError {
    pub(crate) fn grammar(expression: &str, position: usize, message: impl Into<String>) -> Self {
        Self::Grammar {
            expression: expression.to_string(),
            position,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_argument(method: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            method: method.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LogExprError>;
