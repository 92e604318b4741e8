//! Resolution of call-site log message templates.
//!
//! A template such as `"Name: {p0.getName()} vs {p1.getSuggested(p2)}"`
//! refers to the arguments of a call (`p0`, `p1`, …) and, once the call has
//! returned, to its result (`r`). Resolving it yields the template a
//! positional logging backend expects (`"Name: {} vs {}"`) plus the values
//! for its placeholders.
//!
//! | Piece | Module |
//! |---|---|
//! | find and strip references | [`scanner`] |
//! | bind `p<N>` / `r` for one call | [`context`] |
//! | walk `.member`, `.method(args)`, `[index]` chains | [`evaluator`], [`methods`] |
//! | the whole transform | [`Resolver`] |
//! | hand the result to a backend | [`sink`], [`LoggedCall`] |
//!
//! Chains never fail on missing data: an unbound root, an empty optional, a
//! null in the middle of a chain, a missing map key or an index out of range
//! all resolve to [`Value::Absent`], printed as `<absent>`. Naming a member or
//! method that does not exist is an error.

pub mod ast;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod level;
pub mod logged;
pub mod methods;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod sink;
pub mod value;

use std::sync::LazyLock;

pub use context::CallContext;
pub use error::{LogExprError, Result};
pub use level::Level;
pub use logged::{LogStatement, LoggedCall, Phase};
pub use methods::{Method, Registry};
pub use resolver::{Resolution, Resolver};
pub use sink::{LogSink, MemorySink, TracingSink};
pub use value::{Object, ToValue, Value, ABSENT_TEXT};

static DEFAULT_RESOLVER: LazyLock<Resolver> = LazyLock::new(Resolver::default);

/// Resolve `template` with the built-in method tables only.
pub fn resolve(template: &str, arguments: &[Value], result: Option<Value>) -> Result<Resolution> {
    DEFAULT_RESOLVER.resolve(template, arguments, result)
}
