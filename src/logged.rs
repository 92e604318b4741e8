//! Log statements attached to a call site.
//!
//! ```
//! use logexpr::{Level, LoggedCall, MemorySink, Resolver, Value};
//!
//! let resolver = Resolver::default();
//! let sink = MemorySink::new();
//! let len = LoggedCall::new(&resolver, &sink)
//!     .before(Level::Info, "measuring {p0}")
//!     .after(Level::Debug, "{p0} is {r} chars long")
//!     .invoke(&[Value::from("abc")], || "abc".len());
//!
//! assert_eq!(len, 3);
//! assert_eq!(sink.messages(), ["measuring abc", "abc is 3 chars long"]);
//! ```

use tracing::warn;

use crate::level::Level;
use crate::resolver::Resolver;
use crate::sink::LogSink;
use crate::value::{ToValue, Value};

/// When a statement is emitted relative to the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Before,
    After,
}

/// A message template and the level to log it at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStatement {
    pub template: String,
    pub level: Level,
}

impl LogStatement {
    pub fn new(level: Level, template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            level,
        }
    }
}

/// A call site with its log statements, in declaration order per phase.
pub struct LoggedCall<'a, S: LogSink + ?Sized> {
    resolver: &'a Resolver,
    sink: &'a S,
    before: Vec<LogStatement>,
    after: Vec<LogStatement>,
}

impl<'a, S: LogSink + ?Sized> LoggedCall<'a, S> {
    pub fn new(resolver: &'a Resolver, sink: &'a S) -> Self {
        Self {
            resolver,
            sink,
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    /// Log `template` before the call. `r` is unbound in these statements.
    pub fn before(mut self, level: Level, template: impl Into<String>) -> Self {
        self.before.push(LogStatement::new(level, template));
        self
    }

    /// Log `template` after the call, with `r` bound to what it returned.
    pub fn after(mut self, level: Level, template: impl Into<String>) -> Self {
        self.after.push(LogStatement::new(level, template));
        self
    }

    pub fn statements(&self, phase: Phase) -> &[LogStatement] {
        match phase {
            Phase::Before => &self.before,
            Phase::After => &self.after,
        }
    }

    /// Run `call` between the two groups of statements and hand back its
    /// result untouched.
    pub fn invoke<R, F>(&self, args: &[Value], call: F) -> R
    where
        R: ToValue,
        F: FnOnce() -> R,
    {
        self.emit_all(Phase::Before, args, None);
        let result = call();
        self.emit_all(Phase::After, args, Some(result.to_value()));
        result
    }

    /// [`LoggedCall::invoke`] for calls without a result: `r` stays unbound
    /// in the after-statements too.
    pub fn invoke_void<F>(&self, args: &[Value], call: F)
    where
        F: FnOnce(),
    {
        self.emit_all(Phase::Before, args, None);
        call();
        self.emit_all(Phase::After, args, None);
    }

    fn emit_all(&self, phase: Phase, args: &[Value], result: Option<Value>) {
        for statement in self.statements(phase) {
            self.emit(statement, args, result.clone());
        }
    }

    /// A statement that fails to resolve is still logged, with its raw
    /// template and no values.
    fn emit(&self, statement: &LogStatement, args: &[Value], result: Option<Value>) {
        match self.resolver.resolve(&statement.template, args, result) {
            Ok(resolution) => {
                self.sink
                    .emit(statement.level, &resolution.template, &resolution.values)
            }
            Err(e) => {
                warn!(
                    template = %statement.template,
                    error = %e,
                    "could not resolve log message template"
                );
                self.sink.emit(statement.level, &statement.template, &[]);
            }
        }
    }
}
