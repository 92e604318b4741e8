use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::error::{LogExprError, Result};
use crate::value::Value;

// ---------------------------------------------------------------------------
// Core trait
// ---------------------------------------------------------------------------

/// Implement this trait to make `.name(args)` callable on a kind of value.
///
/// - `receiver`: the value the call is applied to; never [`Value::Absent`]
///   or [`Value::Null`].
/// - `args`: already-evaluated arguments, none of them absent.
///
/// Any `Fn(&Value, &[Value]) -> Result<Value>` is a method as well, which is
/// how the built-in tables below are written.
pub trait Method: Send + Sync {
    fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value>;
}

impl<F> Method for F
where
    F: Fn(&Value, &[Value]) -> Result<Value> + Send + Sync,
{
    fn call(&self, receiver: &Value, args: &[Value]) -> Result<Value> {
        self(receiver, args)
    }
}

// ---------------------------------------------------------------------------
// Built-in tables, one module per value kind
// ---------------------------------------------------------------------------

pub mod any;      // toString
pub mod list;     // size, isEmpty, get, first, last, contains
pub mod map;      // size, isEmpty, get, containsKey, keySet, values
pub mod optional; // isPresent, isEmpty, get, orElse
pub mod string;   // length, isEmpty, toUpperCase, toLowerCase, trim, charAt, substring, contains

/// Table consulted when the receiver's own kind has no method of that name.
pub const ANY_KIND: &str = "*";

type Table = HashMap<String, Arc<dyn Method>>;

/// Method tables keyed by value kind (see [`Value::kind`]) and method name.
///
/// Built-in kinds and object type names live in separate namespaces, so an
/// object whose type is called `"String"` never reaches the string table.
#[derive(Clone, Default)]
pub struct Registry {
    builtins: HashMap<String, Table>,
    types: HashMap<String, Table>,
}

impl Registry {
    /// An empty registry: no method resolves, not even the built-ins.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in table.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_all(&mut registry);
        registry
    }

    /// Add `name` to the table of `kind`, replacing any previous entry.
    ///
    /// `kind` is a built-in kind name (`"String"`, `"List"`, …), an object
    /// type name, or [`ANY_KIND`]. Use [`Registry::register_type`] for an
    /// object type that shares its name with a built-in kind.
    pub fn register<M: Method + 'static>(&mut self, kind: &str, name: &str, method: M) {
        self.namespace_mut(kind)
            .entry(kind.to_string())
            .or_default()
            .insert(name.to_string(), Arc::new(method));
    }

    /// Add `name` to the table of object type `type_name`.
    pub fn register_type<M: Method + 'static>(&mut self, type_name: &str, name: &str, method: M) {
        self.types
            .entry(type_name.to_string())
            .or_default()
            .insert(name.to_string(), Arc::new(method));
    }

    /// Builder form of [`Registry::register`].
    pub fn with<M: Method + 'static>(mut self, kind: &str, name: &str, method: M) -> Self {
        self.register(kind, name, method);
        self
    }

    /// The method `name` for `kind`, falling back to the [`ANY_KIND`] table.
    pub fn lookup(&self, kind: &str, name: &str) -> Option<&Arc<dyn Method>> {
        Self::find(self.namespace(kind), kind, name).or_else(|| self.lookup_any(name))
    }

    /// The method `name` that applies to `receiver`: objects dispatch on their
    /// type name, everything else on its built-in kind.
    pub fn lookup_for(&self, receiver: &Value, name: &str) -> Option<&Arc<dyn Method>> {
        let own = match receiver {
            Value::Object(obj) => Self::find(&self.types, &obj.type_name, name),
            other => Self::find(&self.builtins, other.kind(), name),
        };
        own.or_else(|| self.lookup_any(name))
    }

    pub fn contains(&self, kind: &str, name: &str) -> bool {
        self.lookup(kind, name).is_some()
    }

    fn lookup_any(&self, name: &str) -> Option<&Arc<dyn Method>> {
        Self::find(&self.builtins, ANY_KIND, name)
    }

    fn find<'r>(tables: &'r HashMap<String, Table>, kind: &str, name: &str) -> Option<&'r Arc<dyn Method>> {
        tables.get(kind).and_then(|table| table.get(name))
    }

    fn namespace(&self, kind: &str) -> &HashMap<String, Table> {
        if kind == ANY_KIND || Value::is_builtin_kind(kind) {
            &self.builtins
        } else {
            &self.types
        }
    }

    fn namespace_mut(&mut self, kind: &str) -> &mut HashMap<String, Table> {
        if kind == ANY_KIND || Value::is_builtin_kind(kind) {
            &mut self.builtins
        } else {
            &mut self.types
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn sorted(tables: &HashMap<String, Table>) -> Vec<(&String, Vec<&String>)> {
            let mut kinds: Vec<(&String, Vec<&String>)> = tables
                .iter()
                .map(|(kind, table)| {
                    let mut names: Vec<&String> = table.keys().collect();
                    names.sort();
                    (kind, names)
                })
                .collect();
            kinds.sort();
            kinds
        }
        f.debug_struct("Registry")
            .field("builtins", &sorted(&self.builtins))
            .field("types", &sorted(&self.types))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Register every built-in table.
pub fn register_all(registry: &mut Registry) {
    any::register(registry);
    list::register(registry);
    map::register(registry);
    optional::register(registry);
    string::register(registry);
}

// ---------------------------------------------------------------------------
// Argument helpers shared by the tables
// ---------------------------------------------------------------------------

pub(crate) fn check_arity(method: &str, args: &[Value], expected: RangeInclusive<usize>) -> Result<()> {
    if expected.contains(&args.len()) {
        return Ok(());
    }
    let wanted = if expected.start() == expected.end() {
        expected.start().to_string()
    } else {
        format!("{} to {}", expected.start(), expected.end())
    };
    Err(LogExprError::invalid_argument(
        method,
        format!("expected {} argument(s), got {}", wanted, args.len()),
    ))
}

pub(crate) fn int_arg(method: &str, args: &[Value], index: usize) -> Result<i64> {
    match args.get(index) {
        Some(Value::Int(i)) => Ok(*i),
        Some(other) => Err(LogExprError::invalid_argument(
            method,
            format!("argument {} must be an integer, got {}", index, other.kind()),
        )),
        None => Err(LogExprError::invalid_argument(
            method,
            format!("missing argument {}", index),
        )),
    }
}

/// Map keys are strings; integers are accepted and stringified.
pub(crate) fn key_arg(method: &str, args: &[Value], index: usize) -> Result<String> {
    match args.get(index) {
        Some(Value::Str(s)) => Ok(s.clone()),
        Some(Value::Int(i)) => Ok(i.to_string()),
        Some(other) => Err(LogExprError::invalid_argument(
            method,
            format!("argument {} must be a string key, got {}", index, other.kind()),
        )),
        None => Err(LogExprError::invalid_argument(
            method,
            format!("missing argument {}", index),
        )),
    }
}

pub(crate) fn wrong_receiver(method: &str, receiver: &Value) -> LogExprError {
    LogExprError::invalid_argument(
        method,
        format!("cannot be applied to {}", receiver.kind()),
    )
}
