use tracing::trace;

use crate::ast::{Accessor, Arg, Expr};
use crate::context::CallContext;
use crate::error::{LogExprError, Result};
use crate::methods::{self, Registry};
use crate::parser;
use crate::value::Value;

const OPTIONAL_KIND: &str = "Optional";

/// Walks reference expressions against one call's bindings.
///
/// Running into nothing is not an error: an unbound or absent root, an absent
/// or null intermediate value, a missing map key or an out-of-range index all
/// turn the whole expression into [`Value::Absent`]. Naming a member or method
/// the receiver's kind does not have is an error.
pub struct Evaluator<'a> {
    registry: &'a Registry,
    context: &'a CallContext,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a Registry, context: &'a CallContext) -> Self {
        Self { registry, context }
    }

    /// Parse and evaluate the text of one reference.
    pub fn evaluate_text(&self, text: &str) -> Result<Value> {
        let expr = parser::parse_expression(text)?;
        self.evaluate(&expr)
    }

    pub fn evaluate(&self, expr: &Expr) -> Result<Value> {
        let mut current = match self.context.get(expr.root) {
            Some(Value::Absent) | None => {
                trace!(expression = %expr, "root {} has no value", expr.root);
                return Ok(Value::Absent);
            }
            Some(value) => value.clone(),
        };

        for (step, accessor) in expr.chain.iter().enumerate() {
            if matches!(current, Value::Absent | Value::Null) {
                trace!(expression = %expr, step, "chain short-circuited");
                return Ok(Value::Absent);
            }
            current = self.apply(&current, accessor)?;
        }

        Ok(current.unwrap_optional())
    }

    // -----------------------------------------------------------------------
    // Chain steps
    // -----------------------------------------------------------------------

    fn apply(&self, receiver: &Value, accessor: &Accessor) -> Result<Value> {
        // A container only answers its own table; anything else looks through it.
        let mut receiver = receiver;
        while let Value::Optional(inner) = receiver {
            if self.optional_answers(accessor) {
                break;
            }
            match inner {
                Some(value) => receiver = &**value,
                None => return Ok(Value::Absent),
            }
        }
        if matches!(receiver, Value::Absent | Value::Null) {
            return Ok(Value::Absent);
        }

        match accessor {
            Accessor::Member(name) => self.read_member(receiver, name),
            Accessor::Call { name, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    let value = self.resolve_arg(arg);
                    if value.is_absent() {
                        return Ok(Value::Absent);
                    }
                    values.push(value);
                }
                self.call_method(receiver, name, &values)
            }
            Accessor::Index(arg) => {
                let key = self.resolve_arg(arg);
                if key.is_absent() {
                    return Ok(Value::Absent);
                }
                index(receiver, &key)
            }
        }
    }

    /// Whether the `Optional` table (or the any-kind table) handles `accessor`.
    fn optional_answers(&self, accessor: &Accessor) -> bool {
        let answers = |name: &str| self.registry.contains(OPTIONAL_KIND, name);
        match accessor {
            Accessor::Member(name) => {
                answers(name) || getter_names(name).iter().any(|getter| answers(getter))
            }
            Accessor::Call { name, .. } => answers(name),
            Accessor::Index(_) => false,
        }
    }

    fn resolve_arg(&self, arg: &Arg) -> Value {
        match arg {
            Arg::Int(i) => Value::Int(*i),
            Arg::Root(root) => self.context.get(*root).cloned().unwrap_or(Value::Absent),
        }
    }

    /// `.name`: field, then zero-arg method `name`, then bean getter.
    /// On maps `.name` is a key lookup and a missing key is absent.
    fn read_member(&self, receiver: &Value, name: &str) -> Result<Value> {
        match receiver {
            Value::Map(entries) => return Ok(entries.get(name).cloned().unwrap_or(Value::Absent)),
            Value::Object(obj) => {
                if let Some(value) = obj.field(name) {
                    return Ok(value.clone());
                }
            }
            _ => {}
        }

        if let Some(method) = self.registry.lookup_for(receiver, name) {
            return method.call(receiver, &[]);
        }
        for getter in getter_names(name) {
            if let Some(method) = self.registry.lookup_for(receiver, &getter) {
                return method.call(receiver, &[]);
            }
        }

        Err(LogExprError::UnknownMember {
            kind: receiver.kind().to_string(),
            member: name.to_string(),
        })
    }

    /// `.name(args)`: registered method, then for objects the bean getter
    /// convention `getXxx()` / `isXxx()` reading field `xxx`.
    fn call_method(&self, receiver: &Value, name: &str, args: &[Value]) -> Result<Value> {
        if let Some(method) = self.registry.lookup_for(receiver, name) {
            return method.call(receiver, args);
        }

        if let (Value::Object(obj), true) = (receiver, args.is_empty()) {
            if let Some(value) = bean_property(name).and_then(|field| obj.field(&field)) {
                return Ok(value.clone());
            }
        }

        Err(LogExprError::UnknownMethod {
            kind: receiver.kind().to_string(),
            method: name.to_string(),
        })
    }
}

/// `[key]` on lists, maps and strings.
fn index(receiver: &Value, key: &Value) -> Result<Value> {
    match (receiver, key) {
        (Value::List(items), Value::Int(i)) => Ok(methods::list::element(items, *i)),
        (Value::Map(entries), Value::Str(k)) => {
            Ok(entries.get(k).cloned().unwrap_or(Value::Absent))
        }
        (Value::Map(entries), Value::Int(i)) => {
            Ok(entries.get(&i.to_string()).cloned().unwrap_or(Value::Absent))
        }
        (Value::Str(s), Value::Int(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| s.chars().nth(i))
            .map_or(Value::Absent, |c| Value::Str(c.to_string()))),
        (Value::List(_) | Value::Map(_) | Value::Str(_), other) => {
            Err(LogExprError::invalid_argument(
                "[]",
                format!("cannot index {} with {}", receiver.kind(), other.kind()),
            ))
        }
        _ => Err(LogExprError::NotIndexable {
            kind: receiver.kind().to_string(),
        }),
    }
}

/// `getName` → `name`, `isActive` → `active`, `getURL` → `URL`.
fn bean_property(method: &str) -> Option<String> {
    let rest = method
        .strip_prefix("get")
        .or_else(|| method.strip_prefix("is"))?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    // Two leading capitals mark an acronym, which keeps its case.
    if chars.next().is_some_and(|c| c.is_ascii_uppercase()) {
        return Some(rest.to_string());
    }
    Some(first.to_ascii_lowercase().to_string() + &rest[1..])
}

/// `name` → `getName`, `isName`.
fn getter_names(property: &str) -> [String; 2] {
    let mut chars = property.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    };
    [format!("get{}", capitalized), format!("is{}", capitalized)]
}
