use std::collections::BTreeMap;
use std::fmt;

/// Text a [`Value::Absent`] renders as once it reaches a log line.
pub const ABSENT_TEXT: &str = "<absent>";

const BUILTIN_KINDS: [&str; 9] = [
    "Absent", "Null", "Bool", "Int", "Float", "String", "List", "Map", "Optional",
];

/// A call-site value, erased to the closed set of shapes references can walk.
///
/// `Absent` is the marker for "no value available here" and is never the same
/// thing as `Null`: the former is produced by the resolver when a chain runs
/// into nothing, the latter is a value the caller handed over.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Absent,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// A value-or-nothing container. Unwrapped when bound and when a chain ends on it.
    Optional(Option<Box<Value>>),
    Object(Object),
}

impl Value {
    /// Name of the method table this value dispatches to.
    pub fn kind(&self) -> &str {
        match self {
            Self::Absent => "Absent",
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Str(_) => "String",
            Self::List(_) => "List",
            Self::Map(_) => "Map",
            Self::Optional(_) => "Optional",
            Self::Object(obj) => obj.type_name.as_str(),
        }
    }

    /// Whether `name` is the kind of a non-object value.
    pub fn is_builtin_kind(name: &str) -> bool {
        BUILTIN_KINDS.contains(&name)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// `Optional(Some(v))` becomes `v` (nested containers included),
    /// `Optional(None)` becomes `Absent`, anything else is returned as is.
    pub fn unwrap_optional(self) -> Value {
        match self {
            Self::Optional(Some(inner)) => inner.unwrap_optional(),
            Self::Optional(None) => Self::Absent,
            other => other,
        }
    }

    pub fn empty_optional() -> Value {
        Self::Optional(None)
    }

    pub fn some(value: impl Into<Value>) -> Value {
        Self::Optional(Some(Box::new(value.into())))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str(ABSENT_TEXT),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                f.write_str("}")
            }
            Self::Optional(Some(inner)) => write!(f, "Optional[{}]", inner),
            Self::Optional(None) => f.write_str("Optional.empty"),
            Self::Object(obj) => write!(f, "{}", obj),
        }
    }
}

/// A typed record: a type name plus its fields in declaration order.
///
/// The type name selects the method table registered for it, so two objects
/// with the same fields but different names behave differently under `.m()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    pub type_name: String,
    fields: Vec<(String, Value)>,
}

impl Object {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Add or replace a field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.type_name)?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        f.write_str(")")
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Conversion of call-site data into a [`Value`].
///
/// Implement this for domain types that should be walkable from a template,
/// usually by building an [`Object`]:
///
/// ```
/// use logexpr::{Object, ToValue, Value};
///
/// struct Person { name: String }
///
/// impl ToValue for Person {
///     fn to_value(&self) -> Value {
///         Object::new("Person").with_field("name", self.name.as_str()).into()
///     }
/// }
/// ```
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl ToValue for Object {
    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Str(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! int_to_value {
    ($($t:ty),*) => {$(
        impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::Int(*self as i64)
            }
        }

        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(v as i64)
            }
        }
    )*};
}

int_to_value!(i8, i16, i32, i64, u8, u16, u32);

// Wider than i64: saturate rather than wrap.
macro_rules! wide_int_to_value {
    ($($t:ty),*) => {$(
        impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::from(*self)
            }
        }

        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
            }
        }
    )*};
}

wide_int_to_value!(u64, usize);

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Float(*self as f64)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|v| Box::new(v.to_value())))
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.clone(), v.to_value())).collect())
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<Object> for Value {
    fn from(obj: Object) -> Self {
        Value::Object(obj)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl From<Option<Value>> for Value {
    fn from(opt: Option<Value>) -> Self {
        Value::Optional(opt.map(Box::new))
    }
}
