//! Methods every value answers to.
use crate::error::Result;
use crate::methods::{check_arity, Registry, ANY_KIND};
use crate::value::Value;

/// `toString()`: the value's display text.
fn to_string(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("toString", args, 0..=0)?;
    Ok(Value::Str(receiver.to_string()))
}

pub fn register(registry: &mut Registry) {
    registry.register(ANY_KIND, "toString", to_string);
}
