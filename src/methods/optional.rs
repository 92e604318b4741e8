//! `Optional` methods.
//!
//! Roots and final results are unwrapped, so these only apply to containers
//! met in the middle of a chain: `{p0.nickname.orElse(p1)}`. Methods missing
//! from this table apply to the contained value instead.
use crate::error::Result;
use crate::methods::{check_arity, wrong_receiver, Registry};
use crate::value::Value;

fn inner<'v>(method: &str, receiver: &'v Value) -> Result<Option<&'v Value>> {
    match receiver {
        Value::Optional(inner) => Ok(inner.as_deref()),
        other => Err(wrong_receiver(method, other)),
    }
}

fn is_present(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("isPresent", args, 0..=0)?;
    Ok(Value::Bool(inner("isPresent", receiver)?.is_some()))
}

fn is_empty(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("isEmpty", args, 0..=0)?;
    Ok(Value::Bool(inner("isEmpty", receiver)?.is_none()))
}

/// `get()`: the contained value, absent when empty.
fn get(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("get", args, 0..=0)?;
    Ok(inner("get", receiver)?.cloned().unwrap_or(Value::Absent))
}

fn or_else(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("orElse", args, 1..=1)?;
    Ok(inner("orElse", receiver)?
        .cloned()
        .unwrap_or_else(|| args[0].clone()))
}

pub fn register(registry: &mut Registry) {
    registry.register("Optional", "isPresent", is_present);
    registry.register("Optional", "isEmpty", is_empty);
    registry.register("Optional", "get", get);
    registry.register("Optional", "orElse", or_else);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_through_container() {
        let some = Value::some("x");
        let none = Value::empty_optional();
        assert_eq!(is_present(&some, &[]).unwrap(), Value::Bool(true));
        assert_eq!(is_empty(&none, &[]).unwrap(), Value::Bool(true));
        assert_eq!(get(&some, &[]).unwrap(), Value::from("x"));
        assert_eq!(get(&none, &[]).unwrap(), Value::Absent);
        assert_eq!(or_else(&none, &[Value::from(5)]).unwrap(), Value::Int(5));
    }
}
