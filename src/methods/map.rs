//! `Map` methods. Keys are strings; integer arguments are stringified.
use crate::error::Result;
use crate::methods::{check_arity, key_arg, wrong_receiver, Registry};
use crate::value::Value;
use std::collections::BTreeMap;

fn entries<'v>(method: &str, receiver: &'v Value) -> Result<&'v BTreeMap<String, Value>> {
    match receiver {
        Value::Map(entries) => Ok(entries),
        other => Err(wrong_receiver(method, other)),
    }
}

fn size(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("size", args, 0..=0)?;
    Ok(Value::from(entries("size", receiver)?.len()))
}

fn is_empty(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("isEmpty", args, 0..=0)?;
    Ok(Value::Bool(entries("isEmpty", receiver)?.is_empty()))
}

/// `get(key)`: absent for a missing key.
fn get(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("get", args, 1..=1)?;
    let key = key_arg("get", args, 0)?;
    Ok(entries("get", receiver)?
        .get(&key)
        .cloned()
        .unwrap_or(Value::Absent))
}

fn contains_key(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("containsKey", args, 1..=1)?;
    let key = key_arg("containsKey", args, 0)?;
    Ok(Value::Bool(entries("containsKey", receiver)?.contains_key(&key)))
}

fn key_set(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("keySet", args, 0..=0)?;
    Ok(Value::List(
        entries("keySet", receiver)?.keys().map(|k| Value::from(k.as_str())).collect(),
    ))
}

fn values(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("values", args, 0..=0)?;
    Ok(Value::List(entries("values", receiver)?.values().cloned().collect()))
}

pub fn register(registry: &mut Registry) {
    registry.register("Map", "size", size);
    registry.register("Map", "isEmpty", is_empty);
    registry.register("Map", "get", get);
    registry.register("Map", "containsKey", contains_key);
    registry.register("Map", "keySet", key_set);
    registry.register("Map", "values", values);
}
