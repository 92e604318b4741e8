//! `List` methods.
use crate::error::Result;
use crate::methods::{check_arity, int_arg, wrong_receiver, Registry};
use crate::value::Value;

fn items<'v>(method: &str, receiver: &'v Value) -> Result<&'v [Value]> {
    match receiver {
        Value::List(items) => Ok(items),
        other => Err(wrong_receiver(method, other)),
    }
}

/// Element at `index`, absent when out of range (negative included).
pub(crate) fn element(items: &[Value], index: i64) -> Value {
    usize::try_from(index)
        .ok()
        .and_then(|i| items.get(i))
        .cloned()
        .unwrap_or(Value::Absent)
}

fn size(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("size", args, 0..=0)?;
    Ok(Value::from(items("size", receiver)?.len()))
}

fn is_empty(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("isEmpty", args, 0..=0)?;
    Ok(Value::Bool(items("isEmpty", receiver)?.is_empty()))
}

fn get(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("get", args, 1..=1)?;
    let items = items("get", receiver)?;
    Ok(element(items, int_arg("get", args, 0)?))
}

fn first(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("first", args, 0..=0)?;
    Ok(items("first", receiver)?.first().cloned().unwrap_or(Value::Absent))
}

fn last(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("last", args, 0..=0)?;
    Ok(items("last", receiver)?.last().cloned().unwrap_or(Value::Absent))
}

fn contains(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("contains", args, 1..=1)?;
    Ok(Value::Bool(items("contains", receiver)?.contains(&args[0])))
}

pub fn register(registry: &mut Registry) {
    registry.register("List", "size", size);
    registry.register("List", "isEmpty", is_empty);
    registry.register("List", "get", get);
    registry.register("List", "first", first);
    registry.register("List", "last", last);
    registry.register("List", "contains", contains);
}
