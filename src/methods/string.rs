//! `String` methods. Indices count characters, not bytes.
use crate::error::Result;
use crate::methods::{check_arity, int_arg, wrong_receiver, Registry};
use crate::value::Value;

fn text<'v>(method: &str, receiver: &'v Value) -> Result<&'v str> {
    receiver.as_str().ok_or_else(|| wrong_receiver(method, receiver))
}

fn length(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("length", args, 0..=0)?;
    Ok(Value::from(text("length", receiver)?.chars().count()))
}

fn is_empty(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("isEmpty", args, 0..=0)?;
    Ok(Value::Bool(text("isEmpty", receiver)?.is_empty()))
}

fn to_upper_case(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("toUpperCase", args, 0..=0)?;
    Ok(Value::Str(text("toUpperCase", receiver)?.to_uppercase()))
}

fn to_lower_case(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("toLowerCase", args, 0..=0)?;
    Ok(Value::Str(text("toLowerCase", receiver)?.to_lowercase()))
}

fn trim(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("trim", args, 0..=0)?;
    Ok(Value::from(text("trim", receiver)?.trim()))
}

/// `charAt(i)`: absent when `i` is outside the string.
fn char_at(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("charAt", args, 1..=1)?;
    let s = text("charAt", receiver)?;
    let index = int_arg("charAt", args, 0)?;
    Ok(usize::try_from(index)
        .ok()
        .and_then(|i| s.chars().nth(i))
        .map_or(Value::Absent, |c| Value::Str(c.to_string())))
}

/// `substring(start[, end])`: both bounds are clamped to the string.
fn substring(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("substring", args, 1..=2)?;
    let chars: Vec<char> = text("substring", receiver)?.chars().collect();
    let clamp = |i: i64| i.clamp(0, chars.len() as i64) as usize;
    let start = clamp(int_arg("substring", args, 0)?);
    let end = match args.len() {
        2 => clamp(int_arg("substring", args, 1)?),
        _ => chars.len(),
    };
    if start >= end {
        return Ok(Value::Str(String::new()));
    }
    Ok(Value::Str(chars[start..end].iter().collect()))
}

fn contains(receiver: &Value, args: &[Value]) -> Result<Value> {
    check_arity("contains", args, 1..=1)?;
    let s = text("contains", receiver)?;
    let needle = args[0].to_string();
    Ok(Value::Bool(s.contains(needle.as_str())))
}

pub fn register(registry: &mut Registry) {
    registry.register("String", "length", length);
    registry.register("String", "isEmpty", is_empty);
    registry.register("String", "toUpperCase", to_upper_case);
    registry.register("String", "toLowerCase", to_lower_case);
    registry.register("String", "trim", trim);
    registry.register("String", "charAt", char_at);
    registry.register("String", "substring", substring);
    registry.register("String", "contains", contains);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(text: &str) -> Value {
        Value::from(text)
    }

    #[test]
    fn counts_characters() {
        assert_eq!(length(&s("żółw"), &[]).unwrap(), Value::Int(4));
        assert_eq!(is_empty(&s(""), &[]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn substring_clamps_bounds() {
        assert_eq!(substring(&s("AAAaaa"), &[Value::from(0), Value::from(3)]).unwrap(), s("AAA"));
        assert_eq!(substring(&s("abc"), &[Value::from(1)]).unwrap(), s("bc"));
        assert_eq!(substring(&s("abc"), &[Value::from(-4), Value::from(99)]).unwrap(), s("abc"));
        assert_eq!(substring(&s("abc"), &[Value::from(2), Value::from(1)]).unwrap(), s(""));
    }

    #[test]
    fn char_at_out_of_range_is_absent() {
        assert_eq!(char_at(&s("abc"), &[Value::from(1)]).unwrap(), s("b"));
        assert_eq!(char_at(&s("abc"), &[Value::from(3)]).unwrap(), Value::Absent);
        assert_eq!(char_at(&s("abc"), &[Value::from(-1)]).unwrap(), Value::Absent);
    }

    #[test]
    fn rejects_non_integer_index() {
        assert!(char_at(&s("abc"), &[s("1")]).is_err());
        assert!(length(&Value::Int(3), &[]).is_err());
    }

    #[test]
    fn case_and_trim() {
        assert_eq!(to_upper_case(&s("ab"), &[]).unwrap(), s("AB"));
        assert_eq!(to_lower_case(&s("AB"), &[]).unwrap(), s("ab"));
        assert_eq!(trim(&s("  x "), &[]).unwrap(), s("x"));
        assert_eq!(contains(&s("hello"), &[s("ell")]).unwrap(), Value::Bool(true));
    }
}
