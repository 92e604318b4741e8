use pretty_assertions::assert_eq;

use logexpr::{
    resolve, scanner, LogExprError, Object, Registry, Resolver, Result, ToValue, Value, ABSENT_TEXT,
};

struct Person {
    name: String,
}

impl Person {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl ToValue for Person {
    fn to_value(&self) -> Value {
        Object::new("Person")
            .with_field("name", self.name.as_str())
            .into()
    }
}

struct Suggestions {
    suggestions: Vec<Person>,
}

impl ToValue for Suggestions {
    fn to_value(&self) -> Value {
        Object::new("Suggestions")
            .with_field("suggestions", self.suggestions.to_value())
            .into()
    }
}

fn get_suggested(receiver: &Value, args: &[Value]) -> Result<Value> {
    let Value::Object(obj) = receiver else {
        return Err(LogExprError::InvalidArgument {
            method: "getSuggested".into(),
            message: "receiver is not a Suggestions".into(),
        });
    };
    let index = args.first().and_then(Value::as_int).ok_or_else(|| {
        LogExprError::InvalidArgument {
            method: "getSuggested".into(),
            message: "expected an integer index".into(),
        }
    })?;
    match obj.field("suggestions") {
        Some(Value::List(items)) => Ok(usize::try_from(index)
            .ok()
            .and_then(|i| items.get(i))
            .cloned()
            .unwrap_or(Value::Absent)),
        _ => Ok(Value::Absent),
    }
}

fn resolver() -> Resolver {
    Resolver::new(Registry::with_builtins().with("Suggestions", "getSuggested", get_suggested))
}

fn suggestion_args() -> Vec<Value> {
    let suggestions = Suggestions {
        suggestions: vec![Person::new("A"), Person::new("B")],
    };
    vec![Person::new("A").to_value(), suggestions.to_value(), Value::from(1)]
}

#[test]
fn resolves_names_and_cross_references() {
    let res = resolver()
        .resolve(
            "Name: {p0.getName()} vs {p1.getSuggested(p2)}",
            &suggestion_args(),
            None,
        )
        .unwrap();

    assert_eq!(res.template, "Name: {} vs {}");
    assert_eq!(res.values, vec![Value::from("A"), Person::new("B").to_value()]);
}

#[test]
fn getter_and_field_read_agree() {
    let template =
        "This name: {p0.getName()} is same as {p0.name} but different than {p1.getSuggested(p2)}";
    let res = resolver().resolve(template, &suggestion_args(), None).unwrap();

    assert_eq!(res.values.len(), 3);
    assert_eq!(res.values[0], Value::from("A"));
    assert_eq!(res.values[1], Value::from("A"));
    assert_eq!(res.values[2], Person::new("B").to_value());
    assert_eq!(
        res.render(),
        "This name: A is same as A but different than Person(name=B)"
    );
}

#[test]
fn missing_result_resolves_to_sentinel() {
    let res = resolve("Result = { r.getName() }", &[], None).unwrap();
    assert_eq!(res.template, "Result = {}");
    assert_eq!(res.values, vec![Value::Absent]);
    assert_eq!(res.render(), format!("Result = {}", ABSENT_TEXT));
}

#[test]
fn result_reference_after_call() {
    let res = resolve(
        "Created {r.getName()} from {p0}",
        &[Value::from("form")],
        Some(Person::new("C").to_value()),
    )
    .unwrap();
    assert_eq!(res.values, vec![Value::from("C"), Value::from("form")]);
}

#[test]
fn existing_placeholders_pass_through() {
    let args = [Value::from("some string"), Value::from(2), Value::Null];
    let res = resolve("plain {} text", &args, None).unwrap();
    assert_eq!(res.template, "plain {} text");
    assert!(res.values.is_empty());

    let res = resolve("This is just plain template {} with no params {}", &args, None).unwrap();
    assert_eq!(res.template, "This is just plain template {} with no params {}");
    assert!(res.values.is_empty());
}

#[test]
fn mixes_placeholders_and_references() {
    let res = resolve("{} then {p0} then {}", &[Value::from("x")], None).unwrap();
    assert_eq!(res.template, "{} then {} then {}");
    assert_eq!(res.values, vec![Value::from("x")]);
}

#[test]
fn absent_argument_short_circuits_chain() {
    let res = resolve("{p0.name.length()}", &[Value::empty_optional()], None).unwrap();
    assert_eq!(res.values, vec![Value::Absent]);

    let res = resolve("{p0.name.length()}", &[], None).unwrap();
    assert_eq!(res.values, vec![Value::Absent]);
}

#[test]
fn present_optional_behaves_like_its_value() {
    let direct = resolve("{p0.getName()} {p0}", &[Person::new("A").to_value()], None).unwrap();
    let wrapped = resolve(
        "{p0.getName()} {p0}",
        &[Some(Person::new("A")).to_value()],
        None,
    )
    .unwrap();
    assert_eq!(direct, wrapped);

    let empty = resolve("{p0.getName()} {p0}", &[None::<Person>.to_value()], None).unwrap();
    let absent = resolve("{p0.getName()} {p0}", &[Value::Absent], None).unwrap();
    assert_eq!(empty, absent);
    assert_eq!(empty.values, vec![Value::Absent, Value::Absent]);
}

#[test]
fn unknown_member_is_an_error_not_a_value() {
    let err = resolve("{p0.getAge()}", &[Person::new("A").to_value()], None).unwrap_err();
    assert!(matches!(err, LogExprError::UnknownMethod { .. }));
    assert_eq!(err.to_string(), "Unknown method 'getAge' on Person");
}

#[test]
fn value_count_matches_reference_count() {
    let templates = [
        "",
        "{p0}",
        "{p0}{p0}{p0}",
        "{ p0 } {} {x} {r} {p1.length()}",
        "{{p0}} and {p2[0]}",
    ];
    let args = [
        Value::from("a"),
        Value::from("bc"),
        Value::List(vec![Value::Int(9)]),
    ];
    for template in templates {
        let res = resolve(template, &args, None).unwrap();
        assert_eq!(res.values.len(), scanner::scan(template).len(), "{template}");
        assert_eq!(
            res.template.matches("{}").count(),
            template.matches("{}").count() + res.values.len(),
            "{template}"
        );
    }
}

#[test]
fn cleaning_twice_changes_nothing() {
    for template in ["{p0} {r.x()} {}", "{{r}}", "a{p1[p0]}b{ p2.m(1, r) }c"] {
        let once = scanner::clean(template).into_owned();
        assert_eq!(scanner::clean(&once), once);
    }
}

struct User {
    nickname: Option<String>,
    email: Option<String>,
}

impl ToValue for User {
    fn to_value(&self) -> Value {
        Object::new("User")
            .with_field("nickname", self.nickname.to_value())
            .with_field("email", self.email.to_value())
            .into()
    }
}

#[test]
fn optional_fields_look_through_to_their_value() {
    let user = User {
        nickname: None,
        email: Some("a@b".to_string()),
    };
    let res = resolve(
        "{p0.nickname.length()} {p0.email.length()} {p0.nickname.orElse(p1)} {p0.email.isPresent()}",
        &[user.to_value(), Value::from("anon")],
        None,
    )
    .unwrap();
    assert_eq!(
        res.values,
        vec![Value::Absent, Value::Int(3), Value::from("anon"), Value::Bool(true)]
    );
    assert_eq!(res.render(), format!("{} 3 anon true", ABSENT_TEXT));
}

#[test]
fn oversized_numbers_resolve_instead_of_failing() {
    let template = "{p99999999999999999999} {p0[-9223372036854775808]} {p0.get(99999999999999999999)}";
    let args = [Value::List(vec![Value::Int(1)])];
    let res = resolve(template, &args, None).unwrap();
    assert_eq!(res.values.len(), scanner::scan(template).len());
    assert_eq!(res.values, vec![Value::Absent; 3]);
}

#[test]
fn object_named_like_a_builtin_kind_uses_its_own_methods() {
    let mut registry = Registry::with_builtins();
    registry.register_type("String", "describe", |_: &Value, _: &[Value]| -> Result<Value> {
        Ok(Value::from("custom"))
    });
    let impostor: Value = Object::new("String").with_field("text", "abc").into();

    let res = Resolver::new(registry.clone())
        .resolve("{p0.describe()} {p0.text.length()}", &[impostor.clone()], None)
        .unwrap();
    assert_eq!(res.values, vec![Value::from("custom"), Value::Int(3)]);

    let err = Resolver::new(registry)
        .resolve("{p0.length()}", &[impostor], None)
        .unwrap_err();
    assert_eq!(err.to_string(), "Unknown method 'length' on String");
}
