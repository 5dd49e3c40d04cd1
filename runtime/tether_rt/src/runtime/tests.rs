use pretty_assertions::assert_eq;

use super::*;
use crate::catalog::{Param, ParamType};
use crate::raw::arg;

#[derive(Default)]
struct Lamp {
    on: bool,
    watts: i64,
}

fn lamp_type() -> Rc<TypeInfo> {
    let built = TypeInfo::builder::<Lamp>("Lamp")
        .property_rw("on", |l: &Lamp| l.on, |l: &mut Lamp, v: bool| l.on = v)
        .field("watts", |l: &Lamp| l.watts, |l: &mut Lamp, v: i64| l.watts = v)
        .method("toggle", vec![], ParamType::Bool, |l, _| {
            l.on = !l.on;
            Ok(Raw::Bool(l.on))
        })
        .method("dim", vec![Param::of::<i64>("by")], ParamType::Int, |l, args| {
            l.watts -= arg::<i64>(args, 0)?;
            Ok(Raw::Int(l.watts))
        })
        .constructor(vec![Param::of::<i64>("watts")], |args| {
            Ok(Lamp {
                on: false,
                watts: arg(args, 0)?,
            })
        })
        .default_constructible()
        .build();
    match built {
        Ok(ty) => ty,
        Err(err) => panic!("catalog should build: {err}"),
    }
}

fn runtime_with_lamp() -> (Runtime, Value) {
    let mut rt = Runtime::new();
    let ty = lamp_type();
    if let Err(err) = rt.register_type(Rc::clone(&ty)) {
        panic!("type should register: {err}");
    }
    let lamp = match ty.instance(Lamp { on: false, watts: 60 }) {
        Ok(lamp) => lamp,
        Err(err) => panic!("instance should be created: {err}"),
    };
    let lamp = rt.bind("lamp", lamp);
    (rt, lamp)
}

// Bindings

#[test]
fn bound_values_are_found_by_name() {
    let (mut rt, lamp) = runtime_with_lamp();
    assert!(Value::same(&rt.lookup("lamp"), &lamp));
    rt.bind("answer", 42_i64);
    assert_eq!(rt.lookup("answer"), Value::int(42));
    assert_eq!(rt.binding_names(), vec!["answer", "lamp"]);
    assert!(rt.unbind("answer").is_some());
    assert_eq!(rt.lookup("answer").error_code(), ErrorCode::MemberNotFound);
}

#[test]
fn lookup_falls_back_to_types() {
    let (rt, _) = runtime_with_lamp();
    let Value::Type(handle) = rt.lookup("Lamp") else {
        panic!("expected a type handle");
    };
    assert_eq!(handle.name(), "Lamp");
    let missing = rt.type_named("Torch");
    assert_eq!(
        missing.as_error().map(crate::errors::ErrorValue::message),
        Some("no member 'Torch' on type <globals>")
    );
}

// Members

#[test]
fn member_round_trip() {
    let (rt, lamp) = runtime_with_lamp();
    assert!(rt.set_member(&lamp, "on", &Value::string("true")));
    assert_eq!(rt.get_member(&lamp, "on"), Value::TRUE);
    assert!(!rt.set_member(&lamp, "brightness", &Value::int(1)));
    assert_eq!(rt.member_names(&lamp), vec!["on", "watts"]);
}

#[test]
fn member_access_on_null() {
    let rt = Runtime::new();
    let result = rt.get_member(&Value::NULL, "length");
    assert_eq!(result.error_code(), ErrorCode::MemberNotFound);
    assert!(!rt.set_member(&Value::NULL, "length", &Value::int(1)));
    assert!(rt.member_names(&Value::NULL).is_empty());
}

#[test]
fn completion_filters_and_sorts() {
    let (rt, lamp) = runtime_with_lamp();
    assert_eq!(rt.complete(Some(&lamp), ""), vec!["dim", "on", "toggle", "watts"]);
    assert_eq!(rt.complete(Some(&lamp), "t"), vec!["toggle"]);
    assert_eq!(rt.complete(None, "L"), vec!["Lamp"]);
    assert_eq!(rt.complete(None, "la"), vec!["lamp"]);
    assert_eq!(
        rt.complete(Some(&Value::string("x")), "to_"),
        vec!["to_lower", "to_upper"]
    );
    assert!(rt.complete(Some(&Value::NULL), "").is_empty());
}

// Invocation

#[test]
fn invoke_reports_code() {
    let (rt, lamp) = runtime_with_lamp();
    let toggle = rt.get_member(&lamp, "toggle");
    assert_eq!(rt.invoke(&toggle, &[]), (Value::TRUE, ErrorCode::Success));
    let dim = rt.get_member(&lamp, "dim");
    assert_eq!(rt.invoke(&dim, &[Value::int(20)]), (Value::int(40), ErrorCode::Success));
    let (_, code) = rt.invoke(&dim, &[]);
    assert_eq!(code, ErrorCode::InvalidArgumentCount);
    let (_, code) = rt.invoke(&dim, &[Value::string("a lot")]);
    assert_eq!(code, ErrorCode::InvalidArgumentType);
}

#[test]
fn invoke_type_constructs() {
    let (rt, _) = runtime_with_lamp();
    let ty = rt.lookup("Lamp");
    let (made, code) = rt.invoke(&ty, &[Value::int(100)]);
    assert_eq!(code, ErrorCode::Success);
    assert_eq!(rt.get_member(&made, "watts"), Value::int(100));
    let (made, _) = rt.invoke(&ty, &[]);
    assert_eq!(rt.get_member(&made, "watts"), Value::int(0));
}

#[test]
fn invoke_non_invocable() {
    let rt = Runtime::new();
    let (result, code) = rt.invoke(&Value::int(1), &[]);
    assert_eq!(code, ErrorCode::InvalidArgumentType);
    assert_eq!(result.as_error().map(crate::errors::ErrorValue::message), Some("int is not invocable"));
}

// Indexing and operators

#[test]
fn indexing_through_runtime() {
    let mut rt = Runtime::new();
    let xs = rt.bind("xs", vec![1_i64, 2, 3]);
    assert_eq!(rt.get_at(&xs, &Value::int(1)), Value::int(2));
    assert!(rt.set_at(&xs, &Value::int(1), &Value::int(5)));
    assert_eq!(rt.get_at(&rt.lookup("xs"), &Value::int(1)), Value::int(5));
    assert_eq!(rt.get_at(&Value::TRUE, &Value::int(0)).error_code(), ErrorCode::InvalidArgumentType);
    assert!(!rt.set_at(&Value::TRUE, &Value::int(0), &Value::int(0)));
}

#[test]
fn binary_by_symbol() {
    let rt = Runtime::new();
    assert_eq!(rt.binary("*", &Value::int(6), &Value::int(7)), Value::int(42));
    assert_eq!(
        rt.binary("/", &Value::int(1), &Value::int(0)).error_code(),
        ErrorCode::DivideByZero
    );
}

// Formatting

#[test]
fn format_uses_configured_limits() {
    let mut rt = Runtime::with_config(RuntimeConfig::default().with_list_preview(2).with_tracing(true));
    let xs = rt.bind("xs", vec![1_i64, 2, 3]);
    assert_eq!(rt.format(&xs), "[1, 2, ...] (3 total)");
    assert_eq!(Runtime::new().format(&xs), "[1, 2, 3]");
}
