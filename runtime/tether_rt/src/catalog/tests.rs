use pretty_assertions::assert_eq;

use super::*;
use crate::raw::arg;

#[derive(Default)]
struct Counter {
    count: i64,
}

fn counter_type() -> Rc<TypeInfo> {
    let built = TypeInfo::builder::<Counter>("Counter")
        .property_rw("count", |c: &Counter| c.count, |c: &mut Counter, v: i64| c.count = v)
        .method("bump", vec![], ParamType::Void, |c, _| {
            c.count += 1;
            Ok(Raw::Null)
        })
        .method("bump", vec![Param::of::<i64>("by")], ParamType::Void, |c, args| {
            c.count += arg::<i64>(args, 0)?;
            Ok(Raw::Null)
        })
        .static_method("zero", vec![], ParamType::Int, |_| Ok(Raw::Int(0)))
        .constructor(vec![Param::of::<i64>("start")], |args| {
            Ok(Counter {
                count: arg(args, 0)?,
            })
        })
        .default_constructible()
        .display(|c| format!("Counter({})", c.count))
        .build();
    match built {
        Ok(ty) => ty,
        Err(err) => panic!("catalog should build: {err}"),
    }
}

// Building

#[test]
fn overloads_group_under_one_name() {
    let ty = counter_type();
    let bump = ty.methods("bump").map(|o| o.len());
    assert_eq!(bump, Some(2));
    assert_eq!(ty.method_names().collect::<Vec<_>>(), vec!["bump", "zero"]);
}

#[test]
fn constructors_are_static_and_named_after_type() {
    let ty = counter_type();
    assert_eq!(ty.constructors().len(), 1);
    let ctor = &ty.constructors()[0];
    assert!(ctor.is_static());
    assert_eq!(ctor.name(), "Counter.new");
    assert_eq!(ctor.returns(), &ParamType::object("Counter"));
    assert!(ty.is_default_constructible());
}

#[test]
fn duplicate_accessor_is_rejected() {
    let result = TypeInfo::builder::<Counter>("Counter")
        .property("count", |c: &Counter| c.count)
        .readonly_field("count", |c: &Counter| c.count)
        .build();
    assert_eq!(
        result.err(),
        Some(CatalogError::DuplicateMember {
            type_name: "Counter".to_string(),
            member: "count".to_string(),
        })
    );
}

#[test]
fn method_clashing_with_property_is_rejected() {
    let result = TypeInfo::builder::<Counter>("Counter")
        .property("count", |c: &Counter| c.count)
        .method("count", vec![], ParamType::Int, |c, _| Ok(Raw::Int(c.count)))
        .build();
    assert!(matches!(result, Err(CatalogError::DuplicateMember { .. })));
}

#[test]
fn non_trailing_default_is_rejected() {
    let result = TypeInfo::builder::<Counter>("Counter")
        .method(
            "set",
            vec![
                Param::with_default("a", ParamType::Int, 1_i64),
                Param::of::<i64>("b"),
            ],
            ParamType::Void,
            |_, _| Ok(Raw::Null),
        )
        .build();
    assert_eq!(
        result.err(),
        Some(CatalogError::DefaultNotTrailing {
            callee: "set".to_string(),
            param: "b".to_string(),
        })
    );
}

// Signatures

#[test]
fn arity_accounts_for_defaults() {
    let sig = Signature::new(
        "substring",
        vec![
            Param::of::<i64>("start"),
            Param::with_default("length", ParamType::Int, -1_i64),
        ],
        ParamType::Str,
        |_: Option<&mut dyn Any>, _: &[Raw]| Ok(Raw::Null),
    );
    assert_eq!(sig.min_arity(), 1);
    assert!(!sig.accepts_arity(0));
    assert!(sig.accepts_arity(1));
    assert!(sig.accepts_arity(2));
    assert!(!sig.accepts_arity(3));
}

#[test]
fn variadic_accepts_extra_arguments() {
    let sig = Signature::new("log", vec![Param::of::<String>("tag")], ParamType::Void, |_: Option<&mut dyn Any>, _: &[Raw]| {
        Ok(Raw::Null)
    })
    .into_variadic();
    assert!(sig.accepts_arity(5));
    assert!(!sig.accepts_arity(0));
    assert_eq!(sig.describe(), "log(string tag, ..) -> void");
}

#[test]
fn describe_marks_defaults() {
    let sig = Signature::new(
        "heal",
        vec![Param::with_default("amount", ParamType::Int, 10_i64)],
        ParamType::Void,
        |_: Option<&mut dyn Any>, _: &[Raw]| Ok(Raw::Null),
    );
    assert_eq!(sig.describe(), "heal(int amount = ..) -> void");
}

// Instances

#[test]
fn instance_checks_rust_type() {
    let ty = counter_type();
    assert!(ty.instance(Counter { count: 1 }).is_ok());
    assert_eq!(
        ty.instance(5_i32).err().map(|e| e.to_string()),
        Some("instance is not a Counter".to_string())
    );
}

#[test]
fn catalog_records_host_type_not_handle_type() {
    let ty = counter_type();
    assert_eq!(ty.rust_type_id(), TypeId::of::<Counter>());
    assert_ne!(ty.rust_type_id(), TypeId::of::<Rc<TypeInfo>>());
    let obj = ty.instance(Counter { count: 7 });
    let count = obj.ok().and_then(|obj| obj.with(|c: &Counter| c.count));
    assert_eq!(count, Some(7));
}

#[test]
fn display_hook_formats_instance() {
    let ty = counter_type();
    let text = ty.display_instance(&Counter { count: 3 });
    assert_eq!(text.as_deref(), Some("Counter(3)"));
}

#[test]
fn panicking_display_hook_falls_back_to_type_name() {
    let built = TypeInfo::builder::<Counter>("Counter")
        .display(|_| panic!("no text today"))
        .build();
    let Ok(ty) = built else {
        panic!("catalog should build");
    };
    assert_eq!(ty.display_instance(&Counter { count: 1 }), None);
    let Ok(obj) = ty.instance(Counter { count: 1 }) else {
        panic!("instance should be created");
    };
    assert_eq!(crate::value::Value::Object(obj).format(), "<Counter>");
}

// Registry

#[test]
fn registry_rejects_duplicates_and_sorts_names() {
    let mut registry = TypeRegistry::new();
    assert!(registry.is_empty());
    assert_eq!(registry.register(counter_type()), Ok(()));
    assert_eq!(
        registry.register(counter_type()),
        Err(CatalogError::DuplicateType {
            type_name: "Counter".to_string(),
        })
    );
    assert_eq!(registry.names(), vec!["Counter"]);
    assert!(registry.get("Counter").is_some());
    assert!(registry.get("Camera").is_none());
}
