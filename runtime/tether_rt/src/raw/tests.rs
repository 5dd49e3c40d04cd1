use pretty_assertions::assert_eq;

use super::*;
use crate::value::HostMap;

// Rust → Raw

#[test]
fn integer_widths_become_int() {
    assert!(matches!(Raw::from(7_u8), Raw::Int(7)));
    assert!(matches!(Raw::from(-7_i16), Raw::Int(-7)));
    assert!(matches!(Raw::from(7_u32), Raw::Int(7)));
    assert!(matches!(Raw::from(7_usize), Raw::Int(7)));
}

#[test]
fn u64_beyond_i64_degrades_to_float() {
    assert!(matches!(Raw::from(u64::MAX), Raw::Float(_)));
}

#[test]
fn option_none_is_null() {
    assert!(Raw::from(None::<i32>).is_null());
    assert!(matches!(Raw::from(Some(3_i32)), Raw::Int(3)));
}

#[test]
fn vec_becomes_typed_list() {
    let Raw::List(list) = Raw::from(vec![1_i32, 2, 3]) else {
        panic!("expected a list");
    };
    assert_eq!(list.elem_type(), &ParamType::Int);
    assert_eq!(list.len(), 3);
}

#[test]
fn boxed_value_passes_through() {
    let raw = Raw::from(Value::int(4));
    assert!(matches!(raw, Raw::Boxed(_)));
}

// Raw → Rust

#[test]
fn arg_extracts_typed_argument() {
    let args = [Raw::Int(5), Raw::str("hi")];
    assert_eq!(arg::<i64>(&args, 0), Ok(5));
    assert_eq!(arg::<String>(&args, 1), Ok("hi".to_string()));
}

#[test]
fn arg_reports_missing_and_mistyped() {
    let args = [Raw::Int(5)];
    assert_eq!(arg::<i64>(&args, 1), Err("missing argument 1".to_string()));
    assert_eq!(
        arg::<String>(&args, 0),
        Err("argument 0 is int, expected string".to_string())
    );
}

#[test]
fn narrow_int_rejects_out_of_range() {
    assert_eq!(u8::from_raw(&Raw::Int(300)), None);
    assert_eq!(u8::from_raw(&Raw::Int(200)), Some(200));
}

#[test]
fn vec_round_trips_elements() {
    let raw = vec!["a".to_string(), "b".to_string()].into_raw();
    assert_eq!(
        Vec::<String>::from_raw(&raw),
        Some(vec!["a".to_string(), "b".to_string()])
    );
}

// Inspection

#[test]
fn kind_names_describe_collections() {
    assert_eq!(Raw::from(vec![1.5_f64]).kind_name(), "list<float>");
    let map = HostMap::new(ParamType::Str, ParamType::Int);
    assert_eq!(Raw::Map(map).kind_name(), "dict<string, int>");
}

#[test]
fn natural_type_of_scalars() {
    assert_eq!(Raw::Bool(true).natural_type(), ParamType::Bool);
    assert_eq!(Raw::Char('x').natural_type(), ParamType::Char);
    assert_eq!(Raw::Null.natural_type(), ParamType::Any);
}

#[test]
fn host_eq_compares_numbers_across_tags() {
    assert!(Raw::Int(2).host_eq(&Raw::Float(2.0)));
    assert!(!Raw::Int(2).host_eq(&Raw::Float(2.5)));
    assert!(!Raw::Int(1).host_eq(&Raw::Bool(true)));
}

#[test]
fn host_eq_compares_lists_by_identity() {
    let a = HostList::from_vec(vec![1_i64]);
    let b = HostList::from_vec(vec![1_i64]);
    assert!(Raw::List(a.clone()).host_eq(&Raw::List(a.clone())));
    assert!(!Raw::List(a).host_eq(&Raw::List(b)));
}
