//! Property-based tests for the value runtime.
//!
//! Checks the arithmetic domain rules, bounds reporting on lists, dictionary
//! round trips, preview truncation and overload selection over generated
//! inputs.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::uninlined_format_args,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::rc::Rc;

use proptest::prelude::*;
use tether_rt::operators::evaluate;
use tether_rt::{
    wrap, BinaryOp, ErrorCode, HostList, HostMap, Param, ParamType, Raw, Runtime, TypeInfo, Value,
};

// -- Helpers --

fn echo_type() -> Rc<TypeInfo> {
    TypeInfo::builder::<()>("Echo")
        .static_method("describe", vec![Param::of::<i64>("n")], ParamType::Str, |_| {
            Ok(Raw::str("int"))
        })
        .static_method("describe", vec![Param::of::<String>("s")], ParamType::Str, |_| {
            Ok(Raw::str("string"))
        })
        .build()
        .expect("catalog builds")
}

fn describe(rt: &Runtime, args: &[Value]) -> (Value, ErrorCode) {
    let method = rt.get_member(&rt.lookup("Echo"), "describe");
    rt.invoke(&method, args)
}

fn echo_runtime() -> Runtime {
    let mut rt = Runtime::new();
    rt.register_type(echo_type()).expect("type registers");
    rt
}

// -- Arithmetic --

proptest! {
    #[test]
    fn integer_arithmetic_stays_integer(a in any::<i64>(), b in any::<i64>()) {
        let cases = [
            (BinaryOp::Add, a.wrapping_add(b)),
            (BinaryOp::Sub, a.wrapping_sub(b)),
            (BinaryOp::Mul, a.wrapping_mul(b)),
        ];
        for (op, expected) in cases {
            let result = evaluate(op, &Value::int(a), &Value::int(b));
            prop_assert_eq!(result.as_number().map(|n| n.is_integer()), Some(true));
            prop_assert_eq!(result, Value::int(expected));
        }
    }

    #[test]
    fn float_operand_promotes(a in -1_000_000_i64..1_000_000, b in -1.0e6_f64..1.0e6) {
        for op in [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul] {
            let left = evaluate(op, &Value::int(a), &Value::float(b));
            let right = evaluate(op, &Value::float(b), &Value::int(a));
            prop_assert_eq!(left.as_number().map(|n| n.is_integer()), Some(false));
            prop_assert_eq!(right.as_number().map(|n| n.is_integer()), Some(false));
        }
    }

    #[test]
    fn zero_divisor_is_divide_by_zero(a in any::<i64>(), f in -1.0e9_f64..1.0e9) {
        for op in [BinaryOp::Div, BinaryOp::Mod] {
            prop_assert_eq!(
                evaluate(op, &Value::int(a), &Value::int(0)).error_code(),
                ErrorCode::DivideByZero
            );
            prop_assert_eq!(
                evaluate(op, &Value::float(f), &Value::float(0.0)).error_code(),
                ErrorCode::DivideByZero
            );
        }
    }

    #[test]
    fn comparisons_agree_with_rust(a in -1000_i64..1000, b in -1000_i64..1000) {
        let lt = evaluate(BinaryOp::Lt, &Value::int(a), &Value::int(b));
        let eq = evaluate(BinaryOp::Eq, &Value::int(a), &Value::int(b));
        prop_assert_eq!(lt.as_bool(), Some(a < b));
        prop_assert_eq!(eq.as_bool(), Some(a == b));
    }
}

// -- Containers --

proptest! {
    #[test]
    fn list_out_of_range_reports_length(
        items in prop::collection::vec(any::<i64>(), 0..20),
        past in 0_i64..50,
    ) {
        let list = HostList::from_vec(items.clone());
        let value = Value::List(list.clone());
        let len = i64::try_from(items.len()).unwrap();
        let indexable = value.as_indexable().unwrap();
        for index in [len + past, -1 - past] {
            let result = indexable.get_at(&Value::int(index));
            prop_assert_eq!(result.error_code(), ErrorCode::IndexOutOfRange);
            let expected = format!("index {} out of range for length {}", index, items.len());
            prop_assert_eq!(result.as_error().map(|e| e.message()), Some(expected.as_str()));
            prop_assert!(!indexable.set_at(&Value::int(index), &Value::int(7)));
        }
        let after: Vec<i64> = list.snapshot().iter().map(|raw| raw.as_int().unwrap()).collect();
        prop_assert_eq!(after, items);
    }

    #[test]
    fn dict_write_then_read(key in "[a-z]{1,8}", value in any::<i64>()) {
        let map = HostMap::new(ParamType::Str, ParamType::Int);
        let dict = Value::Dict(map);
        let indexable = dict.as_indexable().unwrap();
        prop_assert!(indexable.set_at(&Value::string(key.as_str()), &Value::int(value)));
        prop_assert_eq!(indexable.get_at(&Value::string(key.as_str())), Value::int(value));
    }

    #[test]
    fn list_preview_truncates(len in 11_usize..40) {
        let items: Vec<i64> = (0..i64::try_from(len).unwrap()).collect();
        let text = wrap(items).format();
        let shown: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        let expected = format!("[{}, ...] ({} total)", shown.join(", "), len);
        prop_assert_eq!(text, expected);
    }

    #[test]
    fn dict_preview_truncates(len in 6_i64..30) {
        let map = HostMap::from_pairs((0..len).map(|i| (i, i * 10)));
        let text = Value::Dict(map).format();
        let prefix = "{0: 0, 1: 10, 2: 20, 3: 30, 4: 40, ...}";
        prop_assert!(text.starts_with(prefix), "{} lacks prefix {}", text, prefix);
        let suffix = format!("({} total)", len);
        prop_assert!(text.ends_with(&suffix), "{} lacks suffix {}", text, suffix);
    }
}

// -- Invocation --

proptest! {
    #[test]
    fn numeric_argument_selects_int_overload(n in any::<i64>()) {
        let rt = echo_runtime();
        prop_assert_eq!(describe(&rt, &[Value::int(n)]), (Value::string("int"), ErrorCode::Success));
    }

    #[test]
    fn text_argument_selects_string_overload(s in "[a-z ]{0,12}") {
        let rt = echo_runtime();
        prop_assert_eq!(
            describe(&rt, &[Value::string(s.as_str())]),
            (Value::string("string"), ErrorCode::Success)
        );
    }

    #[test]
    fn wrong_arity_is_count_error(extra in 2_usize..6) {
        let rt = echo_runtime();
        let args = vec![Value::int(1); extra];
        let (_, code) = describe(&rt, &args);
        prop_assert_eq!(code, ErrorCode::InvalidArgumentCount);
    }
}

// -- Singletons --

#[test]
fn null_is_a_singleton() {
    assert!(Value::same(&wrap(Raw::Null), &Value::NULL));
    assert!(Value::same(&wrap(Option::<i64>::None), &Value::NULL));
    assert!(wrap(Raw::Null).is_null());
}
