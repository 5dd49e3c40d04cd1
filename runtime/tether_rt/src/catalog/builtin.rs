//! Catalogs for the built-in value kinds.
//!
//! Booleans, numbers, strings, lists and dictionaries expose members the same
//! way host objects do. Primitive receivers are copies, so members that would
//! mutate a bool, number or string have no effect on the original; lists and
//! dictionaries share storage and mutate in place.

use std::rc::Rc;

use super::{Param, ParamType, TypeBuilder, TypeInfo};
use crate::index::dict_key;
use crate::invoke::convert::convert;
use crate::raw::{arg, Raw};
use crate::value::{HostList, HostMap, MapKey, Numeric, StrValue, Value};

thread_local! {
    static BOOL: Rc<TypeInfo> = bool_catalog();
    static NUMBER: Rc<TypeInfo> = number_catalog();
    static STRING: Rc<TypeInfo> = string_catalog();
    static LIST: Rc<TypeInfo> = list_catalog();
    static DICT: Rc<TypeInfo> = dict_catalog();
}

pub fn bool_type() -> Rc<TypeInfo> {
    BOOL.with(Rc::clone)
}

pub fn number_type() -> Rc<TypeInfo> {
    NUMBER.with(Rc::clone)
}

pub fn string_type() -> Rc<TypeInfo> {
    STRING.with(Rc::clone)
}

pub fn list_type() -> Rc<TypeInfo> {
    LIST.with(Rc::clone)
}

pub fn dict_type() -> Rc<TypeInfo> {
    DICT.with(Rc::clone)
}

fn bool_catalog() -> Rc<TypeInfo> {
    TypeBuilder::<bool>::new("bool")
        .method("to_string", vec![], ParamType::Str, |b, _| Ok(Raw::str(b.to_string())))
        .freeze()
}

fn number_catalog() -> Rc<TypeInfo> {
    TypeBuilder::<Numeric>::new("number")
        .property("is_integer", Numeric::is_integer)
        .method("abs", vec![], ParamType::Any, |n, _| {
            Ok(if n.is_integer() {
                Raw::Int(n.as_i64().wrapping_abs())
            } else {
                Raw::Float(n.as_f64().abs())
            })
        })
        .method("floor", vec![], ParamType::Any, |n, _| Ok(round_with(n, f64::floor)))
        .method("ceil", vec![], ParamType::Any, |n, _| Ok(round_with(n, f64::ceil)))
        .method("round", vec![], ParamType::Any, |n, _| Ok(round_with(n, f64::round)))
        .method("to_int", vec![], ParamType::Int, |n, _| Ok(Raw::Int(n.as_i64())))
        .method("to_float", vec![], ParamType::Float, |n, _| Ok(Raw::Float(n.as_f64())))
        .method("to_string", vec![], ParamType::Str, |n, _| {
            Ok(Raw::str(Value::Number(*n).format()))
        })
        .freeze()
}

/// Integers are already whole; floats round and stay floats.
fn round_with(n: &Numeric, round: fn(f64) -> f64) -> Raw {
    if n.is_integer() {
        Raw::Int(n.as_i64())
    } else {
        Raw::Float(round(n.as_f64()))
    }
}

fn string_catalog() -> Rc<TypeInfo> {
    TypeBuilder::<StrValue>::new("string")
        .property("length", StrValue::char_len)
        .method("to_upper", vec![], ParamType::Str, |s, _| Ok(Raw::str(s.to_uppercase())))
        .method("to_lower", vec![], ParamType::Str, |s, _| Ok(Raw::str(s.to_lowercase())))
        .method("trim", vec![], ParamType::Str, |s, _| Ok(Raw::str(s.trim())))
        .method("contains", vec![Param::of::<String>("needle")], ParamType::Bool, |s, args| {
            let needle: String = arg(args, 0)?;
            Ok(Raw::Bool(s.contains(needle.as_str())))
        })
        .method("starts_with", vec![Param::of::<String>("prefix")], ParamType::Bool, |s, args| {
            let prefix: String = arg(args, 0)?;
            Ok(Raw::Bool(s.starts_with(prefix.as_str())))
        })
        .method("ends_with", vec![Param::of::<String>("suffix")], ParamType::Bool, |s, args| {
            let suffix: String = arg(args, 0)?;
            Ok(Raw::Bool(s.ends_with(suffix.as_str())))
        })
        .method("index_of", vec![Param::of::<String>("needle")], ParamType::Int, |s, args| {
            let needle: String = arg(args, 0)?;
            let index = s
                .find(needle.as_str())
                .map_or(-1, |byte| char_count(&s.as_str()[..byte]));
            Ok(Raw::Int(index))
        })
        .method(
            "substring",
            vec![
                Param::of::<i64>("start"),
                Param::with_default("length", ParamType::Int, -1_i64),
            ],
            ParamType::Str,
            |s, args| {
                let start: i64 = arg(args, 0)?;
                let length: i64 = arg(args, 1)?;
                substring(s, start, length).map(Raw::str)
            },
        )
        .method("split", vec![Param::of::<String>("separator")], ParamType::list(ParamType::Str), |s, args| {
            let separator: String = arg(args, 0)?;
            let parts: Vec<String> = if separator.is_empty() {
                s.chars().map(String::from).collect()
            } else {
                s.split(separator.as_str()).map(String::from).collect()
            };
            Ok(Raw::List(HostList::from_vec(parts)))
        })
        .method(
            "replace",
            vec![Param::of::<String>("from"), Param::of::<String>("to")],
            ParamType::Str,
            |s, args| {
                let from: String = arg(args, 0)?;
                let to: String = arg(args, 1)?;
                if from.is_empty() {
                    return Ok(Raw::str(s.as_str()));
                }
                Ok(Raw::str(s.replace(from.as_str(), to.as_str())))
            },
        )
        .freeze()
}

fn char_count(s: &str) -> i64 {
    i64::try_from(s.chars().count()).unwrap_or(i64::MAX)
}

/// Characters `start..start + length`; a negative length runs to the end.
fn substring(s: &StrValue, start: i64, length: i64) -> Result<String, String> {
    let len = s.char_len();
    let start = usize::try_from(start)
        .ok()
        .filter(|&start| start <= len)
        .ok_or_else(|| format!("start {start} out of range for length {len}"))?;
    let take = match usize::try_from(length) {
        Ok(length) if start + length <= len => length,
        Ok(length) => return Err(format!("length {length} past end of string")),
        Err(_) => len - start,
    };
    Ok(s.chars().skip(start).take(take).collect())
}

fn list_catalog() -> Rc<TypeInfo> {
    TypeBuilder::<HostList>::new("list")
        .property("count", HostList::len)
        .method("add", vec![Param::of::<Raw>("item")], ParamType::Void, |list, args| {
            let item = element(list, args, 0)?;
            list.push(item);
            Ok(Raw::Null)
        })
        .method(
            "insert",
            vec![Param::of::<i64>("index"), Param::of::<Raw>("item")],
            ParamType::Void,
            |list, args| {
                let index: i64 = arg(args, 0)?;
                let item = element(list, args, 1)?;
                let inserted = usize::try_from(index).is_ok_and(|i| list.insert(i, item));
                if inserted {
                    Ok(Raw::Null)
                } else {
                    Err(format!("index {index} out of range for length {}", list.len()))
                }
            },
        )
        .method("remove_at", vec![Param::of::<i64>("index")], ParamType::Void, |list, args| {
            let index: i64 = arg(args, 0)?;
            usize::try_from(index)
                .ok()
                .and_then(|i| list.remove(i))
                .map(|_| Raw::Null)
                .ok_or_else(|| format!("index {index} out of range for length {}", list.len()))
        })
        .method("contains", vec![Param::of::<Raw>("item")], ParamType::Bool, |list, args| {
            Ok(Raw::Bool(position(list, args)?.is_some()))
        })
        .method("index_of", vec![Param::of::<Raw>("item")], ParamType::Int, |list, args| {
            let index = position(list, args)?.and_then(|i| i64::try_from(i).ok());
            Ok(Raw::Int(index.unwrap_or(-1)))
        })
        .method("clear", vec![], ParamType::Void, |list, _| {
            list.clear();
            Ok(Raw::Null)
        })
        .freeze()
}

/// Argument `index` converted to the list's element type.
fn element(list: &HostList, args: &[Raw], index: usize) -> Result<Raw, String> {
    let item: Raw = arg(args, index)?;
    convert(&item, list.elem_type())
        .map(|converted| converted.raw)
        .ok_or_else(|| format!("cannot store {} in list<{}>", item.kind_name(), list.elem_type()))
}

fn position(list: &HostList, args: &[Raw]) -> Result<Option<usize>, String> {
    let needle: Raw = arg(args, 0)?;
    let needle = convert(&needle, list.elem_type()).map_or(needle, |converted| converted.raw);
    Ok(list.snapshot().iter().position(|item| item.host_eq(&needle)))
}

fn dict_catalog() -> Rc<TypeInfo> {
    TypeBuilder::<HostMap>::new("dict")
        .property("count", HostMap::len)
        .property("keys", |map: &HostMap| {
            let keys = map.keys().iter().map(MapKey::to_raw).collect();
            HostList::with_items(map.key_type().clone(), keys)
        })
        .property("values", |map: &HostMap| {
            HostList::with_items(map.value_type().clone(), map.values())
        })
        .method("contains_key", vec![Param::of::<Raw>("key")], ParamType::Bool, |map, args| {
            let key: Raw = arg(args, 0)?;
            Ok(Raw::Bool(dict_key(map, &key).is_some_and(|key| map.contains_key(&key))))
        })
        .method("remove", vec![Param::of::<Raw>("key")], ParamType::Bool, |map, args| {
            let key: Raw = arg(args, 0)?;
            Ok(Raw::Bool(dict_key(map, &key).and_then(|key| map.remove(&key)).is_some()))
        })
        .method(
            "get",
            vec![Param::of::<Raw>("key"), Param::with_default("fallback", ParamType::Any, Raw::Null)],
            ParamType::Any,
            |map, args| {
                let key: Raw = arg(args, 0)?;
                let fallback: Raw = arg(args, 1)?;
                Ok(dict_key(map, &key)
                    .and_then(|key| map.get(&key))
                    .unwrap_or(fallback))
            },
        )
        .method("clear", vec![], ParamType::Void, |map, _| {
            map.clear();
            Ok(Raw::Null)
        })
        .freeze()
}
