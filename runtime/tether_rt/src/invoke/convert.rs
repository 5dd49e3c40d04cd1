//! Argument conversion with costs.
//!
//! Every declared parameter type accepts a set of raw shapes at one of four
//! costs. Overload resolution sums the costs across arguments and picks the
//! cheapest candidate; indexed writes and member assignment use the same
//! rules to coerce stored values.

use crate::catalog::ParamType;
use crate::raw::Raw;
use crate::value::Value;

/// The argument already has the declared type.
pub const EXACT: u32 = 0;

/// Lossless: int to float, char to string, anything into `any`, null into a
/// nullable type.
pub const WIDENING: u32 = 1;

/// Potentially lossy or parsing: float to int, strings parsed as scalars.
pub const CONVERSION: u32 = 2;

/// Scalars rendered as text. Ranks below every numeric conversion so a
/// number prefers an `int` overload over a `string` one.
pub const STRINGIFY: u32 = 3;

/// A raw payload converted to a declared type.
#[derive(Clone, Debug)]
pub struct Converted {
    pub raw: Raw,
    pub cost: u32,
}

impl Converted {
    fn exact(raw: Raw) -> Option<Self> {
        Some(Self { raw, cost: EXACT })
    }

    fn widening(raw: Raw) -> Option<Self> {
        Some(Self {
            raw,
            cost: WIDENING,
        })
    }

    fn conversion(raw: Raw) -> Option<Self> {
        Some(Self {
            raw,
            cost: CONVERSION,
        })
    }

    fn stringify(text: String) -> Option<Self> {
        Some(Self {
            raw: Raw::str(text),
            cost: STRINGIFY,
        })
    }
}

/// Convert `raw` to `target`, or `None` if no rule applies.
pub fn convert(raw: &Raw, target: &ParamType) -> Option<Converted> {
    if let Raw::Boxed(value) = raw {
        return convert(&value.raw(), target);
    }

    match (raw, target) {
        (Raw::Null, ty) if ty.is_nullable() => Converted::widening(Raw::Null),
        (Raw::Null, _) | (_, ParamType::Void) => None,

        (Raw::Bool(_), ParamType::Bool)
        | (Raw::Int(_), ParamType::Int)
        | (Raw::Float(_), ParamType::Float)
        | (Raw::Str(_), ParamType::Str)
        | (Raw::Char(_), ParamType::Char)
        | (Raw::Type(_), ParamType::Type)
        | (Raw::Callable(_), ParamType::Callable) => Converted::exact(raw.clone()),

        (_, ParamType::Any) => Converted::widening(raw.clone()),

        (Raw::Int(_), ParamType::Float) => raw.as_float().and_then(|f| Converted::widening(Raw::Float(f))),
        (Raw::Char(c), ParamType::Str) => Converted::widening(Raw::str(c.to_string())),
        (Raw::Str(s), ParamType::Char) => single_char(s).and_then(|c| Converted::widening(Raw::Char(c))),

        (Raw::Float(f), ParamType::Int) => float_to_int(*f).and_then(|n| Converted::conversion(Raw::Int(n))),
        (Raw::Int(n), ParamType::Str) => Converted::stringify(n.to_string()),
        (Raw::Float(f), ParamType::Str) => Converted::stringify(Value::float(*f).format()),
        (Raw::Bool(b), ParamType::Str) => Converted::stringify(b.to_string()),
        (Raw::Str(s), ParamType::Int) => {
            s.trim().parse::<i64>().ok().and_then(|n| Converted::conversion(Raw::Int(n)))
        }
        (Raw::Str(s), ParamType::Float) => {
            s.trim().parse::<f64>().ok().and_then(|f| Converted::conversion(Raw::Float(f)))
        }
        (Raw::Str(s), ParamType::Bool) => parse_bool(s).and_then(|b| Converted::conversion(Raw::Bool(b))),

        (Raw::List(list), ParamType::List(elem)) => {
            if list.elem_type() == &**elem {
                Converted::exact(raw.clone())
            } else if **elem == ParamType::Any {
                Converted::widening(raw.clone())
            } else {
                None
            }
        }
        (Raw::Map(map), ParamType::Map(key, value)) => {
            let key_fits = map.key_type() == &**key;
            let value_fits = map.value_type() == &**value;
            if key_fits && value_fits {
                Converted::exact(raw.clone())
            } else if (key_fits || **key == ParamType::Any) && (value_fits || **value == ParamType::Any) {
                Converted::widening(raw.clone())
            } else {
                None
            }
        }
        (Raw::Object(obj), ParamType::Object(name)) if obj.type_info().name() == &**name => {
            Converted::exact(raw.clone())
        }

        _ => None,
    }
}

/// Convert a boxed value to `target`, discarding the cost.
pub fn coerce(value: &Value, target: &ParamType) -> Option<Raw> {
    convert(&value.raw(), target).map(|converted| converted.raw)
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

/// Truncate toward zero; out-of-range and non-finite floats do not convert.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "bounds are checked before truncating"
)]
fn float_to_int(f: f64) -> Option<i64> {
    let t = f.trunc();
    (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then(|| t as i64)
}

fn parse_bool(s: &str) -> Option<bool> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
