//! Value factory: raw host data in, boxed value out.
//!
//! Wrapping never fails. Each raw shape maps to exactly one variant, and the
//! scalar singletons (`true`, `false`, null) always come back canonical.

use crate::raw::Raw;
use crate::value::{Numeric, TypeHandle, Value};

/// Box a host payload.
pub fn wrap(raw: impl Into<Raw>) -> Value {
    match raw.into() {
        Raw::Null => Value::NULL,
        Raw::Boxed(value) => *value,
        Raw::Bool(b) => Value::bool(b),
        Raw::Int(n) => Value::Number(Numeric::from_int(n)),
        Raw::Float(f) => Value::Number(Numeric::from_float(f)),
        Raw::Str(s) => Value::Str(s.into()),
        Raw::Char(c) => Value::string(c.to_string()),
        Raw::Callable(func) => Value::Native(func),
        Raw::Map(map) => Value::Dict(map),
        Raw::List(list) => Value::List(list),
        Raw::Type(info) => Value::Type(TypeHandle::new(info)),
        Raw::Object(obj) => Value::Object(obj),
    }
}

/// Box each payload in order.
pub fn wrap_all(raws: impl IntoIterator<Item = Raw>) -> Vec<Value> {
    raws.into_iter().map(wrap).collect()
}
