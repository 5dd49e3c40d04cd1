//! Capability protocols.
//!
//! A value's variant decides which protocols it answers to; callers ask
//! through the `Value::as_*` accessors instead of matching on variants, so
//! a new variant only has to implement the protocols it supports.
//!
//! | Variant          | Protocols                              |
//! |------------------|----------------------------------------|
//! | Bool             | member access                          |
//! | Number           | member access, numeric                 |
//! | Str              | member access, indexable, string-like  |
//! | List, Dict       | member access, indexable               |
//! | Object           | member access                          |
//! | Type             | member access (static), invocable      |
//! | Method, Native   | invocable                              |
//! | Null, Void, Error| none                                   |

use std::rc::Rc;

use crate::catalog::TypeInfo;
use crate::resolver;
use crate::value::{Numeric, StrValue, Value};

/// Can be called with arguments.
pub trait Invocable {
    /// Never panics and never returns a Rust error: failures come back as
    /// `Value::Error`.
    fn invoke(&self, args: &[Value]) -> Value;
}

/// Supports `x[i]` reads and writes.
pub trait Indexable {
    fn get_at(&self, index: &Value) -> Value;

    /// `false` when the index or value cannot be applied; the container is
    /// left unchanged.
    fn set_at(&self, index: &Value, value: &Value) -> bool;
}

/// Exposes named members through its type catalog.
pub trait MemberAccess {
    /// Catalog describing the members.
    fn member_type(&self) -> Rc<TypeInfo>;

    /// Value member reads and writes are applied to. A type handle is its
    /// own receiver and selects static members.
    fn receiver(&self) -> Value;

    fn get_member(&self, name: &str) -> Value {
        resolver::get_member(&self.receiver(), &self.member_type(), name)
    }

    fn set_member(&self, name: &str, value: &Value) -> bool {
        resolver::set_member(&self.receiver(), &self.member_type(), name, value)
    }

    /// Readable property and field names: properties first, each group in
    /// declaration order.
    fn member_names(&self) -> Vec<String> {
        resolver::member_names(&self.receiver(), &self.member_type())
    }
}

/// A number with both integer and float readings.
pub trait NumericCoercible {
    fn to_i64(&self) -> i64;
    fn to_f64(&self) -> f64;
    fn is_integer(&self) -> bool;
}

/// Text content.
pub trait StringLike {
    fn text(&self) -> &str;

    /// Length in characters.
    fn char_len(&self) -> usize {
        self.text().chars().count()
    }
}

impl NumericCoercible for Numeric {
    fn to_i64(&self) -> i64 {
        self.as_i64()
    }

    fn to_f64(&self) -> f64 {
        self.as_f64()
    }

    fn is_integer(&self) -> bool {
        Numeric::is_integer(self)
    }
}

impl StringLike for StrValue {
    fn text(&self) -> &str {
        self.as_str()
    }
}

impl Value {
    pub fn as_invocable(&self) -> Option<&dyn Invocable> {
        match self {
            Value::Type(ty) => Some(ty),
            Value::Method(group) => Some(group),
            Value::Native(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_indexable(&self) -> Option<&dyn Indexable> {
        match self {
            Value::Str(s) => Some(s),
            Value::List(list) => Some(list),
            Value::Dict(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_member_access(&self) -> Option<&dyn MemberAccess> {
        match self {
            Value::Bool(b) => Some(b),
            Value::Number(n) => Some(n),
            Value::Str(s) => Some(s),
            Value::List(list) => Some(list),
            Value::Dict(map) => Some(map),
            Value::Object(obj) => Some(obj),
            Value::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_numeric(&self) -> Option<&dyn NumericCoercible> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_string_like(&self) -> Option<&dyn StringLike> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}
