//! Boxed runtime values.
//!
//! Every piece of data the evaluator touches is a [`Value`]: a thin,
//! cheaply clonable wrapper around either a scalar or a shared handle to
//! host data. Values are immutable as wrappers; host objects, lists and
//! dictionaries they point to may be mutated in place through member
//! assignment and indexed writes.
//!
//! Use the factory methods (`Value::int`, `Value::string`, ...) or
//! [`crate::factory::wrap`] rather than building payloads by hand.
//!
//! # Singletons
//!
//! `true`, `false`, null and void have one canonical value each
//! ([`Value::TRUE`], [`Value::FALSE`], [`Value::NULL`], [`Value::VOID`]);
//! the factory always returns these, and [`Value::same`] treats them as
//! identical.

mod callable;
mod dict;
mod format;
mod list;
mod numeric;
mod object;
mod string;

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;

pub use callable::{MethodGroup, NativeFn, TypeHandle};
pub use dict::{HostKey, HostMap, MapKey};
pub use list::HostList;
pub use numeric::Numeric;
pub use object::HostObject;
pub use string::StrValue;

use crate::catalog::TypeInfo;
use crate::errors::{ErrorCode, ErrorValue};
use crate::raw::Raw;

bitflags! {
    /// Capability protocols a value answers to.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const INVOCABLE = 1 << 0;
        const INDEXABLE = 1 << 1;
        const MEMBER_ACCESS = 1 << 2;
        const NUMERIC = 1 << 3;
        const STRING_LIKE = 1 << 4;
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Absence of a value.
    Null,
    /// Result of a call that produces nothing.
    Void,
    Bool(bool),
    Number(Numeric),
    Str(StrValue),
    List(HostList),
    Dict(HostMap),
    Object(HostObject),
    Type(TypeHandle),
    Method(MethodGroup),
    Native(NativeFn),
    /// A failure. Terminal: short-circuits every operation it reaches.
    Error(ErrorValue),
}

impl Value {
    pub const TRUE: Value = Value::Bool(true);
    pub const FALSE: Value = Value::Bool(false);
    pub const NULL: Value = Value::Null;
    pub const VOID: Value = Value::Void;

    #[inline]
    pub fn bool(b: bool) -> Self {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Number(Numeric::from_int(n))
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Number(Numeric::from_float(f))
    }

    #[inline]
    pub fn string(s: impl Into<StrValue>) -> Self {
        Value::Str(s.into())
    }

    #[inline]
    pub fn type_handle(info: Rc<TypeInfo>) -> Self {
        Value::Type(TypeHandle::new(info))
    }

    #[inline]
    pub fn error(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}

impl Value {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    /// `Success` for every non-error value.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Value::Error(err) => err.code(),
            _ => ErrorCode::Success,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorValue> {
        match self {
            Value::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Numeric> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&HostObject> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Protocols this value answers to.
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Value::Null | Value::Void | Value::Error(_) => Capabilities::empty(),
            Value::Bool(_) => Capabilities::MEMBER_ACCESS,
            Value::Number(_) => Capabilities::MEMBER_ACCESS | Capabilities::NUMERIC,
            Value::Str(_) => {
                Capabilities::MEMBER_ACCESS | Capabilities::INDEXABLE | Capabilities::STRING_LIKE
            }
            Value::List(_) | Value::Dict(_) => {
                Capabilities::MEMBER_ACCESS | Capabilities::INDEXABLE
            }
            Value::Object(_) => Capabilities::MEMBER_ACCESS,
            Value::Type(_) => Capabilities::MEMBER_ACCESS | Capabilities::INVOCABLE,
            Value::Method(_) | Value::Native(_) => Capabilities::INVOCABLE,
        }
    }

    /// The unwrapped host payload.
    ///
    /// Null, void and errors unwrap to [`Raw::Null`]. A method group unwraps
    /// to a native callable that dispatches through the group.
    pub fn raw(&self) -> Raw {
        match self {
            Value::Null | Value::Void | Value::Error(_) => Raw::Null,
            Value::Bool(b) => Raw::Bool(*b),
            Value::Number(n) if n.is_integer() => Raw::Int(n.as_i64()),
            Value::Number(n) => Raw::Float(n.as_f64()),
            Value::Str(s) => Raw::Str(Rc::clone(s.as_rc())),
            Value::List(list) => Raw::List(list.clone()),
            Value::Dict(map) => Raw::Map(map.clone()),
            Value::Object(obj) => Raw::Object(obj.clone()),
            Value::Type(ty) => Raw::Type(Rc::clone(ty.info())),
            Value::Method(group) => Raw::Callable(group.to_native()),
            Value::Native(func) => Raw::Callable(func.clone()),
        }
    }

    /// Type name for messages. Host objects and type handles report their
    /// registered name.
    pub fn type_name(&self) -> String {
        self.type_name_cow().into_owned()
    }

    pub(crate) fn type_name_cow(&self) -> Cow<'static, str> {
        match self {
            Value::Null => Cow::Borrowed("null"),
            Value::Void => Cow::Borrowed("void"),
            Value::Bool(_) => Cow::Borrowed("bool"),
            Value::Number(n) if n.is_integer() => Cow::Borrowed("int"),
            Value::Number(_) => Cow::Borrowed("float"),
            Value::Str(_) => Cow::Borrowed("string"),
            Value::List(list) => Cow::Owned(format!("list<{}>", list.elem_type())),
            Value::Dict(map) => Cow::Owned(format!("dict<{}, {}>", map.key_type(), map.value_type())),
            Value::Object(obj) => Cow::Owned(obj.type_info().name().to_string()),
            Value::Type(ty) => Cow::Owned(format!("type {}", ty.name())),
            Value::Method(_) => Cow::Borrowed("method"),
            Value::Native(_) => Cow::Borrowed("native function"),
            Value::Error(_) => Cow::Borrowed("error"),
        }
    }

    /// Identity comparison.
    ///
    /// Singletons and scalars compare by value (there is only one `true`);
    /// shared payloads compare by the storage they point to.
    pub fn same(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) | (Value::Void, Value::Void) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::Str(x), Value::Str(y)) => Rc::ptr_eq(x.as_rc(), y.as_rc()),
            (Value::List(x), Value::List(y)) => x.ptr_eq(y),
            (Value::Dict(x), Value::Dict(y)) => x.ptr_eq(y),
            (Value::Object(x), Value::Object(y)) => x.ptr_eq(y),
            (Value::Type(x), Value::Type(y)) => x.ptr_eq(y),
            (Value::Method(x), Value::Method(y)) => x.ptr_eq(y),
            (Value::Native(x), Value::Native(y)) => x.ptr_eq(y),
            _ => false,
        }
    }
}

/// Scalars and errors compare by content; shared payloads by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            _ => Value::same(self, other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

impl From<ErrorValue> for Value {
    fn from(err: ErrorValue) -> Self {
        Value::Error(err)
    }
}
