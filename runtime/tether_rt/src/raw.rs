//! Raw host payloads.
//!
//! [`Raw`] is what crosses the host boundary: the unwrapped data a native
//! getter, setter or method produces or consumes. The value factory turns a
//! `Raw` into a boxed [`Value`]; `Value::raw` goes the other way.
//!
//! [`HostKind`] ties a Rust type to its declared [`ParamType`] so catalogs can
//! be registered with ordinary typed closures.

use std::fmt;
use std::rc::Rc;

use crate::catalog::{ParamType, TypeInfo};
use crate::value::{HostList, HostMap, HostObject, NativeFn, Value};

/// Unwrapped host data.
#[derive(Clone)]
pub enum Raw {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Char(char),
    List(HostList),
    Map(HostMap),
    Object(HostObject),
    Type(Rc<TypeInfo>),
    Callable(NativeFn),
    /// A value that is already boxed; the factory passes it through.
    Boxed(Box<Value>),
}

impl Raw {
    #[inline]
    pub fn str(s: impl AsRef<str>) -> Self {
        Raw::Str(Rc::from(s.as_ref()))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Raw::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Raw::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Raw::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "integer to float widening follows host numeric semantics"
    )]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Raw::Float(f) => Some(*f),
            Raw::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Raw::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self {
            Raw::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Host-level equality used by collection lookups: numbers compare
    /// numerically across int/float, text by content, shared payloads by
    /// identity.
    #[expect(clippy::float_cmp, reason = "collection lookups use exact equality")]
    pub fn host_eq(&self, other: &Raw) -> bool {
        match (self, other) {
            (Raw::Null, Raw::Null) => true,
            (Raw::Bool(a), Raw::Bool(b)) => a == b,
            (Raw::Int(a), Raw::Int(b)) => a == b,
            (Raw::Int(_) | Raw::Float(_), Raw::Int(_) | Raw::Float(_)) => {
                self.as_float() == other.as_float()
            }
            (Raw::Str(a), Raw::Str(b)) => a == b,
            (Raw::Char(a), Raw::Char(b)) => a == b,
            (Raw::List(a), Raw::List(b)) => a.ptr_eq(b),
            (Raw::Map(a), Raw::Map(b)) => a.ptr_eq(b),
            (Raw::Object(a), Raw::Object(b)) => a.ptr_eq(b),
            (Raw::Type(a), Raw::Type(b)) => Rc::ptr_eq(a, b),
            (Raw::Callable(a), Raw::Callable(b)) => a.ptr_eq(b),
            (Raw::Boxed(a), Raw::Boxed(b)) => Value::same(a, b),
            _ => false,
        }
    }

    /// Short kind name for error messages.
    pub fn kind_name(&self) -> String {
        match self {
            Raw::Null => "null".to_string(),
            Raw::Bool(_) => "bool".to_string(),
            Raw::Int(_) => "int".to_string(),
            Raw::Float(_) => "float".to_string(),
            Raw::Str(_) => "string".to_string(),
            Raw::Char(_) => "char".to_string(),
            Raw::List(list) => format!("list<{}>", list.elem_type()),
            Raw::Map(map) => format!("dict<{}, {}>", map.key_type(), map.value_type()),
            Raw::Object(obj) => obj.type_info().name().to_string(),
            Raw::Type(_) => "type".to_string(),
            Raw::Callable(_) => "callable".to_string(),
            Raw::Boxed(v) => v.type_name(),
        }
    }

    /// The declared type a value of this shape would satisfy exactly.
    ///
    /// Used to infer element types of untyped host collections.
    pub fn natural_type(&self) -> ParamType {
        match self {
            Raw::Null | Raw::Boxed(_) => ParamType::Any,
            Raw::Bool(_) => ParamType::Bool,
            Raw::Int(_) => ParamType::Int,
            Raw::Float(_) => ParamType::Float,
            Raw::Str(_) => ParamType::Str,
            Raw::Char(_) => ParamType::Char,
            Raw::List(list) => ParamType::list(list.elem_type().clone()),
            Raw::Map(map) => ParamType::map(map.key_type().clone(), map.value_type().clone()),
            Raw::Object(obj) => ParamType::Object(obj.type_info().name().into()),
            Raw::Type(_) => ParamType::Type,
            Raw::Callable(_) => ParamType::Callable,
        }
    }
}

impl fmt::Debug for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Raw::Null => write!(f, "Null"),
            Raw::Bool(b) => write!(f, "Bool({b})"),
            Raw::Int(n) => write!(f, "Int({n})"),
            Raw::Float(n) => write!(f, "Float({n})"),
            Raw::Str(s) => write!(f, "Str({:?})", &**s),
            Raw::Char(c) => write!(f, "Char({c:?})"),
            Raw::List(list) => write!(f, "List({} items)", list.len()),
            Raw::Map(map) => write!(f, "Map({} entries)", map.len()),
            Raw::Object(obj) => write!(f, "Object({})", obj.type_info().name()),
            Raw::Type(ty) => write!(f, "Type({})", ty.name()),
            Raw::Callable(func) => write!(f, "Callable({})", func.name()),
            Raw::Boxed(v) => write!(f, "Boxed({v:?})"),
        }
    }
}

/// A Rust type that can appear as a member, parameter or element type.
pub trait HostKind: Sized + 'static {
    /// Declared type seen by overload resolution and collection inference.
    fn param_type() -> ParamType;

    fn into_raw(self) -> Raw;

    /// Extract from a raw payload already converted to [`Self::param_type`].
    fn from_raw(raw: &Raw) -> Option<Self>;
}

/// Fetch argument `index` as `T`, for use inside native method bodies.
pub fn arg<T: HostKind>(args: &[Raw], index: usize) -> Result<T, String> {
    let raw = args
        .get(index)
        .ok_or_else(|| format!("missing argument {index}"))?;
    T::from_raw(raw).ok_or_else(|| {
        format!(
            "argument {index} is {}, expected {}",
            raw.kind_name(),
            T::param_type()
        )
    })
}

impl HostKind for Raw {
    fn param_type() -> ParamType {
        ParamType::Any
    }

    fn into_raw(self) -> Raw {
        self
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        Some(raw.clone())
    }
}

impl HostKind for bool {
    fn param_type() -> ParamType {
        ParamType::Bool
    }

    fn into_raw(self) -> Raw {
        Raw::Bool(self)
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        raw.as_bool()
    }
}

macro_rules! host_int {
    ($($ty:ty),*) => {
        $(
            impl HostKind for $ty {
                fn param_type() -> ParamType {
                    ParamType::Int
                }

                fn into_raw(self) -> Raw {
                    Raw::Int(i64::from(self))
                }

                fn from_raw(raw: &Raw) -> Option<Self> {
                    raw.as_int().and_then(|n| <$ty>::try_from(n).ok())
                }
            }

            impl From<$ty> for Raw {
                fn from(n: $ty) -> Self {
                    Raw::Int(i64::from(n))
                }
            }
        )*
    };
}

host_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! host_wide_int {
    ($($ty:ty),*) => {
        $(
            impl HostKind for $ty {
                fn param_type() -> ParamType {
                    ParamType::Int
                }

                #[expect(
                    clippy::cast_precision_loss,
                    reason = "values beyond i64 degrade to float like the host would"
                )]
                fn into_raw(self) -> Raw {
                    i64::try_from(self).map_or_else(|_| Raw::Float(self as f64), Raw::Int)
                }

                fn from_raw(raw: &Raw) -> Option<Self> {
                    raw.as_int().and_then(|n| <$ty>::try_from(n).ok())
                }
            }

            impl From<$ty> for Raw {
                fn from(n: $ty) -> Self {
                    n.into_raw()
                }
            }
        )*
    };
}

host_wide_int!(u64, usize, isize);

impl HostKind for f64 {
    fn param_type() -> ParamType {
        ParamType::Float
    }

    fn into_raw(self) -> Raw {
        Raw::Float(self)
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        raw.as_float()
    }
}

impl HostKind for f32 {
    fn param_type() -> ParamType {
        ParamType::Float
    }

    fn into_raw(self) -> Raw {
        Raw::Float(f64::from(self))
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "f32 parameters accept the host's narrowing"
    )]
    fn from_raw(raw: &Raw) -> Option<Self> {
        raw.as_float().map(|f| f as f32)
    }
}

impl HostKind for String {
    fn param_type() -> ParamType {
        ParamType::Str
    }

    fn into_raw(self) -> Raw {
        Raw::Str(Rc::from(self))
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        raw.as_str().map(str::to_string)
    }
}

impl HostKind for char {
    fn param_type() -> ParamType {
        ParamType::Char
    }

    fn into_raw(self) -> Raw {
        Raw::Char(self)
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        raw.as_char()
    }
}

impl HostKind for HostList {
    fn param_type() -> ParamType {
        ParamType::list(ParamType::Any)
    }

    fn into_raw(self) -> Raw {
        Raw::List(self)
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        match raw {
            Raw::List(list) => Some(list.clone()),
            _ => None,
        }
    }
}

impl HostKind for NativeFn {
    fn param_type() -> ParamType {
        ParamType::Callable
    }

    fn into_raw(self) -> Raw {
        Raw::Callable(self)
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        match raw {
            Raw::Callable(func) => Some(func.clone()),
            _ => None,
        }
    }
}

impl HostKind for HostMap {
    fn param_type() -> ParamType {
        ParamType::map(ParamType::Any, ParamType::Any)
    }

    fn into_raw(self) -> Raw {
        Raw::Map(self)
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        match raw {
            Raw::Map(map) => Some(map.clone()),
            _ => None,
        }
    }
}

/// `Vec<T>` crosses the boundary as a fresh typed host list.
impl<T: HostKind> HostKind for Vec<T> {
    fn param_type() -> ParamType {
        ParamType::list(T::param_type())
    }

    fn into_raw(self) -> Raw {
        Raw::List(HostList::from_vec(self))
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        match raw {
            Raw::List(list) => list.snapshot().iter().map(T::from_raw).collect(),
            _ => None,
        }
    }
}

/// `None` maps to null; a declared `Option<T>` has `T`'s type.
impl<T: HostKind> HostKind for Option<T> {
    fn param_type() -> ParamType {
        T::param_type()
    }

    fn into_raw(self) -> Raw {
        self.map_or(Raw::Null, T::into_raw)
    }

    fn from_raw(raw: &Raw) -> Option<Self> {
        if raw.is_null() {
            Some(None)
        } else {
            T::from_raw(raw).map(Some)
        }
    }
}

impl From<bool> for Raw {
    fn from(b: bool) -> Self {
        Raw::Bool(b)
    }
}

impl From<f64> for Raw {
    fn from(f: f64) -> Self {
        Raw::Float(f)
    }
}

impl From<f32> for Raw {
    fn from(f: f32) -> Self {
        Raw::Float(f64::from(f))
    }
}

impl From<char> for Raw {
    fn from(c: char) -> Self {
        Raw::Char(c)
    }
}

impl From<&str> for Raw {
    fn from(s: &str) -> Self {
        Raw::Str(Rc::from(s))
    }
}

impl From<String> for Raw {
    fn from(s: String) -> Self {
        Raw::Str(Rc::from(s))
    }
}

impl From<Rc<str>> for Raw {
    fn from(s: Rc<str>) -> Self {
        Raw::Str(s)
    }
}

impl<T: HostKind> From<Vec<T>> for Raw {
    fn from(items: Vec<T>) -> Self {
        items.into_raw()
    }
}

impl<T: HostKind> From<Option<T>> for Raw {
    fn from(value: Option<T>) -> Self {
        value.into_raw()
    }
}

impl From<HostList> for Raw {
    fn from(list: HostList) -> Self {
        Raw::List(list)
    }
}

impl From<HostMap> for Raw {
    fn from(map: HostMap) -> Self {
        Raw::Map(map)
    }
}

impl From<HostObject> for Raw {
    fn from(obj: HostObject) -> Self {
        Raw::Object(obj)
    }
}

impl From<Rc<TypeInfo>> for Raw {
    fn from(ty: Rc<TypeInfo>) -> Self {
        Raw::Type(ty)
    }
}

impl From<NativeFn> for Raw {
    fn from(func: NativeFn) -> Self {
        Raw::Callable(func)
    }
}

impl From<Value> for Raw {
    fn from(value: Value) -> Self {
        Raw::Boxed(Box::new(value))
    }
}

#[cfg(test)]
mod tests;
