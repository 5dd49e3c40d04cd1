//! Member resolution.
//!
//! A member name on a target resolves, in order, to:
//! 1. a property (getter/setter pair),
//! 2. a field,
//! 3. a method group holding every overload with that name.
//!
//! A type handle target selects the static context: only static members are
//! visible and method groups come back unbound. Any other target is the
//! instance context, where static members are visible too.

use std::any::Any;
use std::rc::Rc;

use crate::capability::MemberAccess;
use crate::catalog::{builtin, Accessor, Signature, TypeInfo};
use crate::errors::{member_not_found, unknown_error, ErrorValue};
use crate::factory::wrap;
use crate::invoke::{catch_native, coerce};
use crate::value::{HostList, HostMap, HostObject, MethodGroup, Numeric, StrValue, TypeHandle, Value};

/// Run `f` against the receiver held by `target`.
///
/// Host objects are borrowed mutably in place; a receiver that is already
/// borrowed (a method re-entering its own instance) is an `UnknownError`.
/// Scalars are copied, so receiver mutation does not reach the original.
/// Lists and dictionaries are handles, so their mutations do.
pub(crate) fn with_receiver<R>(
    target: &Value,
    f: impl FnOnce(Option<&mut dyn Any>) -> R,
) -> Result<R, ErrorValue> {
    match target {
        Value::Object(obj) => obj.with_any_mut(|data| f(Some(data))),
        Value::Bool(b) => {
            let mut recv = *b;
            Ok(f(Some(&mut recv)))
        }
        Value::Number(n) => {
            let mut recv = *n;
            Ok(f(Some(&mut recv)))
        }
        Value::Str(s) => {
            let mut recv = s.clone();
            Ok(f(Some(&mut recv)))
        }
        Value::List(list) => {
            let mut recv = list.clone();
            Ok(f(Some(&mut recv)))
        }
        Value::Dict(map) => {
            let mut recv = map.clone();
            Ok(f(Some(&mut recv)))
        }
        _ => Ok(f(None)),
    }
}

fn is_static_context(target: &Value) -> bool {
    matches!(target, Value::Type(_))
}

/// Property first, then field, restricted to statics in static context.
fn find_accessor<'a>(ty: &'a TypeInfo, name: &str, static_only: bool) -> Option<&'a Accessor> {
    ty.property(name)
        .or_else(|| ty.field(name))
        .filter(|accessor| accessor.is_static() || !static_only)
}

/// Read member `name` of `target`.
#[tracing::instrument(level = "trace", skip(target, ty), fields(ty = ty.name()))]
pub fn get_member(target: &Value, ty: &Rc<TypeInfo>, name: &str) -> Value {
    if target.is_error() {
        return target.clone();
    }
    let static_only = is_static_context(target);

    if let Some(accessor) = find_accessor(ty, name, static_only) {
        let Some(getter) = accessor.getter() else {
            return Value::Error(unknown_error(format!(
                "member '{name}' of {} is write-only",
                ty.name()
            )));
        };
        let outcome = if accessor.is_static() {
            catch_native(|| getter(None))
        } else {
            match with_receiver(target, |recv| catch_native(|| getter(recv.as_deref()))) {
                Ok(outcome) => outcome,
                Err(err) => return Value::Error(err),
            }
        };
        return match outcome {
            Ok(raw) => wrap(raw),
            Err(message) => Value::Error(unknown_error(format!("{}.{name}: {message}", ty.name()))),
        };
    }

    if let Some(overloads) = ty.methods(name) {
        let visible: Vec<Rc<Signature>> = overloads
            .iter()
            .filter(|sig| sig.is_static() || !static_only)
            .cloned()
            .collect();
        if !visible.is_empty() {
            let bound = (!static_only).then(|| target.clone());
            return Value::Method(MethodGroup::new(bound, Rc::clone(ty), name, visible.into()));
        }
    }

    tracing::debug!(member = name, "member not found");
    Value::Error(member_not_found(ty.name(), name))
}

/// Assign member `name` of `target`. Returns `false` without side effects
/// when the member is missing, read-only, or the value does not convert.
#[tracing::instrument(level = "trace", skip(target, ty, value), fields(ty = ty.name()))]
pub fn set_member(target: &Value, ty: &Rc<TypeInfo>, name: &str, value: &Value) -> bool {
    if target.is_error() || value.is_error() {
        return false;
    }
    let Some(accessor) = find_accessor(ty, name, is_static_context(target)) else {
        return false;
    };
    let Some(setter) = accessor.setter() else {
        return false;
    };
    let Some(raw) = coerce(value, accessor.ty()) else {
        tracing::debug!(member = name, expected = %accessor.ty(), "assigned value does not convert");
        return false;
    };

    let outcome = if accessor.is_static() {
        catch_native(|| setter(None, raw))
    } else {
        match with_receiver(target, |recv| catch_native(|| setter(recv, raw))) {
            Ok(outcome) => outcome,
            Err(_) => return false,
        }
    };
    match outcome {
        Ok(()) => true,
        Err(message) => {
            tracing::debug!(member = name, %message, "setter failed");
            false
        }
    }
}

/// Readable property names, then readable field names, in declaration
/// order. Static context lists only static members.
pub fn member_names(target: &Value, ty: &TypeInfo) -> Vec<String> {
    let static_only = is_static_context(target);
    ty.properties()
        .iter()
        .chain(ty.fields())
        .filter(|accessor| accessor.is_readable() && (accessor.is_static() || !static_only))
        .map(|accessor| accessor.name().to_string())
        .collect()
}

/// Method names visible from `target`, in declaration order.
pub fn method_names(target: &Value, ty: &TypeInfo) -> Vec<String> {
    let static_only = is_static_context(target);
    ty.method_names()
        .filter(|name| {
            ty.methods(name)
                .is_some_and(|overloads| overloads.iter().any(|sig| sig.is_static() || !static_only))
        })
        .map(str::to_string)
        .collect()
}

impl MemberAccess for HostObject {
    fn member_type(&self) -> Rc<TypeInfo> {
        Rc::clone(self.type_info())
    }

    fn receiver(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl MemberAccess for TypeHandle {
    fn member_type(&self) -> Rc<TypeInfo> {
        Rc::clone(self.info())
    }

    fn receiver(&self) -> Value {
        Value::Type(self.clone())
    }
}

impl MemberAccess for bool {
    fn member_type(&self) -> Rc<TypeInfo> {
        builtin::bool_type()
    }

    fn receiver(&self) -> Value {
        Value::bool(*self)
    }
}

impl MemberAccess for Numeric {
    fn member_type(&self) -> Rc<TypeInfo> {
        builtin::number_type()
    }

    fn receiver(&self) -> Value {
        Value::Number(*self)
    }
}

impl MemberAccess for StrValue {
    fn member_type(&self) -> Rc<TypeInfo> {
        builtin::string_type()
    }

    fn receiver(&self) -> Value {
        Value::Str(self.clone())
    }
}

impl MemberAccess for HostList {
    fn member_type(&self) -> Rc<TypeInfo> {
        builtin::list_type()
    }

    fn receiver(&self) -> Value {
        Value::List(self.clone())
    }
}

impl MemberAccess for HostMap {
    fn member_type(&self) -> Rc<TypeInfo> {
        builtin::dict_type()
    }

    fn receiver(&self) -> Value {
        Value::Dict(self.clone())
    }
}
