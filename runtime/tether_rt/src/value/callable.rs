//! Invocable payloads: type handles, method groups and native callbacks.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::catalog::{Overloads, Param, ParamType, Signature, TypeInfo};
use crate::raw::Raw;

use super::Value;

/// A host type used as a value. Invoking it constructs an instance;
/// member access on it reaches static members.
#[derive(Clone)]
pub struct TypeHandle(Rc<TypeInfo>);

impl TypeHandle {
    pub fn new(info: Rc<TypeInfo>) -> Self {
        Self(info)
    }

    #[inline]
    pub fn info(&self) -> &Rc<TypeInfo> {
        &self.0
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &TypeHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHandle({})", self.0.name())
    }
}

/// Every overload of one method name, optionally bound to a receiver.
///
/// Produced by member access. An unbound group (from a type handle) holds
/// only static overloads.
#[derive(Clone)]
pub struct MethodGroup {
    target: Option<Box<Value>>,
    owner: Rc<TypeInfo>,
    name: Rc<str>,
    overloads: Overloads,
}

impl MethodGroup {
    pub fn new(target: Option<Value>, owner: Rc<TypeInfo>, name: &str, overloads: Overloads) -> Self {
        Self {
            target: target.map(Box::new),
            owner,
            name: Rc::from(name),
            overloads,
        }
    }

    /// Receiver the group was read from; `None` in static context.
    #[inline]
    pub fn target(&self) -> Option<&Value> {
        self.target.as_deref()
    }

    #[inline]
    pub fn owner(&self) -> &Rc<TypeInfo> {
        &self.owner
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn overloads(&self) -> &[Rc<Signature>] {
        &self.overloads
    }

    /// `Type.method` form used in messages.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.owner.name(), self.name)
    }

    pub fn ptr_eq(&self, other: &MethodGroup) -> bool {
        let same_target = match (&self.target, &other.target) {
            (Some(a), Some(b)) => Value::same(a, b),
            (None, None) => true,
            _ => false,
        };
        same_target && Rc::ptr_eq(&self.owner, &other.owner) && self.name == other.name
    }
}

impl fmt::Debug for MethodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodGroup")
            .field("name", &self.qualified_name())
            .field("bound", &self.target.is_some())
            .field("overloads", &self.overloads.len())
            .finish()
    }
}

/// A standalone host callback with one signature.
#[derive(Clone)]
pub struct NativeFn(Rc<Signature>);

impl NativeFn {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Param>,
        returns: ParamType,
        body: impl Fn(&[Raw]) -> Result<Raw, String> + 'static,
    ) -> Self {
        let sig = Signature::new(name, params, returns, move |_: Option<&mut dyn Any>, args: &[Raw]| {
            body(args)
        });
        Self(Rc::new(sig.into_static()))
    }

    /// Wrap an existing signature. It is always called without a receiver.
    pub fn from_signature(sig: Rc<Signature>) -> Self {
        Self(sig)
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    #[inline]
    pub fn signature(&self) -> &Rc<Signature> {
        &self.0
    }

    #[inline]
    pub fn ptr_eq(&self, other: &NativeFn) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFn({})", self.0.describe())
    }
}
