//! Invocation engine.
//!
//! All three invocable variants funnel into [`invoke_overloads`]: pick the
//! best overload, run its native body against the receiver, box the result.
//! This is the single place where a native failure (an `Err` from the body or
//! a panic) becomes a `Value::Error` with code `UnknownError`; nothing
//! unwinds past it.

pub mod convert;
pub mod overload;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use smallvec::SmallVec;

pub use convert::{coerce, convert, Converted, CONVERSION, EXACT, STRINGIFY, WIDENING};
pub use overload::{bind, find_best_match, BoundArgs, Rejection, Resolved};

use crate::capability::Invocable;
use crate::catalog::{NativeCall, ParamType, Signature};
use crate::errors::{invalid_argument_count, unknown_error};
use crate::factory::{wrap, wrap_all};
use crate::raw::Raw;
use crate::resolver::with_receiver;
use crate::value::{MethodGroup, NativeFn, TypeHandle, Value};

/// Resolve `args` against `candidates` and dispatch the winner.
///
/// `target` is the receiver for instance overloads; static overloads ignore
/// it. An error among the arguments is returned unchanged without calling
/// anything.
#[tracing::instrument(level = "debug", skip(candidates, target, args), fields(args = args.len()))]
pub fn invoke_overloads(
    candidates: &[Rc<Signature>],
    target: Option<&Value>,
    args: &[Value],
    callee: &str,
) -> Value {
    if let Some(err) = first_error(args) {
        return err.clone();
    }
    let raws: SmallVec<[Raw; 4]> = args.iter().map(Value::raw).collect();
    match find_best_match(candidates, &raws, callee) {
        Ok(resolved) => dispatch(resolved.signature, target, &resolved.args),
        Err(err) => {
            tracing::debug!(%err, "overload resolution failed");
            Value::Error(err)
        }
    }
}

/// Run an already bound signature.
pub fn dispatch(sig: &Signature, target: Option<&Value>, args: &[Raw]) -> Value {
    let outcome = match target {
        Some(target) if !sig.is_static() => {
            match with_receiver(target, |recv| guarded(sig.native(), recv, args)) {
                Ok(outcome) => outcome,
                Err(err) => return Value::Error(err),
            }
        }
        _ => guarded(sig.native(), None, args),
    };
    finish(sig.name(), outcome, sig.returns_void())
}

fn finish(callee: &str, outcome: Result<Raw, String>, returns_void: bool) -> Value {
    match outcome {
        Ok(_) if returns_void => Value::VOID,
        Ok(raw) => wrap(raw),
        Err(message) => {
            tracing::debug!(callee, %message, "native call failed");
            Value::Error(unknown_error(format!("{callee}: {message}")))
        }
    }
}

/// Call a native body, turning a panic into an `Err`.
fn guarded(call: &NativeCall, recv: Option<&mut dyn Any>, args: &[Raw]) -> Result<Raw, String> {
    catch_native(|| call(recv, args))
}

/// Run host code that may panic. Getters, setters and display hooks go
/// through here as well as method bodies.
pub(crate) fn catch_native<R>(f: impl FnOnce() -> Result<R, String>) -> Result<R, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let message = panic_message(payload.as_ref());
        tracing::warn!(%message, "native call panicked");
        Err(message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "native call panicked".to_string()
    }
}

fn first_error(args: &[Value]) -> Option<&Value> {
    args.iter().find(|arg| arg.is_error())
}

impl Invocable for MethodGroup {
    fn invoke(&self, args: &[Value]) -> Value {
        invoke_overloads(self.overloads(), self.target(), args, &self.qualified_name())
    }
}

impl Invocable for NativeFn {
    fn invoke(&self, args: &[Value]) -> Value {
        invoke_overloads(std::slice::from_ref(self.signature()), None, args, self.name())
    }
}

/// Invoking a type constructs an instance. With no arguments and no
/// matching constructor, a default-constructible type falls back to its
/// default value. Any other miss is `InvalidArgumentCount`, whether the
/// arguments failed on count or on type.
impl Invocable for TypeHandle {
    #[tracing::instrument(level = "debug", skip(self, args), fields(ty = self.name(), args = args.len()))]
    fn invoke(&self, args: &[Value]) -> Value {
        if let Some(err) = first_error(args) {
            return err.clone();
        }
        let info = self.info();
        let callee = format!("{}.new", info.name());
        let raws: SmallVec<[Raw; 4]> = args.iter().map(Value::raw).collect();
        match find_best_match(info.constructors(), &raws, &callee) {
            Ok(resolved) => dispatch(resolved.signature, None, &resolved.args),
            Err(err) => match info.default_ctor() {
                Some(make) if args.is_empty() => finish(&callee, guarded(make, None, &[]), false),
                _ => {
                    tracing::debug!(%err, "no constructor applies");
                    Value::Error(invalid_argument_count(&callee, args.len()))
                }
            },
        }
    }
}

impl MethodGroup {
    /// A native callable that re-dispatches through this group.
    ///
    /// Used when a method group crosses the host boundary, e.g. as an
    /// argument to a `callable` parameter. Results, including errors, come
    /// back boxed so the caller sees them unchanged.
    pub fn to_native(&self) -> NativeFn {
        let group = self.clone();
        let sig = Signature::new(
            self.qualified_name(),
            Vec::new(),
            ParamType::Any,
            move |_: Option<&mut dyn Any>, args: &[Raw]| {
                let values = wrap_all(args.iter().cloned());
                Ok(Raw::from(group.invoke(&values)))
            },
        )
        .into_static()
        .into_variadic();
        NativeFn::from_signature(Rc::new(sig))
    }
}
