//! Overload resolution.
//!
//! A candidate is applicable when the argument count fits its arity
//! (trailing defaults may be omitted; variadic signatures take extras) and
//! every argument converts to its parameter type. Among applicable
//! candidates the lowest total conversion cost wins; ties go to the one
//! that fills fewer defaults, then to declaration order.

use std::rc::Rc;

use smallvec::SmallVec;

use super::convert::convert;
use crate::catalog::{ParamType, Signature};
use crate::errors::{invalid_argument_count, invalid_argument_type, ErrorValue};
use crate::raw::Raw;

/// Arguments bound to a signature: converted values followed by defaults.
pub type BoundArgs = SmallVec<[Raw; 4]>;

/// The winning candidate.
#[derive(Debug)]
pub struct Resolved<'a> {
    pub signature: &'a Rc<Signature>,
    pub args: BoundArgs,
    pub cost: u32,
    pub defaulted: usize,
}

/// Why a single candidate was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    Arity,
    ArgumentType { index: usize },
}

/// Bind `args` to one signature, returning the bound arguments and total cost.
pub fn bind(sig: &Signature, args: &[Raw]) -> Result<(BoundArgs, u32), Rejection> {
    if !sig.accepts_arity(args.len()) {
        return Err(Rejection::Arity);
    }

    let mut bound = BoundArgs::with_capacity(sig.params().len().max(args.len()));
    let mut cost = 0;
    for (index, raw) in args.iter().enumerate() {
        let ty = sig.params().get(index).map_or(&ParamType::Any, |p| &p.ty);
        let converted = convert(raw, ty).ok_or(Rejection::ArgumentType { index })?;
        cost += converted.cost;
        bound.push(converted.raw);
    }
    for param in sig.params().iter().skip(args.len()) {
        bound.push(param.default.clone().unwrap_or(Raw::Null));
    }
    Ok((bound, cost))
}

/// Pick the best candidate for `args`.
///
/// Fails with `InvalidArgumentCount` when no candidate takes that many
/// arguments, and `InvalidArgumentType` when some did but none converted.
#[tracing::instrument(
    level = "trace",
    skip(candidates, args),
    fields(candidates = candidates.len(), args = args.len())
)]
pub fn find_best_match<'a>(
    candidates: &'a [Rc<Signature>],
    args: &[Raw],
    callee: &str,
) -> Result<Resolved<'a>, ErrorValue> {
    let mut best: Option<Resolved<'a>> = None;
    let mut arity_matched = false;

    for signature in candidates {
        match bind(signature, args) {
            Ok((bound, cost)) => {
                arity_matched = true;
                let defaulted = signature.params().len().saturating_sub(args.len());
                let better = match &best {
                    None => true,
                    Some(current) => (cost, defaulted) < (current.cost, current.defaulted),
                };
                if better {
                    best = Some(Resolved {
                        signature,
                        args: bound,
                        cost,
                        defaulted,
                    });
                }
            }
            Err(Rejection::ArgumentType { index }) => {
                arity_matched = true;
                tracing::trace!(candidate = %signature.describe(), index, "argument does not convert");
            }
            Err(Rejection::Arity) => {}
        }
    }

    best.ok_or_else(|| {
        if arity_matched {
            invalid_argument_type(callee, &describe_args(args))
        } else {
            invalid_argument_count(callee, args.len())
        }
    })
}

/// `(int, string)` form of an argument list.
fn describe_args(args: &[Raw]) -> String {
    let kinds: Vec<String> = args.iter().map(Raw::kind_name).collect();
    format!("({})", kinds.join(", "))
}
