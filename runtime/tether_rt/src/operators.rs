//! Binary operators on numbers.
//!
//! Arithmetic stays in the integer domain when both operands are integer
//! tagged and wraps on overflow; any float operand promotes both sides.
//! Comparisons always compare float readings and yield a bool. A zero
//! divisor is a `DivideByZero` error in either domain.

use std::fmt;

use crate::errors::{divide_by_zero, invalid_operand, unknown_operator};
use crate::value::{Numeric, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 11] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Lt,
        BinaryOp::Gt,
        BinaryOp::LtEq,
        BinaryOp::GtEq,
        BinaryOp::Eq,
        BinaryOp::NotEq,
    ];

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
        }
    }

    #[inline]
    pub fn is_comparison(self) -> bool {
        !matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Apply `op` to two values. Errors pass through (left first); non-numeric
/// operands are an `InvalidArgumentType` error.
pub fn evaluate(op: BinaryOp, left: &Value, right: &Value) -> Value {
    if left.is_error() {
        return left.clone();
    }
    if right.is_error() {
        return right.clone();
    }
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => evaluate_binary(op, *a, *b),
        _ => Value::Error(invalid_operand(
            op.symbol(),
            &left.type_name(),
            &right.type_name(),
        )),
    }
}

/// Like [`evaluate`], looking the operator up by its symbol.
pub fn evaluate_symbol(symbol: &str, left: &Value, right: &Value) -> Value {
    match BinaryOp::from_symbol(symbol) {
        Some(op) => evaluate(op, left, right),
        None => Value::Error(unknown_operator(symbol)),
    }
}

/// Apply `op` to two numbers.
pub fn evaluate_binary(op: BinaryOp, a: Numeric, b: Numeric) -> Value {
    if op.is_comparison() {
        return Value::bool(compare(op, a.as_f64(), b.as_f64()));
    }
    if a.is_integer() && b.is_integer() {
        eval_int_binary(op, a.as_i64(), b.as_i64())
    } else {
        eval_float_binary(op, a.as_f64(), b.as_f64())
    }
}

fn eval_int_binary(op: BinaryOp, a: i64, b: i64) -> Value {
    let result = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div | BinaryOp::Mod if b == 0 => return Value::Error(divide_by_zero()),
        BinaryOp::Div => a.wrapping_div(b),
        BinaryOp::Mod => a.wrapping_rem(b),
        _ => return Value::bool(compare(op, to_float(a), to_float(b))),
    };
    Value::int(result)
}

fn eval_float_binary(op: BinaryOp, a: f64, b: f64) -> Value {
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div | BinaryOp::Mod if b == 0.0 => return Value::Error(divide_by_zero()),
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        _ => return Value::bool(compare(op, a, b)),
    };
    Value::float(result)
}

/// Float-domain comparison. Equality tolerates a difference below
/// `f64::EPSILON`.
fn compare(op: BinaryOp, a: f64, b: f64) -> bool {
    let equal = (a - b).abs() < f64::EPSILON;
    match op {
        BinaryOp::Lt => a < b,
        BinaryOp::Gt => a > b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::GtEq => a >= b,
        BinaryOp::Eq => equal,
        BinaryOp::NotEq => !equal,
        _ => false,
    }
}

#[expect(clippy::cast_precision_loss, reason = "comparisons use float readings")]
fn to_float(n: i64) -> f64 {
    n as f64
}
