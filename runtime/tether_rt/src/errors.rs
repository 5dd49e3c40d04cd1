//! Error taxonomy for the runtime.
//!
//! Runtime failures never unwind through the evaluator. Every predictable
//! failure (missing member, bad index, wrong arity) becomes an [`ErrorValue`]
//! carried by `Value::Error`, so it composes through the same channels as an
//! ordinary result. Factory functions below are the public API for building
//! them; each one fixes both the [`ErrorCode`] and the message text.
//!
//! Host setup failures (registering a catalog, creating an instance of the
//! wrong Rust type) are ordinary Rust errors: see [`CatalogError`].

use std::fmt;

/// Numeric failure code reported alongside invocation results.
///
/// Codes are stable; front-ends may persist or compare them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success = 0,
    /// A native call failed or panicked.
    UnknownError = 1,
    MemberNotFound = 2,
    InvalidArgumentType = 3,
    InvalidArgumentCount = 4,
    IndexOutOfRange = 5,
    DivideByZero = 6,
}

impl ErrorCode {
    /// Stable numeric value of this code.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Kebab-case name used in formatted output.
    pub fn name(self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::UnknownError => "unknown-error",
            ErrorCode::MemberNotFound => "member-not-found",
            ErrorCode::InvalidArgumentType => "invalid-argument-type",
            ErrorCode::InvalidArgumentCount => "invalid-argument-count",
            ErrorCode::IndexOutOfRange => "index-out-of-range",
            ErrorCode::DivideByZero => "divide-by-zero",
        }
    }

    /// Look up a code by its numeric value.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(ErrorCode::Success),
            1 => Some(ErrorCode::UnknownError),
            2 => Some(ErrorCode::MemberNotFound),
            3 => Some(ErrorCode::InvalidArgumentType),
            4 => Some(ErrorCode::InvalidArgumentCount),
            5 => Some(ErrorCode::IndexOutOfRange),
            6 => Some(ErrorCode::DivideByZero),
            _ => None,
        }
    }

    #[inline]
    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of `Value::Error`: a code plus a human-readable message.
///
/// Terminal: an error is never a target for member access, indexing or
/// invocation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ErrorValue {
    code: ErrorCode,
    message: String,
}

impl ErrorValue {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)
    }
}

// Access errors

/// No property, field or method named `member` on `type_name`.
#[cold]
pub fn member_not_found(type_name: &str, member: &str) -> ErrorValue {
    ErrorValue::new(
        ErrorCode::MemberNotFound,
        format!("no member '{member}' on type {type_name}"),
    )
}

/// Dictionary lookup missed. Shares the `MemberNotFound` code.
#[cold]
pub fn key_not_found(key: &str) -> ErrorValue {
    ErrorValue::new(ErrorCode::MemberNotFound, format!("key not found: {key}"))
}

#[cold]
pub fn index_out_of_range(index: i64, len: usize) -> ErrorValue {
    ErrorValue::new(
        ErrorCode::IndexOutOfRange,
        format!("index {index} out of range for length {len}"),
    )
}

#[cold]
pub fn not_indexable(type_name: &str) -> ErrorValue {
    ErrorValue::new(
        ErrorCode::InvalidArgumentType,
        format!("{type_name} cannot be indexed"),
    )
}

#[cold]
pub fn non_numeric_index(type_name: &str) -> ErrorValue {
    ErrorValue::new(
        ErrorCode::InvalidArgumentType,
        format!("index must be numeric, got {type_name}"),
    )
}

// Invocation errors

#[cold]
pub fn invalid_argument_type(callee: &str, detail: &str) -> ErrorValue {
    ErrorValue::new(
        ErrorCode::InvalidArgumentType,
        format!("no overload of {callee} accepts {detail}"),
    )
}

#[cold]
pub fn invalid_argument_count(callee: &str, got: usize) -> ErrorValue {
    let arg_word = if got == 1 { "argument" } else { "arguments" };
    ErrorValue::new(
        ErrorCode::InvalidArgumentCount,
        format!("no overload of {callee} takes {got} {arg_word}"),
    )
}

#[cold]
pub fn not_invocable(type_name: &str) -> ErrorValue {
    ErrorValue::new(
        ErrorCode::InvalidArgumentType,
        format!("{type_name} is not invocable"),
    )
}

/// A native call reported a failure or panicked.
#[cold]
pub fn unknown_error(message: impl Into<String>) -> ErrorValue {
    ErrorValue::new(ErrorCode::UnknownError, message)
}

// Operator errors

#[cold]
pub fn divide_by_zero() -> ErrorValue {
    ErrorValue::new(ErrorCode::DivideByZero, "division by zero")
}

#[cold]
pub fn invalid_operand(op: &str, left: &str, right: &str) -> ErrorValue {
    ErrorValue::new(
        ErrorCode::InvalidArgumentType,
        format!("operator `{op}` cannot be applied to {left} and {right}"),
    )
}

#[cold]
pub fn unknown_operator(symbol: &str) -> ErrorValue {
    ErrorValue::new(
        ErrorCode::InvalidArgumentType,
        format!("unknown operator `{symbol}`"),
    )
}

/// Failures while registering host types or creating host instances.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("type {type_name} already declares a member named '{member}'")]
    DuplicateMember { type_name: String, member: String },

    #[error("{callee}: parameter '{param}' has no default but follows a defaulted parameter")]
    DefaultNotTrailing { callee: String, param: String },

    #[error("instance is not a {expected}")]
    InstanceTypeMismatch { expected: String },

    #[error("type {type_name} is already registered")]
    DuplicateType { type_name: String },
}
