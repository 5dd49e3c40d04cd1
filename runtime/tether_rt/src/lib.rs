//! Tether: a dynamically typed value and invocation runtime for embedding a
//! live inspection console in a Rust host.
//!
//! The host registers member catalogs for its types ([`TypeInfo`] via
//! [`TypeBuilder`]) and binds root objects into a [`Runtime`]. A console
//! front-end then walks the object graph through boxed [`Value`]s: member
//! access, indexing, method invocation with overload resolution, and
//! arithmetic. Every failure is a `Value::Error` carrying an [`ErrorCode`].
//!
//! # Architecture
//!
//! - [`raw`]: unwrapped host payloads crossing the boundary
//! - [`catalog`]: per-type member catalogs and the type registry
//! - [`value`]: the boxed [`Value`] and its payloads
//! - [`factory`]: raw → boxed
//! - [`capability`]: the protocols values answer to
//! - [`resolver`]: member lookup, read and write
//! - [`invoke`]: argument conversion, overload resolution, dispatch
//! - [`index`]: indexed access on strings, lists and dictionaries
//! - [`operators`]: numeric binary operators
//! - [`runtime`]: the facade a front-end drives
//!
//! The runtime is single-threaded: values use `Rc` and `RefCell` and are
//! neither `Send` nor `Sync`.

pub mod capability;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod factory;
pub mod index;
pub mod invoke;
pub mod operators;
pub mod raw;
pub mod resolver;
pub mod runtime;
pub mod tracing_setup;
pub mod value;

pub use capability::{Indexable, Invocable, MemberAccess, NumericCoercible, StringLike};
pub use catalog::{Param, ParamType, Signature, TypeBuilder, TypeInfo, TypeRegistry};
pub use config::{FormatOptions, RuntimeConfig};
pub use errors::{CatalogError, ErrorCode, ErrorValue};
pub use factory::wrap;
pub use operators::BinaryOp;
pub use raw::{arg, HostKind, Raw};
pub use runtime::Runtime;
pub use tracing_setup::init_tracing;
pub use value::{
    Capabilities, HostKey, HostList, HostMap, HostObject, MapKey, MethodGroup, NativeFn, Numeric,
    StrValue, TypeHandle, Value,
};
