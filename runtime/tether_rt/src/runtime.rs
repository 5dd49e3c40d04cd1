//! The runtime facade a console front-end drives.
//!
//! Holds the configuration, the registered host types and the named root
//! objects the host exposes. Every entry point accepts and returns boxed
//! values; none of them fails with a Rust error.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::catalog::{TypeInfo, TypeRegistry};
use crate::config::RuntimeConfig;
use crate::errors::{member_not_found, not_indexable, not_invocable, CatalogError, ErrorCode};
use crate::factory::wrap;
use crate::operators::evaluate_symbol;
use crate::raw::Raw;
use crate::resolver::method_names;
use crate::tracing_setup::init_tracing;
use crate::value::Value;

/// Type name reported when a root binding is missing.
const GLOBALS: &str = "<globals>";

#[derive(Default)]
pub struct Runtime {
    config: RuntimeConfig,
    types: TypeRegistry,
    globals: FxHashMap<String, Value>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        if config.init_tracing {
            init_tracing();
        }
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Register a host type so it can be found by name.
    pub fn register_type(&mut self, ty: Rc<TypeInfo>) -> Result<(), CatalogError> {
        tracing::debug!(ty = ty.name(), "registering type");
        self.types.register(ty)
    }

    #[inline]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// Handle for a registered type, or `MemberNotFound`.
    pub fn type_named(&self, name: &str) -> Value {
        match self.types.get(name) {
            Some(info) => Value::type_handle(Rc::clone(info)),
            None => Value::Error(member_not_found(GLOBALS, name)),
        }
    }

    #[inline]
    pub fn wrap(&self, raw: impl Into<Raw>) -> Value {
        wrap(raw)
    }

    /// Expose `raw` under `name`, replacing any previous binding.
    pub fn bind(&mut self, name: impl Into<String>, raw: impl Into<Raw>) -> Value {
        let value = wrap(raw);
        self.globals.insert(name.into(), value.clone());
        value
    }

    pub fn unbind(&mut self, name: &str) -> Option<Value> {
        self.globals.remove(name)
    }

    /// Root binding `name`, falling back to a registered type of that name.
    pub fn lookup(&self, name: &str) -> Value {
        match self.globals.get(name) {
            Some(value) => value.clone(),
            None => self.type_named(name),
        }
    }

    /// Root binding names, sorted.
    pub fn binding_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.globals.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn get_member(&self, target: &Value, name: &str) -> Value {
        if target.is_error() {
            return target.clone();
        }
        match target.as_member_access() {
            Some(access) => access.get_member(name),
            None => Value::Error(member_not_found(&target.type_name(), name)),
        }
    }

    pub fn set_member(&self, target: &Value, name: &str, value: &Value) -> bool {
        target
            .as_member_access()
            .is_some_and(|access| access.set_member(name, value))
    }

    /// Readable property and field names of `target`.
    pub fn member_names(&self, target: &Value) -> Vec<String> {
        target
            .as_member_access()
            .map(|access| access.member_names())
            .unwrap_or_default()
    }

    /// Member names of `target` (properties, fields and methods) starting
    /// with `prefix`, sorted and deduplicated. With no target, completes
    /// root bindings and registered type names.
    pub fn complete(&self, target: Option<&Value>, prefix: &str) -> Vec<String> {
        let mut names: Vec<String> = match target {
            None => self
                .globals
                .keys()
                .cloned()
                .chain(self.types.names().into_iter().map(str::to_string))
                .collect(),
            Some(target) => match target.as_member_access() {
                Some(access) => {
                    let ty = access.member_type();
                    let mut names = access.member_names();
                    names.extend(method_names(target, &ty));
                    names
                }
                None => Vec::new(),
            },
        };
        names.retain(|name| name.starts_with(prefix));
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn get_at(&self, target: &Value, index: &Value) -> Value {
        if target.is_error() {
            return target.clone();
        }
        match target.as_indexable() {
            Some(indexable) => indexable.get_at(index),
            None => Value::Error(not_indexable(&target.type_name())),
        }
    }

    pub fn set_at(&self, target: &Value, index: &Value, value: &Value) -> bool {
        target
            .as_indexable()
            .is_some_and(|indexable| indexable.set_at(index, value))
    }

    /// Invoke `target`, reporting the error code alongside the result.
    pub fn invoke(&self, target: &Value, args: &[Value]) -> (Value, ErrorCode) {
        let result = if target.is_error() {
            target.clone()
        } else {
            match target.as_invocable() {
                Some(invocable) => invocable.invoke(args),
                None => Value::Error(not_invocable(&target.type_name())),
            }
        };
        let code = result.error_code();
        (result, code)
    }

    /// Apply the binary operator spelled `symbol`.
    pub fn binary(&self, symbol: &str, left: &Value, right: &Value) -> Value {
        evaluate_symbol(symbol, left, right)
    }

    /// Preview text using this runtime's format limits.
    pub fn format(&self, value: &Value) -> String {
        value.format_with(&self.config.format)
    }
}

#[cfg(test)]
mod tests;
