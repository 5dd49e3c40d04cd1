//! Member catalogs for host types.
//!
//! Rust has no runtime reflection, so every host type that the evaluator can
//! see registers its exposed members once through a [`TypeBuilder`]. The
//! resulting [`TypeInfo`] is immutable and shared (`Rc`) by every value that
//! refers to the type.
//!
//! # Member kinds
//!
//! - Properties and fields are both [`Accessor`]s (optional getter, optional
//!   setter). They are kept apart because lookup order and name enumeration
//!   treat properties first.
//! - Methods are grouped by name; each group is an ordered overload list of
//!   [`Signature`]s.
//! - Constructors are a single overload list; `default_constructible` adds a
//!   zero-argument fallback for `T: Default`.
//!
//! Closures registered here receive receivers as `dyn Any` and downcast to the
//! concrete host type; arguments arrive already converted to the declared
//! [`ParamType`]s.

pub mod builtin;

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use crate::errors::CatalogError;
use crate::invoke::catch_native;
use crate::raw::{HostKind, Raw};
use crate::value::HostObject;

/// Native body shared by methods, constructors and native callbacks.
///
/// The receiver is `None` for static methods, constructors and free callbacks.
pub type NativeCall = Rc<dyn Fn(Option<&mut dyn Any>, &[Raw]) -> Result<Raw, String>>;

/// Property/field read.
pub type Getter = Rc<dyn Fn(Option<&dyn Any>) -> Result<Raw, String>>;

/// Property/field write; the value is already converted to the declared type.
pub type Setter = Rc<dyn Fn(Option<&mut dyn Any>, Raw) -> Result<(), String>>;

type DisplayHook = Rc<dyn Fn(&dyn Any) -> Option<String>>;

/// Declared type of a parameter, member, collection element or return value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Accepts anything; never an exact match.
    Any,
    Bool,
    Int,
    Float,
    Str,
    Char,
    List(Box<ParamType>),
    Map(Box<ParamType>, Box<ParamType>),
    /// Instance of the host type with this name.
    Object(Rc<str>),
    Type,
    Callable,
    /// Return type of methods that produce no value.
    Void,
}

impl ParamType {
    #[inline]
    pub fn list(elem: ParamType) -> Self {
        ParamType::List(Box::new(elem))
    }

    #[inline]
    pub fn map(key: ParamType, value: ParamType) -> Self {
        ParamType::Map(Box::new(key), Box::new(value))
    }

    pub fn object(type_name: &str) -> Self {
        ParamType::Object(Rc::from(type_name))
    }

    /// Whether `null` converts to this type.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            ParamType::Any
                | ParamType::Str
                | ParamType::List(_)
                | ParamType::Map(..)
                | ParamType::Object(_)
                | ParamType::Type
                | ParamType::Callable
        )
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Any => write!(f, "any"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Int => write!(f, "int"),
            ParamType::Float => write!(f, "float"),
            ParamType::Str => write!(f, "string"),
            ParamType::Char => write!(f, "char"),
            ParamType::List(elem) => write!(f, "list<{elem}>"),
            ParamType::Map(key, value) => write!(f, "dict<{key}, {value}>"),
            ParamType::Object(name) => write!(f, "{name}"),
            ParamType::Type => write!(f, "type"),
            ParamType::Callable => write!(f, "callable"),
            ParamType::Void => write!(f, "void"),
        }
    }
}

/// One declared parameter.
#[derive(Clone, Debug)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
    /// Value bound when the caller omits this (trailing) parameter.
    pub default: Option<Raw>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    /// Parameter typed after a Rust type.
    pub fn of<V: HostKind>(name: impl Into<String>) -> Self {
        Self::new(name, V::param_type())
    }

    pub fn with_default(name: impl Into<String>, ty: ParamType, default: impl Into<Raw>) -> Self {
        Self {
            name: name.into(),
            ty,
            default: Some(default.into()),
        }
    }
}

/// A callable overload: method, constructor or free native callback.
pub struct Signature {
    name: String,
    params: Vec<Param>,
    returns: ParamType,
    is_static: bool,
    variadic: bool,
    call: NativeCall,
}

impl Signature {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Param>,
        returns: ParamType,
        call: impl Fn(Option<&mut dyn Any>, &[Raw]) -> Result<Raw, String> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            returns,
            is_static: false,
            variadic: false,
            call: Rc::new(call),
        }
    }

    /// Mark as static: dispatched without a receiver.
    #[must_use]
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Accept any number of arguments past the declared ones; extras are
    /// bound as `any`.
    #[must_use]
    pub fn into_variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    #[inline]
    pub fn returns(&self) -> &ParamType {
        &self.returns
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline]
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    #[inline]
    pub fn returns_void(&self) -> bool {
        self.returns == ParamType::Void
    }

    /// Fewest arguments a caller may supply: everything after the last
    /// parameter without a default can be filled from defaults.
    pub fn min_arity(&self) -> usize {
        self.params
            .iter()
            .rposition(|p| p.default.is_none())
            .map_or(0, |i| i + 1)
    }

    #[inline]
    pub fn accepts_arity(&self, count: usize) -> bool {
        count >= self.min_arity() && (self.variadic || count <= self.params.len())
    }

    pub(crate) fn native(&self) -> &NativeCall {
        &self.call
    }

    /// `name(int, string = ...)` form for messages and display.
    pub fn describe(&self) -> String {
        let params: Vec<String> = self
            .params
            .iter()
            .map(|p| {
                if p.default.is_some() {
                    format!("{} {} = ..", p.ty, p.name)
                } else {
                    format!("{} {}", p.ty, p.name)
                }
            })
            .collect();
        let rest = match (self.variadic, params.is_empty()) {
            (false, _) => "",
            (true, true) => "..",
            (true, false) => ", ..",
        };
        format!("{}({}{rest}) -> {}", self.name, params.join(", "), self.returns)
    }

    fn check_defaults(&self) -> Result<(), CatalogError> {
        check_defaults(&self.name, &self.params)
    }
}

fn check_defaults(callee: &str, params: &[Param]) -> Result<(), CatalogError> {
    let mut seen_default = false;
    for param in params {
        if param.default.is_some() {
            seen_default = true;
        } else if seen_default {
            return Err(CatalogError::DefaultNotTrailing {
                callee: callee.to_string(),
                param: param.name.clone(),
            });
        }
    }
    Ok(())
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.describe())
    }
}

/// A property or field.
#[derive(Clone)]
pub struct Accessor {
    name: String,
    ty: ParamType,
    is_static: bool,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl Accessor {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    pub(crate) fn getter(&self) -> Option<&Getter> {
        self.getter.as_ref()
    }

    pub(crate) fn setter(&self) -> Option<&Setter> {
        self.setter.as_ref()
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("is_static", &self.is_static)
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Overloads sharing one method name, in declaration order.
pub type Overloads = Rc<[Rc<Signature>]>;

/// Immutable catalog entry for one host type.
pub struct TypeInfo {
    name: Rc<str>,
    type_id: TypeId,
    properties: Vec<Accessor>,
    fields: Vec<Accessor>,
    methods: FxHashMap<String, Overloads>,
    method_order: Vec<String>,
    constructors: Overloads,
    default_ctor: Option<NativeCall>,
    display: Option<DisplayHook>,
}

impl TypeInfo {
    /// Start registering host type `T` under `name`.
    pub fn builder<T: 'static>(name: impl Into<String>) -> TypeBuilder<T> {
        TypeBuilder::new(name)
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn rust_type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn properties(&self) -> &[Accessor] {
        &self.properties
    }

    pub fn fields(&self) -> &[Accessor] {
        &self.fields
    }

    pub fn property(&self, name: &str) -> Option<&Accessor> {
        self.properties.iter().find(|a| a.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Accessor> {
        self.fields.iter().find(|a| a.name == name)
    }

    pub fn methods(&self, name: &str) -> Option<&Overloads> {
        self.methods.get(name)
    }

    /// Method names in declaration order.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.method_order.iter().map(String::as_str)
    }

    pub fn constructors(&self) -> &Overloads {
        &self.constructors
    }

    pub(crate) fn default_ctor(&self) -> Option<&NativeCall> {
        self.default_ctor.as_ref()
    }

    #[inline]
    pub fn is_default_constructible(&self) -> bool {
        self.default_ctor.is_some()
    }

    /// Wrap a host value as an instance of this type.
    pub fn instance<T: 'static>(self: &Rc<Self>, value: T) -> Result<HostObject, CatalogError> {
        HostObject::new(value, Rc::clone(self))
    }

    /// Custom display text for an instance, if the type registered one.
    /// A hook that panics counts as no hook.
    pub(crate) fn display_instance(&self, instance: &dyn Any) -> Option<String> {
        let hook = self.display.as_ref()?;
        catch_native(|| Ok(hook(instance))).ok().flatten()
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("properties", &self.properties.len())
            .field("fields", &self.fields.len())
            .field("methods", &self.method_order)
            .field("constructors", &self.constructors.len())
            .finish_non_exhaustive()
    }
}

fn receiver_mismatch(type_name: &str) -> String {
    format!("receiver is not a {type_name}")
}

type Make<T> = Rc<dyn Fn(&[Raw]) -> Result<T, String>>;

/// Typed registration for host type `T`.
pub struct TypeBuilder<T> {
    name: String,
    properties: Vec<Accessor>,
    fields: Vec<Accessor>,
    methods: Vec<(String, Signature)>,
    constructors: Vec<(Vec<Param>, Make<T>)>,
    default_ctor: Option<Rc<dyn Fn() -> T>>,
    display: Option<DisplayHook>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> TypeBuilder<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            default_ctor: None,
            display: None,
            _marker: PhantomData,
        }
    }

    fn instance_getter<V: HostKind>(&self, get: impl Fn(&T) -> V + 'static) -> Getter {
        let type_name = self.name.clone();
        Rc::new(move |recv: Option<&dyn Any>| {
            let this = recv
                .and_then(|r| r.downcast_ref::<T>())
                .ok_or_else(|| receiver_mismatch(&type_name))?;
            Ok(get(this).into_raw())
        })
    }

    fn instance_setter<V: HostKind>(&self, set: impl Fn(&mut T, V) + 'static) -> Setter {
        let type_name = self.name.clone();
        Rc::new(move |recv: Option<&mut dyn Any>, raw: Raw| {
            let this = recv
                .and_then(|r| r.downcast_mut::<T>())
                .ok_or_else(|| receiver_mismatch(&type_name))?;
            let value = V::from_raw(&raw)
                .ok_or_else(|| format!("cannot store {} as {}", raw.kind_name(), V::param_type()))?;
            set(this, value);
            Ok(())
        })
    }

    /// Read-only instance property.
    #[must_use]
    pub fn property<V: HostKind>(mut self, name: &str, get: impl Fn(&T) -> V + 'static) -> Self {
        let getter = self.instance_getter(get);
        self.properties.push(Accessor {
            name: name.to_string(),
            ty: V::param_type(),
            is_static: false,
            getter: Some(getter),
            setter: None,
        });
        self
    }

    /// Read/write instance property.
    #[must_use]
    pub fn property_rw<V: HostKind>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> V + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> Self {
        let getter = self.instance_getter(get);
        let setter = self.instance_setter(set);
        self.properties.push(Accessor {
            name: name.to_string(),
            ty: V::param_type(),
            is_static: false,
            getter: Some(getter),
            setter: Some(setter),
        });
        self
    }

    /// Write-only instance property. Hidden from member enumeration.
    #[must_use]
    pub fn property_wo<V: HostKind>(mut self, name: &str, set: impl Fn(&mut T, V) + 'static) -> Self {
        let setter = self.instance_setter(set);
        self.properties.push(Accessor {
            name: name.to_string(),
            ty: V::param_type(),
            is_static: false,
            getter: None,
            setter: Some(setter),
        });
        self
    }

    /// Read-only static property.
    #[must_use]
    pub fn static_property<V: HostKind>(mut self, name: &str, get: impl Fn() -> V + 'static) -> Self {
        self.properties.push(Accessor {
            name: name.to_string(),
            ty: V::param_type(),
            is_static: true,
            getter: Some(Rc::new(move |_: Option<&dyn Any>| Ok(get().into_raw()))),
            setter: None,
        });
        self
    }

    /// Writable instance field.
    #[must_use]
    pub fn field<V: HostKind>(
        mut self,
        name: &str,
        get: impl Fn(&T) -> V + 'static,
        set: impl Fn(&mut T, V) + 'static,
    ) -> Self {
        let getter = self.instance_getter(get);
        let setter = self.instance_setter(set);
        self.fields.push(Accessor {
            name: name.to_string(),
            ty: V::param_type(),
            is_static: false,
            getter: Some(getter),
            setter: Some(setter),
        });
        self
    }

    /// Read-only instance field.
    #[must_use]
    pub fn readonly_field<V: HostKind>(mut self, name: &str, get: impl Fn(&T) -> V + 'static) -> Self {
        let getter = self.instance_getter(get);
        self.fields.push(Accessor {
            name: name.to_string(),
            ty: V::param_type(),
            is_static: false,
            getter: Some(getter),
            setter: None,
        });
        self
    }

    /// Writable static field.
    #[must_use]
    pub fn static_field<V: HostKind>(
        mut self,
        name: &str,
        get: impl Fn() -> V + 'static,
        set: impl Fn(V) + 'static,
    ) -> Self {
        let setter: Setter = Rc::new(move |_: Option<&mut dyn Any>, raw: Raw| {
            let value = V::from_raw(&raw)
                .ok_or_else(|| format!("cannot store {} as {}", raw.kind_name(), V::param_type()))?;
            set(value);
            Ok(())
        });
        self.fields.push(Accessor {
            name: name.to_string(),
            ty: V::param_type(),
            is_static: true,
            getter: Some(Rc::new(move |_: Option<&dyn Any>| Ok(get().into_raw()))),
            setter: Some(setter),
        });
        self
    }

    /// Instance method overload. Repeat the name to add overloads.
    #[must_use]
    pub fn method(
        mut self,
        name: &str,
        params: Vec<Param>,
        returns: ParamType,
        body: impl Fn(&mut T, &[Raw]) -> Result<Raw, String> + 'static,
    ) -> Self {
        let type_name = self.name.clone();
        let sig = Signature::new(name, params, returns, move |recv, args| {
            let this = recv
                .and_then(|r| r.downcast_mut::<T>())
                .ok_or_else(|| receiver_mismatch(&type_name))?;
            body(this, args)
        });
        self.methods.push((name.to_string(), sig));
        self
    }

    /// Static method overload.
    #[must_use]
    pub fn static_method(
        mut self,
        name: &str,
        params: Vec<Param>,
        returns: ParamType,
        body: impl Fn(&[Raw]) -> Result<Raw, String> + 'static,
    ) -> Self {
        let sig = Signature::new(name, params, returns, move |_, args| body(args)).into_static();
        self.methods.push((name.to_string(), sig));
        self
    }

    /// Constructor overload.
    #[must_use]
    pub fn constructor(
        mut self,
        params: Vec<Param>,
        make: impl Fn(&[Raw]) -> Result<T, String> + 'static,
    ) -> Self {
        self.constructors.push((params, Rc::new(make)));
        self
    }

    /// Allow zero-argument construction through `T::default()` when no
    /// constructor overload matches.
    #[must_use]
    pub fn default_constructible(mut self) -> Self
    where
        T: Default,
    {
        self.default_ctor = Some(Rc::new(T::default));
        self
    }

    /// Text used when formatting instances; defaults to `<TypeName>`.
    #[must_use]
    pub fn display(mut self, show: impl Fn(&T) -> String + 'static) -> Self {
        self.display = Some(Rc::new(move |any: &dyn Any| any.downcast_ref::<T>().map(&show)));
        self
    }

    fn check_names(&self) -> Result<(), CatalogError> {
        let mut seen: Vec<&str> = Vec::new();
        let accessors = self.properties.iter().chain(self.fields.iter());
        for name in accessors.map(|a| a.name.as_str()) {
            if seen.contains(&name) {
                return Err(self.duplicate(name));
            }
            seen.push(name);
        }
        for (name, _) in &self.methods {
            if self.properties.iter().chain(self.fields.iter()).any(|a| a.name == *name) {
                return Err(self.duplicate(name));
            }
        }
        Ok(())
    }

    fn duplicate(&self, member: &str) -> CatalogError {
        CatalogError::DuplicateMember {
            type_name: self.name.clone(),
            member: member.to_string(),
        }
    }

    /// Validate and freeze the catalog.
    pub fn build(self) -> Result<Rc<TypeInfo>, CatalogError> {
        self.check_names()?;
        for (_, sig) in &self.methods {
            sig.check_defaults()?;
        }
        let ctor_name = format!("{}.new", self.name);
        for (params, _) in &self.constructors {
            check_defaults(&ctor_name, params)?;
        }
        Ok(self.freeze())
    }

    /// Freeze without validation. Only for catalogs declared in this crate.
    pub(crate) fn freeze(self) -> Rc<TypeInfo> {
        let mut methods: FxHashMap<String, Vec<Rc<Signature>>> = FxHashMap::default();
        let mut method_order = Vec::new();
        for (name, sig) in self.methods {
            if !methods.contains_key(&name) {
                method_order.push(name.clone());
            }
            methods.entry(name).or_default().push(Rc::new(sig));
        }
        let methods: FxHashMap<String, Overloads> = methods
            .into_iter()
            .map(|(name, overloads)| (name, Overloads::from(overloads)))
            .collect();

        let name: Rc<str> = Rc::from(self.name.as_str());
        let ctor_name = format!("{name}.new");
        let ctor_specs = self.constructors;
        let default_make = self.default_ctor;

        Rc::new_cyclic(|weak: &Weak<TypeInfo>| {
            let returns = ParamType::Object(Rc::clone(&name));
            let constructors: Vec<Rc<Signature>> = ctor_specs
                .into_iter()
                .map(|(params, make)| {
                    let weak = weak.clone();
                    Rc::new(
                        Signature::new(ctor_name.clone(), params, returns.clone(), move |_, args| {
                            let value = make(args)?;
                            instantiate(&weak, value)
                        })
                        .into_static(),
                    )
                })
                .collect();
            let default_ctor = default_make.map(|make| {
                let weak = weak.clone();
                let call: NativeCall = Rc::new(move |_: Option<&mut dyn Any>, _: &[Raw]| {
                    instantiate(&weak, make())
                });
                call
            });
            TypeInfo {
                name: Rc::clone(&name),
                type_id: TypeId::of::<T>(),
                properties: self.properties,
                fields: self.fields,
                methods,
                method_order,
                constructors: Overloads::from(constructors),
                default_ctor,
                display: self.display,
            }
        })
    }
}

fn instantiate<T: 'static>(weak: &Weak<TypeInfo>, value: T) -> Result<Raw, String> {
    let ty = weak
        .upgrade()
        .ok_or_else(|| "type descriptor no longer exists".to_string())?;
    Ok(Raw::Object(HostObject::from_parts(value, ty)))
}

/// Name → type lookup so a front-end can resolve type names to handles.
#[derive(Default)]
pub struct TypeRegistry {
    types: FxHashMap<String, Rc<TypeInfo>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, ty: Rc<TypeInfo>) -> Result<(), CatalogError> {
        let name = ty.name().to_string();
        if self.types.contains_key(&name) {
            return Err(CatalogError::DuplicateType { type_name: name });
        }
        self.types.insert(name, ty);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rc<TypeInfo>> {
        self.types.get(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests;
