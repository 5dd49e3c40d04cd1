//! Shared, typed host dictionaries.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::catalog::ParamType;
use crate::raw::{HostKind, Raw};
use crate::value::list::{common_type, natural_types};

/// A dictionary key. Only scalar payloads can key a dictionary.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Char(char),
    Str(Rc<str>),
}

impl MapKey {
    /// Key for a raw payload, if it is keyable.
    pub fn from_raw(raw: &Raw) -> Option<Self> {
        match raw {
            Raw::Bool(b) => Some(MapKey::Bool(*b)),
            Raw::Int(n) => Some(MapKey::Int(*n)),
            Raw::Char(c) => Some(MapKey::Char(*c)),
            Raw::Str(s) => Some(MapKey::Str(Rc::clone(s))),
            _ => None,
        }
    }

    pub fn natural_type(&self) -> ParamType {
        match self {
            MapKey::Bool(_) => ParamType::Bool,
            MapKey::Int(_) => ParamType::Int,
            MapKey::Char(_) => ParamType::Char,
            MapKey::Str(_) => ParamType::Str,
        }
    }

    pub fn to_raw(&self) -> Raw {
        match self {
            MapKey::Bool(b) => Raw::Bool(*b),
            MapKey::Int(n) => Raw::Int(*n),
            MapKey::Char(c) => Raw::Char(*c),
            MapKey::Str(s) => Raw::Str(Rc::clone(s)),
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(b) => write!(f, "{b}"),
            MapKey::Int(n) => write!(f, "{n}"),
            MapKey::Char(c) => write!(f, "{c:?}"),
            MapKey::Str(s) => write!(f, "{:?}", &**s),
        }
    }
}

/// A Rust type usable as a dictionary key.
pub trait HostKey: HostKind {}

macro_rules! host_key {
    ($($ty:ty),*) => {
        $(impl HostKey for $ty {})*
    };
}

host_key!(bool, char, String);
host_key!(i8, i16, i32, i64, u8, u16, u32);
host_key!(u64, usize, isize);

/// A host-owned dictionary with fixed key and value types.
///
/// Entries keep insertion order. Clones share storage.
#[derive(Clone)]
pub struct HostMap {
    entries: Rc<RefCell<Vec<(MapKey, Raw)>>>,
    key: Rc<ParamType>,
    value: Rc<ParamType>,
}

impl HostMap {
    pub fn new(key: ParamType, value: ParamType) -> Self {
        Self {
            entries: Rc::new(RefCell::new(Vec::new())),
            key: Rc::new(key),
            value: Rc::new(value),
        }
    }

    /// Dictionary whose key and value types are inferred from its entries,
    /// the way [`HostList::untyped`](super::HostList::untyped) infers its
    /// element type. Later duplicates overwrite earlier ones.
    pub fn untyped(pairs: Vec<(MapKey, Raw)>) -> Self {
        let key = common_type(pairs.iter().map(|(k, _)| k.natural_type()));
        let value = common_type(natural_types(pairs.iter().map(|(_, v)| v)));
        let map = Self::new(key, value);
        for (key, value) in pairs {
            map.insert(key, value);
        }
        map
    }

    /// Typed dictionary from Rust pairs. Later duplicates overwrite earlier
    /// ones; integer keys outside the `int` range are skipped.
    pub fn from_pairs<K: HostKey, V: HostKind>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        let map = Self::new(K::param_type(), V::param_type());
        for (key, value) in pairs {
            if let Some(key) = MapKey::from_raw(&key.into_raw()) {
                map.insert(key, value.into_raw());
            }
        }
        map
    }

    #[inline]
    pub fn key_type(&self) -> &ParamType {
        &self.key
    }

    #[inline]
    pub fn value_type(&self) -> &ParamType {
        &self.value
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &MapKey) -> Option<Raw> {
        self.entries
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.entries.borrow().iter().any(|(k, _)| k == key)
    }

    /// Insert or overwrite. An overwrite keeps the entry's position.
    pub fn insert(&self, key: MapKey, value: Raw) {
        let mut entries = self.entries.borrow_mut();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => entries.push((key, value)),
        }
    }

    pub fn remove(&self, key: &MapKey) -> Option<Raw> {
        let mut entries = self.entries.borrow_mut();
        let pos = entries.iter().position(|(k, _)| k == key)?;
        Some(entries.remove(pos).1)
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }

    pub fn keys(&self) -> Vec<MapKey> {
        self.entries.borrow().iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<Raw> {
        self.entries.borrow().iter().map(|(_, v)| v.clone()).collect()
    }

    /// Copy of the current entries in insertion order.
    pub fn snapshot(&self) -> Vec<(MapKey, Raw)> {
        self.entries.borrow().clone()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &HostMap) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for HostMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HostMap<{}, {}>({:?})",
            self.key,
            self.value,
            self.entries.borrow()
        )
    }
}
