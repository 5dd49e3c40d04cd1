//! Shared, typed host lists.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::catalog::ParamType;
use crate::raw::{HostKind, Raw};

/// A host-owned list with a fixed element type.
///
/// Clones share storage: a list obtained through a property and mutated by
/// the evaluator is the same list the host sees. Elements are stored already
/// converted to the element type.
#[derive(Clone)]
pub struct HostList {
    items: Rc<RefCell<Vec<Raw>>>,
    elem: Rc<ParamType>,
}

impl HostList {
    /// Empty list of `elem`.
    pub fn new(elem: ParamType) -> Self {
        Self::with_items(elem, Vec::new())
    }

    /// List of `elem` holding `items`; callers guarantee the items fit.
    pub fn with_items(elem: ParamType, items: Vec<Raw>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
            elem: Rc::new(elem),
        }
    }

    /// Typed list from Rust values.
    pub fn from_vec<T: HostKind>(items: Vec<T>) -> Self {
        let raws = items.into_iter().map(HostKind::into_raw).collect();
        Self::with_items(T::param_type(), raws)
    }

    /// List whose element type is inferred from its contents: the common
    /// natural type of the non-null elements, or `any` when they disagree.
    pub fn untyped(items: Vec<Raw>) -> Self {
        let elem = common_type(natural_types(items.iter()));
        Self::with_items(elem, items)
    }

    #[inline]
    pub fn elem_type(&self) -> &ParamType {
        &self.elem
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<Raw> {
        self.items.borrow().get(index).cloned()
    }

    /// Replace element `index`. Returns `false` when out of range.
    pub fn set(&self, index: usize, item: Raw) -> bool {
        match self.items.borrow_mut().get_mut(index) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn push(&self, item: Raw) {
        self.items.borrow_mut().push(item);
    }

    /// Insert at `index` (`index == len` appends). Returns `false` when out of range.
    pub fn insert(&self, index: usize, item: Raw) -> bool {
        let mut items = self.items.borrow_mut();
        if index > items.len() {
            return false;
        }
        items.insert(index, item);
        true
    }

    pub fn remove(&self, index: usize) -> Option<Raw> {
        let mut items = self.items.borrow_mut();
        (index < items.len()).then(|| items.remove(index))
    }

    pub fn clear(&self) {
        self.items.borrow_mut().clear();
    }

    /// Copy of the current elements.
    pub fn snapshot(&self) -> Vec<Raw> {
        self.items.borrow().clone()
    }

    /// Both handles share storage.
    #[inline]
    pub fn ptr_eq(&self, other: &HostList) -> bool {
        Rc::ptr_eq(&self.items, &other.items)
    }
}

/// The type every entry agrees on, `any` when they disagree or there are
/// none.
pub(crate) fn common_type(types: impl Iterator<Item = ParamType>) -> ParamType {
    let mut common: Option<ParamType> = None;
    for ty in types {
        match &common {
            None => common = Some(ty),
            Some(seen) if *seen == ty => {}
            Some(_) => return ParamType::Any,
        }
    }
    common.unwrap_or(ParamType::Any)
}

/// Natural types of the non-null payloads.
pub(crate) fn natural_types<'a>(raws: impl Iterator<Item = &'a Raw> + 'a) -> impl Iterator<Item = ParamType> + 'a {
    raws.filter(|raw| !raw.is_null()).map(Raw::natural_type)
}

impl fmt::Debug for HostList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostList<{}>({:?})", self.elem, self.items.borrow())
    }
}
