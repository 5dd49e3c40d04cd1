//! Host object instances.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::catalog::TypeInfo;
use crate::errors::{unknown_error, CatalogError, ErrorValue};

/// A live host object paired with its catalog entry.
///
/// Clones are handles to the same instance; member writes through any clone
/// are visible through all of them.
#[derive(Clone)]
pub struct HostObject {
    data: Rc<RefCell<dyn Any>>,
    ty: Rc<TypeInfo>,
}

impl HostObject {
    /// Pair `value` with `ty`, checking that `ty` was registered for `T`.
    pub fn new<T: 'static>(value: T, ty: Rc<TypeInfo>) -> Result<Self, CatalogError> {
        if ty.rust_type_id() != TypeId::of::<T>() {
            return Err(CatalogError::InstanceTypeMismatch {
                expected: ty.name().to_string(),
            });
        }
        Ok(Self::from_parts(value, ty))
    }

    pub(crate) fn from_parts<T: 'static>(value: T, ty: Rc<TypeInfo>) -> Self {
        let data: Rc<RefCell<dyn Any>> = Rc::new(RefCell::new(value));
        Self { data, ty }
    }

    #[inline]
    pub fn type_info(&self) -> &Rc<TypeInfo> {
        &self.ty
    }

    /// Read the instance as `T`. `None` if it is another type or is
    /// currently borrowed for a write.
    pub fn with<T: 'static, R>(&self, read: impl FnOnce(&T) -> R) -> Option<R> {
        let data = self.data.try_borrow().ok()?;
        data.downcast_ref::<T>().map(read)
    }

    /// Mutate the instance as `T`. `None` if it is another type or in use.
    pub fn with_mut<T: 'static, R>(&self, write: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut data = self.data.try_borrow_mut().ok()?;
        data.downcast_mut::<T>().map(write)
    }

    /// Exclusive access for member dispatch. Re-entrant use of the same
    /// instance (a method reaching its own receiver) is reported, not a panic.
    pub(crate) fn with_any_mut<R>(
        &self,
        f: impl FnOnce(&mut dyn Any) -> R,
    ) -> Result<R, ErrorValue> {
        let mut data = self
            .data
            .try_borrow_mut()
            .map_err(|_| unknown_error(format!("{} instance is already in use", self.ty.name())))?;
        Ok(f(&mut *data))
    }

    /// Custom display text, if the type has one and the instance is readable.
    pub(crate) fn display_text(&self) -> Option<String> {
        let data = self.data.try_borrow().ok()?;
        self.ty.display_instance(&*data)
    }

    #[inline]
    pub fn ptr_eq(&self, other: &HostObject) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.data), Rc::as_ptr(&other.data))
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostObject({})", self.ty.name())
    }
}
