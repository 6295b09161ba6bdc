//! Comparable callback handles.
//!
//! Configuration structs derive `PartialEq` and `Clone`; closures stored in
//! them go through [`CallbackWith`] so that cloning is cheap and equality is
//! identity.

use std::{fmt, sync::Arc};

/// Stable, comparable slot handle for any shared callable trait object.
///
/// `Slot` compares by identity (`Arc::ptr_eq`) so it can be used in
/// configuration without forcing deep closure comparisons.
struct Slot<F: ?Sized> {
    inner: Arc<F>,
}

impl<F: ?Sized> Slot<F> {
    fn from_shared(handler: Arc<F>) -> Self {
        Self { inner: handler }
    }

    fn shared(&self) -> &F {
        &self.inner
    }
}

impl<F: ?Sized> Clone for Slot<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F: ?Sized> PartialEq for Slot<F> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Stable, comparable callback handle for `Fn(T) -> R`.
pub struct CallbackWith<T, R = ()> {
    slot: Slot<dyn Fn(T) -> R + Send + Sync>,
}

impl<T, R> CallbackWith<T, R> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Self {
            slot: Slot::from_shared(Arc::new(handler)),
        }
    }

    /// Invoke the callback with an argument.
    pub fn call(&self, value: T) -> R {
        (self.slot.shared())(value)
    }
}

impl<T, R, F> From<F> for CallbackWith<T, R>
where
    F: Fn(T) -> R + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T, R> Clone for CallbackWith<T, R> {
    fn clone(&self) -> Self {
        Self {
            slot: self.slot.clone(),
        }
    }
}

impl<T, R> PartialEq for CallbackWith<T, R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<T, R> Eq for CallbackWith<T, R> {}

impl<T, R> fmt::Debug for CallbackWith<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackWith").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_identity_equality() {
        let a = CallbackWith::new(|x: i32| x + 1);
        let b = a.clone();
        let c = CallbackWith::new(|x: i32| x + 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(b.call(41), 42);
    }
}
