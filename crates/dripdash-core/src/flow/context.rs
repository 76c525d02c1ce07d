use std::sync::Arc;

use parking_lot::RwLock;

/// Shared handle to the state of an in-progress flow.
///
/// Clones point at the same state. Only one step is active at a time, so
/// writers never contend.
#[derive(Debug, Default)]
pub struct FlowContext<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> Clone for FlowContext<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> FlowContext<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Replace the whole state.
    pub fn set(&self, value: T) {
        *self.inner.write() = value;
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.read())
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.read().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
