//! Lock, cell and map types selected by cargo features.
//!
//! `parking-lot` swaps the std locks for `parking_lot` and `ahash` swaps the
//! map hasher. The rest of the crate only sees the aliases below.

// Always `once_cell`: injection relies on its fallible, blocking `get_or_try_init`.
pub(crate) use once_cell::sync::OnceCell;

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

#[cfg(feature = "parking-lot")]
pub(crate) use parking_lot::RwLock;

/// `std::sync::RwLock` with parking_lot's guard-returning API.
///
/// Nothing in the crate holds a guard across user code, so a poisoned lock
/// still guards consistent data and is recovered instead of propagated.
#[cfg(not(feature = "parking-lot"))]
#[derive(Debug, Default)]
pub(crate) struct RwLock<T>(std::sync::RwLock<T>);

#[cfg(not(feature = "parking-lot"))]
impl<T> RwLock<T> {
    pub(crate) fn new(value: T) -> Self {
        Self(std::sync::RwLock::new(value))
    }

    pub(crate) fn read(&self) -> std::sync::RwLockReadGuard<'_, T> {
        self.0.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> std::sync::RwLockWriteGuard<'_, T> {
        self.0.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_lock_recovers_after_panicking_writer() {
        let lock = Arc::new(RwLock::new(1u32));
        let cloned = lock.clone();
        let _ = thread::spawn(move || {
            let mut guard = cloned.write();
            *guard = 2;
            panic!("writer failed");
        })
        .join();

        assert_eq!(*lock.read(), 2);
        *lock.write() = 3;
        assert_eq!(*lock.read(), 3);
    }

    #[test]
    fn test_once_cell_initializes_once() {
        let cell: OnceCell<u32> = OnceCell::new();
        assert!(cell.get().is_none());
        assert_eq!(*cell.get_or_init(|| 5), 5);
        assert_eq!(*cell.get_or_init(|| 6), 5);
    }

    #[test]
    fn test_once_cell_failed_init_leaves_cell_empty() {
        let cell: OnceCell<u32> = OnceCell::new();
        assert_eq!(cell.get_or_try_init(|| Err::<u32, _>("nope")), Err("nope"));
        assert!(cell.get().is_none());
        assert_eq!(cell.get_or_try_init(|| Ok::<_, &str>(7)), Ok(&7));
    }
}
