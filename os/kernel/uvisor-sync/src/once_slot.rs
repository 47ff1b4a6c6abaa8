use core::{
    cell::UnsafeCell,
    mem::MaybeUninit,
    sync::atomic::{AtomicU8, Ordering},
};

const EMPTY: u8 = 0;
const WRITING: u8 = 1;
const READY: u8 = 2;

/// A write-once slot readable from exception context.
///
/// Reading never blocks and never takes a lock: a fault handler that fires
/// while the slot is being written simply observes it as empty.
pub struct OnceSlot<T> {
    state: AtomicU8,
    value: UnsafeCell<MaybeUninit<T>>,
}

impl<T> Default for OnceSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OnceSlot<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(EMPTY),
            value: UnsafeCell::new(MaybeUninit::uninit()),
        }
    }

    /// Returns `Some(&T)` once a value has been published.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        if self.state.load(Ordering::Acquire) == READY {
            // SAFETY: READY guarantees the write is done and never repeated
            Some(unsafe { &*(*self.value.get()).as_ptr() })
        } else {
            None
        }
    }

    /// Publish `value` if the slot is still empty.
    ///
    /// # Errors
    /// Hands `value` back if the slot was already written (or is being
    /// written by an interrupted caller).
    pub fn set(&self, value: T) -> Result<&T, T> {
        if self
            .state
            .compare_exchange(EMPTY, WRITING, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(value);
        }

        unsafe {
            (*self.value.get()).write(value);
        }
        self.state.store(READY, Ordering::Release);
        // SAFETY: just written
        Ok(unsafe { &*(*self.value.get()).as_ptr() })
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.state.load(Ordering::Acquire) == READY
    }
}

// Safety: shared only after READY; written at most once.
unsafe impl<T: Sync + Send> Sync for OnceSlot<T> {}
unsafe impl<T: Send> Send for OnceSlot<T> {}
