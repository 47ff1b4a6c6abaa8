use crate::irq::{InterruptMask, IrqGuard};
use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

/// Non-spinning mutual exclusion for a single core.
///
/// Acquisition never waits. On one core the holder cannot make progress while
/// the caller spins, so a held lock can only mean re-entry (an exception
/// handler or a nested call reaching the same state). `try_lock` reports that
/// as `None` and leaves the decision to the caller.
pub struct Mutex<T> {
    held: AtomicBool,
    cell: UnsafeCell<T>,
}

unsafe impl<T: Send> Sync for Mutex<T> {}
unsafe impl<T: Send> Send for Mutex<T> {}

impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Self {
            held: AtomicBool::new(false),
            cell: UnsafeCell::new(value),
        }
    }

    #[inline]
    pub const fn get_mut(&mut self) -> &mut T {
        self.cell.get_mut()
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.held.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        if self.held.swap(true, Ordering::Acquire) {
            None
        } else {
            Some(MutexGuard { m: self })
        }
    }

    /// Masks interrupts, then acquires the mutex.
    ///
    /// Interrupts are masked *before* the acquisition attempt so that no
    /// handler can observe the lock held with interrupts still enabled. If the
    /// mutex is already held the mask is restored and `None` is returned.
    ///
    /// Dropping the returned guard releases the mutex first and then restores
    /// the previous interrupt state.
    #[inline]
    pub fn try_lock_irq<'a, I>(&'a self, mask: &'a I) -> Option<IrqMutexGuard<'a, T, I>>
    where
        I: InterruptMask + ?Sized,
    {
        let irq = IrqGuard::new(mask);
        let guard = self.try_lock()?;
        Some(IrqMutexGuard { guard, _irq: irq })
    }
}

pub struct MutexGuard<'a, T> {
    m: &'a Mutex<T>,
}

impl<T> Deref for MutexGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        unsafe { &*self.m.cell.get() }
    }
}

impl<T> DerefMut for MutexGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        unsafe { &mut *self.m.cell.get() }
    }
}

impl<T> Drop for MutexGuard<'_, T> {
    fn drop(&mut self) {
        self.m.held.store(false, Ordering::Release);
    }
}

/// A [`MutexGuard`] held with interrupts masked.
///
/// Field order is drop order: the mutex is released before interrupts are
/// restored.
pub struct IrqMutexGuard<'a, T, I: InterruptMask + ?Sized> {
    guard: MutexGuard<'a, T>,
    _irq: IrqGuard<'a, I>,
}

impl<T, I: InterruptMask + ?Sized> Deref for IrqMutexGuard<'_, T, I> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T, I: InterruptMask + ?Sized> DerefMut for IrqMutexGuard<'_, T, I> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}
