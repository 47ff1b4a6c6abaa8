//! # Single-core synchronization primitives
//!
//! The isolation monitor runs on one core with no scheduler of its own. The
//! only concurrency it has to defend against is asynchronous interruption,
//! so the primitives here never spin: a lock that is already held means the
//! caller re-entered itself, which is reported to the caller instead of
//! deadlocking the core.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod irq;
mod mutex;
mod once_slot;

pub use irq::{InterruptMask, IrqGuard};
pub use mutex::{IrqMutexGuard, Mutex, MutexGuard};
pub use once_slot::OnceSlot;
