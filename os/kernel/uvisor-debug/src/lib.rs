//! # Debug Output over ITM
//!
//! Diagnostic output for the isolation monitor. There is no console and no
//! allocator; everything is written byte by byte to stimulus port 0 of the
//! Cortex-M Instrumentation Trace Macrocell (ITM), where a debug probe picks
//! it up through SWO.
//!
//! ## Components
//!
//! * [`DebugLogger`]: a `log::Log` implementation, installed once at boot.
//!   All library code logs through the `log` facade.
//! * [`debug_trace!`]: direct output bypassing the logger. Used from fault
//!   context, where the logger's own state cannot be trusted.
//! * [`itm_fmt::ItmSink`]: the `core::fmt::Write` sink both of them use.
//!
//! ## Feature System
//!
//! With the `enabled` feature (default) on an ARM target, output goes to the
//! ITM. Otherwise every write is a no-op, so host builds and release images
//! without a probe carry no trace code.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use uvisor_debug::DebugLogger;
//! use log::{LevelFilter, info};
//!
//! DebugLogger::new(LevelFilter::Debug).init().ok();
//! info!("vmpu: protection enabled");
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod logger;

pub use logger::{DebugLogger, write_record};

#[doc(hidden)]
pub mod itm_fmt {
    use core::fmt::{self, Write};

    /// Write a single byte to ITM stimulus port 0.
    ///
    /// Dropped silently if the port is not enabled in `ITM_TER`; waiting on a
    /// disabled port would never complete.
    #[cfg(all(feature = "enabled", target_arch = "arm"))]
    #[inline]
    pub fn itm_putc(c: u8) {
        use uvisor_info::memory::{ITM_STIM0, ITM_TER};

        unsafe {
            let ter = core::ptr::read_volatile(ITM_TER as usize as *const u32);
            if ter & 1 == 0 {
                return;
            }
            let stim = ITM_STIM0 as usize as *mut u32;
            // Bit 0 reads as 1 once the port FIFO can accept a write.
            while core::ptr::read_volatile(stim) & 1 == 0 {
                core::hint::spin_loop();
            }
            core::ptr::write_volatile(stim.cast::<u8>(), c);
        }
    }

    #[cfg(not(all(feature = "enabled", target_arch = "arm")))]
    #[inline]
    pub fn itm_putc(_c: u8) {}

    pub struct ItmSink;

    impl Write for ItmSink {
        #[inline]
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                itm_putc(b);
            }
            Ok(())
        }
    }

    #[doc(hidden)]
    #[inline]
    pub fn itm_write(args: fmt::Arguments) {
        // Ignore errors; this is best-effort debug output.
        let _ = fmt::write(&mut ItmSink, args);
    }
}

#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {{
        $crate::itm_fmt::itm_write(core::format_args!($($arg)*));
    }};
}
