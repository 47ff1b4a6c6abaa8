//! # Isolation Monitor Configuration and Platform Layout
//!
//! This crate is the single source of truth for the compile-time
//! configuration of the memory protection core and the platform constants it
//! is built against (Cortex-M4 core with the Kinetis K64 system MPU).
//!
//! ## Architecture
//!
//! ### Box Configuration ([`config`])
//! * **Box Limit**: [`UVISOR_MAX_BOXES`](config::UVISOR_MAX_BOXES), the
//!   exclusive upper bound of every box ID.
//! * **Bootstrap Box**: box `0`, the privileged domain active at power-on.
//! * **ACL Granule**: the smallest protectable unit of the MPU.
//!
//! ### Platform Layout ([`memory`])
//! * **Register Addresses**: SCB, MPU and ITM register locations.
//! * **Memory Map**: named address ranges used to label ACLs in diagnostics.
//!
//! ## Memory Map (K64, 1 MiB flash / 256 KiB SRAM)
//!
//! ```text
//! 0x0000_0000 ┌─────────────────────────────────┐
//!             │        Program Flash            │
//! 0x0010_0000 ├─────────────────────────────────┤
//!             ┆                                 ┆
//! 0x1FFF_0000 ├─────────────────────────────────┤
//!             │   SRAM_L (code bus, 64 KiB)     │
//! 0x2000_0000 ├─────────────────────────────────┤
//!             │   SRAM_U (system bus, 192 KiB)  │
//! 0x2003_0000 ├─────────────────────────────────┤
//!             ┆                                 ┆
//! 0x4000_0000 ├─────────────────────────────────┤
//!             │   AIPS0 / AIPS1 peripherals     │
//! 0x400F_F000 ├─────────────────────────────────┤
//!             │   GPIO                          │
//! 0x4010_0000 ├─────────────────────────────────┤
//!             ┆                                 ┆
//! 0xE000_0000 ├─────────────────────────────────┤
//!             │   Private Peripheral Bus        │
//! 0xE010_0000 └─────────────────────────────────┘
//! ```
//!
//! ## Configuration Management
//!
//! All values are `const` and verified with compile-time assertions; nothing
//! here is computed at run time.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod memory;
