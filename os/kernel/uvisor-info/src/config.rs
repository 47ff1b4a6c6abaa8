//! # Box Configuration

use uvisor_memory_addresses::{Granularity, Granule32};

/// Exclusive upper bound for box IDs.
///
/// Every ACL request and every domain switch is checked against this value;
/// an ID at or above it is fatal.
pub const UVISOR_MAX_BOXES: u8 = 8;

/// The privileged bootstrap box, active at power-on.
pub const BOOTSTRAP_BOX: u8 = 0;

/// Protection granule of the system MPU.
pub type AclGranule = Granule32;

/// Granule size in bytes, for use in messages and linker glue.
pub const ACL_GRANULARITY: u32 = AclGranule::SIZE;

const _: () = {
    assert!(UVISOR_MAX_BOXES > 0);
    assert!(BOOTSTRAP_BOX < UVISOR_MAX_BOXES);
    assert!(ACL_GRANULARITY == 32);
};
