use crate::backend::{AclVerdict, BackendKind};
use crate::memory_map::region_name;
use crate::{AclRequest, Platform, ProtectionError, Vmpu};
use log::debug;

impl<P: Platform> Vmpu<P> {
    /// Admit one ACL for a box.
    ///
    /// The request is validated and its size normalized before it is routed;
    /// a request that fails validation never reaches a backend. Halts on any
    /// failure, including a backend that does not claim the range.
    pub fn add_acl(&self, request: AclRequest) {
        let acl = match request.resolve() {
            Ok(acl) => acl,
            Err(e) => self.fail(e),
        };

        debug!(
            "\t@{} size={:06} acl={:#06X} [{}]",
            acl.start,
            acl.size,
            acl.flags.bits(),
            region_name(&self.memory_map, acl.start)
        );

        let verdict = {
            let Some(mut backends) = self.backends.try_lock() else {
                self.fail(ProtectionError::Reentered)
            };
            backends.add(
                BackendKind::for_flags(acl.flags),
                acl.box_id,
                acl.start,
                acl.size,
                acl.flags,
            )
        };

        match verdict {
            AclVerdict::Accepted => {}
            AclVerdict::Unhandled => self.fail(ProtectionError::UnhandledArea {
                start: acl.start,
                size: acl.size,
            }),
            AclVerdict::Rejected(reason) => self.fail(ProtectionError::BackendRejected(reason)),
        }
    }
}
