use crate::{BoxId, Platform, ProtectionError, Vmpu};
use core::sync::atomic::Ordering;
use log::trace;

impl<P: Platform> Vmpu<P> {
    /// Make `dst` the active protection domain, replacing `src`.
    ///
    /// Both IDs are checked before either backend is touched. Halts on an
    /// out-of-range ID.
    ///
    /// `src` is handed to the backends as given. It is not compared with
    /// [`Vmpu::active_box`]; the caller's scheduler owns that bookkeeping.
    pub fn switch(&self, src: u8, dst: u8) {
        match Self::box_pair(src, dst) {
            Ok((src, dst)) => self.activate(src, dst),
            Err(e) => self.fail(e),
        }
    }

    fn box_pair(src: u8, dst: u8) -> Result<(BoxId, BoxId), ProtectionError> {
        Ok((BoxId::new(src)?, BoxId::new(dst)?))
    }

    /// Peripheral backend, then memory backend, with interrupts masked across
    /// both. The previous mask state is restored afterwards.
    pub(crate) fn activate(&self, src: BoxId, dst: BoxId) {
        let Some(mut backends) = self.backends.try_lock_irq(&self.registers) else {
            self.fail(ProtectionError::Reentered)
        };
        backends.switch(src, dst);
        self.active.store(dst.get(), Ordering::Release);
        drop(backends);

        trace!("vmpu: {src} -> {dst}");
    }
}
