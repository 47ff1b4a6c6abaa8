use crate::fault::{FaultClass, TrapContext, classify, register_trap_context};
use crate::vectors::ExceptionVectors;
use crate::{BoxId, MemoryBackend, Platform, ProtectionError, ProtectionRegisters, Vmpu};
use core::sync::atomic::Ordering;
use log::{info, warn};
use uvisor_debug::debug_trace;

impl<P: Platform> Vmpu<P> {
    /// Turn protection on. Runs once; later calls are logged and ignored.
    ///
    /// Order matters: the fault handlers are bound and the configurable
    /// faults enabled before the MPU is programmed, so that a violation
    /// caused by the first activation is already trapped.
    pub fn init_protection<V: ExceptionVectors + ?Sized>(&'static self, vectors: &mut V)
    where
        Self: Sync,
    {
        if self.initialized.swap(true, Ordering::AcqRel) {
            warn!("vmpu: protection already initialized");
            return;
        }

        if register_trap_context(self).is_err() {
            warn!("vmpu: fault trap already bound to another context");
        }
        for class in FaultClass::ALL {
            vectors.install(class, class.handler());
        }

        let shcsr = self.registers.load_shcsr();
        self.registers.store_shcsr(shcsr.with_faults_enabled());

        {
            let Some(mut backends) = self.backends.try_lock() else {
                self.fail(ProtectionError::Reentered)
            };
            backends.memory.init();
        }

        self.activate(BoxId::BOOTSTRAP, BoxId::BOOTSTRAP);
        info!("vmpu: protection enabled, {} active", BoxId::BOOTSTRAP);
    }

    /// Dump the fault status and halt with the classified reason.
    pub fn handle_fault(&self, class: FaultClass) -> ! {
        debug_trace!(
            "uvisor: {} fault, SHCSR={:#010X} CESR={:#010X}\n",
            class,
            self.registers.load_shcsr().into_bits(),
            self.registers.load_cesr().into_bits()
        );
        self.fail(classify(class, &self.registers))
    }
}

impl<P: Platform> TrapContext for Vmpu<P>
where
    Self: Sync,
{
    fn trap(&self, class: FaultClass) -> ! {
        self.handle_fault(class)
    }
}
