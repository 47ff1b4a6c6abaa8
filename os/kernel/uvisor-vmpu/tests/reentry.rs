mod common;

use common::{Event, Journal, RecordingBackend, RecordingHalt, expect_halt};
use std::sync::{Arc, OnceLock};
use uvisor_info::memory::{K64_MEMORY_MAP, MemMap};
use uvisor_memory_addresses::MemoryAddress;
use uvisor_sync::InterruptMask;
use uvisor_vmpu::hal::SimulatedRegisters;
use uvisor_vmpu::{
    AclBackend, AclFlags, AclRequest, AclVerdict, BoxId, HaltReason, Platform, Vmpu,
};

const SRAM: u32 = 0x2000_0000;
const UART0: u32 = 0x4006_A000;

#[derive(Clone, Copy)]
enum Reenter {
    Add,
    Switch,
}

/// A peripheral backend that calls back into the [`Vmpu`] it belongs to.
struct ReentrantBackend {
    owner: Arc<OnceLock<&'static Vmpu<ReentrantPlatform>>>,
    reenter: Reenter,
}

impl ReentrantBackend {
    fn owner(&self) -> &'static Vmpu<ReentrantPlatform> {
        self.owner.get().expect("owner bound")
    }
}

impl AclBackend for ReentrantBackend {
    fn add(
        &mut self,
        box_id: BoxId,
        start: MemoryAddress,
        size: u32,
        flags: AclFlags,
    ) -> AclVerdict {
        if let Reenter::Add = self.reenter {
            self.owner()
                .add_acl(AclRequest::new(box_id.get(), start, size, flags));
        }
        AclVerdict::Accepted
    }

    fn switch(&mut self, src: BoxId, dst: BoxId) {
        if let Reenter::Switch = self.reenter {
            self.owner().switch(dst.get(), src.get());
        }
    }
}

struct ReentrantPlatform;

impl Platform for ReentrantPlatform {
    type Registers = &'static SimulatedRegisters;
    type Peripheral = ReentrantBackend;
    type Memory = RecordingBackend;
    type Map = &'static [MemMap];
    type Halt = RecordingHalt;
}

struct Setup {
    vmpu: &'static Vmpu<ReentrantPlatform>,
    regs: &'static SimulatedRegisters,
    journal: Journal,
}

impl Setup {
    fn new(reenter: Reenter) -> Self {
        let regs: &'static SimulatedRegisters = Box::leak(Box::new(SimulatedRegisters::new()));
        let journal = Journal::default();
        let owner = Arc::new(OnceLock::new());
        let vmpu: &'static Vmpu<ReentrantPlatform> = Box::leak(Box::new(Vmpu::new(
            regs,
            ReentrantBackend {
                owner: Arc::clone(&owner),
                reenter,
            },
            RecordingBackend::new(journal.clone(), regs, false, AclVerdict::Accepted),
            K64_MEMORY_MAP,
            RecordingHalt::new(journal.clone()),
        )));
        assert!(owner.set(vmpu).is_ok());
        Self {
            vmpu,
            regs,
            journal,
        }
    }

    fn halts(&self) -> Vec<(HaltReason, String)> {
        self.journal
            .events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Halt(reason, msg) => Some((reason, msg)),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn switch_from_inside_a_backend_switch_halts() {
    let s = Setup::new(Reenter::Switch);

    let reason = expect_halt(|| s.vmpu.switch(1, 2));

    assert_eq!(reason, HaltReason::SanityCheckFailed);
    assert_eq!(
        s.halts(),
        vec![(
            HaltReason::SanityCheckFailed,
            "protection state re-entered during update".to_owned()
        )]
    );
    // the memory backend is never reached and nothing was activated
    assert!(s.journal.backend_calls().is_empty());
    assert_eq!(s.vmpu.active_box(), None);
    assert!(s.regs.interrupts_enabled());
}

#[test]
fn add_from_inside_a_backend_add_halts() {
    let s = Setup::new(Reenter::Add);
    let flags = AclFlags::PERIPHERAL | AclFlags::UREAD_WRITE;

    let reason = expect_halt(|| {
        s.vmpu
            .add_acl(AclRequest::new(3, MemoryAddress::new(UART0), 0x1000, flags));
    });

    assert_eq!(reason, HaltReason::SanityCheckFailed);
    assert_eq!(
        s.halts(),
        vec![(
            HaltReason::SanityCheckFailed,
            "protection state re-entered during update".to_owned()
        )]
    );
}

#[test]
fn lock_is_released_after_the_halt_unwinds() {
    let s = Setup::new(Reenter::Add);
    let flags = AclFlags::PERIPHERAL | AclFlags::UREAD_WRITE;
    let _ = expect_halt(|| {
        s.vmpu
            .add_acl(AclRequest::new(3, MemoryAddress::new(UART0), 0x1000, flags));
    });
    s.journal.clear();

    s.vmpu.add_acl(AclRequest::new(
        3,
        MemoryAddress::new(SRAM),
        0x100,
        AclFlags::UREAD_WRITE,
    ));

    assert_eq!(
        s.journal.backend_calls(),
        vec![Event::MemoryAdd {
            box_id: 3,
            start: SRAM,
            size: 0x100,
            flags: AclFlags::UREAD_WRITE.bits()
        }]
    );
    assert!(s.halts().is_empty());
}
