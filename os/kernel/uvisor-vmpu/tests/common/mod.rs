#![allow(dead_code)]

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use uvisor_info::memory::{K64_MEMORY_MAP, MemMap};
use uvisor_memory_addresses::MemoryAddress;
use uvisor_sync::InterruptMask;
use uvisor_vmpu::hal::SimulatedRegisters;
use uvisor_vmpu::vectors::Handler;
use uvisor_vmpu::{
    AclBackend, AclFlags, AclVerdict, BoxId, ExceptionVectors, FaultClass, Halt, HaltReason,
    MemoryBackend, Platform, ProtectionRegisters, Vmpu,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    PeripheralAdd { box_id: u8, start: u32, size: u32, flags: u32 },
    MemoryAdd { box_id: u8, start: u32, size: u32, flags: u32 },
    PeripheralSwitch { src: u8, dst: u8, irq_masked: bool },
    MemorySwitch { src: u8, dst: u8, irq_masked: bool },
    MemoryInit { faults_enabled: bool },
    Installed(FaultClass),
    Halt(HaltReason, String),
}

impl Event {
    pub const fn is_backend_call(&self) -> bool {
        !matches!(self, Self::Halt(..) | Self::Installed(_))
    }
}

/// Ordered record of everything the collaborators were asked to do.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn push(&self, e: Event) {
        self.0.lock().unwrap().push(e);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn backend_calls(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(Event::is_backend_call)
            .collect()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }
}

pub struct RecordingBackend {
    journal: Journal,
    regs: &'static SimulatedRegisters,
    peripheral: bool,
    verdict: AclVerdict,
}

impl RecordingBackend {
    pub const fn new(
        journal: Journal,
        regs: &'static SimulatedRegisters,
        peripheral: bool,
        verdict: AclVerdict,
    ) -> Self {
        Self {
            journal,
            regs,
            peripheral,
            verdict,
        }
    }
}

impl AclBackend for RecordingBackend {
    fn add(
        &mut self,
        box_id: BoxId,
        start: MemoryAddress,
        size: u32,
        flags: AclFlags,
    ) -> AclVerdict {
        let (box_id, start, flags) = (box_id.get(), start.as_u32(), flags.bits());
        self.journal.push(if self.peripheral {
            Event::PeripheralAdd { box_id, start, size, flags }
        } else {
            Event::MemoryAdd { box_id, start, size, flags }
        });
        self.verdict
    }

    fn switch(&mut self, src: BoxId, dst: BoxId) {
        let (src, dst) = (src.get(), dst.get());
        let irq_masked = !self.regs.interrupts_enabled();
        self.journal.push(if self.peripheral {
            Event::PeripheralSwitch { src, dst, irq_masked }
        } else {
            Event::MemorySwitch { src, dst, irq_masked }
        });
    }
}

impl MemoryBackend for RecordingBackend {
    fn init(&mut self) {
        let faults_enabled = self.regs.load_shcsr().faults_enabled();
        self.journal.push(Event::MemoryInit { faults_enabled });
    }
}

/// Panic payload of [`RecordingHalt`].
#[derive(Debug)]
pub struct Halted(pub HaltReason);

pub struct RecordingHalt {
    journal: Journal,
}

impl RecordingHalt {
    pub const fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl Halt for RecordingHalt {
    fn halt(&self, reason: HaltReason, message: fmt::Arguments) -> ! {
        self.journal.push(Event::Halt(reason, message.to_string()));
        panic::panic_any(Halted(reason))
    }
}

pub struct RecordingVectors {
    pub journal: Journal,
    pub installed: Vec<(FaultClass, Handler)>,
}

impl ExceptionVectors for RecordingVectors {
    fn install(&mut self, class: FaultClass, handler: Handler) {
        self.journal.push(Event::Installed(class));
        self.installed.push((class, handler));
    }
}

pub struct TestPlatform;

impl Platform for TestPlatform {
    type Registers = &'static SimulatedRegisters;
    type Peripheral = RecordingBackend;
    type Memory = RecordingBackend;
    type Map = &'static [MemMap];
    type Halt = RecordingHalt;
}

pub struct Harness {
    pub vmpu: &'static Vmpu<TestPlatform>,
    pub regs: &'static SimulatedRegisters,
    pub journal: Journal,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_verdicts(AclVerdict::Accepted, AclVerdict::Accepted)
    }

    pub fn with_verdicts(peripheral: AclVerdict, memory: AclVerdict) -> Self {
        let regs: &'static SimulatedRegisters = Box::leak(Box::new(SimulatedRegisters::new()));
        let journal = Journal::default();
        let backend =
            |peripheral, verdict| RecordingBackend::new(journal.clone(), regs, peripheral, verdict);
        let vmpu = Vmpu::<TestPlatform>::new(
            regs,
            backend(true, peripheral),
            backend(false, memory),
            K64_MEMORY_MAP,
            RecordingHalt::new(journal.clone()),
        );
        Self {
            vmpu: Box::leak(Box::new(vmpu)),
            regs,
            journal,
        }
    }

    pub fn vectors(&self) -> RecordingVectors {
        RecordingVectors {
            journal: self.journal.clone(),
            installed: Vec::new(),
        }
    }

    /// A harness that has already been through bootstrap, with a clean journal.
    pub fn booted() -> Self {
        let h = Self::new();
        h.vmpu.init_protection(&mut h.vectors());
        h.journal.clear();
        h
    }

    /// The halt recorded last, with its message.
    pub fn last_halt(&self) -> Option<(HaltReason, String)> {
        self.journal.events().into_iter().rev().find_map(|e| match e {
            Event::Halt(reason, msg) => Some((reason, msg)),
            _ => None,
        })
    }
}

/// Run `f`, which must halt, and return the halt reason.
pub fn expect_halt<F: FnOnce()>(f: F) -> HaltReason {
    let payload = panic::catch_unwind(AssertUnwindSafe(f)).expect_err("expected a halt");
    match payload.downcast::<Halted>() {
        Ok(halted) => halted.0,
        Err(other) => panic::resume_unwind(other),
    }
}
