mod common;

use common::{Event, Harness};
use uvisor_registers::Shcsr;
use uvisor_vmpu::vectors::Handler;
use uvisor_vmpu::{FaultClass, VectorTable};

#[test]
fn handlers_and_fault_enables_precede_activation() {
    let h = Harness::new();
    let mut vectors = h.vectors();
    h.vmpu.init_protection(&mut vectors);

    let mut expected: Vec<Event> = FaultClass::ALL.into_iter().map(Event::Installed).collect();
    expected.extend([
        Event::MemoryInit {
            faults_enabled: true,
        },
        Event::PeripheralSwitch {
            src: 0,
            dst: 0,
            irq_masked: true,
        },
        Event::MemorySwitch {
            src: 0,
            dst: 0,
            irq_masked: true,
        },
    ]);
    assert_eq!(h.journal.events(), expected);

    assert_eq!(h.regs.shcsr(), Shcsr::FAULT_ENABLE_MASK);
    assert!(h.vmpu.is_initialized());
    assert_eq!(h.vmpu.active_box().map(|b| b.get()), Some(0));
}

#[test]
fn each_class_gets_its_handler() {
    let h = Harness::new();
    let mut vectors = h.vectors();
    h.vmpu.init_protection(&mut vectors);

    assert_eq!(vectors.installed.len(), 5);
    for (class, handler) in vectors.installed {
        assert_eq!(handler as usize, class.handler() as usize, "{class}");
    }
}

#[test]
fn second_call_is_ignored() {
    let h = Harness::new();
    h.vmpu.init_protection(&mut h.vectors());
    h.vmpu.switch(0, 5);
    h.journal.clear();

    h.vmpu.init_protection(&mut h.vectors());

    assert!(h.journal.events().is_empty());
    assert_eq!(h.vmpu.active_box().map(|b| b.get()), Some(5));
}

#[test]
fn unrelated_shcsr_bits_survive() {
    let h = Harness::new();
    // SVCALLACT and PENDSVACT
    h.regs.set_shcsr(0x0000_0480);
    h.vmpu.init_protection(&mut h.vectors());

    assert_eq!(h.regs.shcsr(), 0x0007_0480);
}

#[test]
fn vector_table_receives_handlers_at_exception_numbers() {
    let h = Harness::new();
    let mut table = VectorTable::<102>::new();
    h.vmpu.init_protection(&mut table);

    for class in FaultClass::ALL {
        let installed: Option<Handler> = table[class.exception_number()];
        assert_eq!(
            installed.map(|f| f as usize),
            Some(class.handler() as usize),
            "{class}"
        );
    }
    assert!(table[2].is_none());
    assert!(table[16].is_none());
}
