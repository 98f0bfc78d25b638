//! System bus address decoding.

use rvpipe_core::common::bus::{BusRequest, BusResponse};
use rvpipe_core::soc::devices::{Timer, Uart};
use rvpipe_core::soc::interconnect::SystemBus;
use rvpipe_core::soc::memory::MainMemory;

use crate::common::mocks::device::{MockDevice, MockMmio};

fn bus() -> SystemBus {
    let mut bus = SystemBus::new();
    bus.add_device(Box::new(Timer::new(0x4000_4000, 1)));
    bus.add_device(Box::new(MainMemory::new(0, 0x100)));
    bus.add_device(Box::new(Uart::new(0x4000_0000, false)));
    bus
}

#[test]
fn reads_complete_in_the_same_cycle() {
    let mut bus = bus();
    bus.clock(Some(&BusRequest::write(0x10, 0x55, 0b1111)));
    assert_eq!(
        bus.respond(Some(&BusRequest::read(0x10))),
        BusResponse::ready(0x55)
    );
}

#[test]
fn idle_bus_is_not_ready() {
    assert_eq!(bus().respond(None), BusResponse::IDLE);
}

#[test]
fn unmapped_read_returns_zero() {
    let mut bus = bus();
    let req = BusRequest::read(0x8000_0000);
    assert_eq!(bus.respond(Some(&req)), BusResponse::ready(0));
    bus.clock(Some(&req));
}

#[test]
fn unmapped_write_is_dropped() {
    let mut bus = bus();
    let req = BusRequest::write(0x2000, 0xFFFF_FFFF, 0b1111);
    assert_eq!(bus.respond(Some(&req)), BusResponse::ready(0));
    bus.clock(Some(&req));
    assert_eq!(bus.memory().and_then(|m| m.read_a(0)), Some(0));
}

#[test]
fn writes_reach_the_decoded_device() {
    let mut bus = bus();
    bus.clock(Some(&BusRequest::write(0x4000_0000, 0x21, 0b0001)));
    assert_eq!(bus.uart().map(Uart::output), Some(&b"!"[..]));
}

#[test]
fn clock_ticks_every_device() {
    let mut bus = bus();
    for _ in 0..5 {
        bus.clock(None);
    }
    assert_eq!(bus.timer().map(Timer::mtime), Some(5));
    assert!(!bus.irq());
}

#[test]
fn timer_line_is_visible_on_the_bus() {
    let mut bus = bus();
    bus.clock(Some(&BusRequest::write(0x4000_400C, 0, 0b1111)));
    bus.clock(Some(&BusRequest::write(0x4000_4008, 2, 0b1111)));
    assert!(bus.irq());
}

fn with_mock(mock: MockMmio) -> (SystemBus, MockDevice) {
    let dev = MockDevice::new(mock, 0x8000_0000, 0x100);
    let mut bus = bus();
    bus.add_device(Box::new(dev.clone()));
    (bus, dev)
}

#[test]
fn reads_use_device_relative_word_offsets() {
    let mut mock = MockMmio::new();
    let _ = mock
        .expect_read_word()
        .withf(|&offset| offset == 0x10)
        .times(1)
        .return_const(0xCAFE_u32);
    let (bus, dev) = with_mock(mock);

    let rsp = bus.respond(Some(&BusRequest::read(0x8000_0012)));
    assert_eq!(rsp, BusResponse::ready(0xCAFE));
    dev.lock().checkpoint();
}

#[test]
fn writes_commit_on_the_clock_edge() {
    let mut mock = MockMmio::new();
    let _ = mock
        .expect_write_word()
        .withf(|&offset, &wdata, &be| offset == 0x4 && wdata == 0xAB00 && be == 0b0010)
        .times(1)
        .return_const(());
    let _ = mock.expect_tick().return_const(());
    let (mut bus, dev) = with_mock(mock);

    let req = BusRequest::write(0x8000_0005, 0xAB00, 0b0010);
    assert_eq!(bus.respond(Some(&req)), BusResponse::ready(0));
    bus.clock(Some(&req));
    dev.lock().checkpoint();
}

#[test]
fn every_device_ticks_once_per_cycle() {
    let mut mock = MockMmio::new();
    let _ = mock.expect_tick().times(3).return_const(());
    let (mut bus, dev) = with_mock(mock);
    for _ in 0..3 {
        bus.clock(None);
    }
    dev.lock().checkpoint();
}

#[test]
fn any_device_can_raise_the_interrupt_line() {
    let mut mock = MockMmio::new();
    let _ = mock.expect_irq().return_const(true);
    let (bus, _dev) = with_mock(mock);
    assert!(bus.irq());
}

#[test]
fn device_at_unaligned_base_sees_word_offsets() {
    let mut mock = MockMmio::new();
    let _ = mock
        .expect_read_word()
        .withf(|&offset| offset == 0)
        .times(2)
        .return_const(0x77_u32);
    let _ = mock
        .expect_write_word()
        .withf(|&offset, _, _| offset == 4)
        .times(1)
        .return_const(());
    let _ = mock.expect_tick().return_const(());
    let dev = MockDevice::new(mock, 0x8000_0002, 0x10);
    let mut bus = bus();
    bus.add_device(Box::new(dev.clone()));

    for addr in [0x8000_0002, 0x8000_0005] {
        assert_eq!(
            bus.respond(Some(&BusRequest::read(addr))),
            BusResponse::ready(0x77)
        );
    }
    bus.clock(Some(&BusRequest::write(0x8000_0006, 1, 0b0100)));
    dev.lock().checkpoint();
}
