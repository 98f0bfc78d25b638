//! Transmit-only UART.

use rvpipe_core::soc::devices::{Device, Uart};

#[test]
fn store_transmits_lowest_enabled_lane() {
    let mut uart = Uart::new(0x4000_0000, false);
    uart.write_word(0, 0x4848_4848, 0b0001);
    uart.write_word(0, 0x6969_6969, 0b0010);
    assert_eq!(uart.output(), b"Hi");
    assert_eq!(uart.output_string(), "Hi");
}

#[test]
fn word_store_sends_low_byte() {
    let mut uart = Uart::new(0x4000_0000, false);
    uart.write_word(0, 0x0000_0A41, 0b1111);
    assert_eq!(uart.output(), b"A");
}

#[test]
fn reads_return_zero() {
    let mut uart = Uart::new(0x4000_0000, false);
    uart.write_word(0, 0x41, 0b0001);
    assert_eq!(uart.read_word(0), 0);
}

#[test]
fn empty_byte_enable_sends_nothing() {
    let mut uart = Uart::new(0x4000_0000, false);
    uart.write_word(0, 0x41, 0);
    assert!(uart.output().is_empty());
}
