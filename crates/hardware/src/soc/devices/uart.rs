//! Universal Asynchronous Receiver-Transmitter (UART).
//!
//! A transmit-only serial port: a store to the transmit register sends one
//! byte. There is no receive path and no status handshake, so reads return 0.
//! Every transmitted byte is captured for inspection and can optionally be
//! echoed to `stdout`.

use std::io::{self, Write};

use crate::soc::devices::Device;

/// Transmitter Holding Register (Write).
const REG_THR: u32 = 0;

/// Size of the register block in bytes.
const UART_SIZE: u64 = 0x4;

/// Threshold for flushing the echo buffer to stdout.
const TX_FLUSH_THRESHOLD: usize = 4096;

/// UART device structure.
#[derive(Debug)]
pub struct Uart {
    /// Base physical address of the device.
    base_addr: u32,
    /// Every byte transmitted since reset.
    output: Vec<u8>,
    /// Bytes waiting to be echoed.
    tx_buffer: Vec<u8>,
    /// When true, transmitted bytes are echoed to stdout.
    echo: bool,
}

impl Uart {
    /// Creates a new UART device.
    ///
    /// # Arguments
    ///
    /// * `base_addr` - Address of the transmit register.
    /// * `echo` - When true, transmitted bytes are also written to stdout.
    pub fn new(base_addr: u32, echo: bool) -> Self {
        Self {
            base_addr,
            output: Vec::new(),
            tx_buffer: Vec::new(),
            echo,
        }
    }

    /// All bytes transmitted so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Transmitted bytes decoded lossily as UTF-8.
    pub fn output_string(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    fn transmit(&mut self, byte: u8) {
        self.output.push(byte);
        if self.echo {
            self.tx_buffer.push(byte);
            if byte == b'\n' || self.tx_buffer.len() >= TX_FLUSH_THRESHOLD {
                self.flush_buffer();
            }
        }
    }

    /// Flushes the echo buffer to stdout.
    fn flush_buffer(&mut self) {
        if self.tx_buffer.is_empty() {
            return;
        }
        let mut stdout = io::stdout().lock();
        if stdout
            .write_all(&self.tx_buffer)
            .and_then(|()| stdout.flush())
            .is_err()
        {
            tracing::warn!("uart echo to stdout failed");
        }
        self.tx_buffer.clear();
    }
}

impl Device for Uart {
    fn name(&self) -> &str {
        "UART"
    }

    fn address_range(&self) -> (u32, u64) {
        (self.base_addr, UART_SIZE)
    }

    fn read_word(&self, _offset: u32) -> u32 {
        0
    }

    /// Transmits the lowest enabled byte lane of a store to the transmit register.
    fn write_word(&mut self, offset: u32, wdata: u32, byte_enable: u8) {
        if offset & !3 != REG_THR || byte_enable == 0 {
            return;
        }
        let lane = byte_enable.trailing_zeros();
        self.transmit((wdata >> (lane * 8)) as u8);
    }

    fn as_uart(&self) -> Option<&Uart> {
        Some(self)
    }
}

impl Drop for Uart {
    fn drop(&mut self) {
        self.flush_buffer();
    }
}
