//! UART support for RP2040
//!
//! The accessory port is captured on UART1 (GPIO9 RX) and reports go out on
//! UART0 (GPIO0 TX).

use embassy_rp::uart::{
    BufferedUartRx, BufferedUartTx, Config as RpUartConfig, DataBits as RpDataBits,
    Error as RpUartError, Parity as RpParity, StopBits as RpStopBits,
};
use embedded_io::{Read, ReadReady};
use embedded_io_async::{BufRead, Write};
use shutterbug_hal::uart::{DataBits, Parity, StopBits};
use shutterbug_hal::{UartConfig, UartRx};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Receive FIFO overrun
    Overrun,
    /// Line held low for longer than a character
    Break,
    /// Parity error
    Parity,
    /// Framing error (wrong baud rate is the usual cause)
    Framing,
    /// Other error
    Other,
}

impl From<RpUartError> for UartBusError {
    fn from(e: RpUartError) -> Self {
        match e {
            RpUartError::Overrun => UartBusError::Overrun,
            RpUartError::Break => UartBusError::Break,
            RpUartError::Parity => UartBusError::Parity,
            RpUartError::Framing => UartBusError::Framing,
            #[allow(unreachable_patterns)]
            _ => UartBusError::Other,
        }
    }
}

/// Convert shared UART settings to embassy-rp's config
pub fn to_rp_config(config: &UartConfig) -> RpUartConfig {
    let mut cfg = RpUartConfig::default();
    cfg.baudrate = config.baudrate;
    cfg.data_bits = match config.data_bits {
        DataBits::Seven => RpDataBits::DataBits7,
        DataBits::Eight => RpDataBits::DataBits8,
    };
    cfg.parity = match config.parity {
        Parity::None => RpParity::ParityNone,
        Parity::Even => RpParity::ParityEven,
        Parity::Odd => RpParity::ParityOdd,
    };
    cfg.stop_bits = match config.stop_bits {
        StopBits::One => RpStopBits::STOP1,
        StopBits::Two => RpStopBits::STOP2,
    };
    cfg
}

/// Accessory port receiver on a buffered UART
///
/// Bytes are drained without blocking through [`UartRx`]; the capture task
/// awaits [`CaptureRx::wait_ready`] between drains.
pub struct CaptureRx {
    rx: BufferedUartRx,
}

impl CaptureRx {
    /// Wrap a buffered receiver
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }

    /// Wait until at least one byte is in the RX ring buffer
    ///
    /// Nothing is consumed.
    pub async fn wait_ready(&mut self) -> Result<(), UartBusError> {
        BufRead::fill_buf(&mut self.rx)
            .await
            .map(|_| ())
            .map_err(UartBusError::from)
    }
}

impl UartRx for CaptureRx {
    type Error = UartBusError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !ReadReady::read_ready(&mut self.rx).map_err(UartBusError::from)? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match Read::read(&mut self.rx, &mut byte).map_err(UartBusError::from)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }
}

/// Console transmitter on a buffered UART
///
/// Writes wait for room in the TX ring buffer without blocking the executor.
pub struct ConsoleTx {
    tx: BufferedUartTx,
}

impl ConsoleTx {
    /// Wrap a buffered transmitter
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }

    /// Write a line of text followed by CRLF
    pub async fn write_line(&mut self, line: &str) -> Result<(), UartBusError> {
        Write::write_all(&mut self.tx, line.as_bytes()).await?;
        Write::write_all(&mut self.tx, b"\r\n").await?;
        Ok(())
    }

    /// Wait until everything written has left the ring buffer
    pub async fn flush(&mut self) -> Result<(), UartBusError> {
        Write::flush(&mut self.tx).await?;
        Ok(())
    }
}
