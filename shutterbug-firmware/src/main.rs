//! Shutterbug - MJX Bugs 3H accessory port decoder
//!
//! Firmware for RP2040 boards wired to the drone's micro-USB accessory port.
//! Decodes camera-button and flight-state events and reports them over RTT
//! and a console UART.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{UART0, UART1};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUartRx, BufferedUartTx};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use shutterbug_core::config::{parse_config, DecoderConfig};
use shutterbug_hal_rp2040::uart::{to_rp_config, CaptureRx, ConsoleTx};

mod channels;
mod handler;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit shutterbug.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../shutterbug.toml");

/// Capture ring buffer; a full frame plus margin
const CAPTURE_BUF_SIZE: usize = 512;

/// Console ring buffer; one full unmatched report
const CONSOLE_BUF_SIZE: usize = 2048;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static CAPTURE_RX_BUF: StaticCell<[u8; CAPTURE_BUF_SIZE]> = StaticCell::new();
static CONSOLE_TX_BUF: StaticCell<[u8; CONSOLE_BUF_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Shutterbug firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    // Setup UART1 RX for the accessory port (GPIO9, drone TX)
    let rx_buf = CAPTURE_RX_BUF.init([0u8; CAPTURE_BUF_SIZE]);
    let rx = BufferedUartRx::new(
        p.UART1,
        Irqs,
        p.PIN_9,
        rx_buf,
        to_rp_config(&config.capture_uart()),
    );
    info!("Capture UART at {} baud", config.capture.baudrate);

    // Setup UART0 TX for console reports (GPIO0)
    if config.console.enabled {
        let tx_buf = CONSOLE_TX_BUF.init([0u8; CONSOLE_BUF_SIZE]);
        let tx = BufferedUartTx::new(
            p.UART0,
            Irqs,
            p.PIN_0,
            tx_buf,
            to_rp_config(&config.console_uart()),
        );
        info!("Console UART at {} baud", config.console.baudrate);
        spawner.spawn(unwrap!(tasks::console_task(ConsoleTx::new(tx))));
    } else {
        info!("Console disabled, reporting over RTT only");
    }

    spawner.spawn(unwrap!(tasks::capture_task(CaptureRx::new(rx), config)));

    info!("All tasks spawned");
}

/// Parse and validate the embedded configuration
///
/// build.rs already rejects a bad file, so the fallback only guards against
/// a parser mismatch between host and target.
fn load_config() -> DecoderConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            error!("Config parse failed: {:?}, using defaults", e);
            DecoderConfig::default()
        }
    };

    match config.validate() {
        Ok(warnings) => {
            if warnings.photo_alias {
                warn!(
                    "At {} baud the end of a transmitter-off burst may read as photo_short",
                    config.capture.baudrate
                );
            }
            if warnings.noisy_capture || warnings.unreliable_capture {
                warn!("Capture at {} baud is noisy", config.capture.baudrate);
            }
            if warnings.untested_capture {
                warn!("Capture at {} baud is untested", config.capture.baudrate);
            }
            info!("Configuration loaded: {:?}", config);
            config
        }
        Err(e) => {
            error!("Invalid config: {:?}, using defaults", e);
            DecoderConfig::default()
        }
    }
}
