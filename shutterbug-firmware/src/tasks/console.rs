//! Console UART transmit task
//!
//! Prints a report for every classified frame.

use defmt::*;

use shutterbug_core::report::Report;
use shutterbug_hal_rp2040::uart::{ConsoleTx, UartBusError};

use crate::channels::REPORT_CHANNEL;

/// Console TX task - writes reports to the console UART
#[embassy_executor::task]
pub async fn console_task(mut console: ConsoleTx) {
    info!("Console task started");

    loop {
        let classification = REPORT_CHANNEL.receive().await;
        let report = Report::new(&classification);

        if let Err(e) = send_report(&mut console, &report).await {
            warn!("Failed to write report: {:?}", e);
        } else {
            trace!(
                "Report sent: {} ({} bytes)",
                classification.name(),
                report.byte_len()
            );
        }
    }
}

async fn send_report(console: &mut ConsoleTx, report: &Report) -> Result<(), UartBusError> {
    for line in report.lines() {
        console.write_line(line).await?;
    }
    console.flush().await
}
