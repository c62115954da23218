//! Accessory port capture task
//!
//! Single task driving the decoder: woken either by bytes on the capture
//! UART or by the gap-check ticker, then runs one decoder poll.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use shutterbug_core::config::DecoderConfig;
use shutterbug_core::Decoder;
use shutterbug_hal_rp2040::clock::EmbassyClock;
use shutterbug_hal_rp2040::uart::CaptureRx;
use shutterbug_protocol::accumulator::AccumulatorState;

use crate::channels::REPORT_CHANNEL;
use crate::handler::LogHandler;

/// Capture task - frames and classifies accessory port bytes
#[embassy_executor::task]
pub async fn capture_task(mut rx: CaptureRx, config: DecoderConfig) {
    info!(
        "Capture task started (gap {} ms, tick {} ms, overflow {:?})",
        config.framing.gap_ms, config.framing.tick_ms, config.framing.overflow
    );

    let clock = EmbassyClock::new();
    let mut decoder = Decoder::with_config(&config.framing, LogHandler);
    let mut ticker = Ticker::every(Duration::from_millis(config.framing.tick_ms as u64));

    // One overflow warning per frame
    let mut overflow_reported = false;

    loop {
        match select(rx.wait_ready(), ticker.next()).await {
            Either::First(Err(e)) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
            Either::First(Ok(())) => trace!("RX ready"),
            Either::Second(()) => {}
        }

        let refused = decoder.stats().bytes_refused;

        let classification = match decoder.poll(&mut rx, &clock) {
            Ok(classification) => classification,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };

        if decoder.stats().bytes_refused != refused && !overflow_reported {
            warn!("Frame overflow, applying {:?}", config.framing.overflow);
            overflow_reported = true;
        }

        if let Some(classification) = classification {
            debug!("Stats: {:?}", decoder.stats());

            if config.console.enabled && REPORT_CHANNEL.try_send(classification).is_err() {
                warn!("Report channel full, dropping report");
            }
        }

        if decoder.accumulator().state() == AccumulatorState::Idle {
            overflow_reported = false;
        }
    }
}
