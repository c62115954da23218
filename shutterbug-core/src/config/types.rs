//! Decoder configuration types

use shutterbug_hal::UartConfig;
use shutterbug_protocol::baud::DEFAULT_CAPTURE_BAUD;
use shutterbug_protocol::{
    BaudProfile, FrameAccumulator, LinkQuality, OverflowPolicy, GAP_THRESHOLD_MS,
};

/// Default tick period (ms)
pub const DEFAULT_TICK_MS: u32 = 2;

/// Default console baud rate
pub const DEFAULT_CONSOLE_BAUD: u32 = 115_200;

/// Accessory port capture settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CaptureConfig {
    /// Line rate of the drone's accessory port
    pub baudrate: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_CAPTURE_BAUD,
        }
    }
}

/// Console output settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsoleConfig {
    /// Write reports to the console UART
    pub enabled: bool,
    /// Console line rate
    pub baudrate: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            baudrate: DEFAULT_CONSOLE_BAUD,
        }
    }
}

/// Frame splitting settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FramingConfig {
    /// Silence that ends a frame (ms)
    pub gap_ms: u32,
    /// How often the gap is checked (ms)
    pub tick_ms: u32,
    /// Handling of frames that outgrow the buffer
    pub overflow: OverflowPolicy,
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            gap_ms: GAP_THRESHOLD_MS,
            tick_ms: DEFAULT_TICK_MS,
            overflow: OverflowPolicy::Truncate,
        }
    }
}

impl FramingConfig {
    /// Build an accumulator with these settings
    pub fn accumulator(&self) -> FrameAccumulator {
        FrameAccumulator::with_config(self.gap_ms, self.overflow)
    }
}

/// Complete decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    pub capture: CaptureConfig,
    pub console: ConsoleConfig,
    pub framing: FramingConfig,
}

/// Configuration rejected by validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Gap threshold is zero
    ZeroGap,
    /// Tick period is zero
    ZeroTick,
    /// Tick period is not shorter than the gap, so frames would merge
    TickTooSlow,
    /// A baud rate is zero
    ZeroBaudrate,
    /// Capture rate is known not to classify
    UnusableCaptureBaud(u32),
}

/// Non-fatal findings from validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigWarnings {
    /// Capture rate classifies but with corruption
    pub noisy_capture: bool,
    /// Capture rate is unreliable on the bench
    pub unreliable_capture: bool,
    /// Capture rate was never tested
    pub untested_capture: bool,
    /// Transmitter-off tail may be reported as a photo press
    pub photo_alias: bool,
}

impl ConfigWarnings {
    /// Returns true if nothing was flagged
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl DecoderConfig {
    /// Check the configuration for values that cannot work
    pub fn validate(&self) -> Result<ConfigWarnings, ConfigError> {
        if self.framing.gap_ms == 0 {
            return Err(ConfigError::ZeroGap);
        }
        if self.framing.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if self.framing.tick_ms >= self.framing.gap_ms {
            return Err(ConfigError::TickTooSlow);
        }
        if self.capture.baudrate == 0 || self.console.baudrate == 0 {
            return Err(ConfigError::ZeroBaudrate);
        }

        let profile = BaudProfile::lookup(self.capture.baudrate);
        if profile.is_rejected() {
            return Err(ConfigError::UnusableCaptureBaud(self.capture.baudrate));
        }

        Ok(ConfigWarnings {
            noisy_capture: profile.quality == LinkQuality::Noisy,
            unreliable_capture: profile.quality == LinkQuality::Unreliable,
            untested_capture: profile.quality == LinkQuality::Unknown,
            photo_alias: profile.photo_alias,
        })
    }

    /// UART settings for the accessory port
    pub fn capture_uart(&self) -> UartConfig {
        UartConfig::with_baudrate(self.capture.baudrate)
    }

    /// UART settings for the console
    pub fn console_uart(&self) -> UartConfig {
        UartConfig::with_baudrate(self.console.baudrate)
    }
}
