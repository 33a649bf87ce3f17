use embassy_time::Duration;
use embedded_hal::digital::OutputPin;

use crate::DEFAULT_DEBOUNCE_TIME_MS;

/// The config struct for a shift-register keyboard.
///
/// Matrix dimensions are const generics of [`crate::Keyboard`], everything
/// else that is fixed for the lifetime of the device lives here.
pub struct KeyboardConfig<O: OutputPin> {
    pub matrix_config: MatrixConfig,
    pub light_config: LightConfig<O>,
}

impl<O: OutputPin> Default for KeyboardConfig<O> {
    fn default() -> Self {
        Self {
            matrix_config: MatrixConfig::default(),
            light_config: LightConfig::default(),
        }
    }
}

/// Config for matrix scanning
#[derive(Clone, Copy, Debug)]
pub struct MatrixConfig {
    /// Minimum time between two accepted transitions of the same key
    pub debounce_time: Duration,
    /// Pause between two scan cycles in [`crate::Keyboard::run`]
    pub scan_interval: Duration,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            debounce_time: Duration::from_millis(DEFAULT_DEBOUNCE_TIME_MS as u64),
            scan_interval: Duration::from_micros(500),
        }
    }
}

impl MatrixConfig {
    pub(crate) fn debounce_ms(&self) -> u32 {
        self.debounce_time.as_millis().min(u32::MAX as u64) as u32
    }
}

/// Config for lights
pub struct LightConfig<O: OutputPin> {
    /// Key activity LED, `None` if the board has none
    pub activity: Option<LightPinConfig<O>>,
}

pub struct LightPinConfig<O: OutputPin> {
    pub pin: O,
    pub low_active: bool,
}

impl<O: OutputPin> Default for LightConfig<O> {
    fn default() -> Self {
        Self { activity: None }
    }
}

impl<O: OutputPin> LightConfig<O> {
    /// High-active activity LED on `pin`
    pub fn activity_led(pin: O) -> Self {
        Self {
            activity: Some(LightPinConfig { pin, low_active: false }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::gpio::NoPin;

    #[test]
    fn test_default_config() {
        let config: KeyboardConfig<NoPin> = KeyboardConfig::default();
        assert_eq!(config.matrix_config.debounce_ms(), 25);
        assert_eq!(config.matrix_config.scan_interval, Duration::from_micros(500));
        assert!(config.light_config.activity.is_none());
    }

    #[test]
    fn test_debounce_ms_saturates() {
        let config = MatrixConfig {
            debounce_time: Duration::from_secs(5_000_000),
            ..Default::default()
        };
        assert_eq!(config.debounce_ms(), u32::MAX);
    }
}
