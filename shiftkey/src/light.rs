//! Key activity LED.
//!
//! The LED lights up on key activity and stays lit until [`LED_HOLD_TIME_MS`]
//! pass without further activity. Every activity signal restarts the window.

use embedded_hal::digital::OutputPin;

use crate::LED_HOLD_TIME_MS;
use crate::clock::elapsed_ms;
use crate::config::LightConfig;
use crate::driver::gpio::OutputController;

/// On/Off state of the activity LED
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    #[default]
    Off,
    On,
}

/// Timed LED state machine driven once per scan cycle.
pub struct ActivityLed<P: OutputPin> {
    /// `None` if the board has no LED, every update is then a no-op
    pin: Option<OutputController<P>>,
    state: LedState,
    /// Clock reading at which the current lit window started
    window_start: u32,
}

impl<P: OutputPin> ActivityLed<P> {
    /// Create the indicator and switch the LED off.
    pub fn new(light_config: LightConfig<P>) -> Self {
        let pin = light_config.activity.map(|c| {
            let mut pin = OutputController::new(c.pin, c.low_active);
            pin.deactivate();
            pin
        });
        Self {
            pin,
            state: LedState::Off,
            window_start: 0,
        }
    }

    pub fn is_present(&self) -> bool {
        self.pin.is_some()
    }

    pub fn state(&self) -> LedState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == LedState::On
    }

    pub fn window_start(&self) -> u32 {
        self.window_start
    }

    /// Advance the state machine, `activity` tells whether a key event happened this cycle.
    pub fn update(&mut self, activity: bool, now: u32) {
        let Some(pin) = self.pin.as_mut() else {
            return;
        };

        match (self.state, activity) {
            (LedState::Off, true) => {
                pin.activate();
                self.state = LedState::On;
                self.window_start = now;
            }
            (LedState::On, true) => {
                self.window_start = now;
            }
            (LedState::On, false) => {
                if elapsed_ms(now, self.window_start) >= LED_HOLD_TIME_MS {
                    pin.deactivate();
                    self.state = LedState::Off;
                }
            }
            (LedState::Off, false) => {}
        }
    }

    /// Restart the lit window at `now`, after the clock wrapped.
    pub fn rebase(&mut self, now: u32) {
        self.window_start = now;
    }
}
