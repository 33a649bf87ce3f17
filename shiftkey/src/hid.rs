//! Output sink for key events, and a boot keyboard report implementation of it.

use embassy_sync::channel::Channel;
use usbd_hid::descriptor::KeyboardReport;

use crate::RawMutex;
use crate::keycode::HidKey;

/// Host-facing output for key events.
///
/// Symbols are opaque to the scanner, it only routes them here.
pub trait KeySink {
    /// The key with `symbol` went down
    fn press(&mut self, symbol: u8);

    /// The key with `symbol` went up
    fn release(&mut self, symbol: u8);

    /// Release every key the sink considers pressed
    fn release_all(&mut self);
}

impl<S: KeySink + ?Sized> KeySink for &mut S {
    fn press(&mut self, symbol: u8) {
        (**self).press(symbol)
    }

    fn release(&mut self, symbol: u8) {
        (**self).release(symbol)
    }

    fn release_all(&mut self) {
        (**self).release_all()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    /// All 6 key slots of the report are taken
    ReportFull,
    /// The symbol has no HID usage
    UnknownSymbol(u8),
    /// The report channel is full, the report was dropped
    ChannelFull,
}

/// Number of non-modifier keys a boot keyboard report can carry.
pub const REPORT_KEY_SLOTS: usize = 6;

/// [`KeySink`] that keeps a 6-key boot keyboard report and queues every change.
///
/// Reports go to `channel`, normally [`crate::channel::KEYBOARD_REPORT_CHANNEL`],
/// from which a USB or BLE writer takes them.
pub struct ReportSink<'ch, const N: usize> {
    channel: &'ch Channel<RawMutex, KeyboardReport, N>,
    modifier: u8,
    keycodes: [u8; REPORT_KEY_SLOTS],
}

impl<'ch, const N: usize> ReportSink<'ch, N> {
    pub fn new(channel: &'ch Channel<RawMutex, KeyboardReport, N>) -> Self {
        Self {
            channel,
            modifier: 0,
            keycodes: [0; REPORT_KEY_SLOTS],
        }
    }

    /// Current report content
    pub fn report(&self) -> KeyboardReport {
        KeyboardReport {
            modifier: self.modifier,
            reserved: 0,
            leds: 0,
            keycodes: self.keycodes,
        }
    }

    pub fn modifier(&self) -> u8 {
        self.modifier
    }

    pub fn keycodes(&self) -> [u8; REPORT_KEY_SLOTS] {
        self.keycodes
    }

    /// Number of occupied key slots
    pub fn pressed_count(&self) -> usize {
        self.keycodes.iter().filter(|&&k| k != 0).count()
    }

    /// Add `symbol` to the report and queue it.
    pub fn try_press(&mut self, symbol: u8) -> Result<(), HidError> {
        match HidKey::from_symbol(symbol) {
            HidKey::Modifier(bits) => self.modifier |= bits,
            HidKey::Usage { usage, modifier } => {
                if !self.keycodes.contains(&usage) {
                    let slot = self
                        .keycodes
                        .iter_mut()
                        .find(|k| **k == 0)
                        .ok_or(HidError::ReportFull)?;
                    *slot = usage;
                }
                self.modifier |= modifier;
            }
            HidKey::Unmapped => return Err(HidError::UnknownSymbol(symbol)),
        }
        self.send_report()
    }

    /// Remove `symbol` from the report and queue it.
    pub fn try_release(&mut self, symbol: u8) -> Result<(), HidError> {
        match HidKey::from_symbol(symbol) {
            HidKey::Modifier(bits) => self.modifier &= !bits,
            HidKey::Usage { usage, modifier } => {
                for k in self.keycodes.iter_mut().filter(|k| **k == usage) {
                    *k = 0;
                }
                self.modifier &= !modifier;
            }
            HidKey::Unmapped => return Err(HidError::UnknownSymbol(symbol)),
        }
        self.send_report()
    }

    /// Clear the report and queue it.
    pub fn try_release_all(&mut self) -> Result<(), HidError> {
        self.modifier = 0;
        self.keycodes = [0; REPORT_KEY_SLOTS];
        self.send_report()
    }

    fn send_report(&self) -> Result<(), HidError> {
        self.channel.try_send(self.report()).map_err(|_| HidError::ChannelFull)
    }
}

impl<const N: usize> KeySink for ReportSink<'_, N> {
    fn press(&mut self, symbol: u8) {
        if let Err(e) = self.try_press(symbol) {
            warn!("Press of symbol {} dropped: {:?}", symbol, e);
        }
    }

    fn release(&mut self, symbol: u8) {
        if let Err(e) = self.try_release(symbol) {
            warn!("Release of symbol {} dropped: {:?}", symbol, e);
        }
    }

    fn release_all(&mut self) {
        if let Err(e) = self.try_release_all() {
            warn!("Release all dropped: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode::*;

    #[test]
    fn test_press_release_queues_reports() {
        let channel: Channel<RawMutex, KeyboardReport, 8> = Channel::new();
        let mut sink = ReportSink::new(&channel);

        sink.press(KEY_A);
        sink.press(LEFT_SHIFT);
        sink.release(KEY_A);

        let report = channel.try_receive().unwrap();
        assert_eq!(report.keycodes, [0x04, 0, 0, 0, 0, 0]);
        assert_eq!(report.modifier, 0);
        let report = channel.try_receive().unwrap();
        assert_eq!(report.keycodes, [0x04, 0, 0, 0, 0, 0]);
        assert_eq!(report.modifier, 1 << 1);
        let report = channel.try_receive().unwrap();
        assert_eq!(report.keycodes, [0; 6]);
        assert_eq!(report.modifier, 1 << 1);
        assert!(channel.try_receive().is_err());
    }

    #[test]
    fn test_released_slot_is_reused() {
        let channel: Channel<RawMutex, KeyboardReport, 16> = Channel::new();
        let mut sink = ReportSink::new(&channel);
        sink.press(KEY_A);
        sink.press(KEY_B);
        sink.release(KEY_A);
        sink.press(KEY_C);
        assert_eq!(sink.keycodes(), [0x06, 0x05, 0, 0, 0, 0]);
        assert_eq!(sink.pressed_count(), 2);
    }

    #[test]
    fn test_duplicate_press_keeps_one_slot() {
        let channel: Channel<RawMutex, KeyboardReport, 16> = Channel::new();
        let mut sink = ReportSink::new(&channel);
        sink.press(KEY_A);
        sink.press(KEY_A);
        assert_eq!(sink.pressed_count(), 1);
    }

    #[test]
    fn test_seventh_key_is_rejected() {
        let channel: Channel<RawMutex, KeyboardReport, 16> = Channel::new();
        let mut sink = ReportSink::new(&channel);
        for symbol in [KEY_A, KEY_B, KEY_C, KEY_D, KEY_E, KEY_F] {
            assert_eq!(sink.try_press(symbol), Ok(()));
        }
        assert_eq!(sink.try_press(KEY_G), Err(HidError::ReportFull));
        assert_eq!(sink.pressed_count(), 6);
        // Modifiers still fit
        assert_eq!(sink.try_press(LEFT_CTRL), Ok(()));
    }

    #[test]
    fn test_shifted_symbol_sets_and_clears_shift() {
        let channel: Channel<RawMutex, KeyboardReport, 16> = Channel::new();
        let mut sink = ReportSink::new(&channel);
        sink.press(b'?');
        assert_eq!(sink.modifier(), MODIFIER_LEFT_SHIFT);
        assert_eq!(sink.keycodes()[0], 0x38);
        sink.release(b'?');
        assert_eq!(sink.modifier(), 0);
        assert_eq!(sink.pressed_count(), 0);
    }

    #[test]
    fn test_unknown_symbol() {
        let channel: Channel<RawMutex, KeyboardReport, 16> = Channel::new();
        let mut sink = ReportSink::new(&channel);
        assert_eq!(sink.try_press(0x01), Err(HidError::UnknownSymbol(0x01)));
        assert!(channel.try_receive().is_err());
    }

    #[test]
    fn test_release_all_clears_report() {
        let channel: Channel<RawMutex, KeyboardReport, 16> = Channel::new();
        let mut sink = ReportSink::new(&channel);
        sink.press(KEY_A);
        sink.press(RIGHT_ALT);
        sink.release_all();
        assert_eq!(sink.modifier(), 0);
        assert_eq!(sink.pressed_count(), 0);
        let last = core::iter::from_fn(|| channel.try_receive().ok()).last().unwrap();
        assert_eq!(last.modifier, 0);
        assert_eq!(last.keycodes, [0; 6]);
    }

    #[test]
    fn test_full_channel_reports_error() {
        let channel: Channel<RawMutex, KeyboardReport, 1> = Channel::new();
        let mut sink = ReportSink::new(&channel);
        assert_eq!(sink.try_press(KEY_A), Ok(()));
        assert_eq!(sink.try_press(KEY_B), Err(HidError::ChannelFull));
        // The report state still advanced
        assert_eq!(sink.pressed_count(), 2);
    }
}
