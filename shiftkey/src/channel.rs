//! Exposed channels which can be used to share data across devices & processors

use embassy_sync::channel::Channel;
pub use embassy_sync::{blocking_mutex, channel};
use usbd_hid::descriptor::KeyboardReport;

use crate::{REPORT_CHANNEL_SIZE, RawMutex};

/// Channel for keyboard reports, drained by the host transport
pub static KEYBOARD_REPORT_CHANNEL: Channel<RawMutex, KeyboardReport, REPORT_CHANNEL_SIZE> = Channel::new();
