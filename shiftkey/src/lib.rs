//! Keyboard matrix scanning over a parallel-in/serial-out shift register.
//!
//! One row line is driven at a time, the column states of that row are shifted
//! in bit by bit, every key is debounced on its own timer and accepted
//! transitions are routed through a symbol table to a HID output sink.
//!
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channel;
pub mod clock;
pub mod config;
pub mod debounce;
pub mod driver;
pub mod event;
pub mod hid;
pub mod keyboard;
pub mod keycode;
pub mod keymap;
pub mod light;
pub mod matrix;
pub mod overflow;

pub use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex as RawMutex;
pub use keyboard::Keyboard;

/// Debounce time used when the config doesn't specify one, in milliseconds.
pub const DEFAULT_DEBOUNCE_TIME_MS: u32 = 25;
/// How long the activity LED stays lit after the last key event, in milliseconds.
pub const LED_HOLD_TIME_MS: u32 = 50;
/// Capacity of the keyboard report channel.
pub const REPORT_CHANNEL_SIZE: usize = 16;
/// Width of the column bitmask. A matrix can't have more columns than this.
pub const MAX_COLUMNS: usize = u32::BITS as usize;
/// Key events carry the row as a `u8`, so a matrix can't have more rows than this.
pub const MAX_ROWS: usize = u8::MAX as usize + 1;
