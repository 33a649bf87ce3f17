//! Per-key, time based debouncing.
//!
//! A raw transition is accepted as soon as it is seen, provided the key's last
//! accepted transition is at least the debounce time old. Everything observed
//! inside that window is treated as contact bounce. So each key reports at most
//! one transition per debounce window, whatever the raw signal does.
//!
//! A key's timer is only consulted while its row is active, so the debounce time
//! is wall-clock time, not a number of scans.

use heapless::Vec;

use crate::{MAX_COLUMNS, MAX_ROWS};
use crate::clock::elapsed_ms;
use crate::event::KeyboardEvent;

/// State of a single matrix cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyState {
    /// Debounced state, true if the key is pressed
    pub pressed: bool,
    /// Debounced state snapshot taken at the start of the latest evaluation of this row
    pub previous: bool,
    /// Clock reading of the last accepted transition
    pub last_change: u32,
}

impl KeyState {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            previous: false,
            last_change: 0,
        }
    }

    pub fn is_pressing(&self) -> bool {
        self.pressed
    }

    pub fn is_releasing(&self) -> bool {
        !self.pressed
    }
}

/// Accepted transitions of one row, in ascending column order.
pub type Transitions<const COL: usize> = Vec<KeyboardEvent, COL>;

/// Debounce state of the whole matrix.
pub struct DebounceMatrix<const ROW: usize, const COL: usize> {
    debounce_ms: u32,
    key_states: [[KeyState; COL]; ROW],
}

impl<const ROW: usize, const COL: usize> DebounceMatrix<ROW, COL> {
    /// Create a matrix with every cell released and timestamped at 0.
    pub fn new(debounce_ms: u32) -> Self {
        const {
            assert!(ROW <= MAX_ROWS, "key events address at most 256 rows");
            assert!(COL <= MAX_COLUMNS, "a column bitmask holds at most 32 columns");
        };
        Self {
            debounce_ms,
            key_states: [[KeyState::new(); COL]; ROW],
        }
    }

    pub fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    pub fn key_state(&self, row: usize, col: usize) -> KeyState {
        self.key_states[row][col]
    }

    /// Zero every cell: released, no history, timestamp 0.
    pub fn reset(&mut self) {
        self.key_states = [[KeyState::new(); COL]; ROW];
    }

    /// Evaluate the raw column bitmask read while `row` was active.
    ///
    /// Bit `j` of `raw` is the raw state of column `j`. Returns the transitions that
    /// passed the debounce check; their cells already hold the new state.
    pub fn evaluate(&mut self, row: usize, raw: u32, now: u32) -> Transitions<COL> {
        let mut transitions = Vec::new();
        let states = &mut self.key_states[row];

        for state in states.iter_mut() {
            state.previous = state.pressed;
        }

        for (col, state) in states.iter_mut().enumerate() {
            let raw_pressed = (raw >> col) & 1 == 1;
            if raw_pressed == state.previous {
                continue;
            }
            if elapsed_ms(now, state.last_change) < self.debounce_ms {
                // Still inside the window of the last accepted transition
                continue;
            }
            state.pressed = raw_pressed;
            state.last_change = now;
            // At most COL transitions per row, so this never overflows
            transitions.push(KeyboardEvent::key(row as u8, col as u8, raw_pressed)).ok();
        }

        transitions
    }
}
