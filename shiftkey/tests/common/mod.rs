#![allow(dead_code)]

use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use shiftkey::clock::Clock;
use shiftkey::hid::KeySink;
use shiftkey::matrix::ColumnReader;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// Call received by a [`RecordingSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkCall {
    Press(u8),
    Release(u8),
    ReleaseAll,
}

#[derive(Default)]
pub struct RecordingSink {
    pub calls: Vec<SinkCall>,
}

impl RecordingSink {
    pub fn release_all_count(&self) -> usize {
        self.calls.iter().filter(|c| **c == SinkCall::ReleaseAll).count()
    }
}

impl KeySink for RecordingSink {
    fn press(&mut self, symbol: u8) {
        self.calls.push(SinkCall::Press(symbol));
    }

    fn release(&mut self, symbol: u8) {
        self.calls.push(SinkCall::Release(symbol));
    }

    fn release_all(&mut self) {
        self.calls.push(SinkCall::ReleaseAll);
    }
}

/// Manually advanced millisecond clock
pub struct TestClock {
    now: Cell<u32>,
}

impl TestClock {
    pub fn new(start: u32) -> Self {
        Self { now: Cell::new(start) }
    }

    pub fn set(&self, now: u32) {
        self.now.set(now);
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn get(&self) -> u32 {
        self.now.get()
    }
}

impl Clock for TestClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Simulated key matrix.
///
/// Row pins handed out by [`Board::row_pins`] select which row the
/// [`BoardColumns`] reader sees, like the diodes and the shift register would.
pub struct Board<const ROW: usize> {
    active: Cell<Option<usize>>,
    raw: [Cell<u32>; ROW],
    pin_log: RefCell<Vec<(usize, bool)>>,
    reads: Cell<usize>,
}

impl<const ROW: usize> Board<ROW> {
    pub fn new() -> Self {
        Self {
            active: Cell::new(None),
            raw: core::array::from_fn(|_| Cell::new(0)),
            pin_log: RefCell::new(Vec::new()),
            reads: Cell::new(0),
        }
    }

    /// Set the raw column bits seen while `row` is driven
    pub fn set_row(&self, row: usize, columns: u32) {
        self.raw[row].set(columns);
    }

    pub fn row_pins(&self) -> [BoardRowPin<'_, ROW>; ROW] {
        core::array::from_fn(|index| BoardRowPin { board: self, index })
    }

    pub fn columns(&self) -> BoardColumns<'_, ROW> {
        BoardColumns { board: self }
    }

    pub fn active_row(&self) -> Option<usize> {
        self.active.get()
    }

    pub fn pin_log(&self) -> Vec<(usize, bool)> {
        self.pin_log.borrow().clone()
    }

    pub fn clear_pin_log(&self) {
        self.pin_log.borrow_mut().clear();
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

pub struct BoardRowPin<'a, const ROW: usize> {
    board: &'a Board<ROW>,
    index: usize,
}

impl<const ROW: usize> ErrorType for BoardRowPin<'_, ROW> {
    type Error = Infallible;
}

impl<const ROW: usize> OutputPin for BoardRowPin<'_, ROW> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.board.pin_log.borrow_mut().push((self.index, false));
        if self.board.active.get() == Some(self.index) {
            self.board.active.set(None);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.board.pin_log.borrow_mut().push((self.index, true));
        assert_eq!(self.board.active.get(), None, "two rows driven at once");
        self.board.active.set(Some(self.index));
        Ok(())
    }
}

pub struct BoardColumns<'a, const ROW: usize> {
    board: &'a Board<ROW>,
}

impl<const ROW: usize, const COL: usize> ColumnReader<COL> for BoardColumns<'_, ROW> {
    fn read_columns(&mut self) -> u32 {
        self.board.reads.set(self.board.reads.get() + 1);
        match self.board.active.get() {
            Some(row) => self.board.raw[row].get() & ((1u64 << COL) - 1) as u32,
            None => 0,
        }
    }
}
