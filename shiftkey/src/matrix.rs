//! Matrix scan primitives: row activation and column read-back.

use embedded_hal::digital::OutputPin;

/// Reads the column states of the currently active row.
///
/// The reader is only called after a row has been activated. Keeping it behind
/// this trait lets the scan logic run against a simulated matrix.
pub trait ColumnReader<const COL: usize> {
    /// Bit `i` of the result is 1 if column `i` reads high. Bits at and above `COL` are 0.
    fn read_columns(&mut self) -> u32;
}

/// Round-robin row driver, exactly one row line is high at a time.
pub struct RowDriver<Out: OutputPin, const ROW: usize> {
    /// Output pins of the rows
    row_pins: [Out; ROW],
    /// Index of the logically active row
    active: usize,
}

impl<Out: OutputPin, const ROW: usize> RowDriver<Out, ROW> {
    /// Create a row driver and pull every row line low.
    ///
    /// Row 0 is the logically active row until the first activation, which
    /// moves on to row 1.
    pub fn new(mut row_pins: [Out; ROW]) -> Self {
        const { assert!(ROW > 0, "a matrix needs at least one row") };
        for pin in row_pins.iter_mut() {
            pin.set_low().ok();
        }
        Self { row_pins, active: 0 }
    }

    /// Pull the active row low, advance to the next row (wrapping to 0) and drive it high.
    ///
    /// Returns the newly active row index.
    pub fn activate_next_row(&mut self) -> usize {
        self.row_pins[self.active].set_low().ok();
        self.active = (self.active + 1) % ROW;
        self.row_pins[self.active].set_high().ok();
        self.active
    }

    pub fn active_row(&self) -> usize {
        self.active
    }

    /// Pull every row line low.
    pub fn deactivate_all(&mut self) {
        for pin in self.row_pins.iter_mut() {
            pin.set_low().ok();
        }
    }
}
