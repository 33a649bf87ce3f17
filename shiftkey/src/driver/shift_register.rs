//! Parallel-in/serial-out shift register column reader
//!
//! The register latches all column lines of the active row at once, then hands
//! them out one bit per clock pulse on a single data line. The transfer has a
//! fixed length and no framing: a missed pulse shifts every later column.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::MAX_COLUMNS;
use crate::matrix::ColumnReader;

/// Bit-banged reader for a parallel-load shift register.
///
/// # Type Parameters
/// - `Data`: serial data output of the register (input on our side)
/// - `Clk`: clock line
/// - `Mode`: load/shift select line, high while latching
pub struct ShiftRegister<Data, Clk, Mode, const COL: usize>
where
    Data: InputPin,
    Clk: OutputPin,
    Mode: OutputPin,
{
    data: Data,
    clock: Clk,
    mode: Mode,
}

impl<Data, Clk, Mode, const COL: usize> ShiftRegister<Data, Clk, Mode, COL>
where
    Data: InputPin,
    Clk: OutputPin,
    Mode: OutputPin,
{
    /// Create the reader and park the clock and mode lines low.
    pub fn new(data: Data, mut clock: Clk, mut mode: Mode) -> Self {
        const { assert!(COL > 0 && COL <= MAX_COLUMNS, "shift register width must be 1..=32") };
        clock.set_low().ok();
        mode.set_low().ok();
        Self { data, clock, mode }
    }

    /// Latch the parallel inputs into the register.
    fn latch(&mut self) {
        self.clock.set_low().ok();
        self.mode.set_high().ok();
        self.clock.set_high().ok();
        self.mode.set_low().ok();
    }
}

impl<Data, Clk, Mode, const COL: usize> ColumnReader<COL> for ShiftRegister<Data, Clk, Mode, COL>
where
    Data: InputPin,
    Clk: OutputPin,
    Mode: OutputPin,
{
    fn read_columns(&mut self) -> u32 {
        self.latch();

        let mut columns = 0u32;
        for i in 0..COL {
            self.clock.set_low().ok();
            // A failed read counts as an open switch
            if self.data.is_high().unwrap_or(false) {
                columns |= 1 << i;
            }
            self.clock.set_high().ok();
        }
        columns
    }
}
