use embassy_time::{Duration, Timer};
use embedded_hal::digital::OutputPin;

use crate::{MAX_COLUMNS, MAX_ROWS};
use crate::clock::Clock;
use crate::config::KeyboardConfig;
use crate::debounce::{DebounceMatrix, KeyState};
use crate::hid::KeySink;
use crate::keymap::KeyMap;
use crate::light::ActivityLed;
use crate::matrix::{ColumnReader, RowDriver};
use crate::overflow::OverflowGuard;

/// A keyboard matrix scanned one row per cycle, with columns read through `R`.
///
/// All scan state is owned by the instance, so several keyboards can run side by
/// side. Dropping the keyboard releases every key on the sink.
///
/// # Type Parameters
/// - `Out`: row output pins
/// - `R`: column reader of the active row
/// - `L`: activity LED pin
/// - `S`: output sink receiving key presses and releases
/// - `C`: millisecond clock
pub struct Keyboard<Out, R, L, S, C, const ROW: usize, const COL: usize>
where
    Out: OutputPin,
    R: ColumnReader<COL>,
    L: OutputPin,
    S: KeySink,
    C: Clock,
{
    rows: RowDriver<Out, ROW>,
    column_reader: R,
    debouncer: DebounceMatrix<ROW, COL>,
    overflow_guard: OverflowGuard,
    led: ActivityLed<L>,
    keymap: KeyMap<ROW, COL>,
    sink: S,
    clock: C,
    scan_interval: Duration,
}

impl<Out, R, L, S, C, const ROW: usize, const COL: usize> Keyboard<Out, R, L, S, C, ROW, COL>
where
    Out: OutputPin,
    R: ColumnReader<COL>,
    L: OutputPin,
    S: KeySink,
    C: Clock,
{
    /// Build and initialize the keyboard.
    ///
    /// Row lines are pulled low, the LED is switched off and every key starts
    /// released. The symbol table is copied in here, once, before any scan.
    pub fn new(
        config: KeyboardConfig<L>,
        row_pins: [Out; ROW],
        column_reader: R,
        keymap: impl Into<KeyMap<ROW, COL>>,
        sink: S,
        clock: C,
    ) -> Self {
        const {
            assert!(ROW > 0 && ROW <= MAX_ROWS, "a matrix needs 1..=256 rows");
            assert!(COL > 0 && COL <= MAX_COLUMNS, "a matrix needs 1..=32 columns");
        };

        let debounce_ms = config.matrix_config.debounce_ms();
        let led = ActivityLed::new(config.light_config);
        info!(
            "Keyboard initialized: {} rows, {} columns, debounce {}ms, LED: {}",
            ROW,
            COL,
            debounce_ms,
            led.is_present()
        );

        Self {
            rows: RowDriver::new(row_pins),
            column_reader,
            debouncer: DebounceMatrix::new(debounce_ms),
            overflow_guard: OverflowGuard::new(),
            led,
            keymap: keymap.into(),
            sink,
            clock,
            scan_interval: config.matrix_config.scan_interval,
        }
    }

    /// Scan the matrix forever, pausing `scan_interval` between cycles.
    pub async fn run(&mut self) {
        loop {
            self.scan();
            Timer::after(self.scan_interval).await;
        }
    }

    /// One full scan cycle: activate the next row, then poll it.
    pub fn scan(&mut self) {
        let row = self.activate_next_row();
        self.poll_matrix(row);
    }

    /// Deactivate the current row and drive the next one, returns its index.
    pub fn activate_next_row(&mut self) -> usize {
        self.rows.activate_next_row()
    }

    /// Read and debounce the columns of `row`, dispatching every accepted transition.
    ///
    /// The clock is read once, so overflow detection, debouncing and LED timing
    /// of a cycle all see the same instant.
    pub fn poll_matrix(&mut self, row: usize) {
        let now = self.clock.now_ms();
        self.check_overflow(now);

        let raw = self.column_reader.read_columns();
        let transitions = self.debouncer.evaluate(row, raw, now);
        for event in transitions.iter() {
            debug!("Key event: {:?}", event);
            self.dispatch_at(event.row as usize, event.col as usize, event.pressed, now);
        }

        // Dispatches already signalled activity, this only ages the lit window
        self.led.update(false, now);
    }

    /// Send the symbol at (`row`, `col`) to the sink as a press or release,
    /// and signal activity to the LED.
    pub fn dispatch(&mut self, row: usize, col: usize, pressed: bool) {
        let now = self.clock.now_ms();
        self.dispatch_at(row, col, pressed, now);
    }

    fn dispatch_at(&mut self, row: usize, col: usize, pressed: bool, now: u32) {
        let symbol = self.keymap.lookup(row, col);
        if pressed {
            self.sink.press(symbol);
        } else {
            self.sink.release(symbol);
        }
        self.led.update(true, now);
    }

    /// Release every key on the sink.
    ///
    /// May release keys the host never saw pressed, but never leaves one stuck.
    pub fn abort(&mut self) {
        info!("Releasing all keys");
        self.sink.release_all();
    }

    fn check_overflow(&mut self, now: u32) {
        if self.overflow_guard.check(now) {
            warn!("Clock wrapped around at {}ms, resetting key states", now);
            self.debouncer.reset();
            self.led.rebase(now);
            self.abort();
        }
    }

    pub fn key_state(&self, row: usize, col: usize) -> KeyState {
        self.debouncer.key_state(row, col)
    }

    pub fn active_row(&self) -> usize {
        self.rows.active_row()
    }

    pub fn led_is_on(&self) -> bool {
        self.led.is_on()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn column_reader_mut(&mut self) -> &mut R {
        &mut self.column_reader
    }
}

impl<Out, R, L, S, C, const ROW: usize, const COL: usize> Drop for Keyboard<Out, R, L, S, C, ROW, COL>
where
    Out: OutputPin,
    R: ColumnReader<COL>,
    L: OutputPin,
    S: KeySink,
    C: Clock,
{
    fn drop(&mut self) {
        self.abort();
        self.rows.deactivate_all();
    }
}
