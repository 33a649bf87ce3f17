/// Row/column to symbol table of the matrix.
///
/// The keyboard keeps its own copy, taken once at initialization.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyMap<const ROW: usize, const COL: usize> {
    symbols: [[u8; COL]; ROW],
}

impl<const ROW: usize, const COL: usize> KeyMap<ROW, COL> {
    pub const fn new(symbols: [[u8; COL]; ROW]) -> Self {
        Self { symbols }
    }

    /// Symbol at the given matrix position.
    pub fn lookup(&self, row: usize, col: usize) -> u8 {
        self.symbols[row][col]
    }
}

impl<const ROW: usize, const COL: usize> From<[[u8; COL]; ROW]> for KeyMap<ROW, COL> {
    fn from(symbols: [[u8; COL]; ROW]) -> Self {
        Self::new(symbols)
    }
}
