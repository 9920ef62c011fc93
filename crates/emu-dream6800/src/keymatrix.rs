//! Crossbar key matrix with bidirectional row and column pins.
//!
//! Every pin can be driven by the port connected to it or left floating;
//! driving a set of pins propagates their levels through the closed key
//! switches to the floating pins on the other axis. That is how CHIPOS
//! scans the keypad: drive the row lines through the PIA, read the column
//! lines back, and a key shows up as its row level arriving on a column.

#[derive(Debug, Clone, Copy, Default)]
struct Pin {
    /// Level driven from the port side, `None` when the line is an input.
    driven: Option<bool>,
    /// Observed level, `None` when nothing drives the line.
    level: Option<bool>,
}

/// Levels read back from one axis, with a connection mask telling which
/// lines carry a defined level at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Strobe {
    pub value: u16,
    pub connections: u16,
}

#[derive(Debug, Clone)]
pub struct KeyMatrix<const ROWS: usize, const COLS: usize> {
    rows: [Pin; ROWS],
    cols: [Pin; COLS],
    switches: [[bool; COLS]; ROWS],
}

impl<const ROWS: usize, const COLS: usize> Default for KeyMatrix<ROWS, COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const ROWS: usize, const COLS: usize> KeyMatrix<ROWS, COLS> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: [Pin::default(); ROWS],
            cols: [Pin::default(); COLS],
            switches: [[false; COLS]; ROWS],
        }
    }

    /// Drive the row lines whose bit is set in `connections`; the rest float.
    pub fn set_rows(&mut self, levels: u16, connections: u16) {
        for (i, pin) in self.rows.iter_mut().enumerate() {
            if connections & (1 << i) != 0 {
                let level = levels & (1 << i) != 0;
                pin.driven = Some(level);
                pin.level = Some(level);
            } else {
                pin.driven = None;
            }
        }
        self.propagate();
    }

    /// Drive the column lines whose bit is set in `connections`.
    pub fn set_cols(&mut self, levels: u16, connections: u16) {
        for (i, pin) in self.cols.iter_mut().enumerate() {
            if connections & (1 << i) != 0 {
                let level = levels & (1 << i) != 0;
                pin.driven = Some(level);
                pin.level = Some(level);
            } else {
                pin.driven = None;
            }
        }
        self.propagate();
    }

    #[must_use]
    pub fn rows(&self, mask: u16) -> Strobe {
        Self::read(&self.rows, mask)
    }

    #[must_use]
    pub fn cols(&self, mask: u16) -> Strobe {
        Self::read(&self.cols, mask)
    }

    /// Latch the switch states, row-major (`keys[row * COLS + col]`).
    pub fn set_keys(&mut self, keys: &[bool]) {
        debug_assert_eq!(keys.len(), ROWS * COLS);
        for row in 0..ROWS {
            for col in 0..COLS {
                self.switches[row][col] = keys[row * COLS + col];
            }
        }
        self.propagate();
    }

    fn read(pins: &[Pin], mask: u16) -> Strobe {
        let mut strobe = Strobe::default();
        for (i, pin) in pins.iter().enumerate() {
            if let Some(level) = pin.level {
                strobe.connections |= 1 << i;
                if level {
                    strobe.value |= 1 << i;
                }
            }
        }
        strobe.value &= mask;
        strobe.connections &= mask;
        strobe
    }

    fn propagate(&mut self) {
        for col in 0..COLS {
            if self.cols[col].driven.is_none() {
                self.cols[col].level = None;
            }
        }
        for row in 0..ROWS {
            if let Some(level) = self.rows[row].driven {
                for col in 0..COLS {
                    if self.cols[col].driven.is_none() && self.switches[row][col] {
                        self.cols[col].level = Some(level);
                    }
                }
            } else {
                self.rows[row].level = None;
            }
        }
        for col in 0..COLS {
            if let Some(level) = self.cols[col].driven {
                for row in 0..ROWS {
                    if self.rows[row].driven.is_none() && self.switches[row][col] {
                        self.rows[row].level = Some(level);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_lines_float() {
        let mut matrix: KeyMatrix<4, 4> = KeyMatrix::new();
        matrix.set_rows(0x0, 0xF);
        assert_eq!(matrix.cols(0xF), Strobe { value: 0, connections: 0 });
    }

    #[test]
    fn a_closed_switch_carries_the_row_level_to_its_column() {
        let mut matrix: KeyMatrix<4, 4> = KeyMatrix::new();
        let mut keys = [false; 16];
        keys[6] = true; // row 1, column 2
        matrix.set_keys(&keys);

        // strobe row 1 low, the rest floating
        matrix.set_rows(0x0, 0x2);
        let cols = matrix.cols(0xF);
        assert_eq!(cols.connections, 0x4);
        assert_eq!(cols.value, 0x0);

        // strobing row 0 instead finds nothing
        matrix.set_rows(0x0, 0x1);
        assert_eq!(matrix.cols(0xF).connections, 0);
    }

    #[test]
    fn scanning_works_in_both_directions() {
        let mut matrix: KeyMatrix<4, 4> = KeyMatrix::new();
        let mut keys = [false; 16];
        keys[12] = true; // row 3, column 0
        matrix.set_keys(&keys);

        matrix.set_rows(0, 0);
        matrix.set_cols(0x1, 0x1); // drive column 0 high
        let rows = matrix.rows(0xF);
        assert_eq!(rows.connections, 0x8);
        assert_eq!(rows.value, 0x8);
    }

    #[test]
    fn releasing_the_key_disconnects_the_line() {
        let mut matrix: KeyMatrix<4, 4> = KeyMatrix::new();
        let mut keys = [false; 16];
        keys[0] = true;
        matrix.set_keys(&keys);
        matrix.set_rows(0x1, 0x1);
        assert_eq!(matrix.cols(0xF).connections, 0x1);

        matrix.set_keys(&[false; 16]);
        assert_eq!(matrix.cols(0xF).connections, 0);
    }
}
