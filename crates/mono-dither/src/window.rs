//! Sliding three-row error window.
//!
//! Only the current row and the two rows below it can ever receive
//! diffused error, so the window keeps exactly three rows and recycles
//! them as the scan moves down the image.

/// Kernel taps as `(dx, drow)`, each receiving 1/8 of the residual.
pub(crate) const OFFSETS: [(isize, usize); 6] = [(1, 0), (2, 0), (-1, 1), (0, 1), (1, 1), (0, 2)];

/// Divisor applied to the residual before it is handed to each tap.
pub(crate) const DIVISOR: f64 = 8.0;

/// Ring of three error rows: `rows[0]` is the row being scanned.
///
/// Cells are single precision; additions are carried out in `f64` and
/// rounded on store.
pub(crate) struct ErrorWindow {
    rows: [Vec<f32>; 3],
}

impl ErrorWindow {
    pub(crate) fn new(width: usize) -> Self {
        Self {
            rows: [vec![0.0; width], vec![0.0; width], vec![0.0; width]],
        }
    }

    #[inline]
    pub(crate) fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Error accumulated so far at column `x` of the current row.
    #[inline]
    pub(crate) fn accumulated(&self, x: usize) -> f64 {
        self.rows[0][x] as f64
    }

    /// Spread `err` over the kernel taps around column `x`.
    ///
    /// Taps falling outside `[0, width)` are dropped.
    #[inline]
    pub(crate) fn diffuse(&mut self, x: usize, err: f64) {
        let width = self.width();
        for &(dx, drow) in OFFSETS.iter() {
            let Some(tx) = x.checked_add_signed(dx) else {
                continue;
            };
            if tx >= width {
                continue;
            }
            let cell = &mut self.rows[drow][tx];
            *cell = (*cell as f64 + err) as f32;
        }
    }

    /// Advance one row: row1 becomes row0, row2 becomes row1 and the old
    /// row0 is cleared and reused as row2.
    pub(crate) fn advance(&mut self) {
        self.rows.rotate_left(1);
        self.rows[2].fill(0.0);
    }

    #[cfg(test)]
    pub(crate) fn row(&self, index: usize) -> &[f32] {
        &self.rows[index]
    }
}
