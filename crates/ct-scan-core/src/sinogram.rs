// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-size sinogram buffer: one row per 2° step, one column per detector pixel.

/// Number of angle rows (2° per row over a full turn).
pub const SINOGRAM_ROWS: usize = 180;
/// Number of detector columns.
pub const SINOGRAM_COLS: usize = 360;
/// Angular width of one row in degrees.
pub const DEGREES_PER_ROW: i64 = 2;

/// Row-major attenuation buffer, values in `[0, 1]`.
///
/// Allocated once; rows are overwritten (never accumulated) when their angle
/// is revisited.
#[derive(Debug, Clone, PartialEq)]
pub struct Sinogram {
    cells: Vec<f64>,
}

impl Default for Sinogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Sinogram {
    /// All-zero buffer.
    pub fn new() -> Self {
        Self {
            cells: vec![0.0; SINOGRAM_ROWS * SINOGRAM_COLS],
        }
    }

    /// Zeroes every cell in place.
    pub fn clear(&mut self) {
        self.cells.fill(0.0);
    }

    /// `true` when every cell is zero.
    pub fn is_zeroed(&self) -> bool {
        self.cells.iter().all(|&v| v == 0.0)
    }

    /// Cell value, `None` outside the buffer.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < SINOGRAM_ROWS && col < SINOGRAM_COLS {
            Some(self.cells[row * SINOGRAM_COLS + col])
        } else {
            None
        }
    }

    /// One row as a slice, `None` outside the buffer.
    pub fn row(&self, row: usize) -> Option<&[f64]> {
        (row < SINOGRAM_ROWS).then(|| &self.cells[row * SINOGRAM_COLS..(row + 1) * SINOGRAM_COLS])
    }

    /// Mutable row slice, `None` outside the buffer.
    pub fn row_mut(&mut self, row: usize) -> Option<&mut [f64]> {
        (row < SINOGRAM_ROWS)
            .then(|| &mut self.cells[row * SINOGRAM_COLS..(row + 1) * SINOGRAM_COLS])
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.cells.chunks_exact(SINOGRAM_COLS)
    }
}

/// Row index for an already-rounded angle, `None` when it falls outside
/// `[0, SINOGRAM_ROWS)`.
pub fn row_for_angle(rounded_angle_deg: i64) -> Option<usize> {
    let row = rounded_angle_deg.div_euclid(DEGREES_PER_ROW);
    usize::try_from(row).ok().filter(|&r| r < SINOGRAM_ROWS)
}

/// Display intensity for an attenuation value (white = no absorption).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn paint_intensity(attenuation: f64) -> u8 {
    (255.0 * (1.0 - attenuation)).round().clamp(0.0, 255.0) as u8
}
