// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Projection aggregator: sweeps the sampler across the detector and writes
//! one sinogram row per 2° boundary.

use crate::sampler::sample_attenuation;
use crate::shape::Shape;
use crate::sinogram::{paint_intensity, row_for_angle, Sinogram, DEGREES_PER_ROW, SINOGRAM_COLS};

/// A freshly written sinogram row, handed to the rendering side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectionRow {
    /// Row index in `[0, SINOGRAM_ROWS)`.
    pub row: usize,
    /// Rounded scan angle the row was sampled at.
    pub angle_deg: i64,
    /// Attenuation per detector column.
    pub attenuation: Vec<f64>,
    /// Grayscale paint value per column, `round(255 · (1 − a))`.
    pub intensities: Vec<u8>,
}

impl ProjectionRow {
    /// `(row, col, attenuation)` cell updates in column order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let row = self.row;
        self.attenuation
            .iter()
            .enumerate()
            .map(move |(col, &a)| (row, col, a))
    }

    /// Mean attenuation over the full row.
    pub fn mean(&self) -> f64 {
        if self.attenuation.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.attenuation.len() as f64;
        self.attenuation.iter().sum::<f64>() / n
    }
}

/// Rounds a continuous angle to whole degrees (half away from zero).
#[allow(clippy::cast_possible_truncation)]
pub fn rounded_degrees(angle_deg: f64) -> i64 {
    angle_deg.round() as i64
}

/// Whether a tick landing on `rounded_angle_deg` should produce a row.
/// Angle 0 never does.
pub fn is_row_boundary(rounded_angle_deg: i64) -> bool {
    rounded_angle_deg.rem_euclid(DEGREES_PER_ROW) == 0 && rounded_angle_deg != 0
}

/// Samples every detector column at `rounded_angle_deg` and overwrites the
/// matching sinogram row.
///
/// Returns `None` (and leaves the buffer untouched) when the row index falls
/// outside the buffer, e.g. for 360°.
pub fn aggregate_row(
    rounded_angle_deg: i64,
    shapes: &[Shape],
    density: i32,
    sinogram: &mut Sinogram,
) -> Option<ProjectionRow> {
    let Some(row) = row_for_angle(rounded_angle_deg) else {
        tracing::trace!(angle = rounded_angle_deg, "row out of range; write skipped");
        return None;
    };
    let cells = sinogram.row_mut(row)?;
    #[allow(clippy::cast_precision_loss)]
    let angle = rounded_angle_deg as f64;
    #[allow(clippy::cast_precision_loss)]
    let cols = SINOGRAM_COLS as f64;

    let mut intensities = Vec::with_capacity(SINOGRAM_COLS);
    for (col, cell) in cells.iter_mut().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let detector_pos = col as f64 / cols;
        let a = sample_attenuation(angle, detector_pos, shapes, density);
        *cell = a;
        intensities.push(paint_intensity(a));
    }

    tracing::debug!(row, angle = rounded_angle_deg, "projection row written");
    Some(ProjectionRow {
        row,
        angle_deg: rounded_angle_deg,
        attenuation: cells.to_vec(),
        intensities,
    })
}

/// Boundary check plus write: rounds `angle_deg`, and when it sits on a
/// non-zero 2° boundary delegates to [`aggregate_row`].
pub fn project_if_due(
    angle_deg: f64,
    shapes: &[Shape],
    density: i32,
    sinogram: &mut Sinogram,
) -> Option<ProjectionRow> {
    let rounded = rounded_degrees(angle_deg);
    if is_row_boundary(rounded) {
        aggregate_row(rounded, shapes, density, sinogram)
    } else {
        None
    }
}
