// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recording [`ScanPort`] double.

use ct_scan_core::{GantryPose, ProjectionRow, ReconstructionSample, ScanPort, Telemetry};

/// One call received by a [`RecordingPort`].
#[derive(Debug, Clone, PartialEq)]
pub enum PortCall {
    /// `clear_sinogram`.
    Clear,
    /// `paint_row` with the row index.
    Paint(usize),
    /// `set_gantry`.
    Gantry(GantryPose),
    /// `show_telemetry` with the rounded angle.
    Telemetry(i64),
    /// `log_appended`.
    Logged(ReconstructionSample),
    /// `scan_completed`.
    Completed,
}

/// Port that records every call and keeps a painted grayscale image.
#[derive(Debug, Clone)]
pub struct RecordingPort {
    /// Calls in arrival order.
    pub calls: Vec<PortCall>,
    /// Painted pixels, row-major, 0 (black) until painted.
    pub pixels: Vec<u8>,
    /// Most recent telemetry.
    pub last_telemetry: Option<Telemetry>,
}

impl Default for RecordingPort {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            pixels: vec![0; ct_scan_core::SINOGRAM_ROWS * ct_scan_core::SINOGRAM_COLS],
            last_telemetry: None,
        }
    }
}

impl RecordingPort {
    /// Empty recorder with a black canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows painted, in order.
    pub fn painted_rows(&self) -> Vec<usize> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PortCall::Paint(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Number of calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&PortCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl ScanPort for RecordingPort {
    fn clear_sinogram(&mut self) {
        self.pixels.fill(0);
        self.calls.push(PortCall::Clear);
    }

    fn paint_row(&mut self, row: &ProjectionRow) {
        let start = row.row * ct_scan_core::SINOGRAM_COLS;
        if let Some(dst) = self.pixels.get_mut(start..start + row.intensities.len()) {
            dst.copy_from_slice(&row.intensities);
        }
        self.calls.push(PortCall::Paint(row.row));
    }

    fn set_gantry(&mut self, pose: &GantryPose) {
        self.calls.push(PortCall::Gantry(*pose));
    }

    fn show_telemetry(&mut self, telemetry: &Telemetry) {
        self.calls.push(PortCall::Telemetry(telemetry.angle_deg));
        self.last_telemetry = Some(telemetry.clone());
    }

    fn log_appended(&mut self, sample: &ReconstructionSample) {
        self.calls.push(PortCall::Logged(*sample));
    }

    fn scan_completed(&mut self) {
        self.calls.push(PortCall::Completed);
    }
}
