// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Events emitted by commands and ticks for the UI/rendering layer.

use crate::aggregator::ProjectionRow;
use crate::gantry::GantryPose;
use crate::recon_log::ReconstructionSample;

/// X-ray source output shown in the readouts. The model has no tube drift.
pub const XRAY_INTENSITY_PCT: f64 = 100.0;

/// Live readouts for one scanning tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Telemetry {
    /// Scan angle rounded to whole degrees.
    pub angle_deg: i64,
    /// Progress through the turn, `0..=100`.
    pub progress_pct: f64,
    /// Source intensity (always [`XRAY_INTENSITY_PCT`]).
    pub xray_intensity_pct: f64,
    /// Rounded `(0.3 + (1 − avg) · 0.7) · 100`.
    pub detected_signal_pct: i64,
    /// Coarse 10-position average attenuation.
    pub avg_attenuation: f64,
    /// Rows written since the scan started.
    pub projection_count: u32,
    /// Angle of the most recently written sinogram row.
    pub sinogram_angle_deg: Option<i64>,
    /// Slice label, e.g. `"Angle: 90°/360°"`.
    pub slice_label: String,
    /// Simulated seconds since start or last reset.
    pub elapsed_sec: f64,
}

/// Detected-signal percentage for a coarse attenuation reading.
pub fn detected_signal_pct(avg_attenuation: f64) -> f64 {
    (0.3 + (1.0 - avg_attenuation) * 0.7) * 100.0
}

/// Everything the core tells the outside world.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanEvent {
    /// The sinogram buffer was zeroed (start or reset).
    SinogramCleared,
    /// The gantry moved.
    GantryMoved(GantryPose),
    /// Per-tick readouts.
    Telemetry(Telemetry),
    /// A sinogram row was overwritten.
    RowWritten(ProjectionRow),
    /// A reconstruction sample was appended.
    LogAppended(ReconstructionSample),
    /// The scan crossed 360° and stopped.
    ScanCompleted,
}
