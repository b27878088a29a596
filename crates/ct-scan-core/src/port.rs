// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Rendering/UI port trait.

use crate::aggregator::ProjectionRow;
use crate::events::{ScanEvent, Telemetry};
use crate::gantry::GantryPose;
use crate::recon_log::ReconstructionSample;

/// Consumer of scan events (canvas painter, 3-D scene, readout panel).
///
/// The core never draws; adapters implement this trait and receive the
/// events a tick or command produced via [`dispatch`].
pub trait ScanPort {
    /// Blank the sinogram image.
    fn clear_sinogram(&mut self);

    /// Paint one sinogram row (`row.intensities` are ready-made grayscale values).
    fn paint_row(&mut self, row: &ProjectionRow);

    /// Move the gantry meshes.
    fn set_gantry(&mut self, pose: &GantryPose);

    /// Refresh the readouts.
    fn show_telemetry(&mut self, telemetry: &Telemetry);

    /// A reconstruction sample was recorded. Default: ignore.
    fn log_appended(&mut self, _sample: &ReconstructionSample) {}

    /// The scan finished its turn. Default: ignore.
    fn scan_completed(&mut self) {}
}

/// Feeds `events` to `port` in order.
pub fn dispatch<P: ScanPort + ?Sized>(events: &[ScanEvent], port: &mut P) {
    for ev in events {
        match ev {
            ScanEvent::SinogramCleared => port.clear_sinogram(),
            ScanEvent::GantryMoved(pose) => port.set_gantry(pose),
            ScanEvent::Telemetry(t) => port.show_telemetry(t),
            ScanEvent::RowWritten(row) => port.paint_row(row),
            ScanEvent::LogAppended(sample) => port.log_appended(sample),
            ScanEvent::ScanCompleted => port.scan_completed(),
        }
    }
}
