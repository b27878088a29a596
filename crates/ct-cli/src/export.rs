// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Headless render port and sinogram exporters.

use std::path::Path;

use anyhow::{Context, Result};
use ct_scan_core::{
    GantryPose, ProjectionRow, ReconstructionSample, ScanPort, SimulationContext, Telemetry,
    SINOGRAM_COLS, SINOGRAM_ROWS,
};
use image::{GrayImage, ImageFormat};
use serde::Serialize;
use tracing::{debug, info};

/// Stands in for the canvas painter: keeps a grayscale image of the painted
/// rows and the last readouts.
pub(crate) struct CanvasPort {
    pub pixels: Vec<u8>,
    pub rows_painted: usize,
    pub telemetry: Option<Telemetry>,
    pub completed: bool,
}

impl CanvasPort {
    pub fn new() -> Self {
        Self {
            // Unpainted rows stay black, like the initial canvas fill.
            pixels: vec![0; SINOGRAM_ROWS * SINOGRAM_COLS],
            rows_painted: 0,
            telemetry: None,
            completed: false,
        }
    }
}

impl ScanPort for CanvasPort {
    fn clear_sinogram(&mut self) {
        self.pixels.fill(0);
        self.rows_painted = 0;
    }

    fn paint_row(&mut self, row: &ProjectionRow) {
        let start = row.row * SINOGRAM_COLS;
        if let Some(dst) = self.pixels.get_mut(start..start + row.intensities.len()) {
            dst.copy_from_slice(&row.intensities);
            self.rows_painted += 1;
        }
    }

    fn set_gantry(&mut self, _pose: &GantryPose) {}

    fn show_telemetry(&mut self, telemetry: &Telemetry) {
        self.telemetry = Some(telemetry.clone());
    }

    fn log_appended(&mut self, sample: &ReconstructionSample) {
        debug!(angle = sample.angle_deg, avg = sample.avg_attenuation, "log sample");
    }

    fn scan_completed(&mut self) {
        self.completed = true;
    }
}

#[derive(Serialize)]
struct SinogramExport<'a> {
    rows: usize,
    cols: usize,
    scan_speed: u32,
    density: i32,
    projection_count: u32,
    sinogram: Vec<&'a [f64]>,
    reconstruction_log: &'a [ReconstructionSample],
}

/// Writes the attenuation buffer and reconstruction log as JSON.
pub(crate) fn write_json(
    path: &Path,
    ctx: &SimulationContext,
    scan_speed: u32,
    density: i32,
) -> Result<()> {
    let export = SinogramExport {
        rows: SINOGRAM_ROWS,
        cols: SINOGRAM_COLS,
        scan_speed,
        density,
        projection_count: ctx.state().projection_count,
        sinogram: ctx.sinogram().rows().collect(),
        reconstruction_log: ctx.log().samples(),
    };
    let data = serde_json::to_vec(&export).context("serialize sinogram")?;
    std::fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), "sinogram written (json)");
    Ok(())
}

/// Writes the painted sinogram as a grayscale image, one pixel per cell.
pub(crate) fn write_image(path: &Path, pixels: &[u8], format: ImageFormat) -> Result<()> {
    let img = GrayImage::from_raw(
        u32::try_from(SINOGRAM_COLS)?,
        u32::try_from(SINOGRAM_ROWS)?,
        pixels.to_vec(),
    )
    .context("pixel buffer does not match the sinogram size")?;
    img.save_with_format(path, format)
        .with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), ?format, "sinogram written");
    Ok(())
}
