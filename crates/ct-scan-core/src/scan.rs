// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scan state machine.
//!
//! All mutable simulation state lives in a [`SimulationContext`] owned by the
//! caller. [`tick`] advances it by one frame and returns the events the frame
//! produced; commands ([`SimulationContext::start_scan`],
//! [`SimulationContext::reset`], ...) run between ticks.
//!
//! Boundary checks look only at the post-increment angle. A long frame that
//! jumps several degrees skips the rows and log entries it flew past; they are
//! not backfilled.

use tracing::{debug, info};

use crate::aggregator::{project_if_due, rounded_degrees};
use crate::events::{detected_signal_pct, ScanEvent, Telemetry, XRAY_INTENSITY_PCT};
use crate::gantry::GantryPose;
use crate::recon_log::ReconstructionLog;
use crate::sampler::average_attenuation;
use crate::shape::ObjectModel;
use crate::sinogram::Sinogram;

/// Degrees of a full gantry turn.
pub const FULL_TURN_DEG: f64 = 360.0;
/// Degrees per second contributed by one unit of scan speed.
pub const DEG_PER_SEC_PER_SPEED: f64 = 10.0;
/// Reconstruction samples are logged on multiples of this angle.
pub const LOG_INTERVAL_DEG: i64 = 10;

/// UI mode; only `Scan` advances the gantry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanMode {
    /// Acquisition view.
    #[default]
    Scan,
    /// Reconstruction view; ticks leave the angle alone.
    Reconstruct,
}

/// Angle, progress and counters for the current run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanState {
    /// `true` between a start command and completion/stop/reset.
    pub is_scanning: bool,
    /// Current gantry angle in `[0, 360)`.
    pub current_angle_deg: f64,
    /// `current_angle_deg / 360 · 100`, forced to 100 on completion.
    pub scan_progress_pct: f64,
    /// Simulated seconds, accumulated on every tick.
    pub elapsed_time_sec: f64,
    /// Sinogram rows written since the last start/reset.
    pub projection_count: u32,
    /// Rounded angle of the last written row.
    pub sinogram_angle_deg: Option<i64>,
}

/// Per-frame inputs supplied by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    /// Frame duration in seconds.
    pub dt_sec: f64,
    /// Scan-speed setting; the gantry turns `scan_speed · 10` °/s.
    pub scan_speed: u32,
    /// Density setting; scales attenuation by `density / 5`.
    pub density: i32,
}

/// Scan state, sinogram buffer and reconstruction log bundled for [`tick`].
#[derive(Debug, Clone, Default)]
pub struct SimulationContext {
    state: ScanState,
    mode: ScanMode,
    sinogram: Sinogram,
    log: ReconstructionLog,
}

impl SimulationContext {
    /// Idle context with a zeroed sinogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current scan state.
    pub const fn state(&self) -> &ScanState {
        &self.state
    }

    /// Current mode.
    pub const fn mode(&self) -> ScanMode {
        self.mode
    }

    /// The sinogram buffer.
    pub const fn sinogram(&self) -> &Sinogram {
        &self.sinogram
    }

    /// The reconstruction log.
    pub const fn log(&self) -> &ReconstructionLog {
        &self.log
    }

    /// Starts (or restarts) a scan from 0°, clearing the sinogram, counters
    /// and log.
    pub fn start_scan(&mut self) -> Vec<ScanEvent> {
        self.clear_run();
        self.state.is_scanning = true;
        info!("scan started");
        vec![ScanEvent::SinogramCleared]
    }

    /// Pauses the scan. Buffers are kept; ticks stop advancing immediately.
    pub fn stop_scan(&mut self) {
        if self.state.is_scanning {
            info!(angle = self.state.current_angle_deg, "scan stopped");
        }
        self.state.is_scanning = false;
    }

    /// Returns to the freshly initialised state. Idempotent.
    pub fn reset(&mut self) -> Vec<ScanEvent> {
        self.clear_run();
        self.state.is_scanning = false;
        self.state.elapsed_time_sec = 0.0;
        info!("scan reset");
        vec![ScanEvent::SinogramCleared]
    }

    /// Switches UI mode, clearing the reconstruction log. Re-selecting the
/// current mode is a no-op.
    pub fn set_mode(&mut self, mode: ScanMode) {
        if self.mode == mode {
            return;
        }
        info!(?mode, "mode switched");
        self.mode = mode;
        self.log.clear();
    }

    fn clear_run(&mut self) {
        self.state.current_angle_deg = 0.0;
        self.state.scan_progress_pct = 0.0;
        self.state.projection_count = 0;
        self.state.sinogram_angle_deg = None;
        self.sinogram.clear();
        self.log.clear();
    }
}

/// Advances the simulation by one frame.
///
/// Elapsed time always accumulates. Everything else happens only while
/// scanning in [`ScanMode::Scan`]:
/// 1. the angle advances by `dt · scan_speed · 10`;
/// 2. at or past 360° it wraps to 0, progress is pinned to 100 and scanning
///    stops (the rest of this tick still runs at angle 0);
/// 3. a non-zero even rounded angle rewrites its sinogram row;
/// 4. a rounded angle divisible by 10 (0 included) appends the coarse
///    average to the reconstruction log.
pub fn tick(
    ctx: &mut SimulationContext,
    objects: &ObjectModel,
    input: TickInput,
) -> Vec<ScanEvent> {
    let st = &mut ctx.state;
    st.elapsed_time_sec += input.dt_sec;
    if !st.is_scanning || ctx.mode != ScanMode::Scan {
        return Vec::new();
    }

    st.current_angle_deg += input.dt_sec * f64::from(input.scan_speed) * DEG_PER_SEC_PER_SPEED;
    let completed = st.current_angle_deg >= FULL_TURN_DEG;
    if completed {
        st.current_angle_deg = 0.0;
        st.scan_progress_pct = 100.0;
        st.is_scanning = false;
    } else {
        st.scan_progress_pct = st.current_angle_deg / FULL_TURN_DEG * 100.0;
    }
    let angle = st.current_angle_deg;
    let rounded = rounded_degrees(angle);

    let mut events = vec![ScanEvent::GantryMoved(GantryPose::at(angle))];
    let shapes = objects.shapes();
    let avg = average_attenuation(angle, &shapes, input.density);

    if let Some(row) = project_if_due(angle, &shapes, input.density, &mut ctx.sinogram) {
        st.projection_count += 1;
        st.sinogram_angle_deg = Some(row.angle_deg);
        events.push(ScanEvent::RowWritten(row));
    }

    #[allow(clippy::cast_possible_truncation)]
    let detected = detected_signal_pct(avg).round() as i64;
    events.push(ScanEvent::Telemetry(Telemetry {
        angle_deg: rounded,
        progress_pct: st.scan_progress_pct,
        xray_intensity_pct: XRAY_INTENSITY_PCT,
        detected_signal_pct: detected,
        avg_attenuation: avg,
        projection_count: st.projection_count,
        sinogram_angle_deg: st.sinogram_angle_deg,
        slice_label: format!("Angle: {rounded}°/360°"),
        elapsed_sec: st.elapsed_time_sec,
    }));

    if rounded.rem_euclid(LOG_INTERVAL_DEG) == 0 {
        let sample = ctx.log.append(angle, avg);
        debug!(angle, avg, "reconstruction sample logged");
        events.push(ScanEvent::LogAppended(sample));
    }

    if completed {
        info!(
            projections = st.projection_count,
            samples = ctx.log.len(),
            "scan completed"
        );
        events.push(ScanEvent::ScanCompleted);
    }
    events
}
