// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CT scan simulation core.
//!
//! A source/detector pair rotates around two cross-section shapes. Each frame
//! the caller runs [`tick`] on a [`SimulationContext`]; on 2° boundaries a
//! projection row is sampled into the [`Sinogram`], on 10° boundaries a coarse
//! attenuation reading goes into the [`ReconstructionLog`].
//!
//! # Design Principles
//!
//! - **No I/O**: Ticks and commands return [`ScanEvent`]s; painting and UI
//!   updates happen in a [`ScanPort`] adapter.
//! - **Caller owns time**: `dt` comes in with every tick.
//! - **Forward projection only**: No inversion, and attenuation is a linear
//!   sum rather than an exponential decay.
//!
//! # Crate Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` on the public data types.
#![forbid(unsafe_code)]

pub mod aggregator;
pub mod events;
pub mod gantry;
pub mod port;
pub mod recon_log;
pub mod sampler;
pub mod scan;
pub mod shape;
pub mod sinogram;

pub use aggregator::{
    aggregate_row, is_row_boundary, project_if_due, rounded_degrees, ProjectionRow,
};
pub use events::{detected_signal_pct, ScanEvent, Telemetry, XRAY_INTENSITY_PCT};
pub use gantry::GantryPose;
pub use port::{dispatch, ScanPort};
pub use recon_log::{ReconstructionLog, ReconstructionSample};
pub use sampler::{average_attenuation, sample_attenuation, Ray, COARSE_SAMPLES, RAY_SAMPLES};
pub use scan::{tick, ScanMode, ScanState, SimulationContext, TickInput};
pub use shape::{ObjectKind, ObjectModel, Placement, Point2, ScaleStep, Shape, ShapeError};
pub use sinogram::{paint_intensity, row_for_angle, Sinogram, SINOGRAM_COLS, SINOGRAM_ROWS};
