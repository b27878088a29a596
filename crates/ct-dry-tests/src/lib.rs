// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for the CT scan crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`port`] - Recording render port
//! - [`scene`] - Object model builder
//! - [`scan`] - Whole-scan drivers

pub mod config;
pub mod port;
pub mod scan;
pub mod scene;

pub use config::InMemoryConfigStore;
pub use port::{PortCall, RecordingPort};
pub use scan::{run_fine_scan, run_until_stopped, ONE_DEGREE_DT};
pub use scene::ObjectModelBuilder;
