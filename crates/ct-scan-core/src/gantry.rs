// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Gantry pose handed to the renderer each scanning tick.

use core::f64::consts::FRAC_PI_2;

use crate::sampler::{radians, GANTRY_RADIUS};
use crate::shape::Point2;

/// Named transforms for the rotating assembly and its X-ray beam.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GantryPose {
    /// Rotation of the source/detector assembly about the vertical axis.
    pub assembly_rotation_rad: f64,
    /// Beam centre in the gantry plane.
    pub beam_position: Point2,
    /// Beam rotation about the vertical axis.
    pub beam_rotation_rad: f64,
}

impl GantryPose {
    /// Pose for a scan angle in degrees.
    pub fn at(angle_deg: f64) -> Self {
        let theta = radians(angle_deg);
        let (sin, cos) = theta.sin_cos();
        Self {
            assembly_rotation_rad: theta,
            beam_position: Point2::new(cos * GANTRY_RADIUS, sin * GANTRY_RADIUS),
            beam_rotation_rad: theta + FRAC_PI_2,
        }
    }
}
