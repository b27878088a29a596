// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Ray attenuation sampler.
//!
//! Approximates the line integral along one source→detector ray by marching
//! [`RAY_SAMPLES`] evenly spaced points and summing a linear contribution for
//! every shape each point falls inside. The model is additive, not
//! Beer-Lambert.

use core::f64::consts::PI;

use crate::shape::{Point2, Shape};

/// Distance from the scanner axis to the source and to the detector centre.
pub const GANTRY_RADIUS: f64 = 5.0;
/// Half-length of the detector array.
pub const DETECTOR_HALF_SPAN: f64 = 2.5;
/// Points marched along each ray.
pub const RAY_SAMPLES: usize = 50;
/// Detector positions averaged for the coarse telemetry reading.
pub const COARSE_SAMPLES: usize = 10;
/// Density at which a shape contributes exactly its base coefficient.
pub const REFERENCE_DENSITY: f64 = 5.0;

/// Degrees to radians as `deg · π / 180`. Not `f64::to_radians`, which can
/// differ in the last bit and shift exact-boundary samples.
pub(crate) fn radians(angle_deg: f64) -> f64 {
    angle_deg * PI / 180.0
}

/// Source and detector-pixel endpoints of one ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// X-ray source position.
    pub source: Point2,
    /// Detector pixel position.
    pub detector: Point2,
}

impl Ray {
    /// Ray for `angle_deg` hitting the detector at normalised `detector_pos`
    /// (`0.0` one end of the array, `1.0` the other).
    pub fn new(angle_deg: f64, detector_pos: f64) -> Self {
        let theta = radians(angle_deg);
        let (sin, cos) = theta.sin_cos();
        let offset = (detector_pos - 0.5) * 2.0;
        Self {
            source: Point2::new(GANTRY_RADIUS * cos, GANTRY_RADIUS * sin),
            detector: Point2::new(
                -GANTRY_RADIUS * cos - sin * offset * DETECTOR_HALF_SPAN,
                -GANTRY_RADIUS * sin + cos * offset * DETECTOR_HALF_SPAN,
            ),
        }
    }

    /// The marched sample points, source first, detector last.
    pub fn points(&self) -> impl Iterator<Item = Point2> + '_ {
        #[allow(clippy::cast_precision_loss)]
        let last = (RAY_SAMPLES - 1) as f64;
        (0..RAY_SAMPLES).map(move |i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / last;
            self.source.lerp(self.detector, t)
        })
    }
}

/// Attenuation in `[0, 1]` along the ray at `angle_deg` / `detector_pos`.
///
/// Every shape containing a sample point adds
/// `base_coefficient · density / 5`; overlapping shapes both add. The sum is
/// averaged over the samples and capped at 1. Zero density always yields 0.
pub fn sample_attenuation(
    angle_deg: f64,
    detector_pos: f64,
    shapes: &[Shape],
    density: i32,
) -> f64 {
    let scale = f64::from(density) / REFERENCE_DENSITY;
    let ray = Ray::new(angle_deg, detector_pos);
    let total: f64 = ray
        .points()
        .map(|p| {
            shapes
                .iter()
                .filter(|s| s.contains(p))
                .map(|s| s.base_coefficient() * scale)
                .sum::<f64>()
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let n = RAY_SAMPLES as f64;
    (total / n).min(1.0)
}

/// Coarse mean attenuation over [`COARSE_SAMPLES`] detector positions
/// (`i / 10`). Feeds telemetry and the reconstruction log only; it is not the
/// mean of a sinogram row and the two may differ.
pub fn average_attenuation(angle_deg: f64, shapes: &[Shape], density: i32) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let n = COARSE_SAMPLES as f64;
    let total: f64 = (0..COARSE_SAMPLES)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let pos = i as f64 / n;
            sample_attenuation(angle_deg, pos, shapes, density)
        })
        .sum();
    total / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ObjectModel;

    #[test]
    fn ray_endpoints_at_zero_degrees() {
        let ray = Ray::new(0.0, 0.5);
        assert_eq!(ray.source, Point2::new(5.0, 0.0));
        assert_eq!(ray.detector, Point2::new(-5.0, 0.0));
        let ray = Ray::new(0.0, 1.0);
        assert_eq!(ray.detector, Point2::new(-5.0, 2.5));
    }

    #[test]
    fn ray_angles_use_degree_times_pi_over_180() {
        for k in 0..3600 {
            let a = f64::from(k) / 10.0;
            let theta = a * PI / 180.0;
            let ray = Ray::new(a, 0.5);
            assert_eq!(
                ray.source,
                Point2::new(GANTRY_RADIUS * theta.cos(), GANTRY_RADIUS * theta.sin()),
                "angle {a}"
            );
        }
    }

    #[test]
    fn ray_has_fifty_points_ending_on_detector() {
        let ray = Ray::new(37.0, 0.2);
        let pts: Vec<_> = ray.points().collect();
        assert_eq!(pts.len(), RAY_SAMPLES);
        assert_eq!(pts[0], ray.source);
        let last = pts[RAY_SAMPLES - 1];
        assert!((last.x - ray.detector.x).abs() < 1e-12);
        assert!((last.z - ray.detector.z).abs() < 1e-12);
    }

    #[test]
    fn boundary_point_contributes() {
        // Only the source point (5, 0) sits on this circle's rim.
        let rim = Shape::circle(Point2::new(10.0, 0.0), 5.0).unwrap();
        let a = sample_attenuation(0.0, 0.5, &[rim], 5);
        assert!((a - 0.9 / 50.0).abs() < 1e-12);
    }

    #[test]
    fn overlapping_shapes_both_add() {
        let c = Shape::circle(Point2::default(), 10.0).unwrap();
        let r = Shape::rectangle(Point2::default(), 10.0, 10.0).unwrap();
        assert!((sample_attenuation(0.0, 0.5, &[c], 1) - 0.18).abs() < 1e-12);
        assert!((sample_attenuation(0.0, 0.5, &[r], 1) - 0.16).abs() < 1e-12);
        assert!((sample_attenuation(0.0, 0.5, &[c, r], 1) - 0.34).abs() < 1e-12);
        // Capped at 1 even when the raw sum exceeds it.
        assert_eq!(sample_attenuation(0.0, 0.5, &[c, r], 10), 1.0);
    }

    #[test]
    fn ray_missing_all_shapes_is_transparent() {
        let shapes = ObjectModel::default().shapes();
        // (5, 0) -> (-5, -2.5) passes ~1.02 from the cylinder axis and stays below the block.
        assert_eq!(sample_attenuation(0.0, 0.0, &shapes, 5), 0.0);
    }

    #[test]
    fn coarse_average_uses_ten_positions() {
        let wide = Shape::rectangle(Point2::default(), 10.0, 10.0).unwrap();
        let a = average_attenuation(0.0, &[wide], 5);
        assert!((a - 0.8).abs() < 1e-12);
    }
}
