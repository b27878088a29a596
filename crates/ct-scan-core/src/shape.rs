// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Object Model: the two cross-section shapes the scanner sweeps.
//!
//! Geometry lives in the horizontal (x, z) plane of the gantry. The external
//! manipulation layer owns placement and scale; the sampler only reads the
//! derived [`Shape`]s.

use thiserror::Error;

/// Attenuation coefficient of the circular cross-section at density 5.
pub const CIRCLE_BASE_COEFFICIENT: f64 = 0.9;
/// Attenuation coefficient of the rectangular cross-section at density 5.
pub const RECTANGLE_BASE_COEFFICIENT: f64 = 0.8;

/// Unscaled cylinder radius (diameter 1.2).
pub const CYLINDER_BASE_RADIUS: f64 = 0.6;
/// Unscaled block half-width and half-depth (1 × 1 footprint).
pub const BLOCK_BASE_HALF_EXTENT: f64 = 0.5;

/// Objects are kept inside this distance from the scanner axis.
pub const MAX_PLACEMENT_RADIUS: f64 = 2.5;
/// Lower bound for an object's scale multiplier.
pub const MIN_SCALE: f64 = 0.3;
/// Upper bound for an object's scale multiplier.
pub const MAX_SCALE: f64 = 3.0;
/// Scale multiplier for one step up.
pub const SCALE_STEP_UP: f64 = 1.1;
/// Scale multiplier for one step down.
pub const SCALE_STEP_DOWN: f64 = 0.9;

/// Errors raised when external geometry violates Object Model invariants.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ShapeError {
    /// A coordinate was NaN or infinite.
    #[error("non-finite coordinate: ({x}, {z})")]
    NonFiniteCoordinate {
        /// Offending x.
        x: f64,
        /// Offending z.
        z: f64,
    },
    /// A radius or half-extent was negative or non-finite.
    #[error("invalid extent: {0}")]
    InvalidExtent(f64),
    /// A scale multiplier was not a positive finite number.
    #[error("invalid scale: {0}")]
    InvalidScale(f64),
}

/// Point in the gantry plane.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    /// Horizontal axis.
    pub x: f64,
    /// Depth axis.
    pub z: f64,
}

impl Point2 {
    /// Builds a point from its coordinates.
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x * (1.0 - t) + other.x * t,
            z: self.z * (1.0 - t) + other.z * t,
        }
    }

    fn validated(self) -> Result<Self, ShapeError> {
        if self.x.is_finite() && self.z.is_finite() {
            Ok(self)
        } else {
            Err(ShapeError::NonFiniteCoordinate {
                x: self.x,
                z: self.z,
            })
        }
    }
}

fn validated_extent(v: f64) -> Result<f64, ShapeError> {
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(ShapeError::InvalidExtent(v))
    }
}

/// A cross-section as seen by the sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// Disc (the cylinder's cross-section).
    Circle {
        /// Centre in the gantry plane.
        center: Point2,
        /// Radius.
        radius: f64,
    },
    /// Axis-aligned rectangle (the block's cross-section).
    Rectangle {
        /// Centre in the gantry plane.
        center: Point2,
        /// Half the extent along x.
        half_width: f64,
        /// Half the extent along z.
        half_depth: f64,
    },
}

impl Shape {
    /// Validated circle constructor.
    pub fn circle(center: Point2, radius: f64) -> Result<Self, ShapeError> {
        Ok(Self::Circle {
            center: center.validated()?,
            radius: validated_extent(radius)?,
        })
    }

    /// Validated rectangle constructor.
    pub fn rectangle(center: Point2, half_width: f64, half_depth: f64) -> Result<Self, ShapeError> {
        Ok(Self::Rectangle {
            center: center.validated()?,
            half_width: validated_extent(half_width)?,
            half_depth: validated_extent(half_depth)?,
        })
    }

    /// Attenuation coefficient at the reference density.
    pub const fn base_coefficient(&self) -> f64 {
        match self {
            Self::Circle { .. } => CIRCLE_BASE_COEFFICIENT,
            Self::Rectangle { .. } => RECTANGLE_BASE_COEFFICIENT,
        }
    }

    /// Membership test. Both shapes include their boundary.
    pub fn contains(&self, p: Point2) -> bool {
        match *self {
            Self::Circle { center, radius } => {
                let dx = p.x - center.x;
                let dz = p.z - center.z;
                dx * dx + dz * dz <= radius * radius
            }
            Self::Rectangle {
                center,
                half_width,
                half_depth,
            } => {
                p.x >= center.x - half_width
                    && p.x <= center.x + half_width
                    && p.z >= center.z - half_depth
                    && p.z <= center.z + half_depth
            }
        }
    }
}

/// Which of the two scene objects an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    /// Cylinder, sampled as a circle.
    Cylinder,
    /// Box, sampled as a rectangle.
    Block,
}

/// Direction of a discrete scale step (one wheel notch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleStep {
    /// Grow by [`SCALE_STEP_UP`].
    Up,
    /// Shrink by [`SCALE_STEP_DOWN`].
    Down,
}

/// Placement of one scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Centre in the gantry plane.
    pub position: Point2,
    /// Uniform scale multiplier applied to the base dimensions.
    pub scale: f64,
}

impl Placement {
    fn validated(self) -> Result<Self, ShapeError> {
        self.position.validated()?;
        if self.scale.is_finite() && self.scale > 0.0 {
            Ok(self)
        } else {
            Err(ShapeError::InvalidScale(self.scale))
        }
    }
}

/// Geometric state of the scanned scene: one cylinder and one block.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectModel {
    cylinder: Placement,
    block: Placement,
}

impl Default for ObjectModel {
    fn default() -> Self {
        Self {
            cylinder: Placement {
                position: Point2::new(0.8, 0.0),
                scale: 1.0,
            },
            block: Placement {
                position: Point2::new(-0.8, 0.8),
                scale: 1.0,
            },
        }
    }
}

impl ObjectModel {
    /// Builds a model from explicit placements, validating both.
    pub fn new(cylinder: Placement, block: Placement) -> Result<Self, ShapeError> {
        Ok(Self {
            cylinder: cylinder.validated()?,
            block: block.validated()?,
        })
    }

    /// Current placement of `kind`.
    pub const fn placement(&self, kind: ObjectKind) -> Placement {
        match kind {
            ObjectKind::Cylinder => self.cylinder,
            ObjectKind::Block => self.block,
        }
    }

    fn placement_mut(&mut self, kind: ObjectKind) -> &mut Placement {
        match kind {
            ObjectKind::Cylinder => &mut self.cylinder,
            ObjectKind::Block => &mut self.block,
        }
    }

    /// Moves `kind` to `(x, z)`, pulling it back onto the
    /// [`MAX_PLACEMENT_RADIUS`] circle when dragged further out.
    pub fn move_to(&mut self, kind: ObjectKind, x: f64, z: f64) -> Result<Point2, ShapeError> {
        let mut p = Point2::new(x, z).validated()?;
        let dist = p.x.hypot(p.z);
        if dist > MAX_PLACEMENT_RADIUS {
            let k = MAX_PLACEMENT_RADIUS / dist;
            p.x *= k;
            p.z *= k;
        }
        self.placement_mut(kind).position = p;
        Ok(p)
    }

    /// Applies one scale step, clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn scale_step(&mut self, kind: ObjectKind, step: ScaleStep) -> f64 {
        let factor = match step {
            ScaleStep::Up => SCALE_STEP_UP,
            ScaleStep::Down => SCALE_STEP_DOWN,
        };
        let placement = self.placement_mut(kind);
        placement.scale = (placement.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        placement.scale
    }

    /// Sets an absolute scale (clamped like [`scale_step`](Self::scale_step)).
    pub fn set_scale(&mut self, kind: ObjectKind, scale: f64) -> Result<f64, ShapeError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ShapeError::InvalidScale(scale));
        }
        let placement = self.placement_mut(kind);
        placement.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        Ok(placement.scale)
    }

    /// The cylinder's cross-section.
    pub fn cylinder_shape(&self) -> Shape {
        Shape::Circle {
            center: self.cylinder.position,
            radius: CYLINDER_BASE_RADIUS * self.cylinder.scale,
        }
    }

    /// The block's cross-section.
    pub fn block_shape(&self) -> Shape {
        let half = BLOCK_BASE_HALF_EXTENT * self.block.scale;
        Shape::Rectangle {
            center: self.block.position,
            half_width: half,
            half_depth: half,
        }
    }

    /// Both cross-sections in sampling order (cylinder, then block).
    pub fn shapes(&self) -> [Shape; 2] {
        [self.cylinder_shape(), self.block_shape()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_boundary_is_inside() {
        let c = Shape::circle(Point2::new(0.0, 0.0), 5.0).unwrap();
        assert!(c.contains(Point2::new(3.0, 4.0)));
        assert!(!c.contains(Point2::new(3.0, 4.000_001)));
    }

    #[test]
    fn rectangle_bounds_are_inclusive() {
        let r = Shape::rectangle(Point2::new(1.0, -1.0), 0.5, 0.25).unwrap();
        assert!(r.contains(Point2::new(1.5, -0.75)));
        assert!(r.contains(Point2::new(0.5, -1.25)));
        assert!(!r.contains(Point2::new(1.51, -1.0)));
        assert!(!r.contains(Point2::new(1.0, -0.7)));
    }

    #[test]
    fn negative_radius_is_rejected() {
        assert_eq!(
            Shape::circle(Point2::default(), -0.1),
            Err(ShapeError::InvalidExtent(-0.1))
        );
        assert!(Shape::rectangle(Point2::new(f64::NAN, 0.0), 1.0, 1.0).is_err());
    }

    #[test]
    fn default_scene_matches_initial_layout() {
        let m = ObjectModel::default();
        assert_eq!(
            m.cylinder_shape(),
            Shape::Circle {
                center: Point2::new(0.8, 0.0),
                radius: 0.6
            }
        );
        assert_eq!(
            m.block_shape(),
            Shape::Rectangle {
                center: Point2::new(-0.8, 0.8),
                half_width: 0.5,
                half_depth: 0.5
            }
        );
    }

    #[test]
    fn move_outside_gantry_is_pulled_back() {
        let mut m = ObjectModel::default();
        let p = m.move_to(ObjectKind::Block, 6.0, 8.0).unwrap();
        assert!((p.x - 1.5).abs() < 1e-12);
        assert!((p.z - 2.0).abs() < 1e-12);
        let inside = m.move_to(ObjectKind::Block, 1.0, -1.0).unwrap();
        assert_eq!(inside, Point2::new(1.0, -1.0));
    }

    #[test]
    fn scale_steps_clamp() {
        let mut m = ObjectModel::default();
        for _ in 0..40 {
            m.scale_step(ObjectKind::Cylinder, ScaleStep::Up);
        }
        assert_eq!(m.placement(ObjectKind::Cylinder).scale, MAX_SCALE);
        for _ in 0..40 {
            m.scale_step(ObjectKind::Cylinder, ScaleStep::Down);
        }
        assert_eq!(m.placement(ObjectKind::Cylinder).scale, MIN_SCALE);
        assert!(m.set_scale(ObjectKind::Block, 0.0).is_err());
    }
}
