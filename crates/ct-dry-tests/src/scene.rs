// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Object model fixtures.

use ct_scan_core::{ObjectKind, ObjectModel, Placement, Point2};

/// Builder for [`ObjectModel`] fixtures, starting from the default scene.
///
/// # Example
///
/// ```
/// use ct_dry_tests::ObjectModelBuilder;
/// use ct_scan_core::ObjectKind;
///
/// let model = ObjectModelBuilder::new()
///     .at(ObjectKind::Cylinder, 0.0, 0.0)
///     .scale(ObjectKind::Block, 2.0)
///     .build();
/// assert_eq!(model.placement(ObjectKind::Block).scale, 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct ObjectModelBuilder {
    cylinder: Placement,
    block: Placement,
}

impl Default for ObjectModelBuilder {
    fn default() -> Self {
        let m = ObjectModel::default();
        Self {
            cylinder: m.placement(ObjectKind::Cylinder),
            block: m.placement(ObjectKind::Block),
        }
    }
}

impl ObjectModelBuilder {
    /// Start from the default scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: ObjectKind) -> &mut Placement {
        match kind {
            ObjectKind::Cylinder => &mut self.cylinder,
            ObjectKind::Block => &mut self.block,
        }
    }

    /// Place `kind` at `(x, z)` without the gantry-radius clamp.
    pub fn at(mut self, kind: ObjectKind, x: f64, z: f64) -> Self {
        self.slot(kind).position = Point2::new(x, z);
        self
    }

    /// Set the scale of `kind` without clamping.
    pub fn scale(mut self, kind: ObjectKind, scale: f64) -> Self {
        self.slot(kind).scale = scale;
        self
    }

    /// Move `kind` far outside every ray (effectively removing it).
    pub fn without(self, kind: ObjectKind) -> Self {
        self.at(kind, 1000.0, 1000.0)
    }

    /// Build the model.
    ///
    /// # Panics
    /// Panics if the fixture violates Object Model invariants.
    #[allow(clippy::expect_used)]
    pub fn build(self) -> ObjectModel {
        ObjectModel::new(self.cylinder, self.block).expect("fixture violates object invariants")
    }
}
