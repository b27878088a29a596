// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved scan settings: slider values and object placement.

use ct_scan_core::{ObjectKind, ObjectModel, Placement, Point2, ShapeError};
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigService, ConfigStore};

/// Store key for [`ScanPrefs`].
pub const SCAN_PREFS_KEY: &str = "scan_prefs";

/// Saved preferences for a scan session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanPrefs {
    /// Scan-speed slider (gantry turns `scan_speed · 10` °/s).
    pub scan_speed: u32,
    /// Density slider (attenuation scales by `density / 5`).
    pub density: i32,
    /// Cylinder placement.
    pub cylinder: ObjectPrefs,
    /// Block placement.
    pub block: ObjectPrefs,
}

impl Default for ScanPrefs {
    fn default() -> Self {
        let model = ObjectModel::default();
        Self {
            scan_speed: 5,
            density: 5,
            cylinder: model.placement(ObjectKind::Cylinder).into(),
            block: model.placement(ObjectKind::Block).into(),
        }
    }
}

impl ScanPrefs {
    /// Builds the validated object model these prefs describe.
    pub fn object_model(&self) -> Result<ObjectModel, ShapeError> {
        ObjectModel::new(self.cylinder.into(), self.block.into())
    }
}

impl<S: ConfigStore> ConfigService<S> {
    /// Loads the saved [`ScanPrefs`]. A blob whose scene fails validation is
    /// an error ([`ConfigError::Scene`]), not a silently broken scene.
    pub fn load_scan_prefs(&self) -> Result<Option<ScanPrefs>, ConfigError> {
        let Some(prefs) = self.load::<ScanPrefs>(SCAN_PREFS_KEY)? else {
            return Ok(None);
        };
        prefs.object_model()?;
        Ok(Some(prefs))
    }

    /// Validates `prefs` and saves them. Nothing is written when the scene is
    /// invalid.
    pub fn save_scan_prefs(&self, prefs: &ScanPrefs) -> Result<(), ConfigError> {
        prefs.object_model()?;
        self.save(SCAN_PREFS_KEY, prefs)
    }
}

/// Position and scale of one object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPrefs {
    /// Horizontal position.
    pub x: f64,
    /// Depth position.
    pub z: f64,
    /// Uniform scale multiplier.
    pub scale: f64,
}

impl From<Placement> for ObjectPrefs {
    fn from(p: Placement) -> Self {
        Self {
            x: p.position.x,
            z: p.position.z,
            scale: p.scale,
        }
    }
}

impl From<ObjectPrefs> for Placement {
    fn from(p: ObjectPrefs) -> Self {
        Self {
            position: Point2::new(p.x, p.z),
            scale: p.scale,
        }
    }
}
