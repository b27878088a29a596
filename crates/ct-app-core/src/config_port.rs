// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config port shared across the scan tools (CLI, viewers).

use tracing::warn;

use crate::config::{ConfigService, ConfigStore};
use crate::prefs::ScanPrefs;

/// Config-facing port for loading/saving scan preferences.
pub trait ConfigPort {
    /// Load scan preferences (returns None if missing, unreadable or invalid).
    fn load_prefs(&self) -> Option<ScanPrefs>;
    /// Persist scan preferences (best-effort; failures are logged).
    fn save_prefs(&self, prefs: &ScanPrefs);
}

impl<S: ConfigStore> ConfigPort for ConfigService<S> {
    fn load_prefs(&self) -> Option<ScanPrefs> {
        match self.load_scan_prefs() {
            Ok(prefs) => prefs,
            Err(err) => {
                warn!(%err, "could not load scan prefs");
                None
            }
        }
    }

    fn save_prefs(&self, prefs: &ScanPrefs) {
        if let Err(err) = self.save_scan_prefs(prefs) {
            warn!(%err, "could not save scan prefs");
        }
    }
}
