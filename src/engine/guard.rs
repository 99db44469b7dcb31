//! Idempotency guards
//!
//! The vendor installers are not idempotent: re-running one may prompt, fail
//! or reboot the host. Every Configure action therefore carries a guard that
//! the executor evaluates first; a satisfied guard turns the action into a
//! no-op for that run.
//!
//! Guards are data, not shell text. A guard names what to probe on the host
//! and which observation means "already done". Turning that into a concrete
//! shell check is the job of `crate::render`.
//!
//! | Strategy         | Probe | Present satisfied when | Absent satisfied when |
//! |------------------|-------|------------------------|-----------------------|
//! | `FeatureToggle`  | feature marker path | path exists | path missing |
//! | `LocalPackage`   | uninstall `DisplayVersion` | value set | value missing |
//! | `NetworkPackage` | uninstall `DisplayVersion` | value set | value missing |

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::catalog::{ComponentRelease, DISPLAY_VERSION_VALUE};
use crate::types::{Ensure, Presence, Strategy};

/// Host resource a guard inspects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Probe {
    /// Non-empty value under a registry key
    RegistryValue { key: String, value: String },
    /// Existence of a filesystem path
    PathExists { path: String },
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RegistryValue { key, value } => write!(f, "registry {}[{}]", key, value),
            Self::PathExists { path } => write!(f, "path {}", path),
        }
    }
}

/// A host-checkable predicate deciding whether an action is already satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guard {
    pub probe: Probe,
    /// Observation of `probe` that means the action has nothing left to do
    pub satisfied_when: Presence,
}

impl Guard {
    /// True if the executor should skip the guarded action.
    pub fn is_satisfied(&self, observed: Presence) -> bool {
        observed == self.satisfied_when
    }

    /// Evaluate against a host and report whether the action can be skipped.
    pub fn check(&self, host: &impl HostInspector) -> bool {
        self.is_satisfied(host.observe(&self.probe))
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skip if {} {}", self.probe, self.satisfied_when)
    }
}

/// Read-only view of host state, implemented by whatever can answer probes.
pub trait HostInspector {
    fn observe(&self, probe: &Probe) -> Presence;
}

/// In-memory host state: every listed probe is present, everything else absent.
#[derive(Debug, Clone, Default)]
pub struct ObservedHost {
    present: HashSet<Probe>,
}

impl ObservedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, probe: Probe) -> Self {
        self.present.insert(probe);
        self
    }

    pub fn set(&mut self, probe: Probe, presence: Presence) {
        match presence {
            Presence::Present => {
                self.present.insert(probe);
            }
            Presence::Absent => {
                self.present.remove(&probe);
            }
        }
    }
}

impl HostInspector for ObservedHost {
    fn observe(&self, probe: &Probe) -> Presence {
        if self.present.contains(probe) {
            Presence::Present
        } else {
            Presence::Absent
        }
    }
}

/// Probe for the release's uninstall registry entry.
pub fn registry_probe(release: &ComponentRelease) -> Probe {
    Probe::RegistryValue {
        key: release.registry_key(),
        value: DISPLAY_VERSION_VALUE.to_string(),
    }
}

/// Build the guard for a Configure action.
///
/// Returns `None` only for `FeatureToggle` on a release without a native
/// feature, which classification never produces.
pub fn build_guard(strategy: Strategy, ensure: Ensure, release: &ComponentRelease) -> Option<Guard> {
    let probe = match strategy {
        Strategy::FeatureToggle => Probe::PathExists {
            path: release.feature?.marker_path.to_string(),
        },
        Strategy::LocalPackage | Strategy::NetworkPackage => registry_probe(release),
    };

    Some(Guard {
        probe,
        satisfied_when: ensure.target_presence(),
    })
}
