//! Closed domain enums for the resolver
//!
//! Every decision the resolver makes is expressed in terms of these types.
//! They are deliberately closed: the strategy space is fixed at three
//! install paths and new variants must be handled at every `match`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Desired end state of the component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Ensure {
    #[default]
    Present,
    Absent,
}

impl Ensure {
    /// The state a guard must observe for this ensure direction to be satisfied
    pub fn target_presence(self) -> Presence {
        match self {
            Self::Present => Presence::Present,
            Self::Absent => Presence::Absent,
        }
    }
}

/// Observed or expected existence of a host resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Presence {
    Present,
    Absent,
}

/// Coarse bucket of host behavior relevant to installing the framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CapabilityClass {
    /// The OS ships the component as an optional built-in feature
    NativeFeature,
    /// The OS can run the standalone installer, fetched or pre-staged
    NetworkInstallable,
    /// No known strategy; resolution yields no actions
    Unsupported,
}

impl CapabilityClass {
    /// Returns true if some strategy exists for this class
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Mechanism chosen to reach the desired state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Enable/disable the OS optional feature
    FeatureToggle,
    /// Run an installer the caller already staged
    LocalPackage,
    /// Download the installer to the staging directory, then run it
    NetworkPackage,
}

impl Strategy {
    /// Returns true if the strategy runs the standalone installer
    pub fn uses_installer(self) -> bool {
        matches!(self, Self::LocalPackage | Self::NetworkPackage)
    }

    /// Returns true if the resolver owns the staged installer file
    pub fn owns_staged_installer(self) -> bool {
        matches!(self, Self::NetworkPackage)
    }
}

/// Kind of a planned side-effecting step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionKind {
    Download,
    Cleanup,
    Configure,
}

/// Execution provider tag handed to the command executor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Provider {
    #[default]
    PowerShell,
}
