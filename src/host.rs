//! Host facts and capability classification
//!
//! Maps the OS display name reported by the fact provider, together with the
//! requested framework version, onto a `CapabilityClass`.
//!
//! # Design
//!
//! - **Table driven**: Classification is a lookup over `SUPPORT_TABLE`, one
//!   record per (version, OS name). Extending support is adding a row.
//! - **Total**: Any pair missing from the table, including the `unknown`
//!   sentinel facter reports, classifies as `Unsupported`. Never fails.
//! - **Pure**: No registry, filesystem or network access.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::CapabilityClass;

/// Facts about the target host, supplied by an external fact provider.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HostFacts {
    /// Free-text OS display name, e.g. `Windows Server 2012`
    pub os_name: String,
    /// OS version string; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
}

impl HostFacts {
    pub fn new(os_name: impl Into<String>) -> Self {
        Self {
            os_name: os_name.into(),
            os_version: None,
        }
    }

    pub fn with_version(mut self, os_version: impl Into<String>) -> Self {
        self.os_version = Some(os_version.into());
        self
    }
}

impl fmt::Display for HostFacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.os_version {
            Some(v) => write!(f, "{} ({})", self.os_name, v),
            None => write!(f, "{}", self.os_name),
        }
    }
}

/// One row of the capability lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportEntry {
    pub version: &'static str,
    pub os_name: &'static str,
    pub class: CapabilityClass,
}

const fn entry(version: &'static str, os_name: &'static str, class: CapabilityClass) -> SupportEntry {
    SupportEntry { version, os_name, class }
}

use CapabilityClass::{NativeFeature, NetworkInstallable};

/// Known (version, OS) pairs. Anything absent is `Unsupported`.
///
/// Server 2008 and later ship 3.5 as a Server Manager feature; client
/// releases need the standalone installer. 4.0 is installer-only everywhere.
pub const SUPPORT_TABLE: &[SupportEntry] = &[
    entry("3.5", "Windows Server 2008", NativeFeature),
    entry("3.5", "Windows Server 2008 R2", NativeFeature),
    entry("3.5", "Windows Server 2012", NativeFeature),
    entry("3.5", "Windows XP", NetworkInstallable),
    entry("3.5", "Windows Vista", NetworkInstallable),
    entry("3.5", "Windows 7", NetworkInstallable),
    entry("3.5", "Windows 8", NetworkInstallable),
    entry("4.0", "Windows Server 2008", NetworkInstallable),
    entry("4.0", "Windows Server 2008 R2", NetworkInstallable),
    entry("4.0", "Windows Server 2012", NetworkInstallable),
    entry("4.0", "Windows XP", NetworkInstallable),
    entry("4.0", "Windows Vista", NetworkInstallable),
    entry("4.0", "Windows 7", NetworkInstallable),
    entry("4.0", "Windows 8", NetworkInstallable),
];

/// Classify a host for the requested component version.
pub fn classify(facts: &HostFacts, version: &str) -> CapabilityClass {
    let os_name = facts.os_name.trim();
    let version = version.trim();

    let class = SUPPORT_TABLE
        .iter()
        .find(|e| e.version == version && e.os_name == os_name)
        .map(|e| e.class)
        .unwrap_or(CapabilityClass::Unsupported);

    tracing::debug!(host = %facts, version, %class, "classified host");
    class
}

/// OS names with any support for the given version, in table order.
pub fn supported_os_names(version: &str) -> Vec<&'static str> {
    SUPPORT_TABLE
        .iter()
        .filter(|e| e.version == version.trim())
        .map(|e| e.os_name)
        .collect()
}
