//! Component request files.
//!
//! A request is the complete input to one resolution: which component
//! instance, in which direction, at which version, on which host. Requests
//! can be saved to and loaded from JSON so a run can be reproduced.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ResolverError;
use crate::host::HostFacts;
use crate::types::Ensure;

/// Immutable input to a single resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRequest {
    /// Logical component identifier, e.g. `dotnet4`
    pub name: String,
    #[serde(default)]
    pub ensure: Ensure,
    /// Framework version token, e.g. `4.0`
    pub version: String,
    /// Absolute directory holding a pre-staged installer.
    /// Absent means the installer is fetched over the network.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_dir: Option<String>,
    pub host: HostFacts,
}

impl ComponentRequest {
    pub fn new(name: impl Into<String>, version: impl Into<String>, host: HostFacts) -> Self {
        Self {
            name: name.into(),
            ensure: Ensure::Present,
            version: version.into(),
            package_dir: None,
            host,
        }
    }

    pub fn with_ensure(mut self, ensure: Ensure) -> Self {
        self.ensure = ensure;
        self
    }

    pub fn with_package_dir(mut self, dir: impl Into<String>) -> Self {
        self.package_dir = Some(dir.into());
        self
    }

    /// Pre-staged installer directory, if one was actually given.
    ///
    /// A blank or whitespace-only directory counts as unset, so the
    /// installer is fetched over the network.
    pub fn staged_package_dir(&self) -> Option<&str> {
        self.package_dir
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Save request to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize request to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write request to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load request from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read request from {:?}", path.as_ref()))?;

        let request: Self =
            serde_json::from_str(&content).context("Failed to parse request JSON")?;

        Ok(request)
    }

    /// Validate the request.
    ///
    /// Unsupported hosts and unknown versions are not validation failures;
    /// they resolve to a skipped outcome.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.name.trim().is_empty() {
            return Err(ResolverError::validation("Component name must be specified"));
        }

        if self.version.trim().is_empty() {
            return Err(ResolverError::validation("Component version must be specified"));
        }

        if let Some(dir) = self.staged_package_dir() {
            if !is_absolute_windows_path(dir) {
                return Err(ResolverError::validation(format!(
                    "Package directory '{}' must be an absolute Windows path",
                    dir
                )));
            }
        }

        Ok(())
    }
}

/// `X:\...`, `X:/...` or a UNC share `\\host\share`.
fn is_absolute_windows_path(path: &str) -> bool {
    let bytes = path.as_bytes();
    let drive = bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/');
    let unc = path
        .strip_prefix(r"\\")
        .is_some_and(|rest| rest.split('\\').filter(|s| !s.is_empty()).count() >= 2);
    drive || unc
}
