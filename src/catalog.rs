//! Component catalog
//!
//! Per-version metadata for every framework release the resolver knows how
//! to manage. Installer names, vendor URLs and product GUIDs live here and
//! nowhere else, so adding a release is a single table entry.
//!
//! | Version | Installer | Feature |
//! |---------|-----------|---------|
//! | 3.5     | `dotNetFx35setup.exe` | `as-net-framework` |
//! | 4.0     | `dotNetFx40_Full_x86_x64.exe` | none |

use serde::Serialize;

/// Directory the network strategy stages installers into.
pub const STAGING_DIR: &str = r"C:\Windows\Temp";

/// Registry hive holding per-product uninstall entries.
pub const UNINSTALL_REGISTRY_ROOT: &str =
    r"HKLM:\SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

/// Registry value whose non-empty content marks a product as installed.
pub const DISPLAY_VERSION_VALUE: &str = "DisplayVersion";

/// How Configure action identifiers are spelled for a release.
///
/// Downstream executors deduplicate on these names, so each release keeps
/// the spelling it has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// `install-<noun>-<version>` / `uninstall-<noun>-<version>`
    InstallUninstall,
    /// `configure-dotnet-<version>-<ensure>`
    ConfigureEnsure,
}

/// OS optional feature that provides a release natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NativeFeature {
    /// Feature name passed to `Add-WindowsFeature` / `Remove-WindowsFeature`
    pub name: &'static str,
    /// Filesystem marker that exists while the feature is enabled
    pub marker_path: &'static str,
}

/// Metadata for one framework release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComponentRelease {
    pub version: &'static str,
    /// Installer file name, identical whether downloaded or pre-staged
    pub installer: &'static str,
    /// Fixed vendor download location
    pub url: &'static str,
    /// Product GUID keyed under the uninstall registry root
    pub product_guid: &'static str,
    pub feature: Option<NativeFeature>,
    pub naming: NamingScheme,
}

impl ComponentRelease {
    /// Full registry key of this release's uninstall entry
    pub fn registry_key(&self) -> String {
        format!("{}\\{}", UNINSTALL_REGISTRY_ROOT, self.product_guid)
    }

    /// Installer path inside the given directory, in executor command form
    pub fn installer_in(&self, dir: &str) -> String {
        format!("{}\\{}", dir.trim_end_matches(['\\', '/']), self.installer)
    }

    /// Staged installer path as the filesystem resource manager names it
    pub fn staged_installer_path(&self) -> String {
        format!("{}/{}", STAGING_DIR.replace('\\', "/"), self.installer)
    }
}

/// Every release the resolver can plan for.
pub const RELEASES: &[ComponentRelease] = &[
    ComponentRelease {
        version: "3.5",
        installer: "dotNetFx35setup.exe",
        url: "http://download.microsoft.com/download/7/0/3/703455ee-a747-4cc8-bd3e-98a615c3aedb/dotNetFx35setup.exe",
        product_guid: "{CE2CDD62-0124-36CA-84D3-9F4DCF5C5BD9}",
        feature: Some(NativeFeature {
            name: "as-net-framework",
            marker_path: r"C:\Windows\Microsoft.NET\Framework\v3.5",
        }),
        naming: NamingScheme::InstallUninstall,
    },
    ComponentRelease {
        version: "4.0",
        installer: "dotNetFx40_Full_x86_x64.exe",
        url: "http://download.microsoft.com/download/9/5/A/95A9616B-7A37-4AF6-BC36-D6EA96C8DAAE/dotNetFx40_Full_x86_x64.exe",
        product_guid: "{8E34682C-8118-31F1-BC4C-98CD9675E1C2}",
        feature: None,
        naming: NamingScheme::ConfigureEnsure,
    },
];

/// Look up a release by its version token.
pub fn release(version: &str) -> Option<&'static ComponentRelease> {
    let version = version.trim();
    RELEASES.iter().find(|r| r.version == version)
}
