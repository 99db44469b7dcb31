//! Resolution Scenario Tests
//!
//! Exercises the full request → rendered descriptor path for every
//! recovered (OS, version, ensure, package dir) combination.
//!
//! These tests verify:
//! - Strategy choice per host family
//! - Exact command and guard text handed to the executor
//! - Download / Cleanup presence and ordering
//! - Unsupported hosts resolve to an empty, skipped outcome

use netfx_resolver::render::{describe_plan, ActionDescriptor, PowerShell};
use netfx_resolver::{
    resolve, ActionKind, ComponentRequest, Ensure, HostFacts, Resolution, SkipReason, Strategy,
};

const HKLM: &str = r"HKLM:\SOFTWARE\Microsoft\Windows\CurrentVersion\Uninstall";

const FOUR_URL: &str = "http://download.microsoft.com/download/9/5/A/95A9616B-7A37-4AF6-BC36-D6EA96C8DAAE/dotNetFx40_Full_x86_x64.exe";
const FOUR_PROG: &str = "dotNetFx40_Full_x86_x64.exe";
const FOUR_REG: &str = "{8E34682C-8118-31F1-BC4C-98CD9675E1C2}";

const THREE_URL: &str = "http://download.microsoft.com/download/7/0/3/703455ee-a747-4cc8-bd3e-98a615c3aedb/dotNetFx35setup.exe";
const THREE_PROG: &str = "dotNetFx35setup.exe";
const THREE_REG: &str = "{CE2CDD62-0124-36CA-84D3-9F4DCF5C5BD9}";

const SERVER_FEATURE_HOSTS: &[&str] =
    &["Windows Server 2008", "Windows Server 2008 R2", "Windows Server 2012"];
const CLIENT_HOSTS: &[&str] = &["Windows XP", "Windows Vista", "Windows 7", "Windows 8"];

fn four_hosts() -> Vec<&'static str> {
    SERVER_FEATURE_HOSTS.iter().chain(CLIENT_HOSTS).copied().collect()
}

fn request(os: &str, version: &str, ensure: Ensure, package_dir: Option<&str>) -> ComponentRequest {
    let mut req = ComponentRequest::new("dotnet", version, HostFacts::new(os)).with_ensure(ensure);
    req.package_dir = package_dir.map(str::to_string);
    req
}

fn descriptors(req: &ComponentRequest) -> Vec<ActionDescriptor> {
    match resolve(req) {
        Resolution::Planned(plan) => describe_plan(&plan, &PowerShell),
        Resolution::Skipped { .. } => Vec::new(),
    }
}

fn registry_guard(guid: &str, exit: u8) -> String {
    format!(
        "if ((Get-Item -LiteralPath '{}\\{}' -ErrorAction SilentlyContinue).GetValue('DisplayVersion')) {{ exit {} }}",
        HKLM, guid, exit
    )
}

fn exec(id: &str, command: String, unless: Option<String>, onlyif: Option<String>) -> ActionDescriptor {
    ActionDescriptor::Exec {
        id: id.to_string(),
        command,
        provider: netfx_resolver::Provider::PowerShell,
        logoutput: true,
        unless,
        onlyif,
    }
}

// =============================================================================
// Version 4.0
// =============================================================================

#[test]
fn test_four_present_local_package() {
    for os in four_hosts() {
        let actions = descriptors(&request(os, "4.0", Ensure::Present, Some(r"C:\Windows\Temp")));
        assert_eq!(
            actions,
            vec![exec(
                "configure-dotnet-4.0-present",
                format!(r"& C:\Windows\Temp\{} /q /norestart", FOUR_PROG),
                Some(registry_guard(FOUR_REG, 0)),
                None,
            )],
            "{}",
            os
        );
    }
}

#[test]
fn test_four_present_download_package() {
    for os in four_hosts() {
        let actions = descriptors(&request(os, "4.0", Ensure::Present, None));
        assert_eq!(
            actions,
            vec![
                ActionDescriptor::DownloadFile {
                    id: "download-dotnet-4.0".to_string(),
                    url: FOUR_URL.to_string(),
                    destination_directory: r"C:\Windows\Temp".to_string(),
                },
                exec(
                    "configure-dotnet-4.0-present",
                    format!(r"& C:\Windows\Temp\{} /q /norestart", FOUR_PROG),
                    Some(registry_guard(FOUR_REG, 0)),
                    None,
                ),
            ],
            "{}",
            os
        );
    }
}

#[test]
fn test_four_absent_local_package() {
    for os in four_hosts() {
        let actions = descriptors(&request(os, "4.0", Ensure::Absent, Some(r"C:\Windows\Temp")));
        assert_eq!(
            actions,
            vec![exec(
                "configure-dotnet-4.0-absent",
                format!(r"& C:\Windows\Temp\{} /x /q /norestart", FOUR_PROG),
                Some(registry_guard(FOUR_REG, 1)),
                None,
            )],
            "{}",
            os
        );
    }
}

#[test]
fn test_four_absent_download_package() {
    for os in four_hosts() {
        let actions = descriptors(&request(os, "4.0", Ensure::Absent, None));
        assert_eq!(
            actions,
            vec![
                ActionDescriptor::File {
                    id: format!("C:/Windows/Temp/{}", FOUR_PROG),
                    path: format!("C:/Windows/Temp/{}", FOUR_PROG),
                    ensure: Ensure::Absent,
                },
                exec(
                    "configure-dotnet-4.0-absent",
                    format!(r"& C:\Windows\Temp\{} /x /q /norestart", FOUR_PROG),
                    Some(registry_guard(FOUR_REG, 1)),
                    None,
                ),
            ],
            "{}",
            os
        );
    }
}

#[test]
fn test_four_unknown_os_is_skipped() {
    for ensure in [Ensure::Present, Ensure::Absent] {
        let res = resolve(&request("unknown", "4.0", ensure, Some(r"C:\Windows\Temp")));
        assert_eq!(res, Resolution::Skipped { reason: SkipReason::UnsupportedHost });
        assert!(res.actions().is_empty());
    }
}

// =============================================================================
// Version 3.5
// =============================================================================

#[test]
fn test_three_five_server_feature_present() {
    for os in SERVER_FEATURE_HOSTS {
        for dir in [None, Some(r"C:\Windows\Temp")] {
            let actions = descriptors(&request(os, "3.5", Ensure::Present, dir));
            assert_eq!(
                actions,
                vec![exec(
                    "install-feature-3.5",
                    "Import-Module ServerManager; Add-WindowsFeature as-net-framework".to_string(),
                    Some(r"Test-Path C:\Windows\Microsoft.NET\Framework\v3.5".to_string()),
                    None,
                )],
                "{} {:?}",
                os,
                dir
            );
        }
    }
}

#[test]
fn test_three_five_server_feature_absent() {
    for os in SERVER_FEATURE_HOSTS {
        for dir in [None, Some(r"C:\Windows\Temp")] {
            let actions = descriptors(&request(os, "3.5", Ensure::Absent, dir));
            assert_eq!(
                actions,
                vec![exec(
                    "uninstall-feature-3.5",
                    "Import-Module ServerManager; Remove-WindowsFeature as-net-framework".to_string(),
                    None,
                    Some(r"Test-Path C:\Windows\Microsoft.NET\Framework\v3.5".to_string()),
                )],
                "{} {:?}",
                os,
                dir
            );
        }
    }
}

#[test]
fn test_three_five_old_servers_skipped() {
    for os in ["unknown", "Windows Server 2003", "Windows Server 2003 R2"] {
        let res = resolve(&request(os, "3.5", Ensure::Present, None));
        assert!(res.is_skipped(), "{}", os);
    }
}

#[test]
fn test_three_five_client_local_package() {
    for os in CLIENT_HOSTS {
        let present = descriptors(&request(os, "3.5", Ensure::Present, Some(r"C:\Windows\Temp")));
        assert_eq!(
            present,
            vec![exec(
                "install-dotnet-3.5",
                format!(r"& C:\Windows\Temp\{} /q /norestart", THREE_PROG),
                Some(registry_guard(THREE_REG, 0)),
                None,
            )],
            "{}",
            os
        );

        let absent = descriptors(&request(os, "3.5", Ensure::Absent, Some(r"C:\Windows\Temp")));
        assert_eq!(
            absent,
            vec![exec(
                "uninstall-dotnet-3.5",
                format!(r"& C:\Windows\Temp\{} /x /q /norestart", THREE_PROG),
                Some(registry_guard(THREE_REG, 1)),
                None,
            )],
            "{}",
            os
        );
    }
}

#[test]
fn test_three_five_client_download_package() {
    for os in CLIENT_HOSTS {
        let present = descriptors(&request(os, "3.5", Ensure::Present, None));
        assert_eq!(present.len(), 2, "{}", os);
        assert_eq!(
            present[0],
            ActionDescriptor::DownloadFile {
                id: "download-dotnet-3.5".to_string(),
                url: THREE_URL.to_string(),
                destination_directory: r"C:\Windows\Temp".to_string(),
            }
        );
        assert_eq!(present[1].id(), "install-dotnet-3.5");

        let absent = descriptors(&request(os, "3.5", Ensure::Absent, None));
        assert_eq!(
            absent[0],
            ActionDescriptor::File {
                id: format!("C:/Windows/Temp/{}", THREE_PROG),
                path: format!("C:/Windows/Temp/{}", THREE_PROG),
                ensure: Ensure::Absent,
            }
        );
        assert_eq!(absent[1].id(), "uninstall-dotnet-3.5");
    }
}

// =============================================================================
// Cross-cutting
// =============================================================================

#[test]
fn test_strategy_per_host_family() {
    let strategy = |os: &str, version: &str, dir: Option<&str>| {
        resolve(&request(os, version, Ensure::Present, dir))
            .plan()
            .map(|p| p.strategy)
    };

    assert_eq!(strategy("Windows Server 2012", "3.5", None), Some(Strategy::FeatureToggle));
    assert_eq!(strategy("Windows Server 2012", "4.0", None), Some(Strategy::NetworkPackage));
    assert_eq!(
        strategy("Windows 7", "3.5", Some(r"C:\Windows\Temp")),
        Some(Strategy::LocalPackage)
    );
    assert_eq!(strategy("Windows 7", "3.5", None), Some(Strategy::NetworkPackage));
    assert_eq!(strategy("unknown", "3.5", None), None);
}

#[test]
fn test_custom_package_dir_flows_into_command() {
    let actions = descriptors(&request("Windows 7", "4.0", Ensure::Present, Some(r"\\share\pkgs")));
    match &actions[0] {
        ActionDescriptor::Exec { command, .. } => {
            assert_eq!(command, &format!(r"& \\share\pkgs\{} /q /norestart", FOUR_PROG));
        }
        other => panic!("expected exec, got {:?}", other),
    }
}

#[test]
fn test_blank_package_dir_downloads() {
    for dir in ["", "   "] {
        let req = request("Windows 7", "4.0", Ensure::Present, Some(dir));
        assert_eq!(
            resolve(&req).plan().expect("planned").strategy,
            Strategy::NetworkPackage
        );
        assert_eq!(
            descriptors(&req),
            vec![
                ActionDescriptor::DownloadFile {
                    id: "download-dotnet-4.0".to_string(),
                    url: FOUR_URL.to_string(),
                    destination_directory: r"C:\Windows\Temp".to_string(),
                },
                exec(
                    "configure-dotnet-4.0-present",
                    format!(r"& C:\Windows\Temp\{} /q /norestart", FOUR_PROG),
                    Some(registry_guard(FOUR_REG, 0)),
                    None,
                ),
            ],
            "{:?}",
            dir
        );
    }
}

#[test]
fn test_unknown_version_is_skipped_not_failed() {
    let res = resolve(&request("Windows 7", "4.8", Ensure::Present, None));
    assert_eq!(res, Resolution::Skipped { reason: SkipReason::UnknownVersion });
}

#[test]
fn test_download_precedes_configure() {
    let res = resolve(&request("Windows 8", "4.0", Ensure::Present, None));
    let kinds = res.plan().expect("planned").kinds();
    assert_eq!(kinds, vec![ActionKind::Download, ActionKind::Configure]);
}
