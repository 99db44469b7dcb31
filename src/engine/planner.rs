//! Action planner
//!
//! Expands the selected `Strategy` and the desired `Ensure` into an ordered
//! sequence of actions the executor can apply.
//!
//! # Plans
//!
//! | Strategy         | Ensure  | Actions |
//! |------------------|---------|---------|
//! | `FeatureToggle`  | present | Configure(Add-WindowsFeature) |
//! | `FeatureToggle`  | absent  | Configure(Remove-WindowsFeature) |
//! | `LocalPackage`   | present | Configure(installer /q /norestart) |
//! | `LocalPackage`   | absent  | Configure(installer /x /q /norestart) |
//! | `NetworkPackage` | present | Download → Configure(installer /q /norestart) |
//! | `NetworkPackage` | absent  | Cleanup(staged installer), Configure(installer /x /q /norestart) |
//!
//! Download always precedes the Configure that consumes it. Cleanup targets
//! a different resource than Configure and carries no ordering dependency.
//!
//! # Design
//!
//! - **Pure logic**: No I/O. Commands and guards are structured data.
//! - **Deterministic**: Identifiers derive only from version, ensure and
//!   strategy, so re-planning the same request yields identical actions.
//! - **Caller files untouched**: `LocalPackage` never cleans up the
//!   caller-provided installer.

use serde::Serialize;
use std::fmt;

use crate::catalog::{ComponentRelease, NamingScheme, STAGING_DIR};
use crate::engine::guard::{build_guard, Guard, HostInspector};
use crate::types::{ActionKind, Ensure, Provider, Strategy};

// ============================================================================
// Action Types
// ============================================================================

/// Mode the standalone installer runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallerMode {
    Install,
    Uninstall,
}

impl InstallerMode {
    /// Silent, no-restart command-line flags for this mode.
    pub fn flags(self) -> &'static [&'static str] {
        match self {
            Self::Install => &["/q", "/norestart"],
            Self::Uninstall => &["/x", "/q", "/norestart"],
        }
    }
}

/// Operation applied to an OS optional feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureOp {
    Add,
    Remove,
}

/// What a Configure action runs, before rendering to shell text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Invocation {
    /// Run the installer at `path`
    Installer { path: String, mode: InstallerMode },
    /// Toggle an OS optional feature
    Feature { name: String, op: FeatureOp },
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Installer { path, mode } => write!(f, "{} {}", path, mode.flags().join(" ")),
            Self::Feature { name, op } => write!(f, "{:?} feature {}", op, name),
        }
    }
}

/// The side effect a planned action describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Step {
    /// Stage a file from `url` into `destination_directory`
    Download {
        url: String,
        destination_directory: String,
    },
    /// Reconcile a single file's existence
    Cleanup { path: String, ensure: Ensure },
    /// Run a command unless its guard is satisfied
    Configure {
        invocation: Invocation,
        provider: Provider,
        guard: Guard,
    },
}

/// A planned side-effecting step with a stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    /// Stable name the executor deduplicates on
    pub id: String,
    #[serde(flatten)]
    pub step: Step,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self.step {
            Step::Download { .. } => ActionKind::Download,
            Step::Cleanup { .. } => ActionKind::Cleanup,
            Step::Configure { .. } => ActionKind::Configure,
        }
    }

    /// The idempotency guard, if this action carries one.
    pub fn guard(&self) -> Option<&Guard> {
        match &self.step {
            Step::Configure { guard, .. } => Some(guard),
            Step::Download { .. } | Step::Cleanup { .. } => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.step {
            Step::Download { url, destination_directory } => {
                write!(f, "Download[{}]({} -> {})", self.id, url, destination_directory)
            }
            Step::Cleanup { path, ensure } => write!(f, "Cleanup[{}]({} {})", self.id, path, ensure),
            Step::Configure { invocation, guard, .. } => {
                write!(f, "Configure[{}]({}; {})", self.id, invocation, guard)
            }
        }
    }
}

/// An ordered, complete plan for one component instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionPlan {
    pub component: String,
    pub version: String,
    pub ensure: Ensure,
    pub strategy: Strategy,
    pub actions: Vec<Action>,
}

impl ResolutionPlan {
    /// The Configure action. Every plan has exactly one.
    pub fn configure(&self) -> Option<&Action> {
        self.actions.iter().find(|a| a.kind() == ActionKind::Configure)
    }

    pub fn kinds(&self) -> Vec<ActionKind> {
        self.actions.iter().map(Action::kind).collect()
    }

    pub fn action(&self, id: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.id == id)
    }

    /// Actions the executor would still run against `host`, in plan order.
    ///
    /// Guarded actions drop out once their guard is satisfied; unguarded
    /// steps are left to their own resource's idempotency and always listed.
    pub fn pending(&self, host: &impl HostInspector) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.guard().is_none_or(|g| !g.check(host)))
            .collect()
    }

    /// Returns a summary of the plan for logging/display.
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Plan: {} {} ensure={}", self.component, self.version, self.ensure),
            format!("  Strategy: {}", self.strategy),
            format!("  Actions ({}):", self.actions.len()),
        ];
        for (i, action) in self.actions.iter().enumerate() {
            lines.push(format!("    {}. {}", i + 1, action));
        }
        lines.join("\n")
    }
}

// ============================================================================
// Plan Calculation
// ============================================================================

/// Inputs the planner needs beyond the strategy itself.
#[derive(Debug, Clone, Copy)]
pub struct PlanInput<'a> {
    pub component: &'a str,
    pub release: &'a ComponentRelease,
    pub ensure: Ensure,
    pub package_dir: Option<&'a str>,
}

/// Expand a strategy into its ordered action list.
///
/// Returns `None` only when the release cannot support the strategy
/// (`FeatureToggle` for a release without a native feature).
pub fn plan_actions(strategy: Strategy, input: PlanInput<'_>) -> Option<ResolutionPlan> {
    let release = input.release;
    let ensure = input.ensure;
    let guard = build_guard(strategy, ensure, release)?;

    let mut actions = Vec::new();

    let invocation = match strategy {
        Strategy::FeatureToggle => {
            let feature = release.feature?;
            Invocation::Feature {
                name: feature.name.to_string(),
                op: match ensure {
                    Ensure::Present => FeatureOp::Add,
                    Ensure::Absent => FeatureOp::Remove,
                },
            }
        }
        Strategy::LocalPackage | Strategy::NetworkPackage => {
            let dir = match (strategy, input.package_dir) {
                (Strategy::LocalPackage, Some(dir)) => dir,
                _ => STAGING_DIR,
            };
            Invocation::Installer {
                path: release.installer_in(dir),
                mode: match ensure {
                    Ensure::Present => InstallerMode::Install,
                    Ensure::Absent => InstallerMode::Uninstall,
                },
            }
        }
    };

    if strategy.owns_staged_installer() {
        match ensure {
            Ensure::Present => actions.push(Action {
                id: format!("download-dotnet-{}", release.version),
                step: Step::Download {
                    url: release.url.to_string(),
                    destination_directory: STAGING_DIR.to_string(),
                },
            }),
            Ensure::Absent => {
                let path = release.staged_installer_path();
                actions.push(Action {
                    id: path.clone(),
                    step: Step::Cleanup { path, ensure: Ensure::Absent },
                });
            }
        }
    }

    actions.push(Action {
        id: configure_id(strategy, ensure, release),
        step: Step::Configure {
            invocation,
            provider: Provider::PowerShell,
            guard,
        },
    });

    Some(ResolutionPlan {
        component: input.component.to_string(),
        version: release.version.to_string(),
        ensure,
        strategy,
        actions,
    })
}

/// Stable identifier of the Configure action.
fn configure_id(strategy: Strategy, ensure: Ensure, release: &ComponentRelease) -> String {
    match release.naming {
        NamingScheme::InstallUninstall => {
            let verb = match ensure {
                Ensure::Present => "install",
                Ensure::Absent => "uninstall",
            };
            let noun = match strategy {
                Strategy::FeatureToggle => "feature",
                Strategy::LocalPackage | Strategy::NetworkPackage => "dotnet",
            };
            format!("{}-{}-{}", verb, noun, release.version)
        }
        NamingScheme::ConfigureEnsure => format!("configure-dotnet-{}-{}", release.version, ensure),
    }
}

// ============================================================================
// Tests
// ============================================================================
