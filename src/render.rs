//! Boundary rendering of planned actions.
//!
//! The planner emits structured guards and invocations. This module turns
//! them into the exact text downstream executors expect. The shell is a
//! swappable concern behind the `ShellDialect` trait; `PowerShell` is the
//! dialect the Windows executors consume.
//!
//! # Contract
//!
//! The rendered strings are compatibility surface, not presentation:
//!
//! - installer: `& <dir>\<installer> /q /norestart` or `... /x /q /norestart`
//! - registry guard: `if ((Get-Item -LiteralPath '<key>' -ErrorAction SilentlyContinue).GetValue('DisplayVersion')) { exit 0 }`
//!   (`exit 1` when the action is satisfied by absence)
//! - feature guard: `Test-Path <marker>`

use serde::Serialize;

use crate::engine::guard::{Guard, Probe};
use crate::engine::planner::{Action, FeatureOp, Invocation, ResolutionPlan, Step};
use crate::types::{Ensure, Presence, Provider};

/// Executor-side form of a guard: which attribute it binds to and its text.
///
/// `Unless` skips the command when the check exits 0; `OnlyIf` runs the
/// command only when the check exits 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardCondition {
    Unless(String),
    OnlyIf(String),
}

impl GuardCondition {
    pub fn text(&self) -> &str {
        match self {
            Self::Unless(s) | Self::OnlyIf(s) => s,
        }
    }
}

/// Rendering of structured guards and invocations into one shell's syntax.
///
/// # Invariants
///
/// - A rendered guard must let the executor skip the action exactly when
///   `Guard::is_satisfied` would return true for the observed host state.
/// - Rendering is pure: identical input yields identical text.
pub trait ShellDialect {
    /// Provider tag the executor runs rendered text with
    fn provider(&self) -> Provider;

    fn render_guard(&self, guard: &Guard) -> GuardCondition;

    fn render_invocation(&self, invocation: &Invocation) -> String;
}

/// Windows PowerShell, as consumed by the `powershell` exec provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerShell;

impl ShellDialect for PowerShell {
    fn provider(&self) -> Provider {
        Provider::PowerShell
    }

    fn render_guard(&self, guard: &Guard) -> GuardCondition {
        match &guard.probe {
            Probe::RegistryValue { key, value } => {
                // Exit with 0 when the value's presence matches the satisfied state
                let exit_code = match guard.satisfied_when {
                    Presence::Present => 0,
                    Presence::Absent => 1,
                };
                GuardCondition::Unless(format!(
                    "if ((Get-Item -LiteralPath '{}' -ErrorAction SilentlyContinue).GetValue('{}')) {{ exit {} }}",
                    key, value, exit_code
                ))
            }
            Probe::PathExists { path } => {
                let test = format!("Test-Path {}", path);
                match guard.satisfied_when {
                    Presence::Present => GuardCondition::Unless(test),
                    Presence::Absent => GuardCondition::OnlyIf(test),
                }
            }
        }
    }

    fn render_invocation(&self, invocation: &Invocation) -> String {
        match invocation {
            Invocation::Installer { path, mode } => {
                format!("& {} {}", path, mode.flags().join(" "))
            }
            Invocation::Feature { name, op } => {
                let cmdlet = match op {
                    FeatureOp::Add => "Add-WindowsFeature",
                    FeatureOp::Remove => "Remove-WindowsFeature",
                };
                format!("Import-Module ServerManager; {} {}", cmdlet, name)
            }
        }
    }
}

/// A fully rendered action, in the shape downstream executors consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "resource", rename_all = "snake_case")]
pub enum ActionDescriptor {
    DownloadFile {
        id: String,
        url: String,
        destination_directory: String,
    },
    File {
        id: String,
        path: String,
        ensure: Ensure,
    },
    Exec {
        id: String,
        command: String,
        provider: Provider,
        logoutput: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        unless: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        onlyif: Option<String>,
    },
}

impl ActionDescriptor {
    pub fn id(&self) -> &str {
        match self {
            Self::DownloadFile { id, .. } | Self::File { id, .. } | Self::Exec { id, .. } => id,
        }
    }
}

/// Render one action with the given dialect.
pub fn describe_action(action: &Action, dialect: &impl ShellDialect) -> ActionDescriptor {
    let id = action.id.clone();
    match &action.step {
        Step::Download { url, destination_directory } => ActionDescriptor::DownloadFile {
            id,
            url: url.clone(),
            destination_directory: destination_directory.clone(),
        },
        Step::Cleanup { path, ensure } => ActionDescriptor::File {
            id,
            path: path.clone(),
            ensure: *ensure,
        },
        Step::Configure { invocation, guard, .. } => {
            let (unless, onlyif) = match dialect.render_guard(guard) {
                GuardCondition::Unless(s) => (Some(s), None),
                GuardCondition::OnlyIf(s) => (None, Some(s)),
            };
            ActionDescriptor::Exec {
                id,
                command: dialect.render_invocation(invocation),
                provider: dialect.provider(),
                logoutput: true,
                unless,
                onlyif,
            }
        }
    }
}

/// Render a whole plan, preserving action order.
pub fn describe_plan(plan: &ResolutionPlan, dialect: &impl ShellDialect) -> Vec<ActionDescriptor> {
    plan.actions
        .iter()
        .map(|a| describe_action(a, dialect))
        .collect()
}
