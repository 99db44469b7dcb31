//! Component resolver
//!
//! Single entry point chaining the engine:
//!
//! ```text
//! request ─► classify host ─► select strategy ─► plan actions ─► Resolution
//! ```
//!
//! # Outcomes
//!
//! - `Resolution::Planned` — exactly one strategy, a non-empty ordered plan.
//! - `Resolution::Skipped` — deliberate no-op. Callers log it as skipped,
//!   never as failed, and must not abort the run.
//!
//! Resolution is pure and synchronous; requests share no state and may be
//! resolved concurrently.

use serde::Serialize;
use std::fmt;

use crate::catalog;
use crate::config_file::ComponentRequest;
use crate::engine::planner::{plan_actions, Action, PlanInput, ResolutionPlan};
use crate::engine::strategy::select_strategy;
use crate::host;
use crate::types::CapabilityClass;

/// Why a request produced no actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No capability class matches this host for the requested version
    UnsupportedHost,
    /// The requested version is not in the catalog
    UnknownVersion,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedHost => write!(f, "host not supported for this version"),
            Self::UnknownVersion => write!(f, "unknown component version"),
        }
    }
}

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Resolution {
    Planned(ResolutionPlan),
    Skipped { reason: SkipReason },
}

impl Resolution {
    /// Planned actions in order; empty when skipped.
    pub fn actions(&self) -> &[Action] {
        match self {
            Self::Planned(plan) => &plan.actions,
            Self::Skipped { .. } => &[],
        }
    }

    pub fn plan(&self) -> Option<&ResolutionPlan> {
        match self {
            Self::Planned(plan) => Some(plan),
            Self::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Resolve a request into its ordered, guarded action list.
///
/// Never fails and performs no I/O.
pub fn resolve(request: &ComponentRequest) -> Resolution {
    let Some(release) = catalog::release(&request.version) else {
        tracing::info!(component = %request.name, version = %request.version, "skipped: unknown version");
        return Resolution::Skipped { reason: SkipReason::UnknownVersion };
    };

    let package_dir = request.staged_package_dir();
    let class = host::classify(&request.host, release.version);
    let strategy = match select_strategy(class, package_dir) {
        Some(s) => s,
        None => return skip_unsupported(request),
    };

    let input = PlanInput {
        component: &request.name,
        release,
        ensure: request.ensure,
        package_dir,
    };

    match plan_actions(strategy, input) {
        Some(plan) => {
            tracing::debug!(component = %request.name, actions = plan.actions.len(), "planned");
            Resolution::Planned(plan)
        }
        None => {
            tracing::warn!(
                component = %request.name,
                %strategy,
                "release cannot support selected strategy"
            );
            skip_unsupported(request)
        }
    }
}

fn skip_unsupported(request: &ComponentRequest) -> Resolution {
    tracing::info!(
        component = %request.name,
        host = %request.host,
        class = %CapabilityClass::Unsupported,
        "skipped: no strategy for host"
    );
    Resolution::Skipped { reason: SkipReason::UnsupportedHost }
}
