//! Strategy selection
//!
//! | Capability class     | package dir | Strategy |
//! |----------------------|-------------|----------|
//! | `NativeFeature`      | any         | `FeatureToggle` |
//! | `NetworkInstallable` | set         | `LocalPackage` |
//! | `NetworkInstallable` | unset       | `NetworkPackage` |
//! | `Unsupported`        | any         | none |
//!
//! A package dir supplied for a feature-capable host is ignored rather than
//! rejected: the native feature always takes precedence.

use crate::types::{CapabilityClass, Strategy};

/// Pick the single strategy for a classified host, or `None` when unsupported.
pub fn select_strategy(class: CapabilityClass, package_dir: Option<&str>) -> Option<Strategy> {
    let strategy = match class {
        CapabilityClass::NativeFeature => {
            if package_dir.is_some() {
                tracing::debug!("package dir ignored: native feature takes precedence");
            }
            Some(Strategy::FeatureToggle)
        }
        CapabilityClass::NetworkInstallable => match package_dir {
            Some(_) => Some(Strategy::LocalPackage),
            None => Some(Strategy::NetworkPackage),
        },
        CapabilityClass::Unsupported => None,
    };

    tracing::debug!(%class, ?strategy, "selected strategy");
    strategy
}
