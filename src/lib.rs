//! netfx-resolver library
//!
//! Declarative install/remove planning for the .NET Framework on Windows
//! hosts. Given a desired state and host facts, decides which install
//! strategy applies and emits the ordered, guarded actions an external
//! executor applies to reach that state.

pub mod catalog;
pub mod cli;
pub mod config_file;
pub mod engine;
pub mod error;
pub mod host;
pub mod render;
pub mod resolver;
pub mod types;

// Re-export main types for convenience
pub use config_file::ComponentRequest;
pub use engine::guard::{Guard, HostInspector, ObservedHost, Probe};
pub use engine::planner::{Action, ResolutionPlan, Step};
pub use error::ResolverError;
pub use host::{classify, HostFacts};
pub use resolver::{resolve, Resolution, SkipReason};
pub use types::{ActionKind, CapabilityClass, Ensure, Presence, Provider, Strategy};
