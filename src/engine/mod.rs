//! Engine modules — the decision-making core.
//!
//! Turns a classified host and a desired state into an ordered list of
//! guarded actions. Nothing in here performs I/O; every output is a
//! description handed to an external executor.
//!
//! - `strategy` — capability class + package dir → install strategy
//! - `guard` — idempotency guards as structured data
//! - `planner` — strategy + ensure → ordered actions

pub mod guard;
pub mod planner;
pub mod strategy;
