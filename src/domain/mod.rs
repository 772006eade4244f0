//! Domain layer: pure domain model and shared types.
//!
//! This layer contains types that are used across multiple layers of the system
//! but do not depend on any runtime implementation details.
//!
//! Submodules:
//! - [`model`]: Flow graph types (snapshots, groups, blocks, edges, variables).
//! - [`session`]: Session queue of flow instances and chat logs.

pub mod model;
pub mod session;
