//! Engine layer: session stack operations.
//!
//! Entry-point resolution, linked-flow loading, the result merge policy,
//! and the return side of the stack (following edges and popping finished
//! instances). The push side lives in [`crate::nodes::flow_link`].

pub mod entry;
pub mod fetch;
pub mod merge;
pub mod stack;

pub use entry::resolve_entry_point;
pub use fetch::fetch_linked_flow;
pub use merge::should_merge_results;
pub use stack::{get_next_group, merge_into_parent, NextGroup};
