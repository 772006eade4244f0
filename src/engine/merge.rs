//! Result-merge policy for cross-flow links.

use crate::domain::model::FlowSnapshot;

/// Whether a linked flow writes into its caller's results record.
///
/// v6+ callers opt in, falling back to `default_merge` when the block does
/// not say. Older callers always merged before the option existed, so they
/// merge unless the block explicitly opts out.
pub fn should_merge_results(
    caller: &FlowSnapshot,
    merge_option: Option<bool>,
    default_merge: bool,
) -> bool {
    if caller.schema_version().is_at_least_v6() {
        merge_option.unwrap_or(default_merge)
    } else {
        merge_option != Some(false)
    }
}
