//! Entry-point resolution for linked flows.

use crate::domain::model::FlowSnapshot;

/// Group a link into `flow` lands on.
///
/// An explicit `group_id_hint` wins. Otherwise v6+ flows enter through the
/// destination of their first declared event's outgoing edge, and older
/// flows through the first group holding a start block. A flow with neither
/// has no entry point.
pub fn resolve_entry_point(flow: &FlowSnapshot, group_id_hint: Option<&str>) -> Option<String> {
    if let Some(group_id) = group_id_hint {
        return Some(group_id.to_string());
    }
    if flow.schema_version().is_at_least_v6() {
        let edge_id = flow.events.first()?.outgoing_edge_id.as_deref()?;
        return flow.edge(edge_id).map(|edge| edge.to.group_id.clone());
    }
    flow.groups
        .iter()
        .find(|group| group.has_start_block())
        .map(|group| group.id.clone())
}
