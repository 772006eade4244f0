//! Runtime edge synthesis.
//!
//! Links and returns are expressed as ordinary edges so the interpreter
//! only ever follows edges by id. Synthesized edges have an unset origin
//! and are appended to a copy of the owning instance's edge list.

use crate::core::IdGenerator;
use crate::domain::model::{Block, Edge, EdgeSource, EdgeTarget};
use crate::domain::session::{FlowInstance, SessionState};

/// Edge from nowhere to the block following `block` in its group.
///
/// Returns `None` when the block has an explicit outgoing edge, when its
/// group is not part of `instance`, or when it is the last block of its
/// group.
pub fn create_resume_edge(
    instance: &FlowInstance,
    block: &Block,
    ids: &dyn IdGenerator,
) -> Option<Edge> {
    if block.outgoing_edge_id.is_some() {
        return None;
    }
    let group = instance.flow.group_containing(&block.id)?;
    let next_block = group.block_after(&block.id)?;
    Some(Edge {
        id: ids.next_id(),
        from: EdgeSource::unset(),
        to: EdgeTarget::block(group.id.clone(), next_block.id.clone()),
    })
}

/// Edge from nowhere to `target`, returned to the interpreter as the next
/// edge to follow.
pub fn create_portal_edge(target: EdgeTarget, ids: &dyn IdGenerator) -> Edge {
    Edge {
        id: ids.next_id(),
        from: EdgeSource::unset(),
        to: target,
    }
}

/// Copy of `instance` with `edge` appended to its snapshot.
pub fn with_edge(instance: &FlowInstance, edge: Edge) -> FlowInstance {
    FlowInstance {
        flow: instance.flow.with_edge(edge),
        ..instance.clone()
    }
}

/// Copy of `state` with `edge` appended to the active instance.
pub fn add_edge_to_top(state: &SessionState, edge: Edge) -> SessionState {
    let mut next = state.clone();
    if let Some(top) = next.queue.first_mut() {
        top.flow = top.flow.with_edge(edge);
    }
    next
}
