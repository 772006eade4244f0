//! Return side of the session stack: following edges and popping
//! finished flow instances.

use tracing::debug;

use crate::domain::model::{Group, Variable};
use crate::domain::session::{FlowInstance, SessionState};
use crate::error::FlowResult;
use crate::infrastructure::ResultLedger;

/// Where execution continues after following an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct NextGroup {
    /// Destination group, starting at the edge's target block. `None` when
    /// the session has nothing left to run.
    pub group: Option<Group>,
    pub new_session_state: SessionState,
}

/// Follow `edge_id` from the active instance.
///
/// When the active instance has no such edge it is finished: it is popped,
/// its results are closed (or merged into its parent), and the popped
/// instance's return edge is followed in the instance beneath. On the root
/// instance a missing edge ends the session.
pub async fn get_next_group(
    ledger: &dyn ResultLedger,
    state: &SessionState,
    edge_id: Option<&str>,
) -> FlowResult<NextGroup> {
    let mut state = state.clone();
    let mut edge_id = edge_id.map(str::to_string);

    loop {
        let resolved = {
            let top = state.top()?;
            edge_id
                .as_deref()
                .and_then(|id| top.flow.edge(id))
                .map(|edge| {
                    top.flow
                        .group(&edge.to.group_id)
                        .map(|g| g.sliced_from(edge.to.block_id.as_deref()))
                })
        };
        if let Some(group) = resolved {
            return Ok(NextGroup {
                group,
                new_session_state: state,
            });
        }
        if state.depth() <= 1 {
            return Ok(NextGroup {
                group: None,
                new_session_state: state,
            });
        }

        let finished = state.queue.remove(0);
        if !finished.is_merging_with_parent {
            if let Some(result_id) = &finished.result_id {
                ledger
                    .upsert_result(
                        result_id,
                        &finished.flow,
                        !finished.answers.is_empty(),
                        true,
                    )
                    .await?;
            }
        }
        debug!(
            flow_id = %finished.flow.id,
            merging = finished.is_merging_with_parent,
            queue_len = state.depth(),
            "linked flow finished"
        );
        if finished.is_merging_with_parent {
            let parent = &mut state.queue[0];
            *parent = merge_into_parent(parent, &finished);
        }
        edge_id = finished.edge_id_to_trigger_when_done;
    }
}

/// Parent instance after a merging child completes.
///
/// Parent variables take the child's value when the child has one; child
/// variables with a value the parent does not declare are appended. A
/// merging child starts from a copy of the parent's answers, so its answer
/// list replaces the parent's.
pub fn merge_into_parent(parent: &FlowInstance, child: &FlowInstance) -> FlowInstance {
    let mut variables: Vec<Variable> = parent
        .flow
        .variables
        .iter()
        .map(|variable| {
            let value = child
                .flow
                .variable(&variable.name)
                .filter(|v| v.has_value())
                .map_or_else(|| variable.value.clone(), |v| v.value.clone());
            Variable {
                value,
                ..variable.clone()
            }
        })
        .collect();
    variables.extend(
        child
            .flow
            .variables
            .iter()
            .filter(|v| v.has_value() && parent.flow.variable(&v.name).is_none())
            .cloned(),
    );

    FlowInstance {
        flow: parent.flow.with_variables(variables),
        answers: child.answers.clone(),
        ..parent.clone()
    }
}
