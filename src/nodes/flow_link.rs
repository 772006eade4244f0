//! Flow-link block: call another flow (or the current one) and come back.
//!
//! A link pushes a new instance on the session queue and returns a portal
//! edge into it. If the link block has no explicit outgoing edge, a resume
//! edge to the next block is added to the caller and becomes the new
//! instance's return address.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::executor::{LogicExecutor, LogicResponse};
use crate::core::{fill_variables_with_existing_values, IdGenerator, RuntimeContext};
use crate::domain::model::{Block, EdgeTarget, FlowSnapshot, LinkBlockOptions};
use crate::domain::session::{ChatLog, FlowInstance, SessionState};
use crate::engine::{fetch_linked_flow, resolve_entry_point, should_merge_results};
use crate::error::FlowResult;
use crate::graph::{add_edge_to_top, create_portal_edge, create_resume_edge, with_edge};

/// Description of every link failure log.
pub const LINK_FAILED: &str = "Failed to link typebot";

pub struct FlowLinkExecutor;

#[async_trait]
impl LogicExecutor for FlowLinkExecutor {
    async fn execute(
        &self,
        state: &SessionState,
        block: &Block,
        context: &RuntimeContext,
    ) -> FlowResult<LogicResponse> {
        self.execute_link(state, block, context).await
    }
}

impl FlowLinkExecutor {
    /// Push the link target on the session queue.
    ///
    /// Configuration and lookup failures are returned as an error log with
    /// the block's own outgoing edge and no new state. Store faults abort
    /// the turn. The new queue is only returned once the result ledger
    /// write has completed.
    pub async fn execute_link(
        &self,
        state: &SessionState,
        block: &Block,
        context: &RuntimeContext,
    ) -> FlowResult<LogicResponse> {
        let current = state.top()?;
        let options = match block.link_options() {
            Ok(options) => options,
            Err(e) => {
                warn!(block_id = %block.id, error = %e, "invalid link options");
                return Ok(LogicResponse::fall_through(
                    block,
                    ChatLog::error(LINK_FAILED, format!("Invalid link options: {}", e)),
                ));
            }
        };
        let Some(flow_id) = options.target_flow_id() else {
            warn!(block_id = %block.id, "link target not specified");
            return Ok(LogicResponse::fall_through(
                block,
                ChatLog::error(LINK_FAILED, "Typebot ID is not specified"),
            ));
        };
        if !context.config.allows_push(state.depth()) {
            warn!(
                block_id = %block.id,
                queue_len = state.depth(),
                max_link_depth = context.config.max_link_depth,
                "link depth limit reached"
            );
            return Ok(LogicResponse::fall_through(
                block,
                ChatLog::error(LINK_FAILED, "Maximum link depth reached"),
            ));
        }

        let ids = context.id_generator.as_ref();
        let is_same_flow = options.targets_current_flow(&current.flow.id);
        debug!(
            block_id = %block.id,
            flow_id = %flow_id,
            same_flow = is_same_flow,
            preview = current.is_preview(),
            "executing flow link"
        );

        let (new_state, group_id) = if is_same_flow {
            let Some(group_id) = existing_group(&current.flow, options.target_group_id()) else {
                return Ok(group_not_found(block, &options, &current.flow));
            };
            (push_same_flow(state, block, ids), group_id)
        } else {
            let repository = context.flow_repository.as_ref();
            let Some(linked) = fetch_linked_flow(repository, state, flow_id).await? else {
                warn!(block_id = %block.id, flow_id = %flow_id, "link target flow not found");
                return Ok(LogicResponse::fall_through(
                    block,
                    ChatLog::error(LINK_FAILED, format!("Typebot with ID {} not found", flow_id)),
                ));
            };
            let entry = resolve_entry_point(&linked, options.target_group_id());
            let Some(group_id) = existing_group(&linked, entry.as_deref()) else {
                return Ok(group_not_found(block, &options, &linked));
            };
            let new_state = push_linked_flow(state, block, &options, linked, context).await?;
            (new_state, group_id)
        };

        let portal_edge = create_portal_edge(EdgeTarget::group(group_id), ids);
        let outgoing_edge_id = portal_edge.id.clone();
        let new_state = add_edge_to_top(&new_state, portal_edge);
        debug!(
            block_id = %block.id,
            queue_len = new_state.depth(),
            portal_edge_id = %outgoing_edge_id,
            "flow linked"
        );

        Ok(LogicResponse {
            outgoing_edge_id: Some(outgoing_edge_id),
            new_session_state: Some(new_state),
            logs: Vec::new(),
        })
    }
}

/// `group_id` if `flow` has such a group.
fn existing_group(flow: &FlowSnapshot, group_id: Option<&str>) -> Option<String> {
    group_id
        .filter(|id| flow.group(id).is_some())
        .map(str::to_string)
}

fn group_not_found(block: &Block, options: &LinkBlockOptions, target: &FlowSnapshot) -> LogicResponse {
    warn!(block_id = %block.id, flow_id = %target.id, "link target group not found");
    let group_id = options.target_group_id().unwrap_or("undefined");
    let details = format!("Group with ID \"{}\" not found", group_id);
    LogicResponse::fall_through(block, ChatLog::error(LINK_FAILED, details))
}

/// Caller with the resume edge appended, and the edge id the pushed
/// instance returns through.
fn paused_caller(
    current: &FlowInstance,
    block: &Block,
    ids: &dyn IdGenerator,
) -> (FlowInstance, Option<String>) {
    match create_resume_edge(current, block, ids) {
        Some(resume_edge) => {
            let return_edge_id = block
                .outgoing_edge_id
                .clone()
                .or_else(|| Some(resume_edge.id.clone()));
            (with_edge(current, resume_edge), return_edge_id)
        }
        None => (current.clone(), block.outgoing_edge_id.clone()),
    }
}

fn push(state: &SessionState, top: FlowInstance, caller: FlowInstance) -> SessionState {
    let mut queue = Vec::with_capacity(state.depth() + 1);
    queue.push(top);
    queue.push(caller);
    queue.extend(state.queue.iter().skip(1).cloned());
    SessionState {
        queue,
        extra: state.extra.clone(),
    }
}

fn push_same_flow(state: &SessionState, block: &Block, ids: &dyn IdGenerator) -> SessionState {
    let current = &state.queue[0];
    let (caller, return_edge_id) = paused_caller(current, block, ids);
    let top = FlowInstance {
        flow: current.flow.clone(),
        result_id: current.result_id.clone(),
        edge_id_to_trigger_when_done: return_edge_id,
        answers: current.answers.clone(),
        is_merging_with_parent: true,
    };
    push(state, top, caller)
}

async fn push_linked_flow(
    state: &SessionState,
    block: &Block,
    options: &LinkBlockOptions,
    linked: FlowSnapshot,
    context: &RuntimeContext,
) -> FlowResult<SessionState> {
    let current = &state.queue[0];
    let ids = context.id_generator.as_ref();
    let merge = should_merge_results(
        &current.flow,
        options.merge_results,
        context.config.default_merge_results,
    );

    // Flows that never recorded an answer have no results row yet.
    if let Some(result_id) = &current.result_id {
        if current.answers.is_empty() {
            context
                .result_ledger
                .ensure_result(result_id, &current.flow, false, false)
                .await?;
        }
    }

    let (caller, return_edge_id) = paused_caller(current, block, ids);
    let result_id = match (&current.result_id, merge) {
        (None, _) => None,
        (Some(result_id), true) => Some(result_id.clone()),
        (Some(_), false) => Some(ids.next_id()),
    };
    let variables = fill_variables_with_existing_values(&linked.variables, &state.queue);
    let top = FlowInstance {
        flow: linked.with_variables(variables),
        result_id,
        edge_id_to_trigger_when_done: return_edge_id,
        answers: if merge {
            current.answers.clone()
        } else {
            Vec::new()
        },
        is_merging_with_parent: merge,
    };
    debug!(
        flow_id = %top.flow.id,
        merge,
        forked_result = top.result_id != current.result_id,
        "pushing linked flow"
    );
    Ok(push(state, top, caller))
}
