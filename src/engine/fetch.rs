//! Repository lookup of link targets.

use crate::domain::model::FlowSnapshot;
use crate::domain::session::SessionState;
use crate::error::FlowResult;
use crate::infrastructure::FlowRepository;

/// Load the snapshot of `flow_id` for the session's mode.
///
/// Preview sessions (no result id on the active instance) read the draft;
/// live sessions read the published snapshot, renamed to `flow_id`.
/// `Ok(None)` means the flow does not exist.
pub async fn fetch_linked_flow(
    repository: &dyn FlowRepository,
    state: &SessionState,
    flow_id: &str,
) -> FlowResult<Option<FlowSnapshot>> {
    if state.is_preview() {
        let row = repository.get_draft(flow_id).await?;
        return row.map(|r| r.into_snapshot(None)).transpose();
    }
    let row = repository.get_published(flow_id).await?;
    row.map(|r| r.into_snapshot(Some(flow_id))).transpose()
}
