#![allow(dead_code)]

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use xchatflow::{
    Block, ChatLog, EngineConfig, FakeIdGenerator, FlowInstance, FlowRepository, FlowRow,
    FlowSnapshot, LogicExecutorRegistry, MemoryFlowRepository, MemoryResultLedger, ResultLedger,
    RuntimeContext, SessionState, StoreError,
};

// --- Fixtures ---

/// v6 caller `flow-a`: one group `[b1 text, b2 link, b3 text]`.
pub fn caller_flow() -> FlowSnapshot {
    serde_json::from_value(json!({
        "id": "flow-a",
        "version": "6",
        "events": [{"id": "ev-a", "type": "start", "outgoingEdgeId": "e-a"}],
        "groups": [{"id": "g1", "title": "Main", "blocks": [
            {"id": "b1", "type": "text"},
            {"id": "b2", "type": "Typebot link"},
            {"id": "b3", "type": "text"}
        ]}],
        "edges": [{"id": "e-a", "from": {"eventId": "ev-a"}, "to": {"groupId": "g1"}}],
        "variables": [
            {"id": "va1", "name": "Name", "value": "Ada"},
            {"id": "va2", "name": "Age"}
        ]
    }))
    .unwrap()
}

pub fn legacy_caller_flow() -> FlowSnapshot {
    FlowSnapshot {
        version: None,
        ..caller_flow()
    }
}

/// v6 target `flow-b`, entered through its start event into `gb1`.
pub fn linked_row(row_id: &str) -> FlowRow {
    serde_json::from_value(json!({
        "id": row_id,
        "version": "6",
        "events": [{"id": "ev-b", "type": "start", "outgoingEdgeId": "e-b"}],
        "groups": [
            {"id": "gb1", "title": "Linked", "blocks": [{"id": "bb1", "type": "text"}]},
            {"id": "gb2", "title": "Other", "blocks": [{"id": "bb2", "type": "text"}]}
        ],
        "edges": [{"id": "e-b", "from": {"eventId": "ev-b"}, "to": {"groupId": "gb1"}}],
        "variables": [
            {"id": "vb1", "name": "Name"},
            {"id": "vb2", "name": "Score"}
        ],
        "settings": {"general": {"systemMessages": {"botClosed": "Linked bot closed"}}}
    }))
    .unwrap()
}

pub fn link_block(options: Value) -> Block {
    Block {
        id: "b2".into(),
        block_type: "Typebot link".into(),
        outgoing_edge_id: None,
        options: Some(options),
    }
}

pub fn live_session(flow: FlowSnapshot) -> SessionState {
    SessionState::new(FlowInstance::root(flow, Some("r1".into())))
}

pub fn preview_session(flow: FlowSnapshot) -> SessionState {
    SessionState::new(FlowInstance::root(flow, None))
}

/// In-memory stores wired into a runtime context with deterministic ids.
pub struct TestEnv {
    pub repository: Arc<MemoryFlowRepository>,
    pub ledger: Arc<MemoryResultLedger>,
    pub context: RuntimeContext,
    pub registry: LogicExecutorRegistry,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let repository = Arc::new(MemoryFlowRepository::new());
        let ledger = Arc::new(MemoryResultLedger::new());
        let context = RuntimeContext::new(repository.clone(), ledger.clone())
            .with_id_generator(Arc::new(FakeIdGenerator::new("id")))
            .with_config(config);
        Self {
            repository,
            ledger,
            context,
            registry: LogicExecutorRegistry::with_link_executor(),
        }
    }

    /// Draft and published `flow-b`. The published row carries its own
    /// publication id.
    pub async fn seed_flow_b(&self) {
        self.repository.insert_draft(linked_row("flow-b")).await;
        self.repository.publish("flow-b", linked_row("pub-b")).await;
    }
}

// --- Failing stores ---

pub struct FailingRepository;

#[async_trait]
impl FlowRepository for FailingRepository {
    async fn get_draft(&self, _flow_id: &str) -> Result<Option<FlowRow>, StoreError> {
        Err(StoreError::NotAvailable("flow store offline".into()))
    }

    async fn get_published(&self, _flow_id: &str) -> Result<Option<FlowRow>, StoreError> {
        Err(StoreError::NotAvailable("flow store offline".into()))
    }
}

pub struct FailingLedger;

#[async_trait]
impl ResultLedger for FailingLedger {
    async fn ensure_result(
        &self,
        _result_id: &str,
        _flow: &FlowSnapshot,
        _has_started: bool,
        _is_completed: bool,
    ) -> Result<(), StoreError> {
        Err(StoreError::Storage("results table locked".into()))
    }

    async fn upsert_result(
        &self,
        _result_id: &str,
        _flow: &FlowSnapshot,
        _has_started: bool,
        _is_completed: bool,
    ) -> Result<(), StoreError> {
        Err(StoreError::Storage("results table locked".into()))
    }
}

// --- Data-driven cases ---

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct FlowsFile {
    #[serde(default)]
    drafts: Vec<FlowRow>,
    #[serde(default)]
    published: HashMap<String, FlowRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateFile {
    #[serde(default)]
    config: Option<EngineConfig>,
    session: SessionState,
    block: Block,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedOutput {
    outgoing_edge_id: Option<String>,
    /// `None` when the step must leave the session untouched.
    #[serde(default)]
    queue: Option<Vec<ExpectedInstance>>,
    #[serde(default)]
    logs: Vec<ChatLog>,
    #[serde(default)]
    results: Vec<ExpectedResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedInstance {
    flow_id: String,
    #[serde(default)]
    result_id: Option<String>,
    #[serde(default)]
    edge_id_to_trigger_when_done: Option<String>,
    #[serde(default)]
    is_merging_with_parent: bool,
    #[serde(default)]
    answers: usize,
    /// Variable values by name, checked only for the names listed.
    #[serde(default)]
    variables: HashMap<String, Value>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ExpectedResult {
    id: String,
    flow_id: String,
    has_started: bool,
    is_completed: bool,
}

fn read_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> T {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e))
}

/// Run one link step described by `flows.json`, `state.json` and
/// `out.json` in `case_dir`.
pub async fn run_case(case_dir: &Path) {
    let flows: FlowsFile = read_json(case_dir.join("flows.json"));
    let state: StateFile = read_json(case_dir.join("state.json"));
    let expected: ExpectedOutput = read_json(case_dir.join("out.json"));

    let env = TestEnv::with_config(state.config.unwrap_or_default());
    for row in flows.drafts {
        env.repository.insert_draft(row).await;
    }
    for (flow_id, row) in flows.published {
        env.repository.publish(&flow_id, row).await;
    }

    let response = env
        .registry
        .execute(&state.session, &state.block, &env.context)
        .await
        .unwrap_or_else(|e| panic!("{}: link failed: {}", case_dir.display(), e));

    assert_eq!(
        response.outgoing_edge_id, expected.outgoing_edge_id,
        "{}: outgoing edge",
        case_dir.display()
    );
    assert_eq!(response.logs, expected.logs, "{}: logs", case_dir.display());

    match (&response.new_session_state, &expected.queue) {
        (None, None) => {}
        (Some(new_state), Some(queue)) => {
            assert_eq!(new_state.depth(), queue.len(), "{}: queue length", case_dir.display());
            for (idx, (actual, want)) in new_state.queue.iter().zip(queue).enumerate() {
                let at = format!("{}: queue[{}]", case_dir.display(), idx);
                assert_eq!(actual.flow.id, want.flow_id, "{at} flow id");
                assert_eq!(actual.result_id, want.result_id, "{at} result id");
                assert_eq!(
                    actual.edge_id_to_trigger_when_done, want.edge_id_to_trigger_when_done,
                    "{at} return edge"
                );
                assert_eq!(
                    actual.is_merging_with_parent, want.is_merging_with_parent,
                    "{at} merging"
                );
                assert_eq!(actual.answers.len(), want.answers, "{at} answers");
                for (name, value) in &want.variables {
                    let actual_value = actual
                        .flow
                        .variable(name)
                        .and_then(|v| v.value.clone())
                        .unwrap_or(Value::Null);
                    assert_eq!(&actual_value, value, "{at} variable {name}");
                }
            }
            if let Some(edge_id) = &response.outgoing_edge_id {
                assert!(
                    new_state.queue[0].flow.edge(edge_id).is_some(),
                    "{}: portal edge missing on the new top",
                    case_dir.display()
                );
            }
        }
        (actual, want) => panic!(
            "{}: expected queue {:?}, got state {:?}",
            case_dir.display(),
            want,
            actual.as_ref().map(|s| s.depth())
        ),
    }

    let results: Vec<ExpectedResult> = env
        .ledger
        .records()
        .await
        .into_iter()
        .map(|r| ExpectedResult {
            id: r.id,
            flow_id: r.flow_id,
            has_started: r.has_started,
            is_completed: r.is_completed,
        })
        .collect();
    assert_eq!(results, expected.results, "{}: result records", case_dir.display());
}

/// Generate a #[tokio::test] for each case directory
#[macro_export]
macro_rules! link_cases {
    ($dir:expr, $( $name:ident => $folder:expr ),* $(,)?) => {
        $(
            #[tokio::test]
            async fn $name() {
                let case_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                    .join($dir)
                    .join($folder);
                crate::common::run_case(&case_dir).await;
            }
        )*
    };
}
