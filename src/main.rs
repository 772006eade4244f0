use std::error::Error;
use std::sync::Arc;

use xchatflow::dsl::{parse_flow_rows, DslFormat};
use xchatflow::{
    get_next_group, EngineConfig, FlowInstance, LogicExecutorRegistry, MemoryFlowRepository,
    MemoryResultLedger, NextGroup, RuntimeContext, SessionState,
};

const FLOWS: &str = r#"
- id: welcome
  version: "6"
  events:
    - id: ev-welcome
      outgoingEdgeId: e-welcome
  groups:
    - id: g-welcome
      title: Welcome
      blocks:
        - id: w1
          type: text
          options:
            content: "Hi! A short survey first."
        - id: w2
          type: Typebot link
          options:
            typebotId: survey
            mergeResults: false
        - id: w3
          type: text
          options:
            content: "Back in the welcome flow."
  edges:
    - id: e-welcome
      from:
        eventId: ev-welcome
      to:
        groupId: g-welcome
  variables:
    - id: v-name
      name: Name
      value: Ada
- id: survey
  version: "6"
  events:
    - id: ev-survey
      outgoingEdgeId: e-survey
  groups:
    - id: g-survey
      title: Survey
      blocks:
        - id: s1
          type: text
          options:
            content: "Survey started."
  edges:
    - id: e-survey
      from:
        eventId: ev-survey
      to:
        groupId: g-survey
  variables:
    - id: v-survey-name
      name: Name
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== XChatflow flow linking ===\n");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let extension = std::path::Path::new(&path)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("json");
            let format = DslFormat::from_extension(extension);
            EngineConfig::parse(&std::fs::read_to_string(&path)?, format)?
        }
        None => EngineConfig::default(),
    };

    let rows = parse_flow_rows(FLOWS, DslFormat::Yaml)?;
    println!("[OK] {} flows parsed", rows.len());

    let repository = Arc::new(MemoryFlowRepository::new());
    for row in &rows {
        repository.publish(&row.id, row.clone()).await;
    }
    let root = rows
        .first()
        .cloned()
        .ok_or("no root flow defined")?
        .into_snapshot(None)?;
    let start_edge = root.events.first().and_then(|e| e.outgoing_edge_id.clone());

    let ledger = Arc::new(MemoryResultLedger::new());
    let context = RuntimeContext::new(repository, ledger.clone()).with_config(config);
    let registry = LogicExecutorRegistry::with_link_executor();

    let state = SessionState::new(FlowInstance::root(root, Some("result-demo".into())));
    let mut next = get_next_group(ledger.as_ref(), &state, start_edge.as_deref()).await?;

    loop {
        let NextGroup {
            group,
            new_session_state: mut state,
        } = next;
        let Some(group) = group else {
            break;
        };

        let mut edge_id = None;
        for block in &group.blocks {
            if let Some(content) = block
                .options
                .as_ref()
                .and_then(|o| o.get("content"))
                .and_then(|c| c.as_str())
            {
                println!("  [{}] {}", state.top()?.flow.id, content);
            }
            let response = registry.execute(&state, block, &context).await?;
            for log in &response.logs {
                println!("  ! {}: {}", log.description, log.details.as_deref().unwrap_or(""));
            }
            if let Some(new_state) = response.new_session_state {
                println!("  -> queue depth {}", new_state.depth());
                state = new_state;
            }
            if response.outgoing_edge_id.is_some() {
                edge_id = response.outgoing_edge_id;
                break;
            }
        }
        next = get_next_group(ledger.as_ref(), &state, edge_id.as_deref()).await?;
    }

    println!("\n=== Session finished ({} result rows) ===", ledger.len().await);
    for record in ledger.records().await {
        println!(
            "  {} flow={} started={} completed={}",
            record.id, record.flow_id, record.has_started, record.is_completed
        );
    }
    Ok(())
}
