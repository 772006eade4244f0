use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use tokio::runtime::Runtime;

use xchatflow::core::fill_variables_with_existing_values;
use xchatflow::{
    get_next_group, Block, FakeIdGenerator, FlowInstance, FlowRow, FlowSnapshot,
    LogicExecutorRegistry, MemoryFlowRepository, MemoryResultLedger, RuntimeContext, SessionState,
    Variable,
};

fn bench_runtime() -> Runtime {
    Runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to build runtime")
}

fn make_flow(id: &str, variable_count: usize) -> FlowSnapshot {
    let variables: Vec<_> = (0..variable_count)
        .map(|i| json!({"id": format!("{id}-v{i}"), "name": format!("var{i}"), "value": i}))
        .collect();
    serde_json::from_value(json!({
        "id": id,
        "version": "6",
        "events": [{"id": "ev", "outgoingEdgeId": "e-start"}],
        "groups": [{"id": "g1", "blocks": [
            {"id": "b1", "type": "text"},
            {"id": "b2", "type": "Typebot link"},
            {"id": "b3", "type": "text"}
        ]}],
        "edges": [{"id": "e-start", "from": {"eventId": "ev"}, "to": {"groupId": "g1"}}],
        "variables": variables
    }))
    .expect("valid flow")
}

fn make_queue(depth: usize, variable_count: usize) -> Vec<FlowInstance> {
    (0..depth)
        .map(|i| FlowInstance::root(make_flow(&format!("flow-{i}"), variable_count), None))
        .collect()
}

fn link_block(target: &str) -> Block {
    Block {
        id: "b2".into(),
        block_type: "Typebot link".into(),
        outgoing_edge_id: None,
        options: Some(json!({"typebotId": target, "groupId": "g1"})),
    }
}

fn bench_context(rt: &Runtime) -> RuntimeContext {
    let repository = Arc::new(MemoryFlowRepository::new());
    let row: FlowRow = serde_json::to_value(make_flow("flow-b", 50))
        .and_then(serde_json::from_value)
        .expect("valid row");
    rt.block_on(repository.publish("flow-b", row));
    RuntimeContext::new(repository, Arc::new(MemoryResultLedger::new()))
        .with_id_generator(Arc::new(FakeIdGenerator::new("bench")))
}

fn bench_scope(c: &mut Criterion) {
    let declared: Vec<Variable> = (0..50)
        .map(|i| Variable::new(format!("d{i}"), format!("var{i}"), None))
        .collect();

    let mut group = c.benchmark_group("scope_fill");
    for depth in [1usize, 4, 16] {
        let queue = make_queue(depth, 50);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &queue, |b, queue| {
            b.iter(|| {
                let _ = black_box(fill_variables_with_existing_values(&declared, queue));
            });
        });
    }
    group.finish();
}

fn bench_link(c: &mut Criterion) {
    let rt = bench_runtime();
    let context = bench_context(&rt);
    let registry = LogicExecutorRegistry::with_link_executor();
    let state = SessionState::new(FlowInstance::root(make_flow("flow-a", 50), Some("r1".into())));
    let (registry_ref, state_ref, context_ref) = (&registry, &state, &context);

    c.bench_function("link_same_flow", |b| {
        let block = link_block("current");
        let block = &block;
        b.to_async(&rt).iter(move || async move {
            let _ = black_box(registry_ref.execute(state_ref, block, context_ref).await);
        });
    });

    c.bench_function("link_cross_flow", |b| {
        let block = link_block("flow-b");
        let block = &block;
        b.to_async(&rt).iter(move || async move {
            let _ = black_box(registry_ref.execute(state_ref, block, context_ref).await);
        });
    });

    let linked = rt
        .block_on(registry.execute(&state, &link_block("flow-b"), &context))
        .ok()
        .and_then(|r| r.new_session_state)
        .expect("link succeeds");
    let ledger = MemoryResultLedger::new();
    let (ledger, linked) = (&ledger, &linked);
    c.bench_function("return_to_caller", |b| {
        b.to_async(&rt).iter(move || async move {
            let _ = black_box(get_next_group(ledger, linked, None).await);
        });
    });
}

criterion_group!(benches, bench_scope, bench_link);
criterion_main!(benches);
