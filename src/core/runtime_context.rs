use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::core::config::EngineConfig;
use crate::infrastructure::{FlowRepository, ResultLedger};

/// Collaborators shared by every logic executor of an engine.
#[derive(Clone)]
pub struct RuntimeContext {
    pub flow_repository: Arc<dyn FlowRepository>,
    pub result_ledger: Arc<dyn ResultLedger>,
    pub id_generator: Arc<dyn IdGenerator>,
    pub config: EngineConfig,
}

impl RuntimeContext {
    pub fn new(
        flow_repository: Arc<dyn FlowRepository>,
        result_ledger: Arc<dyn ResultLedger>,
    ) -> Self {
        Self {
            flow_repository,
            result_ledger,
            id_generator: Arc::new(RealIdGenerator::default()),
            config: EngineConfig::default(),
        }
    }

    pub fn with_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

// --- Real implementations ---

pub struct RealIdGenerator;

impl Default for RealIdGenerator {
    fn default() -> Self {
        Self
    }
}

impl IdGenerator for RealIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

// --- Fake implementations ---

pub struct FakeIdGenerator {
    pub prefix: String,
    pub counter: AtomicU64,
}

impl FakeIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for FakeIdGenerator {
    fn next_id(&self) -> String {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, id)
    }
}
