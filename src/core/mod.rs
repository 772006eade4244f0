pub mod config;
pub mod runtime_context;
pub mod variable_scope;

pub use config::EngineConfig;
pub use runtime_context::{FakeIdGenerator, IdGenerator, RealIdGenerator, RuntimeContext};
pub use variable_scope::fill_variables_with_existing_values;
