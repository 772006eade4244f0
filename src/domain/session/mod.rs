//! Session call stack and chat logs.

mod log;
mod state;

pub use log::{ChatLog, LogStatus};
pub use state::{Answer, FlowInstance, SessionState};
