//! Flow graph types shared across layers.

mod block;
mod flow_snapshot;
mod version;

pub use block::{Block, LinkBlockOptions, CURRENT_FLOW_ID, LINK_BLOCK_TYPE, START_BLOCK_TYPE};
pub use flow_snapshot::{
    Edge, EdgeSource, EdgeTarget, EntryEvent, FlowSettings, FlowSnapshot, GeneralSettings,
    Group, SystemMessages, Variable,
};
pub use version::SchemaVersion;
