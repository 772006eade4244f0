pub mod edges;

pub use edges::{add_edge_to_top, create_portal_edge, create_resume_edge, with_edge};
