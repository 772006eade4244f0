pub mod flow_row;
pub mod parser;

pub use flow_row::FlowRow;
pub use parser::{parse_flow_row, parse_flow_rows, DslFormat};
