//! Scope-chained variable resolution across the session queue.

use crate::domain::model::Variable;
use crate::domain::session::FlowInstance;

/// Give each declared variable the value of the nearest same-named variable
/// in `queue`, scanning from the active instance to the root.
///
/// Matching is exact and case-sensitive. A variable with no match anywhere
/// in the queue comes out valueless. The inputs are not modified.
pub fn fill_variables_with_existing_values(
    empty_variables: &[Variable],
    queue: &[FlowInstance],
) -> Vec<Variable> {
    empty_variables
        .iter()
        .map(|declared| {
            let value = queue
                .iter()
                .find_map(|instance| instance.flow.variable(&declared.name))
                .and_then(|matched| matched.value.clone());
            Variable {
                value,
                ..declared.clone()
            }
        })
        .collect()
}
