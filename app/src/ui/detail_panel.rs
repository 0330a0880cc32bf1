//! Side panel with one todo's details, driven by the selection store.

use todo_core::{DetailSelection, QueryClient, QueryState, Transport};

use super::LOADING;

pub const LOAD_ERROR: &str = "could not load todo details";

/// Fetch the selected todo. A closed panel has no id and fetches nothing.
pub fn sync<T: Transport>(selection: &DetailSelection, queries: &mut QueryClient<T>) {
    queries.todo(selection.selected_id());
}

/// `None` while the panel is closed.
pub fn render<T: Transport>(selection: &DetailSelection, queries: &QueryClient<T>) -> Option<String> {
    if !selection.is_open() {
        return None;
    }

    let mut out = vec![
        "+------------------- todo details -------------------+".to_string(),
        "  [x] close".to_string(),
    ];
    match queries.peek_todo(selection.selected_id()) {
        QueryState::Ready(todo) => {
            let status = if todo.completed { "done" } else { "pending" };
            out.push(format!("  text:   {}", todo.text));
            out.push(format!("  status: {status}"));
            out.push(format!("  owner:  User #{}", todo.owner_id));
            out.push(format!("  id:     #{}", todo.id));
        }
        QueryState::Error(_) => out.push(format!("  {LOAD_ERROR}")),
        QueryState::Loading | QueryState::Disabled => out.push(format!("  {LOADING}")),
    }
    out.push("+----------------------------------------------------+".to_string());
    Some(out.join("\n"))
}
