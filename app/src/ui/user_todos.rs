//! Todos belonging to one owner, shown under the main list when a user
//! filter is set.

use todo_core::{QueryClient, QueryState, Transport};

use super::{card, LOADING};

pub fn sync<T: Transport>(user_id: Option<u64>, queries: &mut QueryClient<T>) {
    queries.todos_by_user(user_id);
}

/// `None` when no user is selected.
pub fn render<T: Transport>(user_id: Option<u64>, queries: &QueryClient<T>) -> Option<String> {
    let body = match queries.peek_todos_by_user(user_id) {
        QueryState::Disabled => return None,
        QueryState::Loading => LOADING.to_string(),
        QueryState::Error(err) => format!("error: {err}"),
        QueryState::Ready(page) if page.items.is_empty() => "No todos for this user.".to_string(),
        QueryState::Ready(page) => page
            .items
            .iter()
            .map(|todo| card::render(todo, None))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    let user_id = user_id.unwrap_or_default();
    Some(format!("== Todos of User #{user_id} ==\n{body}"))
}
