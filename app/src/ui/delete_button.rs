use todo_core::{ApiError, DeletedTodo, QueryClient, Transport};

use super::button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteButton {
    todo_id: u64,
}

impl DeleteButton {
    pub fn new(todo_id: u64) -> Self {
        Self { todo_id }
    }

    pub fn todo_id(&self) -> u64 {
        self.todo_id
    }

    /// Ask `confirm`; only a yes sends the delete. A no returns `Ok(None)`.
    pub fn click<T: Transport>(
        &self,
        queries: &mut QueryClient<T>,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Option<DeletedTodo>, ApiError> {
        if !confirm(&format!("Delete todo #{}?", self.todo_id)) {
            return Ok(None);
        }
        queries.delete_todo(self.todo_id).map(Some)
    }

    pub fn render(&self) -> String {
        button("delete", true)
    }
}
