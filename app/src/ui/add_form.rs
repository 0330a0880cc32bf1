use todo_core::{ApiError, CreateTodoRequest, MutationStatus, QueryClient, Todo, Transport};

use super::button;

/// Owner assigned to todos created from this client.
pub const DEFAULT_OWNER_ID: u64 = 1;

/// Text input plus an add button.
#[derive(Debug, Clone, Default)]
pub struct AddForm {
    input: String,
}

impl AddForm {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty()
    }

    /// Create a todo from the trimmed input.
    ///
    /// Blank input is a no-op and returns `Ok(None)` without any request.
    /// The input is cleared only once the server confirms the create; on
    /// failure it is left as typed.
    pub fn submit<T: Transport>(
        &mut self,
        queries: &mut QueryClient<T>,
    ) -> Result<Option<Todo>, ApiError> {
        let text = self.input.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let request = CreateTodoRequest {
            text: text.to_string(),
            completed: false,
            owner_id: DEFAULT_OWNER_ID,
        };
        let created = queries.create_todo(&request)?;
        self.input.clear();
        Ok(Some(created))
    }

    /// `status` is the create mutation's; a failure shows under the input.
    pub fn render(&self, status: &MutationStatus) -> String {
        let shown = if self.input.is_empty() {
            "what needs doing?"
        } else {
            &self.input
        };
        let line = format!("> {shown}  {}", button("add", self.can_submit()));
        match status.error() {
            Some(err) => format!("{line}\n  could not add todo: {err}"),
            None => line,
        }
    }
}
