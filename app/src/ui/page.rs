use todo_core::{DetailSelection, QueryClient, Transport};

use super::list::TodoList;
use super::{detail_panel, user_todos};

pub const TITLE: &str = "Todo list";

/// The page shell: title, list, optional owner section, detail panel.
#[derive(Debug, Clone, Default)]
pub struct TodoPage {
    pub list: TodoList,
    pub selection: DetailSelection,
    pub user_filter: Option<u64>,
}

impl TodoPage {
    pub fn new(page_size: u64) -> Self {
        Self {
            list: TodoList::new(page_size),
            ..Self::default()
        }
    }

    /// Bring every visible query up to date.
    pub fn sync<T: Transport>(&self, queries: &mut QueryClient<T>) {
        self.list.sync(queries);
        user_todos::sync(self.user_filter, queries);
        detail_panel::sync(&self.selection, queries);
    }

    pub fn render<T: Transport>(&self, queries: &QueryClient<T>) -> String {
        let mut sections = vec![format!("# {TITLE}"), self.list.render(queries)];
        sections.extend(user_todos::render(self.user_filter, queries));
        sections.extend(detail_panel::render(&self.selection, queries));
        sections.join("\n\n")
    }
}
