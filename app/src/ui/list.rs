//! The paginated todo list with its add form and per-card delete buttons.

use todo_core::{Pagination, QueryClient, QueryState, TodoListPage, Transport};

use super::add_form::AddForm;
use super::delete_button::DeleteButton;
use super::{button, card, LOADING};

#[derive(Debug, Clone, Default)]
pub struct TodoList {
    pagination: Pagination,
    pub add_form: AddForm,
}

impl TodoList {
    pub fn new(page_size: u64) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            add_form: AddForm::default(),
        }
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Fetch the current page if the cache does not hold a fresh copy.
    pub fn sync<T: Transport>(&self, queries: &mut QueryClient<T>) {
        queries.todos(self.pagination.params());
    }

    fn current<T: Transport>(&self, queries: &QueryClient<T>) -> QueryState<TodoListPage> {
        queries.peek_todos(self.pagination.params())
    }

    /// Total from the page on screen; paging is a no-op until one has loaded.
    fn known_total<T: Transport>(&self, queries: &QueryClient<T>) -> Option<u64> {
        self.current(queries).data().map(|page| page.total)
    }

    pub fn next_page<T: Transport>(&mut self, queries: &QueryClient<T>) {
        if let Some(total) = self.known_total(queries) {
            self.pagination.next(total);
        }
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous();
    }

    /// Jump to a one-based page number, clamped to the known page count.
    pub fn go_to_page<T: Transport>(&mut self, page: u64, queries: &QueryClient<T>) {
        if let Some(total) = self.known_total(queries) {
            self.pagination.go_to(page.saturating_sub(1), total);
        }
    }

    pub fn render<T: Transport>(&self, queries: &QueryClient<T>) -> String {
        let page = match self.current(queries) {
            QueryState::Ready(page) => page,
            QueryState::Error(err) => return format!("error: {err}"),
            QueryState::Loading | QueryState::Disabled => return LOADING.to_string(),
        };

        let mut out = vec![self.add_form.render(queries.create_status()), String::new()];
        if page.items.is_empty() {
            out.push("No todos yet.".to_string());
        }
        for todo in &page.items {
            let action = DeleteButton::new(todo.id).render();
            out.push(card::render(todo, Some(&action)));
        }
        out.push(String::new());
        if let Some(err) = queries.delete_status().error() {
            out.push(format!("could not delete todo: {err}"));
        }
        out.push(self.render_footer(page.total));
        out.join("\n")
    }

    fn render_footer(&self, total: u64) -> String {
        let p = &self.pagination;
        let (first, last) = p.item_range(total);
        let range = if total == 0 {
            "0 of 0".to_string()
        } else {
            format!("{first}-{last} of {total}")
        };
        format!(
            "{range}    {} page {} / {} {}",
            button("prev", p.has_previous()),
            p.page() + 1,
            p.total_pages(total).max(1),
            button("next", p.has_next(total)),
        )
    }
}
