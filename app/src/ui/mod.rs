//! Presentational components, rendered as plain text for the terminal.
//!
//! Components never fetch on their own during `render`; they read the query
//! cache through `peek_*`. Widgets that need data expose a `sync` step the
//! page shell runs before rendering.

pub mod add_form;
pub mod card;
pub mod delete_button;
pub mod detail_panel;
pub mod list;
pub mod page;
pub mod user_todos;

pub const LOADING: &str = "Loading...";

/// `[label]` when clickable, `(label)` when disabled.
pub fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!("({label})")
    }
}
