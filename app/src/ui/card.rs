use todo_core::Todo;

/// Two lines: checkbox and text, then the owner and an optional action.
/// Completed todos have their text struck through with `~~`.
pub fn render(todo: &Todo, action: Option<&str>) -> String {
    let checkbox = if todo.completed { "[x]" } else { "[ ]" };
    let text = if todo.completed {
        format!("~~{}~~", todo.text)
    } else {
        todo.text.clone()
    };
    let mut owner = format!("      User #{}", todo.owner_id);
    if let Some(action) = action {
        owner.push_str("  ");
        owner.push_str(action);
    }
    format!("#{:<4} {checkbox} {text}\n{owner}", todo.id)
}
