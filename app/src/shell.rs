//! Command loop glue: parses one line at a time and applies it to the page.
//!
//! Each command stands in for a click. After handling a command the caller
//! asks for [`Shell::view`], which syncs the visible queries and renders.

use todo_core::{todo_keys, QueryClient, Transport};

use crate::ui::delete_button::DeleteButton;
use crate::ui::page::TodoPage;

pub const HELP: &str = "\
commands:
  next | prev | page <n>     move through the list
  add <text>                 create a todo
  delete <id>                delete a todo (asks first)
  open <id> | toggle <id>    show a todo in the detail panel
  close                      hide the detail panel
  user <id> | user           show one owner's todos, or hide them
  refresh                    refetch everything
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Page(u64),
    Add(String),
    Delete(u64),
    Open(u64),
    Toggle(u64),
    Close,
    User(Option<u64>),
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0} (type `help` for commands)")]
pub struct ParseError(String);

fn parse_id(command: &str, arg: &str) -> Result<u64, ParseError> {
    arg.trim()
        .parse()
        .map_err(|_| ParseError(format!("`{command}` needs a numeric id, got {arg:?}")))
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match word {
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "page" => Command::Page(parse_id(word, rest)?),
            // Blank text is passed through; the add form ignores it.
            "add" | "a" => Command::Add(rest.to_string()),
            "delete" | "rm" => Command::Delete(parse_id(word, rest)?),
            "open" | "o" => Command::Open(parse_id(word, rest)?),
            "toggle" | "t" => Command::Toggle(parse_id(word, rest)?),
            "close" | "c" => Command::Close,
            "user" | "u" if rest.is_empty() => Command::User(None),
            "user" | "u" => Command::User(Some(parse_id(word, rest)?)),
            "refresh" | "r" => Command::Refresh,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(ParseError(format!("unknown command {other:?}"))),
        };
        Ok(command)
    }
}

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep going; print the message, if any, above the next view.
    Continue(Option<String>),
    Quit,
}

pub struct Shell<T> {
    queries: QueryClient<T>,
    page: TodoPage,
}

impl<T: Transport> Shell<T> {
    pub fn new(queries: QueryClient<T>, page_size: u64) -> Self {
        Self {
            queries,
            page: TodoPage::new(page_size),
        }
    }

    pub fn page(&self) -> &TodoPage {
        &self.page
    }

    pub fn queries(&self) -> &QueryClient<T> {
        &self.queries
    }

    /// Sync visible queries, then render the whole page.
    pub fn view(&mut self) -> String {
        self.page.sync(&mut self.queries);
        self.page.render(&self.queries)
    }

    /// Apply one command. `confirm` is asked before anything destructive.
    pub fn handle(&mut self, command: Command, confirm: impl FnOnce(&str) -> bool) -> Flow {
        tracing::debug!(?command, "handling command");
        let message = match command {
            Command::Next => {
                self.page.list.next_page(&self.queries);
                None
            }
            Command::Prev => {
                self.page.list.previous_page();
                None
            }
            Command::Page(n) => {
                self.page.list.go_to_page(n, &self.queries);
                None
            }
            Command::Add(text) => {
                let form = &mut self.page.list.add_form;
                form.set_input(text);
                match form.submit(&mut self.queries) {
                    Ok(Some(todo)) => Some(format!("added #{}", todo.id)),
                    // A failure is rendered by the add form.
                    Ok(None) | Err(_) => None,
                }
            }
            Command::Delete(id) => match DeleteButton::new(id).click(&mut self.queries, confirm) {
                Ok(Some(deleted)) => Some(format!("deleted #{}", deleted.todo.id)),
                Ok(None) => Some("cancelled".to_string()),
                // A failure is rendered by the list.
                Err(_) => None,
            },
            Command::Open(id) => {
                self.page.selection.open(id);
                None
            }
            Command::Toggle(id) => {
                self.page.selection.toggle(id);
                None
            }
            Command::Close => {
                self.page.selection.close();
                None
            }
            Command::User(user_id) => {
                self.page.user_filter = user_id;
                None
            }
            Command::Refresh => {
                self.queries.invalidate(&todo_keys::all());
                None
            }
            Command::Help => Some(HELP.to_string()),
            Command::Quit => return Flow::Quit,
        };
        Flow::Continue(message)
    }
}
