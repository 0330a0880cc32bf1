//! In-memory stand-in for the todo API, for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use todo_core::{
    ApiError, CreateTodoRequest, HttpMethod, HttpRequest, HttpResponse, QueryClient, QueryConfig,
    Todo, TodoApi, TodoClient, TodoListPage, Transport,
};

pub const BASE_URL: &str = "http://fake";

/// Serves the five todo endpoints from a map and records every request.
pub struct FakeApi {
    todos: RefCell<BTreeMap<u64, Todo>>,
    next_id: Cell<u64>,
    requests: RefCell<Vec<HttpRequest>>,
    /// When set, every request fails at the transport level.
    pub offline: Cell<bool>,
}

impl FakeApi {
    /// `count` todos with ids `1..=count`, owners cycling through 1, 2, 3;
    /// even ids are completed.
    pub fn with_todos(count: u64) -> Self {
        let todos = (1..=count)
            .map(|id| {
                let todo = Todo {
                    id,
                    text: format!("Task {id}"),
                    completed: id % 2 == 0,
                    owner_id: (id - 1) % 3 + 1,
                };
                (id, todo)
            })
            .collect();
        Self {
            todos: RefCell::new(todos),
            next_id: Cell::new(count + 1),
            requests: RefCell::new(Vec::new()),
            offline: Cell::new(false),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Requests seen so far as `"METHOD /path?query"`.
    pub fn log(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| {
                let path = r.path.strip_prefix(BASE_URL).unwrap_or(&r.path);
                format!("{} {path}", r.method.as_str())
            })
            .collect()
    }

    pub fn query_client(&self) -> QueryClient<&FakeApi> {
        QueryClient::new(
            TodoApi::new(TodoClient::new(BASE_URL), self),
            QueryConfig::default(),
        )
    }

    fn route(&self, req: &HttpRequest) -> HttpResponse {
        let full = req.path.strip_prefix(BASE_URL).unwrap_or(&req.path);
        let (path, query) = full.split_once('?').unwrap_or((full, ""));
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();

        match (req.method, segments.as_slice()) {
            (HttpMethod::Get, ["todos"]) => {
                let mut limit = 30;
                let mut skip = 0;
                for pair in query.split('&') {
                    match pair.split_once('=') {
                        Some(("limit", v)) => limit = v.parse().unwrap_or(limit),
                        Some(("skip", v)) => skip = v.parse().unwrap_or(skip),
                        _ => {}
                    }
                }
                let todos = self.todos.borrow();
                let items = todos
                    .values()
                    .skip(skip as usize)
                    .take(limit as usize)
                    .cloned()
                    .collect();
                page(items, todos.len() as u64, skip, limit)
            }
            (HttpMethod::Get, ["todos", "user", user]) => {
                let user: u64 = user.parse().unwrap_or(0);
                let items: Vec<Todo> = self
                    .todos
                    .borrow()
                    .values()
                    .filter(|t| t.owner_id == user)
                    .cloned()
                    .collect();
                let total = items.len() as u64;
                page(items, total, 0, total)
            }
            (HttpMethod::Get, ["todos", id]) => {
                let found = id.parse::<u64>().ok().and_then(|id| self.todos.borrow().get(&id).cloned());
                match found {
                    Some(todo) => json(200, &todo),
                    None => not_found(id),
                }
            }
            (HttpMethod::Post, ["todos", "add"]) => {
                let body = req.body.as_deref().unwrap_or("");
                let Ok(input) = serde_json::from_str::<CreateTodoRequest>(body) else {
                    return HttpResponse::new(400, r#"{"message":"invalid body"}"#);
                };
                let id = self.next_id.get();
                self.next_id.set(id + 1);
                let todo = Todo {
                    id,
                    text: input.text,
                    completed: input.completed,
                    owner_id: input.owner_id,
                };
                self.todos.borrow_mut().insert(id, todo.clone());
                json(201, &todo)
            }
            (HttpMethod::Delete, ["todos", id]) => {
                let removed = id.parse::<u64>().ok().and_then(|id| self.todos.borrow_mut().remove(&id));
                let Some(todo) = removed else {
                    return not_found(id);
                };
                let mut body = serde_json::to_value(&todo).unwrap_or_default();
                body["isDeleted"] = true.into();
                body["deletedOn"] = "2025-01-01T00:00:00Z".into();
                HttpResponse::new(200, body.to_string())
            }
            _ => HttpResponse::new(404, r#"{"message":"no such route"}"#),
        }
    }
}

impl Transport for FakeApi {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let offline = self.offline.get();
        let response = if offline { None } else { Some(self.route(&request)) };
        self.requests.borrow_mut().push(request);
        response.ok_or_else(|| ApiError::Transport("network unreachable".to_string()))
    }
}

fn json<T: serde::Serialize>(status: u16, value: &T) -> HttpResponse {
    HttpResponse::new(status, serde_json::to_string(value).unwrap_or_default())
}

fn page(items: Vec<Todo>, total: u64, offset: u64, limit: u64) -> HttpResponse {
    json(
        200,
        &TodoListPage {
            items,
            total,
            offset,
            limit,
        },
    )
}

fn not_found(id: &str) -> HttpResponse {
    HttpResponse::new(404, format!(r#"{{"message":"Todo with id '{id}' not found"}}"#))
}
