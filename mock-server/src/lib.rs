use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// Page size when the caller does not send `limit`.
pub const DEFAULT_LIMIT: u64 = 30;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub todo: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TodosResponse {
    pub todos: Vec<Todo>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeletedTodo {
    #[serde(flatten)]
    pub todo: Todo,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
    #[serde(rename = "deletedOn")]
    pub deleted_on: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub todo: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "userId")]
    pub user_id: u64,
}

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

#[derive(Debug)]
pub struct Store {
    next_id: u64,
    todos: BTreeMap<u64, Todo>,
}

impl Store {
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            next_id,
            todos: todos.into_iter().map(|t| (t.id, t)).collect(),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::with_todos(Vec::new())
    }
}

pub type Db = Arc<RwLock<Store>>;

/// `count` todos with ids `1..=count`, spread across five owners; every third
/// one is completed.
pub fn sample_todos(count: u64) -> Vec<Todo> {
    (1..=count)
        .map(|id| Todo {
            id,
            todo: format!("Todo number {id}"),
            completed: id % 3 == 0,
            user_id: (id - 1) % 5 + 1,
        })
        .collect()
}

pub fn app() -> Router {
    app_with(Vec::new())
}

pub fn app_with(todos: Vec<Todo>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store::with_todos(todos)));
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos/add", post(create_todo))
        .route("/todos/user/{user_id}", get(list_todos_by_user))
        .route("/todos/{id}", get(get_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, todos: Vec<Todo>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(todos)).await
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

fn not_found(id: u64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("Todo with id '{id}' not found") })),
    )
}

async fn list_todos(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<TodosResponse> {
    let store = db.read().await;
    let total = store.todos.len() as u64;
    let skip = query.skip.unwrap_or(0);
    let limit = match query.limit.unwrap_or(DEFAULT_LIMIT) {
        0 => total,
        n => n,
    };
    let todos = store
        .todos
        .values()
        .skip(skip as usize)
        .take(limit as usize)
        .cloned()
        .collect();
    Json(TodosResponse {
        todos,
        total,
        skip,
        limit,
    })
}

async fn list_todos_by_user(
    State(db): State<Db>,
    Path(user_id): Path<u64>,
) -> Json<TodosResponse> {
    let store = db.read().await;
    let todos: Vec<Todo> = store
        .todos
        .values()
        .filter(|t| t.user_id == user_id)
        .cloned()
        .collect();
    let total = todos.len() as u64;
    Json(TodosResponse {
        todos,
        total,
        skip: 0,
        limit: total,
    })
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    let todo = Todo {
        id: store.next_id,
        todo: input.todo,
        completed: input.completed,
        user_id: input.user_id,
    };
    store.next_id += 1;
    store.todos.insert(todo.id, todo.clone());
    tracing::info!(id = todo.id, "todo created");
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<Todo> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or_else(|| not_found(id))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<u64>) -> ApiResult<DeletedTodo> {
    let mut store = db.write().await;
    let todo = store.todos.remove(&id).ok_or_else(|| not_found(id))?;
    tracing::info!(id, "todo deleted");
    Ok(Json(DeletedTodo {
        todo,
        is_deleted: true,
        deleted_on: Utc::now(),
    }))
}
