//! Domain DTOs for the todo API.
//!
//! # Design
//! Field names follow the domain; `serde` renames map them onto the wire
//! names the DummyJSON-style API uses (`todo`, `userId`, `todos`, `skip`).
//! The mock-server crate defines its own copies and integration tests catch
//! any schema drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    #[serde(rename = "todo")]
    pub text: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub owner_id: u64,
}

/// One page of todos as returned by the list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoListPage {
    #[serde(rename = "todos")]
    pub items: Vec<Todo>,
    pub total: u64,
    #[serde(rename = "skip")]
    pub offset: u64,
    pub limit: u64,
}

/// Pagination parameters for `GET /todos`. Omitted fields are not sent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ListParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
}

impl ListParams {
    pub fn page(limit: u64, skip: u64) -> Self {
        Self {
            limit: Some(limit),
            skip: Some(skip),
        }
    }

    /// Render as a query string, including the leading `?`, or an empty
    /// string when no parameter is set.
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(format!("limit={limit}"));
        }
        if let Some(skip) = self.skip {
            pairs.push(format!("skip={skip}"));
        }
        if pairs.is_empty() {
            String::new()
        } else {
            format!("?{}", pairs.join("&"))
        }
    }
}

/// Request payload for creating a new todo. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodoRequest {
    #[serde(rename = "todo")]
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(rename = "userId")]
    pub owner_id: u64,
}

/// Body of a successful delete: the removed todo plus deletion metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeletedTodo {
    #[serde(flatten)]
    pub todo: Todo,
    #[serde(rename = "isDeleted")]
    pub is_deleted: bool,
    #[serde(rename = "deletedOn")]
    pub deleted_on: DateTime<Utc>,
}
