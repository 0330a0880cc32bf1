//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! [`TodoApi`] pairs the client with a [`Transport`] for callers that just
//! want one function per endpoint.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{CreateTodoRequest, DeletedTodo, ListParams, Todo, TodoListPage};

/// Base URL of the public DummyJSON API.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl Default for TodoClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        }
    }

    pub fn build_list_todos(&self, params: &ListParams) -> HttpRequest {
        self.request(
            HttpMethod::Get,
            format!("/todos{}", params.to_query_string()),
            None,
        )
    }

    pub fn build_get_todo(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/todos/{id}"), None)
    }

    pub fn build_list_todos_by_user(&self, user_id: u64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("/todos/user/{user_id}"), None)
    }

    pub fn build_create_todo(&self, input: &CreateTodoRequest) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.request(HttpMethod::Post, "/todos/add".to_string(), Some(body)))
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("/todos/{id}"), None)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<TodoListPage, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    pub fn parse_list_todos_by_user(&self, response: HttpResponse) -> Result<TodoListPage, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    /// DummyJSON answers `201 Created`; some deployments answer `200`.
    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, &[200, 201])?;
        decode(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<DeletedTodo, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: &[u16]) -> Result<(), ApiError> {
    if expected.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// A `TodoClient` bound to a transport: one call per endpoint, each
/// returning the decoded body or the unchanged failure.
#[derive(Debug, Clone)]
pub struct TodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), url = %request.path, "sending request");
        let response = self.transport.execute(request)?;
        tracing::debug!(status = response.status, "received response");
        Ok(response)
    }

    pub fn list_todos(&self, params: &ListParams) -> Result<TodoListPage, ApiError> {
        let response = self.send(self.client.build_list_todos(params))?;
        self.client.parse_list_todos(response)
    }

    pub fn get_todo(&self, id: u64) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_get_todo(id))?;
        self.client.parse_get_todo(response)
    }

    pub fn list_todos_by_user(&self, user_id: u64) -> Result<TodoListPage, ApiError> {
        let response = self.send(self.client.build_list_todos_by_user(user_id))?;
        self.client.parse_list_todos_by_user(response)
    }

    pub fn create_todo(&self, input: &CreateTodoRequest) -> Result<Todo, ApiError> {
        let response = self.send(self.client.build_create_todo(input)?)?;
        self.client.parse_create_todo(response)
    }

    pub fn delete_todo(&self, id: u64) -> Result<DeletedTodo, ApiError> {
        let response = self.send(self.client.build_delete_todo(id))?;
        self.client.parse_delete_todo(response)
    }
}
