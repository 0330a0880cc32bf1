//! Synchronous client core for a DummyJSON-style todo API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host supplies a
//! [`Transport`] that executes the round-trip; everything on this side of it
//! is deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless, holding only `base_url`. Each endpoint is a
//!   `build_*` / `parse_*` pair; `TodoApi` runs a pair through a transport.
//! - `QueryClient` caches query results under hierarchical `QueryKey`s and
//!   invalidates by key prefix after mutations. Nothing is edited in place.
//! - `DetailSelection` and `Pagination` hold the only client-side state the
//!   views need.

pub mod client;
pub mod error;
pub mod http;
pub mod keys;
pub mod pagination;
pub mod query;
pub mod selection;
pub mod types;

pub use client::{TodoApi, TodoClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use keys::{todo_keys, QueryKey};
pub use pagination::Pagination;
pub use query::{MutationStatus, QueryClient, QueryConfig, QueryState};
pub use selection::DetailSelection;
pub use types::{CreateTodoRequest, DeletedTodo, ListParams, Todo, TodoListPage};
