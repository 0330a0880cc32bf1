//! Query cache and mutations over [`TodoApi`].
//!
//! # Design
//! Every query result lives under a [`QueryKey`] and owns its decoded value,
//! so the list and detail views never share an instance. Reads go through
//! two doors:
//!
//! - `todos` / `todo` / `todos_by_user` fetch when the entry is missing or
//!   stale, then report the state.
//! - `peek_*` report the state without touching the network. An enabled key
//!   with no entry yet reads as [`QueryState::Loading`].
//!
//! Mutations never edit cached values. They invalidate a key prefix and the
//! next read refetches: `create_todo` invalidates every list, `delete_todo`
//! the whole `todos` namespace.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::client::TodoApi;
use crate::error::ApiError;
use crate::http::Transport;
use crate::keys::{todo_keys, QueryKey};
use crate::types::{CreateTodoRequest, DeletedTodo, ListParams, Todo, TodoListPage};

/// Cache-wide policy, applied uniformly to every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// How long a successful result is served without refetching.
    pub stale_time: Duration,
    /// Extra attempts after a failed query fetch. Mutations never retry.
    pub retry: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(5 * 60),
            retry: 1,
        }
    }
}

/// What a view sees when it reads a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryState<T> {
    /// The query is switched off (falsy id); nothing was or will be fetched.
    Disabled,
    /// Enabled, but no result has arrived yet.
    Loading,
    Error(ApiError),
    Ready(T),
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryState::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome of the most recent run of a mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Success,
    Error(ApiError),
}

impl MutationStatus {
    pub fn error(&self) -> Option<&ApiError> {
        match self {
            MutationStatus::Error(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum CachedValue {
    Page(TodoListPage),
    Todo(Todo),
}

#[derive(Debug)]
struct Entry {
    result: Result<CachedValue, ApiError>,
    fetched_at: Instant,
    invalidated: bool,
}

impl Entry {
    fn needs_fetch(&self, stale_time: Duration) -> bool {
        // A failed entry holds no data worth serving, so the next fetching
        // read tries again. `peek_*` still reports the error.
        self.invalidated || self.result.is_err() || self.fetched_at.elapsed() >= stale_time
    }
}

/// Treats `None` and `Some(0)` alike: no id, no request.
fn enabled_id(id: Option<u64>) -> Option<u64> {
    id.filter(|&id| id != 0)
}

pub struct QueryClient<T> {
    api: TodoApi<T>,
    config: QueryConfig,
    entries: HashMap<QueryKey, Entry>,
    create_status: MutationStatus,
    delete_status: MutationStatus,
}

impl<T: Transport> QueryClient<T> {
    pub fn new(api: TodoApi<T>, config: QueryConfig) -> Self {
        Self {
            api,
            config,
            entries: HashMap::new(),
            create_status: MutationStatus::Idle,
            delete_status: MutationStatus::Idle,
        }
    }

    pub fn api(&self) -> &TodoApi<T> {
        &self.api
    }

    pub fn config(&self) -> QueryConfig {
        self.config
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// One page of todos. Each distinct `params` is its own cache entry.
    pub fn todos(&mut self, params: ListParams) -> QueryState<TodoListPage> {
        let key = todo_keys::list(params);
        self.ensure(&key, |api| api.list_todos(&params).map(CachedValue::Page));
        self.peek_todos(params)
    }

    /// A single todo. Disabled for `None` or `Some(0)`.
    pub fn todo(&mut self, id: Option<u64>) -> QueryState<Todo> {
        if let Some(id) = enabled_id(id) {
            let key = todo_keys::detail(id);
            self.ensure(&key, |api| api.get_todo(id).map(CachedValue::Todo));
        }
        self.peek_todo(id)
    }

    /// Every todo owned by a user. Disabled for `None` or `Some(0)`.
    pub fn todos_by_user(&mut self, user_id: Option<u64>) -> QueryState<TodoListPage> {
        if let Some(user_id) = enabled_id(user_id) {
            let key = todo_keys::by_user(user_id);
            self.ensure(&key, |api| {
                api.list_todos_by_user(user_id).map(CachedValue::Page)
            });
        }
        self.peek_todos_by_user(user_id)
    }

    pub fn peek_todos(&self, params: ListParams) -> QueryState<TodoListPage> {
        self.state(&todo_keys::list(params), |value| match value {
            CachedValue::Page(page) => Some(page),
            CachedValue::Todo(_) => None,
        })
    }

    pub fn peek_todo(&self, id: Option<u64>) -> QueryState<Todo> {
        let Some(id) = enabled_id(id) else {
            return QueryState::Disabled;
        };
        self.state(&todo_keys::detail(id), |value| match value {
            CachedValue::Todo(todo) => Some(todo),
            CachedValue::Page(_) => None,
        })
    }

    pub fn peek_todos_by_user(&self, user_id: Option<u64>) -> QueryState<TodoListPage> {
        let Some(user_id) = enabled_id(user_id) else {
            return QueryState::Disabled;
        };
        self.state(&todo_keys::by_user(user_id), |value| match value {
            CachedValue::Page(page) => Some(page),
            CachedValue::Todo(_) => None,
        })
    }

    /// True when a read of `key` would go to the network.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        self.entries
            .get(key)
            .is_none_or(|entry| entry.needs_fetch(self.config.stale_time))
    }

    fn state<V: Clone>(
        &self,
        key: &QueryKey,
        extract: impl FnOnce(&CachedValue) -> Option<&V>,
    ) -> QueryState<V> {
        match self.entries.get(key) {
            None => QueryState::Loading,
            Some(Entry { result: Err(err), .. }) => QueryState::Error(err.clone()),
            Some(Entry { result: Ok(value), .. }) => match extract(value) {
                Some(data) => QueryState::Ready(data.clone()),
                None => QueryState::Error(ApiError::Deserialization(format!(
                    "cache entry {key} holds an unexpected shape"
                ))),
            },
        }
    }

    fn ensure(
        &mut self,
        key: &QueryKey,
        fetch: impl Fn(&TodoApi<T>) -> Result<CachedValue, ApiError>,
    ) {
        if !self.is_stale(key) {
            tracing::debug!(%key, "cache hit");
            return;
        }
        tracing::debug!(%key, "cache miss, fetching");

        let mut result = fetch(&self.api);
        for retry in 1..=self.config.retry {
            let Err(err) = &result else { break };
            tracing::warn!(%key, retry, error = %err, "query failed, retrying");
            result = fetch(&self.api);
        }
        if let Err(err) = &result {
            tracing::warn!(%key, error = %err, "query failed");
        }

        self.entries.insert(
            key.clone(),
            Entry {
                result,
                fetched_at: Instant::now(),
                invalidated: false,
            },
        );
    }

    // -----------------------------------------------------------------------
    // Invalidation
    // -----------------------------------------------------------------------

    /// Mark every entry under `prefix` stale. Returns how many were marked.
    pub fn invalidate(&mut self, prefix: &QueryKey) -> usize {
        let mut marked = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                marked += 1;
            }
        }
        tracing::info!(%prefix, marked, "invalidated queries");
        marked
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn create_status(&self) -> &MutationStatus {
        &self.create_status
    }

    pub fn delete_status(&self) -> &MutationStatus {
        &self.delete_status
    }

    /// Create a todo, then invalidate every cached list.
    pub fn create_todo(&mut self, request: &CreateTodoRequest) -> Result<Todo, ApiError> {
        match self.api.create_todo(request) {
            Ok(todo) => {
                tracing::info!(id = todo.id, "created todo");
                self.create_status = MutationStatus::Success;
                self.invalidate(&todo_keys::lists());
                Ok(todo)
            }
            Err(err) => {
                tracing::warn!(error = %err, "create todo failed");
                self.create_status = MutationStatus::Error(err.clone());
                Err(err)
            }
        }
    }

    /// Delete a todo, then invalidate the whole `todos` namespace.
    pub fn delete_todo(&mut self, id: u64) -> Result<DeletedTodo, ApiError> {
        match self.api.delete_todo(id) {
            Ok(deleted) => {
                tracing::info!(id, "deleted todo");
                self.delete_status = MutationStatus::Success;
                self.invalidate(&todo_keys::all());
                Ok(deleted)
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "delete todo failed");
                self.delete_status = MutationStatus::Error(err.clone());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::client::TodoClient;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Replays scripted responses and records every request it sees.
    #[derive(Default)]
    struct Scripted {
        responses: RefCell<VecDeque<Result<HttpResponse, ApiError>>>,
        seen: RefCell<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn push(&self, status: u16, body: &str) {
            self.responses
                .borrow_mut()
                .push_back(Ok(HttpResponse::new(status, body)));
        }

        fn push_err(&self, err: ApiError) {
            self.responses.borrow_mut().push_back(Err(err));
        }

        fn calls(&self) -> usize {
            self.seen.borrow().len()
        }

        fn paths(&self) -> Vec<String> {
            self.seen.borrow().iter().map(|r| r.path.clone()).collect()
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
        }
    }

    const PAGE: &str = r#"{"todos":[{"id":1,"todo":"a","completed":false,"userId":1}],"total":1,"skip":0,"limit":10}"#;
    const TODO: &str = r#"{"id":1,"todo":"a","completed":false,"userId":1}"#;
    const DELETED: &str = r#"{"id":1,"todo":"a","completed":false,"userId":1,"isDeleted":true,"deletedOn":"2025-01-01T00:00:00Z"}"#;

    fn query_client(transport: &Scripted) -> QueryClient<&Scripted> {
        let api = TodoApi::new(TodoClient::new("http://api"), transport);
        QueryClient::new(api, QueryConfig::default())
    }

    #[test]
    fn peek_before_fetch_is_loading() {
        let transport = Scripted::default();
        let queries = query_client(&transport);
        assert!(queries.peek_todos(ListParams::page(10, 0)).is_loading());
        assert!(queries.peek_todo(Some(1)).is_loading());
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn fresh_entry_is_served_from_cache() {
        let transport = Scripted::default();
        transport.push(200, PAGE);
        let mut queries = query_client(&transport);

        let params = ListParams::page(10, 0);
        assert_eq!(queries.todos(params).data().unwrap().total, 1);
        assert_eq!(queries.todos(params).data().unwrap().total, 1);
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn changing_params_fetches_again() {
        let transport = Scripted::default();
        transport.push(200, PAGE);
        transport.push(200, PAGE);
        let mut queries = query_client(&transport);

        queries.todos(ListParams::page(10, 0));
        queries.todos(ListParams::page(10, 10));
        assert_eq!(
            transport.paths(),
            vec![
                "http://api/todos?limit=10&skip=0".to_string(),
                "http://api/todos?limit=10&skip=10".to_string(),
            ]
        );
    }

    #[test]
    fn zero_stale_time_always_refetches() {
        let transport = Scripted::default();
        transport.push(200, PAGE);
        transport.push(200, PAGE);
        let api = TodoApi::new(TodoClient::new("http://api"), &transport);
        let mut queries = QueryClient::new(
            api,
            QueryConfig {
                stale_time: Duration::ZERO,
                retry: 0,
            },
        );

        queries.todos(ListParams::default());
        queries.todos(ListParams::default());
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn falsy_ids_never_hit_the_network() {
        let transport = Scripted::default();
        let mut queries = query_client(&transport);

        assert_eq!(queries.todo(None), QueryState::Disabled);
        assert_eq!(queries.todo(Some(0)), QueryState::Disabled);
        assert_eq!(queries.todos_by_user(None), QueryState::Disabled);
        assert_eq!(queries.todos_by_user(Some(0)), QueryState::Disabled);
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn by_user_fetches_for_a_real_id() {
        let transport = Scripted::default();
        transport.push(200, PAGE);
        let mut queries = query_client(&transport);

        let state = queries.todos_by_user(Some(5));
        assert_eq!(state.data().unwrap().items.len(), 1);
        assert_eq!(transport.paths(), vec!["http://api/todos/user/5".to_string()]);
    }

    #[test]
    fn query_retries_once_then_succeeds() {
        let transport = Scripted::default();
        transport.push(500, "boom");
        transport.push(200, TODO);
        let mut queries = query_client(&transport);

        let state = queries.todo(Some(1));
        assert_eq!(state.data().unwrap().id, 1);
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn query_error_surfaces_after_retries() {
        let transport = Scripted::default();
        transport.push(404, "");
        transport.push(404, "");
        let mut queries = query_client(&transport);

        assert_eq!(queries.todo(Some(9)), QueryState::Error(ApiError::NotFound));
        assert_eq!(transport.calls(), 2);

        // Peeking does not refetch.
        assert!(queries.peek_todo(Some(9)).is_error());
        assert!(queries.is_stale(&todo_keys::detail(9)));
        assert_eq!(transport.calls(), 2);
    }

    #[test]
    fn failed_query_refetches_on_next_read() {
        let transport = Scripted::default();
        transport.push_err(ApiError::Transport("down".to_string()));
        transport.push_err(ApiError::Transport("down".to_string()));
        transport.push(200, TODO);
        let mut queries = query_client(&transport);

        assert!(queries.todo(Some(1)).is_error());
        assert_eq!(queries.todo(Some(1)).data().unwrap().id, 1);
        assert_eq!(transport.calls(), 3);

        // Back to normal caching once it succeeded.
        queries.todo(Some(1));
        assert_eq!(transport.calls(), 3);
    }

    #[test]
    fn max_retry_count_does_not_overflow() {
        let transport = Scripted::default();
        transport.push(200, TODO);
        let api = TodoApi::new(TodoClient::new("http://api"), &transport);
        let mut queries = QueryClient::new(
            api,
            QueryConfig {
                retry: u32::MAX,
                ..QueryConfig::default()
            },
        );

        assert_eq!(queries.todo(Some(1)).data().unwrap().id, 1);
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn create_invalidates_lists_only() {
        let transport = Scripted::default();
        transport.push(200, PAGE);
        transport.push(200, TODO);
        transport.push(201, TODO);
        let mut queries = query_client(&transport);

        let params = ListParams::page(10, 0);
        queries.todos(params);
        queries.todo(Some(1));

        let request = CreateTodoRequest {
            text: "a".to_string(),
            completed: false,
            owner_id: 1,
        };
        queries.create_todo(&request).unwrap();
        assert_eq!(queries.create_status(), &MutationStatus::Success);

        assert!(queries.is_stale(&todo_keys::list(params)));
        assert!(!queries.is_stale(&todo_keys::detail(1)));
    }

    #[test]
    fn delete_invalidates_lists_and_details() {
        let transport = Scripted::default();
        transport.push(200, PAGE);
        transport.push(200, TODO);
        transport.push(200, DELETED);
        transport.push(200, PAGE);
        transport.push(200, TODO);
        let mut queries = query_client(&transport);

        let params = ListParams::page(10, 0);
        queries.todos(params);
        queries.todo(Some(1));
        queries.delete_todo(1).unwrap();

        assert!(queries.is_stale(&todo_keys::list(params)));
        assert!(queries.is_stale(&todo_keys::detail(1)));

        queries.todos(params);
        queries.todo(Some(1));
        assert_eq!(transport.calls(), 5);
        assert_eq!(transport.seen.borrow()[2].method, HttpMethod::Delete);
    }

    #[test]
    fn failed_mutation_is_not_retried_and_keeps_cache() {
        let transport = Scripted::default();
        transport.push(200, PAGE);
        transport.push(404, "");
        let mut queries = query_client(&transport);

        let params = ListParams::page(10, 0);
        queries.todos(params);
        let err = queries.delete_todo(77).unwrap_err();

        assert_eq!(err, ApiError::NotFound);
        assert_eq!(queries.delete_status(), &MutationStatus::Error(ApiError::NotFound));
        assert_eq!(transport.calls(), 2);
        assert!(!queries.is_stale(&todo_keys::list(params)));
    }

    #[test]
    fn invalidated_error_entry_refetches() {
        let transport = Scripted::default();
        transport.push_err(ApiError::Transport("down".to_string()));
        transport.push_err(ApiError::Transport("down".to_string()));
        transport.push(200, TODO);
        let mut queries = query_client(&transport);

        assert!(queries.todo(Some(1)).is_error());
        assert_eq!(queries.invalidate(&todo_keys::all()), 1);
        assert!(queries.todo(Some(1)).data().is_some());
    }
}
