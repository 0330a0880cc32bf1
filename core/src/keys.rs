//! Hierarchical cache keys for todo queries.
//!
//! ```text
//! all        = ["todos"]
//! lists()    = ["todos", "list"]
//! list(p)    = ["todos", "list", {limit, skip}]
//! details()  = ["todos", "detail"]
//! detail(id) = ["todos", "detail", id]
//! by_user(u) = ["todos", "user", u]
//! ```
//!
//! Keys exist for invalidation: a filter key matches every key it is a
//! prefix of, so `lists()` covers every page and `all()` covers everything.

use std::fmt;

use crate::types::ListParams;

/// One segment of a [`QueryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeySegment {
    Name(&'static str),
    Id(u64),
    Params(ListParams),
}

impl fmt::Display for KeySegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySegment::Name(name) => write!(f, "{name}"),
            KeySegment::Id(id) => write!(f, "{id}"),
            KeySegment::Params(params) => {
                let limit = params.limit.map(|v| v.to_string()).unwrap_or_default();
                let skip = params.skip.map(|v| v.to_string()).unwrap_or_default();
                write!(f, "{{limit:{limit},skip:{skip}}}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<KeySegment>);

impl QueryKey {
    fn extend(mut self, segment: KeySegment) -> Self {
        self.0.push(segment);
        self
    }

    pub fn segments(&self) -> &[KeySegment] {
        &self.0
    }

    /// True when `self` is `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{segment}")?;
        }
        write!(f, "]")
    }
}

/// Key constructors for the `todos` namespace.
pub mod todo_keys {
    use super::{KeySegment, QueryKey};
    use crate::types::ListParams;

    pub fn all() -> QueryKey {
        QueryKey(vec![KeySegment::Name("todos")])
    }

    pub fn lists() -> QueryKey {
        all().extend(KeySegment::Name("list"))
    }

    pub fn list(params: ListParams) -> QueryKey {
        lists().extend(KeySegment::Params(params))
    }

    pub fn details() -> QueryKey {
        all().extend(KeySegment::Name("detail"))
    }

    pub fn detail(id: u64) -> QueryKey {
        details().extend(KeySegment::Id(id))
    }

    pub fn by_user(user_id: u64) -> QueryKey {
        all().extend(KeySegment::Name("user")).extend(KeySegment::Id(user_id))
    }
}
