//! Terminal todo client: paginated list, add form, delete buttons and a
//! detail panel over the query cache in `todo-core`.
//!
//! # Design
//! - `UreqTransport` is the only code that touches the network.
//! - Components under `ui` render from the cache with `peek_*`; the page
//!   shell syncs visible queries before each render.
//! - `Shell` turns typed commands into the clicks the components expect.

pub mod config;
pub mod shell;
pub mod transport;
pub mod ui;

#[cfg(test)]
pub(crate) mod fake;

pub use config::AppConfig;
pub use shell::{Command, Flow, Shell};
pub use transport::UreqTransport;
