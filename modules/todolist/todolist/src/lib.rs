#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Todo List Module
//!
//! Owner-scoped CRUD over todo items. Every operation is authorized by the
//! [`authz_resolver_sdk::PolicyEnforcer`]: user tokens are checked against
//! the delegated (`scp`) permissions and see only their own items,
//! application tokens are checked against the application (`roles`)
//! permissions and see every item.
//!
//! ## Layers
//!
//! - `api::rest` - axum handlers, DTOs, problem mapping, `OpenAPI` document
//! - `domain` - service, repository trait, errors, in-process client
//! - `infra::storage` - in-memory and JSON file repositories
//!
//! The public contract (`TodoListClientV1`, models, `TodoListError`) lives
//! in `todolist-sdk` and is re-exported here.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::{StorageConfig, TodoListConfig};
pub use module::TodoListModule;
pub use todolist_sdk::{NewTodo, Todo, TodoListClientV1, TodoListError, TodoPatch};
