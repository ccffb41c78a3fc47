#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Todo List SDK
//!
//! Public surface of the `todolist` module for other modules:
//!
//! - [`TodoListClientV1`] - async client trait
//! - [`Todo`], [`NewTodo`], [`TodoPatch`] - models
//! - [`TodoListError`] - error type

pub mod api;
pub mod errors;
pub mod models;

pub use api::TodoListClientV1;
pub use errors::TodoListError;
pub use models::{NewTodo, Todo, TodoPatch};
