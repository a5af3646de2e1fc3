//! Todo lists kept in a visitor's session
//!
//! This crate holds the domain of Listkeeper: named lists of todos, the rules
//! their names must follow, id allocation, display ordering, and the
//! [`SessionStore`] abstraction that keeps a visitor's lists between requests.
//!
//! ## Features
//!
//! - **Stable ids**: list and todo ids are never handed out twice in a scope
//! - **Case-insensitive names**: no two lists (or todos in a list) may share a
//!   name ignoring case
//! - **Display ordering**: open items first, finished ones last
//! - **Pluggable sessions**: in-memory or YAML-file backed
//!
//! ## Basic Usage
//!
//! ```rust
//! use listkeeper_todo::{display, Lists};
//!
//! # fn example() -> listkeeper_todo::Result<()> {
//! let mut lists = Lists::new();
//! let chores = lists.create_list("Chores")?.id;
//! let dishes = lists.add_todo(chores, "Dishes")?.id;
//! lists.set_todo_completed(chores, dishes, true)?;
//!
//! let list = lists.find_list(chores)?;
//! assert!(display::is_list_complete(list));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod display;
mod error;
mod ids;
pub mod store;
mod types;
mod validation;

// Re-exports
pub use error::{NameSubject, Result, TodoError, ValidationError};
pub use ids::{next_id, Identified, ListId, TodoId};
pub use store::{
    FileSessionStore, Flash, InMemorySessionStore, SessionData, SessionId, SessionStore,
};
pub use types::{Lists, Todo, TodoList};
pub use validation::{validate_list_name, validate_todo_name, MAX_NAME_LENGTH, MIN_NAME_LENGTH};
