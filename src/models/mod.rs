//! Domain models for session-todos.
//!
//! # Core Concepts
//!
//! - [`Todo`]: A single actionable item with a title and a completion flag.
//!   Todos never exist on their own; each one is owned by exactly one list.
//! - [`TodoList`]: A named, ordered collection of todos. A list is *done* when it
//!   holds at least one todo and every todo in it is done.
//! - [`TodoLists`]: The collection held by one browser session, together with the
//!   id sequence that hands out list and todo ids.
//!
//! # Plain data
//!
//! The session store never sees live objects. [`TodoLists::to_plain_data`] flattens
//! the collection into [`CollectionRecord`], and [`TodoLists::from_plain_data`]
//! rebuilds it, validating titles and ids on the way in.

mod collection;
mod error;
mod record;
mod title;
mod todo;
mod todo_list;

pub use collection::*;
pub use error::*;
pub use record::*;
pub use title::*;
pub use todo::*;
pub use todo_list::*;
