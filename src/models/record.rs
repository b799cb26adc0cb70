use serde::{Deserialize, Serialize};

/// Stored shape of a [`Todo`](super::Todo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

/// Stored shape of a [`TodoList`](super::TodoList).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub todos: Vec<TodoRecord>,
}

/// Stored shape of a session's [`TodoLists`](super::TodoLists).
///
/// `next_id` is the next id the sequence will hand out. Records written before
/// the counter existed deserialize with `0`, which rehydration raises past the
/// largest id present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub lists: Vec<TodoListRecord>,
}
