//! JSON page views returned by the handlers.

use serde::{Deserialize, Serialize};

use crate::models::{TodoList, TodoRecord};
use crate::session::FlashMessage;
use crate::sort::{sort_todo_lists, sort_todos};

/// A todo list as shown on index and detail pages, without its todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListSummary {
    pub id: u64,
    pub title: String,
    pub done: bool,
    pub todos_count: usize,
    pub todos_remaining: usize,
}

impl From<&TodoList> for TodoListSummary {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id(),
            title: list.title().to_string(),
            done: list.is_done(),
            todos_count: list.len(),
            todos_remaining: list.remaining(),
        }
    }
}

/// `GET /lists`: every list, not-done first, then by title.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsPage {
    pub flash: Vec<FlashMessage>,
    pub todo_lists: Vec<TodoListSummary>,
}

impl ListsPage {
    pub fn new(flash: Vec<FlashMessage>, lists: &[TodoList]) -> Self {
        Self {
            flash,
            todo_lists: sort_todo_lists(lists).into_iter().map(Into::into).collect(),
        }
    }
}

/// `GET /lists/new`, and the re-rendered form after a rejected `POST /lists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewListPage {
    pub flash: Vec<FlashMessage>,
    #[serde(default)]
    pub todo_list_title: String,
}

/// `GET /lists/{id}`: one list with its todos in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPage {
    pub flash: Vec<FlashMessage>,
    pub todo_list: TodoListSummary,
    pub todos: Vec<TodoRecord>,
    /// Rejected input echoed back after a failed `POST /lists/{id}/todos`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_title: Option<String>,
}

impl ListPage {
    pub fn new(flash: Vec<FlashMessage>, list: &TodoList) -> Self {
        Self {
            flash,
            todo_list: list.into(),
            todos: sort_todos(list).into_iter().map(|todo| todo.to_plain_data()).collect(),
            todo_title: None,
        }
    }
}

/// `GET /lists/{id}/edit`, and the re-rendered form after a rejected rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditListPage {
    pub flash: Vec<FlashMessage>,
    pub todo_list: TodoListSummary,
    #[serde(default)]
    pub todo_list_title: String,
}
