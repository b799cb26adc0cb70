use thiserror::Error;

/// Errors raised by the todo model.
///
/// All of them are deterministic: retrying the same call with the same input
/// fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("Title must be between 1 and {max} characters, got {len}", max = crate::models::MAX_TITLE_CHARS)]
    InvalidTitle { len: usize },
    #[error("{0}")]
    NotFound(String),
    #[error("Index {index} is out of range for a list of {len} todos")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Duplicate id {0} in stored data")]
    DuplicateId(u64),
    #[error("No ids left after {0}")]
    IdExhausted(u64),
}

impl TodoError {
    pub(crate) fn list_not_found(list_id: u64) -> Self {
        Self::NotFound(format!("Todo list {list_id} not found"))
    }

    pub(crate) fn todo_not_found(list_id: u64, todo_id: u64) -> Self {
        Self::NotFound(format!("Todo {todo_id} not found in todo list {list_id}"))
    }
}
