use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FlashMessage;
use crate::models::{CollectionRecord, TodoLists};

/// What the store keeps for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub todo_lists: CollectionRecord,
    #[serde(default)]
    pub flash: Vec<FlashMessage>,
}

/// Live, rehydrated session contents for the duration of one request.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub todo_lists: TodoLists,
    flash: Vec<FlashMessage>,
}

impl SessionState {
    /// Rehydrate stored data. Todo lists that fail validation are dropped with a
    /// warning rather than failing the request.
    pub fn from_data(id: Uuid, data: SessionData) -> Self {
        let todo_lists = TodoLists::from_plain_data(data.todo_lists).unwrap_or_else(|e| {
            tracing::warn!(session_id = %id, "Discarding corrupt todo lists: {}", e);
            TodoLists::new()
        });
        Self {
            todo_lists,
            flash: data.flash,
        }
    }

    pub fn to_data(&self) -> SessionData {
        SessionData {
            todo_lists: self.todo_lists.to_plain_data(),
            flash: self.flash.clone(),
        }
    }

    pub fn flash(&mut self, message: FlashMessage) {
        self.flash.push(message);
    }

    pub fn flash_success(&mut self, message: impl Into<String>) {
        self.flash(FlashMessage::success(message));
    }

    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.flash(FlashMessage::error(message));
    }

    /// Drain queued flash messages.
    pub fn take_flash(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.flash)
    }
}

/// Request-scoped handle to the current session, shared between the session
/// middleware and the handler through request extensions.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    is_new: bool,
    state: Arc<Mutex<SessionState>>,
}

impl Session {
    /// A brand-new session with a fresh id.
    pub fn fresh() -> Self {
        Self {
            id: Uuid::new_v4(),
            is_new: true,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    pub fn restore(id: Uuid, data: SessionData) -> Self {
        Self {
            id,
            is_new: false,
            state: Arc::new(Mutex::new(SessionState::from_data(id, data))),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Whether the client has not been given this session's cookie yet.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Run `f` with exclusive access to the session state.
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.state.lock().expect("session lock poisoned");
        f(&mut state)
    }

    pub fn to_data(&self) -> SessionData {
        self.with(|state| state.to_data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoListRecord;

    #[test]
    fn flash_is_drained_once() {
        let session = Session::fresh();
        session.with(|state| state.flash_success("Saved"));

        let first = session.with(SessionState::take_flash);
        assert_eq!(first, vec![FlashMessage::success("Saved")]);
        assert!(session.with(SessionState::take_flash).is_empty());
    }

    #[test]
    fn restore_round_trips_data() {
        let session = Session::fresh();
        session.with(|state| {
            let id = state.todo_lists.create_list("Groceries").unwrap().id();
            state.todo_lists.create_todo(id, "Milk").unwrap();
            state.flash_error("Oops");
        });

        let data = session.to_data();
        let restored = Session::restore(session.id(), data.clone());
        assert!(!restored.is_new());
        assert_eq!(restored.to_data(), data);
    }

    #[test]
    fn corrupt_lists_are_discarded() {
        let data = SessionData {
            todo_lists: CollectionRecord {
                next_id: 2,
                lists: vec![TodoListRecord {
                    id: 1,
                    title: String::new(),
                    todos: vec![],
                }],
            },
            flash: vec![FlashMessage::success("kept")],
        };
        let session = Session::restore(Uuid::new_v4(), data);
        session.with(|state| {
            assert!(state.todo_lists.is_empty());
            assert_eq!(state.take_flash().len(), 1);
        });
    }
}
