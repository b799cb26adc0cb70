use super::{check_title, TodoError, TodoRecord};

/// A single actionable item.
///
/// Ids come from the owning collection's [`IdSequence`](super::IdSequence) and
/// never change. Only `title` (through [`Todo::rename`]) and `done` are mutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: u64,
    title: String,
    done: bool,
}

impl Todo {
    /// Create a not-done todo with the given id.
    pub fn create(id: u64, title: impl Into<String>) -> Result<Self, TodoError> {
        let title = title.into();
        check_title(&title)?;
        Ok(Self {
            id,
            title,
            done: false,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// Flip the completion flag, returning the new state.
    pub fn toggle(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }

    /// Replace the title. On error the old title is kept.
    pub fn rename(&mut self, new_title: impl Into<String>) -> Result<(), TodoError> {
        let new_title = new_title.into();
        check_title(&new_title)?;
        self.title = new_title;
        Ok(())
    }

    pub fn from_plain_data(record: TodoRecord) -> Result<Self, TodoError> {
        check_title(&record.title)?;
        Ok(Self {
            id: record.id,
            title: record.title,
            done: record.done,
        })
    }

    pub fn to_plain_data(&self) -> TodoRecord {
        TodoRecord {
            id: self.id,
            title: self.title.clone(),
            done: self.done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_is_not_done() {
        let todo = Todo::create(1, "Buy milk").unwrap();
        assert_eq!(todo.id(), 1);
        assert_eq!(todo.title(), "Buy milk");
        assert!(!todo.is_done());
    }

    #[test]
    fn mark_done_and_undone_are_idempotent() {
        let mut todo = Todo::create(1, "Buy milk").unwrap();
        todo.mark_done();
        todo.mark_done();
        assert!(todo.is_done());
        todo.mark_undone();
        todo.mark_undone();
        assert!(!todo.is_done());
    }

    #[test]
    fn toggle_flips_state() {
        let mut todo = Todo::create(1, "Buy milk").unwrap();
        assert!(todo.toggle());
        assert!(!todo.toggle());
    }

    #[test]
    fn rename_keeps_old_title_on_error() {
        let mut todo = Todo::create(1, "Buy milk").unwrap();
        assert!(matches!(
            todo.rename(""),
            Err(TodoError::InvalidTitle { len: 0 })
        ));
        assert_eq!(todo.title(), "Buy milk");

        todo.rename("Buy oat milk").unwrap();
        assert_eq!(todo.title(), "Buy oat milk");
    }
}
