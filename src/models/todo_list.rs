use std::collections::HashSet;

use super::{check_title, Todo, TodoError, TodoListRecord};

/// A named, ordered collection of todos.
///
/// Insertion order is the storage order. Display order is computed separately by
/// [`sort_todos`](crate::sort::sort_todos).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    id: u64,
    title: String,
    todos: Vec<Todo>,
}

impl TodoList {
    /// Create an empty list with the given id.
    pub fn create(id: u64, title: impl Into<String>) -> Result<Self, TodoError> {
        let title = title.into();
        check_title(&title)?;
        Ok(Self {
            id,
            title,
            todos: Vec::new(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Number of todos not yet done.
    pub fn remaining(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.is_done()).count()
    }

    /// A list is done when it is non-empty and every todo in it is done.
    pub fn is_done(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(Todo::is_done)
    }

    /// Append a todo. Ids are handed out by the collection, so no duplicate check.
    /// Append `todo` and return it in place.
    pub fn add(&mut self, todo: Todo) -> &Todo {
        let index = self.todos.len();
        self.todos.push(todo);
        &self.todos[index]
    }

    /// Remove and return the todo at `index`. The list is untouched on error.
    pub fn remove_at(&mut self, index: usize) -> Result<Todo, TodoError> {
        if index >= self.todos.len() {
            return Err(TodoError::IndexOutOfRange {
                index,
                len: self.todos.len(),
            });
        }
        Ok(self.todos.remove(index))
    }

    /// Position of `todo` in this list, matched by id.
    pub fn find_index_of(&self, todo: &Todo) -> Option<usize> {
        self.todos.iter().position(|t| t.id() == todo.id())
    }

    pub fn find_by_id(&self, todo_id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id() == todo_id)
    }

    pub fn find_by_id_mut(&mut self, todo_id: u64) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|t| t.id() == todo_id)
    }

    pub fn set_title(&mut self, new_title: impl Into<String>) -> Result<(), TodoError> {
        let new_title = new_title.into();
        check_title(&new_title)?;
        self.title = new_title;
        Ok(())
    }

    pub fn mark_all_done(&mut self) {
        self.todos.iter_mut().for_each(Todo::mark_done);
    }

    /// Rebuild a list from its stored shape, keeping ids, titles, flags and order.
    pub fn from_plain_data(record: TodoListRecord) -> Result<Self, TodoError> {
        check_title(&record.title)?;

        let mut seen = HashSet::with_capacity(record.todos.len());
        let todos = record
            .todos
            .into_iter()
            .map(|todo| {
                if !seen.insert(todo.id) {
                    return Err(TodoError::DuplicateId(todo.id));
                }
                Todo::from_plain_data(todo)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: record.id,
            title: record.title,
            todos,
        })
    }

    pub fn to_plain_data(&self) -> TodoListRecord {
        TodoListRecord {
            id: self.id,
            title: self.title.clone(),
            todos: self.todos.iter().map(Todo::to_plain_data).collect(),
        }
    }

    /// Highest id held by this list or any of its todos.
    pub(crate) fn max_id(&self) -> u64 {
        self.todos
            .iter()
            .map(Todo::id)
            .fold(self.id, u64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TodoRecord;

    fn list_with(titles: &[&str]) -> TodoList {
        let mut list = TodoList::create(1, "Chores").unwrap();
        for (i, title) in titles.iter().enumerate() {
            list.add(Todo::create(i as u64 + 2, *title).unwrap());
        }
        list
    }

    #[test]
    fn empty_list_is_not_done() {
        let list = TodoList::create(1, "Chores").unwrap();
        assert!(list.is_empty());
        assert!(!list.is_done());
    }

    #[test]
    fn done_only_when_every_todo_done() {
        let mut list = list_with(&["Sweep", "Dust"]);
        list.find_by_id_mut(2).unwrap().mark_done();
        assert!(!list.is_done());
        assert_eq!(list.remaining(), 1);

        list.mark_all_done();
        assert!(list.is_done());
        assert_eq!(list.remaining(), 0);
    }

    #[test]
    fn remove_at_out_of_range_leaves_list_alone() {
        let mut list = list_with(&["Sweep"]);
        assert_eq!(
            list.remove_at(1),
            Err(TodoError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(list.len(), 1);

        let mut empty = TodoList::create(9, "Empty").unwrap();
        assert!(matches!(
            empty.remove_at(0),
            Err(TodoError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn remove_at_returns_the_todo() {
        let mut list = list_with(&["Sweep", "Dust", "Mop"]);
        let removed = list.remove_at(1).unwrap();
        assert_eq!(removed.title(), "Dust");
        let titles: Vec<_> = list.todos().iter().map(Todo::title).collect();
        assert_eq!(titles, ["Sweep", "Mop"]);
    }

    #[test]
    fn find_index_of_matches_by_id() {
        let list = list_with(&["Sweep", "Dust"]);
        let copy = list.find_by_id(3).unwrap().clone();
        assert_eq!(list.find_index_of(&copy), Some(1));

        let stranger = Todo::create(99, "Dust").unwrap();
        assert_eq!(list.find_index_of(&stranger), None);
        assert!(list.find_by_id(99).is_none());
    }

    #[test]
    fn set_title_validates() {
        let mut list = list_with(&[]);
        assert!(list.set_title("x".repeat(101)).is_err());
        assert_eq!(list.title(), "Chores");
        list.set_title("House").unwrap();
        assert_eq!(list.title(), "House");
    }

    #[test]
    fn plain_data_round_trip() {
        let mut list = list_with(&["Sweep", "Dust"]);
        list.find_by_id_mut(3).unwrap().mark_done();

        let restored = TodoList::from_plain_data(list.to_plain_data()).unwrap();
        assert_eq!(restored, list);
    }

    #[test]
    fn from_plain_data_rejects_duplicate_todo_ids() {
        let record = TodoListRecord {
            id: 1,
            title: "Chores".to_string(),
            todos: vec![
                TodoRecord { id: 2, title: "Sweep".to_string(), done: false },
                TodoRecord { id: 2, title: "Dust".to_string(), done: true },
            ],
        };
        assert_eq!(
            TodoList::from_plain_data(record),
            Err(TodoError::DuplicateId(2))
        );
    }

    #[test]
    fn max_id_covers_todos() {
        assert_eq!(list_with(&["Sweep", "Dust"]).max_id(), 3);
        assert_eq!(list_with(&[]).max_id(), 1);
    }
}
