use std::collections::HashSet;

use super::{CollectionRecord, Todo, TodoError, TodoList};

/// Hands out list and todo ids for one session.
///
/// Lists and todos draw from the same sequence, so an id is unique across the
/// whole collection and is never handed out twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    /// The id the next call to [`IdSequence::next_id`] will return.
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Fails once the sequence reaches `u64::MAX`, which is never handed out.
    pub fn next_id(&mut self) -> Result<u64, TodoError> {
        let id = self.next;
        self.next = id.checked_add(1).ok_or(TodoError::IdExhausted(id))?;
        Ok(id)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

/// All todo lists belonging to one session, in creation order.
///
/// Title uniqueness is the validator's concern; this type only offers
/// [`TodoLists::find_by_title`] so it can be checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoLists {
    lists: Vec<TodoList>,
    ids: IdSequence,
}

impl TodoLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn next_id(&self) -> u64 {
        self.ids.peek()
    }

    pub fn find_by_id(&self, list_id: u64) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id() == list_id)
    }

    /// Exact, case-sensitive title match.
    pub fn find_by_title(&self, title: &str) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.title() == title)
    }

    pub fn list(&self, list_id: u64) -> Result<&TodoList, TodoError> {
        self.find_by_id(list_id)
            .ok_or_else(|| TodoError::list_not_found(list_id))
    }

    pub fn list_mut(&mut self, list_id: u64) -> Result<&mut TodoList, TodoError> {
        self.lists
            .iter_mut()
            .find(|list| list.id() == list_id)
            .ok_or_else(|| TodoError::list_not_found(list_id))
    }

    pub fn todo_mut(&mut self, list_id: u64, todo_id: u64) -> Result<&mut Todo, TodoError> {
        self.list_mut(list_id)?
            .find_by_id_mut(todo_id)
            .ok_or_else(|| TodoError::todo_not_found(list_id, todo_id))
    }

    /// Append a new empty list. No id is consumed when the title is rejected.
    pub fn create_list(&mut self, title: impl Into<String>) -> Result<&TodoList, TodoError> {
        let list = TodoList::create(self.ids.peek(), title)?;
        self.ids.next_id()?;
        let index = self.lists.len();
        self.lists.push(list);
        Ok(&self.lists[index])
    }

    /// Append a new todo to the end of list `list_id`.
    pub fn create_todo(
        &mut self,
        list_id: u64,
        title: impl Into<String>,
    ) -> Result<&Todo, TodoError> {
        let id = self.ids.peek();
        let list = self
            .lists
            .iter_mut()
            .find(|list| list.id() == list_id)
            .ok_or_else(|| TodoError::list_not_found(list_id))?;
        let todo = Todo::create(id, title)?;
        self.ids.next_id()?;
        Ok(list.add(todo))
    }

    pub fn remove_list(&mut self, list_id: u64) -> Result<TodoList, TodoError> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id() == list_id)
            .ok_or_else(|| TodoError::list_not_found(list_id))?;
        Ok(self.lists.remove(index))
    }

    pub fn remove_todo(&mut self, list_id: u64, todo_id: u64) -> Result<Todo, TodoError> {
        let list = self.list_mut(list_id)?;
        let index = list
            .find_by_id(todo_id)
            .and_then(|todo| list.find_index_of(todo))
            .ok_or_else(|| TodoError::todo_not_found(list_id, todo_id))?;
        list.remove_at(index)
    }

    /// Rebuild the collection from its stored shape.
    ///
    /// Every id in the record must be distinct and below `u64::MAX`. The id sequence resumes past the
    /// largest id present even if the stored counter lags behind.
    pub fn from_plain_data(record: CollectionRecord) -> Result<Self, TodoError> {
        let mut seen = HashSet::new();
        let mut max_id = 0;
        let mut lists = Vec::with_capacity(record.lists.len());

        for list_record in record.lists {
            let list = TodoList::from_plain_data(list_record)?;
            let ids = std::iter::once(list.id()).chain(list.todos().iter().map(Todo::id));
            for id in ids {
                if !seen.insert(id) {
                    return Err(TodoError::DuplicateId(id));
                }
            }
            max_id = max_id.max(list.max_id());
            lists.push(list);
        }

        let after_max = max_id
            .checked_add(1)
            .ok_or(TodoError::IdExhausted(max_id))?;
        Ok(Self {
            lists,
            ids: IdSequence::starting_at(record.next_id.max(after_max)),
        })
    }

    pub fn to_plain_data(&self) -> CollectionRecord {
        CollectionRecord {
            next_id: self.ids.peek(),
            lists: self.lists.iter().map(TodoList::to_plain_data).collect(),
        }
    }
}
