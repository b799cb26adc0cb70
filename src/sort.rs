//! Display ordering for todo lists and todos.
//!
//! Both orderings use the same two-phase rule: items that are not done come
//! first, done items trail, and each group is ordered by lower-cased title.
//! Items whose lower-cased titles are equal have no promised relative order;
//! the sort used here is stable, so they keep their input order.

use std::cmp::Ordering;

use crate::models::{Todo, TodoList};

/// Something the sorter can place: it has a title and a completion state.
pub trait Sortable {
    fn title(&self) -> &str;
    fn is_done(&self) -> bool;
}

impl Sortable for Todo {
    fn title(&self) -> &str {
        Todo::title(self)
    }

    fn is_done(&self) -> bool {
        Todo::is_done(self)
    }
}

impl Sortable for TodoList {
    fn title(&self) -> &str {
        TodoList::title(self)
    }

    fn is_done(&self) -> bool {
        TodoList::is_done(self)
    }
}

/// Case-insensitive three-way comparison of two titles.
pub fn compare_by_title<T: Sortable + ?Sized>(a: &T, b: &T) -> Ordering {
    a.title().to_lowercase().cmp(&b.title().to_lowercase())
}

/// Order `items` not-done first, then done, each group by title.
///
/// The input is left untouched; the result borrows from it.
pub fn sort_by_completion<T: Sortable>(items: &[T]) -> Vec<&T> {
    let (mut undone, mut done): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|item| !item.is_done());
    undone.sort_by(|a, b| compare_by_title(*a, *b));
    done.sort_by(|a, b| compare_by_title(*a, *b));
    undone.extend(done);
    undone
}

pub fn sort_todo_lists(lists: &[TodoList]) -> Vec<&TodoList> {
    sort_by_completion(lists)
}

pub fn sort_todos(list: &TodoList) -> Vec<&Todo> {
    sort_by_completion(list.todos())
}
