//! Todo lists and the per-session collection that owns them

use crate::error::{Result, TodoError};
use crate::ids::{next_id_above, Identified, ListId, TodoId};
use crate::validation::{validate_list_name, validate_todo_name_among};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// A single todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Create a new, incomplete todo
    pub fn new(id: TodoId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }

    /// Mark this todo as complete
    pub fn mark_complete(&mut self) {
        self.completed = true;
    }
}

impl Identified for Todo {
    fn raw_id(&self) -> u64 {
        self.id.get()
    }
}

/// A named list of todos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub todos: Vec<Todo>,
    /// Largest todo id ever allocated in this list
    #[serde(default)]
    last_todo_id: u64,
}

impl TodoList {
    /// Create an empty list
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            todos: Vec::new(),
            last_todo_id: 0,
        }
    }

    /// Find a todo by id
    pub fn find_todo(&self, id: TodoId) -> Result<&Todo> {
        self.todos
            .iter()
            .find(|todo| todo.id == id)
            .ok_or(TodoError::TodoNotFound {
                list_id: self.id,
                todo_id: id,
            })
    }

    /// Find a todo by id for modification
    pub fn find_todo_mut(&mut self, id: TodoId) -> Result<&mut Todo> {
        let list_id = self.id;
        self.todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(TodoError::TodoNotFound {
                list_id,
                todo_id: id,
            })
    }

    /// Id the next added todo will receive
    pub fn next_todo_id(&self) -> TodoId {
        TodoId::new(next_id_above(&self.todos, self.last_todo_id))
    }

    /// Validate `name` and append a new incomplete todo.
    ///
    /// Surrounding whitespace is trimmed before validation.
    pub fn add_todo(&mut self, name: &str) -> Result<&Todo> {
        let name = name.trim();
        validate_todo_name_among(name, &self.todos)?;

        let id = self.next_todo_id();
        self.last_todo_id = id.get();
        self.todos.push(Todo::new(id, name));
        debug!("Added todo {} '{}' to list {}", id, name, self.id);

        Ok(&self.todos[self.todos.len() - 1])
    }

    /// Remove a todo, returning it
    pub fn delete_todo(&mut self, id: TodoId) -> Result<Todo> {
        let index = self
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(TodoError::TodoNotFound {
                list_id: self.id,
                todo_id: id,
            })?;
        Ok(self.todos.remove(index))
    }

    /// Set the completion flag of one todo
    pub fn set_todo_completed(&mut self, id: TodoId, completed: bool) -> Result<&Todo> {
        let todo = self.find_todo_mut(id)?;
        todo.completed = completed;
        Ok(todo)
    }

    /// Mark every todo complete, returning how many changed
    pub fn complete_all(&mut self) -> usize {
        let mut changed = 0;
        for todo in self.todos.iter_mut().filter(|todo| !todo.completed) {
            todo.mark_complete();
            changed += 1;
        }
        changed
    }
}

impl Identified for TodoList {
    fn raw_id(&self) -> u64 {
        self.id.get()
    }
}

/// Every todo list belonging to one session, in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lists {
    #[serde(default)]
    lists: Vec<TodoList>,
    /// Largest list id ever allocated in this session
    #[serde(default)]
    last_list_id: u64,
}

impl Lists {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// All lists in creation order
    pub fn as_slice(&self) -> &[TodoList] {
        &self.lists
    }

    /// Iterate over lists in creation order
    pub fn iter(&self) -> std::slice::Iter<'_, TodoList> {
        self.lists.iter()
    }

    /// Number of lists
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// True when the session has no lists
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Find a list by id
    pub fn find_list(&self, id: ListId) -> Result<&TodoList> {
        trace!("Looking up list {}", id);
        self.lists
            .iter()
            .find(|list| list.id == id)
            .ok_or(TodoError::ListNotFound { id })
    }

    /// Find a list by id for modification
    pub fn find_list_mut(&mut self, id: ListId) -> Result<&mut TodoList> {
        self.lists
            .iter_mut()
            .find(|list| list.id == id)
            .ok_or(TodoError::ListNotFound { id })
    }

    /// Id the next created list will receive
    pub fn next_list_id(&self) -> ListId {
        ListId::new(next_id_above(&self.lists, self.last_list_id))
    }

    /// Validate `name` and append a new empty list.
    ///
    /// Surrounding whitespace is trimmed before validation.
    pub fn create_list(&mut self, name: &str) -> Result<&TodoList> {
        let name = name.trim();
        validate_list_name(name, &self.lists)?;

        let id = self.next_list_id();
        self.last_list_id = id.get();
        self.lists.push(TodoList::new(id, name));
        debug!("Created list {} '{}'", id, name);

        Ok(&self.lists[self.lists.len() - 1])
    }

    /// Validate `name` and rename an existing list in place.
    ///
    /// Uniqueness is checked against every list, including the one being
    /// renamed.
    pub fn rename_list(&mut self, id: ListId, name: &str) -> Result<&TodoList> {
        let name = name.trim();
        self.find_list(id)?;
        validate_list_name(name, &self.lists)?;

        let list = self.find_list_mut(id)?;
        debug!("Renaming list {} from '{}' to '{}'", id, list.name, name);
        list.name = name.to_string();
        Ok(list)
    }

    /// Remove a list and all its todos, returning it
    pub fn delete_list(&mut self, id: ListId) -> Result<TodoList> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id == id)
            .ok_or(TodoError::ListNotFound { id })?;
        Ok(self.lists.remove(index))
    }

    /// Add a todo to the list with id `list_id`
    pub fn add_todo(&mut self, list_id: ListId, name: &str) -> Result<&Todo> {
        self.find_list_mut(list_id)?.add_todo(name)
    }

    /// Remove a todo from the list with id `list_id`
    pub fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> Result<Todo> {
        self.find_list_mut(list_id)?.delete_todo(todo_id)
    }

    /// Set the completion flag of one todo
    pub fn set_todo_completed(
        &mut self,
        list_id: ListId,
        todo_id: TodoId,
        completed: bool,
    ) -> Result<&Todo> {
        self.find_list_mut(list_id)?
            .set_todo_completed(todo_id, completed)
    }

    /// Mark every todo in a list complete, returning how many changed
    pub fn complete_all(&mut self, list_id: ListId) -> Result<usize> {
        Ok(self.find_list_mut(list_id)?.complete_all())
    }
}

impl<'a> IntoIterator for &'a Lists {
    type Item = &'a TodoList;
    type IntoIter = std::slice::Iter<'a, TodoList>;

    fn into_iter(self) -> Self::IntoIter {
        self.lists.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{NameSubject, ValidationError};

    #[test]
    fn test_create_list_assigns_sequential_ids() {
        let mut lists = Lists::new();
        assert_eq!(lists.create_list("Groceries").unwrap().id, ListId::new(1));
        assert_eq!(lists.create_list("Chores").unwrap().id, ListId::new(2));
        assert_eq!(lists.len(), 2);
    }

    #[test]
    fn test_create_list_trims_name() {
        let mut lists = Lists::new();
        let list = lists.create_list("  Groceries \n").unwrap();
        assert_eq!(list.name, "Groceries");
    }

    #[test]
    fn test_whitespace_only_name_is_too_short() {
        let mut lists = Lists::new();
        let err = lists.create_list("   ").unwrap_err();
        assert!(matches!(
            err,
            TodoError::Validation(ValidationError::TooShortOrLong { .. })
        ));
        assert!(lists.is_empty());
    }

    #[test]
    fn test_create_duplicate_list_fails() {
        let mut lists = Lists::new();
        lists.create_list("Groceries").unwrap();
        let err = lists.create_list("groceries").unwrap_err();
        assert!(matches!(
            err,
            TodoError::Validation(ValidationError::DuplicateName {
                subject: NameSubject::List
            })
        ));
        assert_eq!(lists.len(), 1);
    }

    #[test]
    fn test_deleted_list_id_is_not_reused() {
        let mut lists = Lists::new();
        lists.create_list("One").unwrap();
        lists.create_list("Two").unwrap();
        lists.create_list("Three").unwrap();

        lists.delete_list(ListId::new(3)).unwrap();
        assert_eq!(lists.next_list_id(), ListId::new(4));
        assert_eq!(lists.create_list("Four").unwrap().id, ListId::new(4));
    }

    #[test]
    fn test_deleted_todo_id_is_not_reused() {
        let mut list = TodoList::new(ListId::new(1), "Chores");
        list.add_todo("Dishes").unwrap();
        list.add_todo("Laundry").unwrap();
        list.delete_todo(TodoId::new(2)).unwrap();

        assert_eq!(list.add_todo("Vacuum").unwrap().id, TodoId::new(3));
    }

    #[test]
    fn test_rename_list() {
        let mut lists = Lists::new();
        let id = lists.create_list("Chores").unwrap().id;
        lists.rename_list(id, "House chores").unwrap();
        assert_eq!(lists.find_list(id).unwrap().name, "House chores");
    }

    #[test]
    fn test_rename_rejects_other_lists_name() {
        let mut lists = Lists::new();
        lists.create_list("Chores").unwrap();
        let id = lists.create_list("Errands").unwrap().id;

        let err = lists.rename_list(id, "CHORES").unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert_eq!(lists.find_list(id).unwrap().name, "Errands");
    }

    #[test]
    fn test_rename_missing_list_is_not_found() {
        let mut lists = Lists::new();
        let err = lists.rename_list(ListId::new(9), "Anything").unwrap_err();
        assert!(matches!(err, TodoError::ListNotFound { .. }));
    }

    #[test]
    fn test_delete_missing_list_leaves_lists_unchanged() {
        let mut lists = Lists::new();
        lists.create_list("Chores").unwrap();
        let before = lists.clone();

        let err = lists.delete_list(ListId::new(42)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(lists, before);
    }

    #[test]
    fn test_todo_lookup_and_toggle() {
        let mut lists = Lists::new();
        let list_id = lists.create_list("Chores").unwrap().id;
        let todo_id = lists.add_todo(list_id, "Dishes").unwrap().id;

        let todo = lists.set_todo_completed(list_id, todo_id, true).unwrap();
        assert!(todo.completed);
        let todo = lists.set_todo_completed(list_id, todo_id, false).unwrap();
        assert!(!todo.completed);

        let err = lists
            .set_todo_completed(list_id, TodoId::new(99), true)
            .unwrap_err();
        assert!(matches!(err, TodoError::TodoNotFound { .. }));
    }

    #[test]
    fn test_add_todo_to_missing_list() {
        let mut lists = Lists::new();
        let err = lists.add_todo(ListId::new(1), "Dishes").unwrap_err();
        assert!(matches!(err, TodoError::ListNotFound { .. }));
    }

    #[test]
    fn test_complete_all_counts_changes() {
        let mut lists = Lists::new();
        let list_id = lists.create_list("Chores").unwrap().id;
        lists.add_todo(list_id, "Dishes").unwrap();
        let laundry = lists.add_todo(list_id, "Laundry").unwrap().id;
        lists.set_todo_completed(list_id, laundry, true).unwrap();

        assert_eq!(lists.complete_all(list_id).unwrap(), 1);
        let list = lists.find_list(list_id).unwrap();
        assert!(list.todos.iter().all(|todo| todo.completed));
        assert_eq!(lists.complete_all(list_id).unwrap(), 0);
    }
}
