//! View models handed to the page templates
//!
//! Each page is a serializable struct implementing [`View`]. The structs hold
//! plain data already in display order; templates never sort or count.

use listkeeper_todo::display::{
    is_list_complete, sorted_lists, sorted_todos, todos_count, todos_remaining_count,
};
use listkeeper_todo::{Flash, Lists, Todo, TodoList};
use serde::Serialize;

/// A page that can be rendered inside the layout
pub trait View: Serialize {
    /// Name of the body template
    const TEMPLATE: &'static str;

    /// Text for the `<title>` element
    fn title(&self) -> String;

    /// Links shown in the page header
    fn header_links(&self) -> Vec<HeaderLink> {
        Vec::new()
    }
}

/// A link in the page header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderLink {
    pub href: String,
    pub label: String,
}

impl HeaderLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }

    fn all_lists() -> Self {
        Self::new("/lists", "All Lists")
    }
}

/// One list with its counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    pub id: u64,
    pub name: String,
    pub todos_count: usize,
    pub remaining_count: usize,
    pub completed_count: usize,
    pub complete: bool,
}

impl From<&TodoList> for ListSummary {
    fn from(list: &TodoList) -> Self {
        let todos_count = todos_count(list);
        let remaining_count = todos_remaining_count(list);
        Self {
            id: list.id.get(),
            name: list.name.clone(),
            todos_count,
            remaining_count,
            completed_count: todos_count - remaining_count,
            complete: is_list_complete(list),
        }
    }
}

/// One todo row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoRow {
    pub id: u64,
    pub name: String,
    pub completed: bool,
}

impl From<&Todo> for TodoRow {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.get(),
            name: todo.name.clone(),
            completed: todo.completed,
        }
    }
}

/// `GET /lists`
#[derive(Debug, Clone, Serialize)]
pub struct ListsView {
    pub lists: Vec<ListSummary>,
}

impl ListsView {
    pub fn new(lists: &Lists) -> Self {
        Self {
            lists: sorted_lists(lists).into_iter().map(ListSummary::from).collect(),
        }
    }
}

impl View for ListsView {
    const TEMPLATE: &'static str = "lists";

    fn title(&self) -> String {
        "Todo Lists".to_string()
    }

    fn header_links(&self) -> Vec<HeaderLink> {
        vec![HeaderLink::new("/lists/new", "New List")]
    }
}

/// `GET /lists/new`, and the same form redisplayed after a failed create
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewListView {
    /// Previously submitted name
    pub list_name: String,
}

impl NewListView {
    pub fn new(list_name: impl Into<String>) -> Self {
        Self {
            list_name: list_name.into(),
        }
    }
}

impl View for NewListView {
    const TEMPLATE: &'static str = "new_list";

    fn title(&self) -> String {
        "New List".to_string()
    }

    fn header_links(&self) -> Vec<HeaderLink> {
        vec![HeaderLink::all_lists()]
    }
}

/// `GET /lists/:id/edit`, and the form redisplayed after a failed rename
#[derive(Debug, Clone, Serialize)]
pub struct EditListView {
    pub list: ListSummary,
    /// Value for the name input
    pub list_name: String,
}

impl EditListView {
    /// Edit form prefilled with the list's current name
    pub fn new(list: &TodoList) -> Self {
        Self::with_input(list, list.name.clone())
    }

    /// Edit form prefilled with a rejected submission
    pub fn with_input(list: &TodoList, list_name: impl Into<String>) -> Self {
        Self {
            list: ListSummary::from(list),
            list_name: list_name.into(),
        }
    }
}

impl View for EditListView {
    const TEMPLATE: &'static str = "edit_list";

    fn title(&self) -> String {
        format!("Edit {}", self.list.name)
    }

    fn header_links(&self) -> Vec<HeaderLink> {
        vec![HeaderLink::new(format!("/lists/{}", self.list.id), "Cancel")]
    }
}

/// `GET /lists/:id`, and the page redisplayed after a failed add
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub list: ListSummary,
    pub todos: Vec<TodoRow>,
    /// Value for the new-todo input
    pub todo: String,
}

impl ListView {
    pub fn new(list: &TodoList) -> Self {
        Self::with_input(list, "")
    }

    pub fn with_input(list: &TodoList, todo: impl Into<String>) -> Self {
        Self {
            list: ListSummary::from(list),
            todos: sorted_todos(list).into_iter().map(TodoRow::from).collect(),
            todo: todo.into(),
        }
    }
}

impl View for ListView {
    const TEMPLATE: &'static str = "list";

    fn title(&self) -> String {
        self.list.name.clone()
    }

    fn header_links(&self) -> Vec<HeaderLink> {
        vec![
            HeaderLink::all_lists(),
            HeaderLink::new(format!("/lists/{}/edit", self.list.id), "Edit List"),
        ]
    }
}

/// Variables for the layout wrapped around every page
#[derive(Debug, Clone, Serialize)]
pub struct LayoutView {
    pub title: String,
    pub header_links: Vec<HeaderLink>,
    pub success: Option<String>,
    pub error: Option<String>,
    /// Rendered page body, inserted without escaping
    pub content: String,
}

impl LayoutView {
    pub fn new<V: View>(view: &V, flash: Flash, content: String) -> Self {
        Self {
            title: view.title(),
            header_links: view.header_links(),
            success: flash.success,
            error: flash.error,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listkeeper_todo::ListId;

    #[test]
    fn test_list_summary_counts() {
        let mut lists = Lists::new();
        let id = lists.create_list("Chores").unwrap().id;
        lists.add_todo(id, "Dishes").unwrap();
        let laundry = lists.add_todo(id, "Laundry").unwrap().id;
        lists.set_todo_completed(id, laundry, true).unwrap();

        let summary = ListSummary::from(lists.find_list(id).unwrap());
        assert_eq!(summary.todos_count, 2);
        assert_eq!(summary.remaining_count, 1);
        assert_eq!(summary.completed_count, 1);
        assert!(!summary.complete);
    }

    #[test]
    fn test_list_view_orders_todos() {
        let mut list = TodoList::new(ListId::new(1), "Chores");
        let dishes = list.add_todo("Dishes").unwrap().id;
        list.add_todo("Laundry").unwrap();
        list.set_todo_completed(dishes, true).unwrap();

        let view = ListView::new(&list);
        let names: Vec<&str> = view.todos.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Laundry", "Dishes"]);
        assert_eq!(view.title(), "Chores");
        assert_eq!(view.header_links()[1].href, "/lists/1/edit");
    }

    #[test]
    fn test_edit_view_keeps_rejected_input() {
        let list = TodoList::new(ListId::new(3), "Chores");
        assert_eq!(EditListView::new(&list).list_name, "Chores");
        assert_eq!(EditListView::with_input(&list, "").list_name, "");
    }
}
