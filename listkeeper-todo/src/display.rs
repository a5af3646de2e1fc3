//! Counting and ordering helpers used when rendering lists

use crate::types::{Lists, Todo, TodoList};

/// Order `items` for display: incomplete items first, then complete ones.
///
/// Relative order inside each group is preserved.
pub fn sort_for_display<T, F>(items: &[T], is_complete: F) -> Vec<&T>
where
    F: Fn(&T) -> bool,
{
    let (complete, mut incomplete): (Vec<&T>, Vec<&T>) =
        items.iter().partition(|item| is_complete(*item));
    incomplete.extend(complete);
    incomplete
}

/// Total number of todos in a list
pub fn todos_count(list: &TodoList) -> usize {
    list.todos.len()
}

/// Number of todos in a list that are not yet complete
pub fn todos_remaining_count(list: &TodoList) -> usize {
    list.todos.iter().filter(|todo| !todo.completed).count()
}

/// A list is complete when it has at least one todo and none remain open.
pub fn is_list_complete(list: &TodoList) -> bool {
    todos_count(list) > 0 && todos_remaining_count(list) == 0
}

/// Lists in display order
pub fn sorted_lists(lists: &Lists) -> Vec<&TodoList> {
    sort_for_display(lists.as_slice(), is_list_complete)
}

/// Todos of one list in display order
pub fn sorted_todos(list: &TodoList) -> Vec<&Todo> {
    sort_for_display(&list.todos, |todo| todo.completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{ListId, TodoId};

    fn todo(id: u64, name: &str, completed: bool) -> Todo {
        Todo {
            id: TodoId::new(id),
            name: name.to_string(),
            completed,
        }
    }

    #[test]
    fn test_sort_puts_complete_last() {
        let todos = vec![todo(1, "a", true), todo(2, "b", false)];
        let names: Vec<&str> = sort_for_display(&todos, |t| t.completed)
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_sort_is_stable_within_groups() {
        let todos = vec![
            todo(1, "done-1", true),
            todo(2, "open-1", false),
            todo(3, "done-2", true),
            todo(4, "open-2", false),
        ];
        let ids: Vec<u64> = sort_for_display(&todos, |t| t.completed)
            .into_iter()
            .map(|t| t.id.get())
            .collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_empty() {
        let todos: Vec<Todo> = Vec::new();
        assert!(sort_for_display(&todos, |t| t.completed).is_empty());
    }

    #[test]
    fn test_empty_list_is_not_complete() {
        let list = TodoList::new(ListId::new(1), "Empty");
        assert_eq!(todos_count(&list), 0);
        assert_eq!(todos_remaining_count(&list), 0);
        assert!(!is_list_complete(&list));
    }

    #[test]
    fn test_list_completeness() {
        let mut list = TodoList::new(ListId::new(1), "Chores");
        list.todos.push(todo(1, "Dishes", true));
        list.todos.push(todo(2, "Laundry", false));
        assert!(!is_list_complete(&list));
        assert_eq!(todos_remaining_count(&list), 1);

        list.complete_all();
        assert!(is_list_complete(&list));
    }

    #[test]
    fn test_sorted_lists_moves_complete_lists_down() {
        let mut lists = Lists::new();
        let done = lists.create_list("Done").unwrap().id;
        lists.add_todo(done, "Only").unwrap();
        lists.complete_all(done).unwrap();
        lists.create_list("Empty").unwrap();

        let names: Vec<&str> = sorted_lists(&lists)
            .into_iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["Empty", "Done"]);
    }
}
