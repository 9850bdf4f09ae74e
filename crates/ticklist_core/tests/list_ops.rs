use ticklist_core::{Subtask, Task, TaskList, TaskListError};

#[test]
fn add_task_appends_with_defaults_and_trims_title() {
    let mut list = TaskList::new();

    let id = list.add_task("  buy milk  ").unwrap();
    assert_eq!(list.len(), 1);

    let task = &list.tasks()[0];
    assert_eq!(task.id, id);
    assert_eq!(task.title, "buy milk");
    assert!(!task.completed);
    assert!(task.subtasks.is_empty());
    assert!(task.expanded);
}

#[test]
fn blank_titles_are_rejected_for_tasks_and_subtasks() {
    let mut list = TaskList::new();
    assert_eq!(list.add_task("   "), Err(TaskListError::BlankTitle));
    assert!(list.is_empty());

    let id = list.add_task("parent").unwrap();
    assert_eq!(list.add_subtask(id, "\t"), Err(TaskListError::BlankTitle));
    assert!(list.tasks()[0].subtasks.is_empty());
}

#[test]
fn ids_are_unique_across_tasks_and_subtasks() {
    let mut list = TaskList::new();
    let first = list.add_task("one").unwrap();
    let second = list.add_task("two").unwrap();
    let sub_first = list.add_subtask(first, "a").unwrap();
    let sub_second = list.add_subtask(second, "b").unwrap();

    let mut ids = vec![first, second, sub_first, sub_second];
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn from_tasks_resumes_the_id_counter_above_the_snapshot() {
    let mut task = Task::new(10, "loaded");
    task.subtasks.push(Subtask::new(42, "old subtask"));
    let mut list = TaskList::from_tasks(vec![task]);

    let new_id = list.add_task("fresh").unwrap();
    assert!(new_id > 42);
}

#[test]
fn toggle_task_flips_the_flag_both_ways() {
    let mut list = TaskList::new();
    let id = list.add_task("flip me").unwrap();

    assert_eq!(list.toggle_task(id), Ok(true));
    assert_eq!(list.toggle_task(id), Ok(false));
}

#[test]
fn toggle_subtask_rolls_completion_up_to_the_parent() {
    let mut list = TaskList::new();
    let task_id = list.add_task("parent").unwrap();
    let first = list.add_subtask(task_id, "one").unwrap();
    let second = list.add_subtask(task_id, "two").unwrap();

    list.toggle_subtask(task_id, first).unwrap();
    assert!(!list.tasks()[0].completed);

    list.toggle_subtask(task_id, second).unwrap();
    assert!(list.tasks()[0].completed);

    // Un-ticking any subtask re-opens the parent.
    list.toggle_subtask(task_id, first).unwrap();
    assert!(!list.tasks()[0].completed);
}

#[test]
fn delete_task_removes_exactly_that_task() {
    let mut list = TaskList::new();
    let first = list.add_task("first").unwrap();
    let second = list.add_task("second").unwrap();
    let kept_subtask = list.add_subtask(second, "kept").unwrap();

    list.delete_task(first).unwrap();

    assert_eq!(list.len(), 1);
    assert_eq!(list.tasks()[0].id, second);
    assert_eq!(list.tasks()[0].subtasks[0].id, kept_subtask);
}

#[test]
fn delete_subtask_keeps_the_parent_flag_as_is() {
    let mut list = TaskList::new();
    let task_id = list.add_task("parent").unwrap();
    let done = list.add_subtask(task_id, "done").unwrap();
    let open = list.add_subtask(task_id, "open").unwrap();
    list.toggle_subtask(task_id, done).unwrap();

    // Parent is open (1 of 2); removing the open subtask does not re-derive.
    list.delete_subtask(task_id, open).unwrap();
    assert!(!list.tasks()[0].completed);
    assert_eq!(list.tasks()[0].subtasks.len(), 1);
}

#[test]
fn unknown_ids_leave_the_store_untouched() {
    let mut list = TaskList::new();
    let task_id = list.add_task("only").unwrap();
    let before = list.clone();

    assert_eq!(list.toggle_task(99), Err(TaskListError::TaskNotFound(99)));
    assert_eq!(list.delete_task(99), Err(TaskListError::TaskNotFound(99)));
    assert_eq!(
        list.add_subtask(99, "orphan"),
        Err(TaskListError::TaskNotFound(99))
    );
    assert_eq!(
        list.toggle_subtask(task_id, 99),
        Err(TaskListError::SubtaskNotFound {
            task_id,
            subtask_id: 99
        })
    );
    assert_eq!(
        list.delete_subtask(task_id, 99),
        Err(TaskListError::SubtaskNotFound {
            task_id,
            subtask_id: 99
        })
    );
    assert_eq!(list.toggle_expanded(99), Err(TaskListError::TaskNotFound(99)));

    assert_eq!(list, before);
}

#[test]
fn toggle_expanded_flips_subtask_visibility() {
    let mut list = TaskList::new();
    let id = list.add_task("foldable").unwrap();

    assert_eq!(list.toggle_expanded(id), Ok(false));
    assert_eq!(list.toggle_expanded(id), Ok(true));
}
