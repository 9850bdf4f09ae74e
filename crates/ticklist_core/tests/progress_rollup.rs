use ticklist_core::{overall_progress, subtask_progress, task_progress, TaskList};

#[test]
fn buy_milk_scenario_completes_the_task_and_the_overall_bar() {
    let mut list = TaskList::new();

    let task_id = list.add_task("buy milk").unwrap();
    let subtask_id = list.add_subtask(task_id, "2%").unwrap();
    list.toggle_subtask(task_id, subtask_id).unwrap();

    let task = &list.tasks()[0];
    assert!(task.completed);
    assert_eq!(task_progress(task), 100);
    assert_eq!(overall_progress(list.tasks()), 100);
}

#[test]
fn overall_progress_counts_subtasks_only() {
    let mut list = TaskList::new();

    let first = list.add_task("first").unwrap();
    let done = list.add_subtask(first, "done").unwrap();
    list.add_subtask(first, "open").unwrap();
    list.toggle_subtask(first, done).unwrap();

    // A completed task without subtasks contributes nothing.
    let second = list.add_task("second").unwrap();
    list.toggle_task(second).unwrap();

    assert_eq!(overall_progress(list.tasks()), 50);
}

#[test]
fn overall_progress_is_zero_for_empty_and_subtaskless_lists() {
    let mut list = TaskList::new();
    assert_eq!(overall_progress(list.tasks()), 0);

    list.add_task("no subtasks").unwrap();
    assert_eq!(overall_progress(list.tasks()), 0);
}

#[test]
fn per_task_percentage_follows_the_subtask_ratio() {
    let mut list = TaskList::new();
    let task_id = list.add_task("thirds").unwrap();
    let first = list.add_subtask(task_id, "a").unwrap();
    list.add_subtask(task_id, "b").unwrap();
    list.add_subtask(task_id, "c").unwrap();

    assert_eq!(subtask_progress(&list.tasks()[0].subtasks), 0);

    list.toggle_subtask(task_id, first).unwrap();
    assert_eq!(subtask_progress(&list.tasks()[0].subtasks), 33);
    assert_eq!(task_progress(&list.tasks()[0]), 33);
}
