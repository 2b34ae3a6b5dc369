// Behaviour of the task list and its filtered view.
use std::collections::BTreeSet;
use watodo::error::TaskError;
use watodo::model::sample::sample_task_list;
use watodo::model::{ReadOnlyTaskList, Task, TaskList, keyword_set};
use watodo::store::{Model, ModelManager};

fn sample_model() -> ModelManager {
    ModelManager::new(sample_task_list().unwrap(), 20)
}

fn descriptions(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|t| t.description.to_string()).collect()
}

#[test]
fn test_add_new_task_appears_in_both_views() {
    let mut model = sample_model();
    let task = Task::floating("Buy groceries", &["errands"]).unwrap();

    model.add_task(task.clone()).unwrap();

    assert!(model.task_list().contains(&task));
    assert_eq!(model.filtered_task_list().last(), Some(&&task));
}

#[test]
fn test_add_to_filtered_model_only_shows_matches() {
    let mut model = sample_model();
    model.update_filtered_task_list(keyword_set(&["school"]));

    let other = Task::floating("Buy groceries", &["errands"]).unwrap();
    model.add_task(other.clone()).unwrap();
    assert!(model.task_list().contains(&other));
    assert!(!model.filtered_task_list().contains(&&other));

    let matching = Task::floating("Revise for school quiz", &[] as &[&str]).unwrap();
    model.add_task(matching.clone()).unwrap();
    assert!(model.filtered_task_list().contains(&&matching));
}

#[test]
fn test_add_duplicate_leaves_list_unchanged() {
    let mut model = sample_model();
    let before = model.task_list().tasks().to_vec();
    let dup = Task::floating("Learn airflares", &["dance"]).unwrap();

    assert_eq!(model.add_task(dup), Err(TaskError::DuplicateTask));
    assert_eq!(model.task_list().tasks(), before.as_slice());
}

#[test]
fn test_delete_absent_task_leaves_list_unchanged() {
    let mut model = sample_model();
    let before = model.task_list().tasks().to_vec();
    let missing = Task::floating("Never added", &[] as &[&str]).unwrap();

    assert_eq!(model.delete_task(&missing), Err(TaskError::TaskNotFound));
    assert_eq!(model.task_list().tasks(), before.as_slice());
}

#[test]
fn test_filter_school_matches_description_or_tag_in_order() {
    let mut list = sample_task_list().unwrap();
    list.add_task(Task::floating("Walk to SCHOOL", &[] as &[&str]).unwrap())
        .unwrap();
    list.add_task(Task::floating("Buy schoolbag", &[] as &[&str]).unwrap())
        .unwrap();
    let mut model = ModelManager::new(list, 20);

    model.update_filtered_task_list(keyword_set(&["school"]));

    assert_eq!(
        descriptions(&model.filtered_task_list()),
        vec!["Do CS2103 V0.1", "Walk to SCHOOL"]
    );

    model.update_filtered_list_to_show_all();
    assert_eq!(model.filtered_task_list().len(), 6);
}

#[test]
fn test_filter_any_keyword() {
    let mut model = sample_model();
    model.update_filtered_task_list(keyword_set(&["DANCE", "reading"]));
    assert_eq!(
        descriptions(&model.filtered_task_list()),
        vec!["Read Lord of The Rings", "Learn airflares"]
    );
}

#[test]
fn test_reset_to_empty_clears_both_views() {
    let mut model = sample_model();
    model.update_filtered_task_list(keyword_set(&["school"]));

    model.reset_data(&TaskList::new());

    assert!(model.task_list().is_empty());
    assert!(model.filtered_task_list().is_empty());
}

#[test]
fn test_update_out_of_range_index() {
    let mut model = sample_model();
    model.update_filtered_task_list(keyword_set(&["dance"]));
    let edited = Task::floating("Anything", &[] as &[&str]).unwrap();

    assert_eq!(
        model.update_task(1, edited),
        Err(TaskError::IndexOutOfBounds { index: 1, len: 1 })
    );
}

#[test]
fn test_update_colliding_with_other_task() {
    let mut model = sample_model();
    let copy_of_first = model.task_list().tasks()[0].clone();

    assert_eq!(model.update_task(1, copy_of_first), Err(TaskError::DuplicateTask));
    assert_eq!(model.task_list().tasks()[1].description.as_str(), "Do CS2103 V0.1");
}

#[test]
fn test_undo_restores_each_mutation_in_turn() {
    let mut model = sample_model();
    let original = model.task_list().tasks().to_vec();

    let extra = Task::floating("Extra", &[] as &[&str]).unwrap();
    model.add_task(extra.clone()).unwrap();
    model.delete_task(&original[0]).unwrap();
    model.reset_data(&TaskList::new());

    model.undo().unwrap();
    assert_eq!(model.task_list().len(), 4);
    assert!(!model.task_list().contains(&original[0]));

    model.undo().unwrap();
    assert!(model.task_list().contains(&original[0]));
    assert!(model.task_list().contains(&extra));

    model.undo().unwrap();
    assert_eq!(model.task_list().tasks(), original.as_slice());

    assert_eq!(model.undo(), Err(TaskError::NothingToUndo));
}

#[test]
fn test_undo_restores_task_replaced_by_update() {
    let mut model = sample_model();
    let original = model.task_list().tasks().to_vec();

    let edited = Task::floating("Read The Hobbit", &["reading"]).unwrap();
    model.update_task(0, edited.clone()).unwrap();
    assert_eq!(model.task_list().tasks()[0], edited);

    model.undo().unwrap();
    assert_eq!(model.task_list().tasks(), original.as_slice());
    assert_eq!(model.filtered_task_list().len(), original.len());
}

#[test]
fn test_filter_change_keeps_undo_history_alone() {
    let mut model = sample_model();
    model.update_filtered_task_list(BTreeSet::from(["dance".to_string()]));
    assert!(!model.can_undo());
}
