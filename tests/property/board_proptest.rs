//! Property-based tests for board patches
//!
//! Uses proptest to check the patch algebra on arbitrary boards.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use taskboard::backend::boards::{BoardPatch, PatchResult};
    use taskboard::shared::{Board, ColumnDraft, ObjectId, SubtaskDraft, TaskDraft};

    fn column_names() -> impl Strategy<Value = Vec<String>> {
        prop::collection::hash_set("[A-Za-z ]{1,12}", 0..6).prop_map(|names| names.into_iter().collect())
    }

    fn board_with(columns: &[String]) -> Board {
        Board {
            id: ObjectId::new(),
            owner_id: ObjectId::new(),
            name: "prop".to_string(),
            columns: columns
                .iter()
                .map(|name| ColumnDraft::new(name.clone()).materialize())
                .collect(),
        }
    }

    proptest! {
        #[test]
        fn test_add_then_remove_columns_restores_board(
            existing in column_names(),
            added in column_names(),
        ) {
            let added: Vec<String> = added.into_iter().filter(|name| !existing.contains(name)).collect();
            let original = board_with(&existing);
            let mut board = original.clone();

            let push = BoardPatch::PushColumns(
                added.iter().map(|name| ColumnDraft::new(name.clone()).materialize()).collect(),
            );
            prop_assert_eq!(push.apply(&mut board), PatchResult::Applied);
            prop_assert_eq!(board.columns.len(), existing.len() + added.len());

            BoardPatch::PullColumns(added).apply(&mut board);
            prop_assert_eq!(board, original);
        }

        #[test]
        fn test_pushing_existing_column_is_conflict(existing in column_names()) {
            prop_assume!(!existing.is_empty());
            let original = board_with(&existing);
            let mut board = original.clone();

            let duplicate = ColumnDraft::new(existing[0].clone()).materialize();
            let result = BoardPatch::PushColumns(vec![duplicate]).apply(&mut board);

            prop_assert_eq!(result, PatchResult::Conflict(existing[0].clone()));
            prop_assert_eq!(board, original);
        }

        #[test]
        fn test_pulling_one_task_keeps_order(count in 1usize..12, victim in any::<prop::sample::Index>()) {
            let mut board = board_with(&["Lane".to_string()]);
            for i in 0..count {
                let task = TaskDraft::new(format!("task {}", i), "").materialize("Lane");
                BoardPatch::PushTask { column: "Lane".to_string(), task }.apply(&mut board);
            }
            let before: Vec<ObjectId> = board.columns[0].tasks.iter().map(|task| task.id).collect();
            let removed = before[victim.index(count)];

            let result = BoardPatch::PullTask { column: "Lane".to_string(), task_id: removed }.apply(&mut board);

            prop_assert_eq!(result, PatchResult::Applied);
            let after: Vec<ObjectId> = board.columns[0].tasks.iter().map(|task| task.id).collect();
            let expected: Vec<ObjectId> = before.into_iter().filter(|id| *id != removed).collect();
            prop_assert_eq!(after, expected);
        }

        #[test]
        fn test_materialized_ids_are_unique(
            tasks in prop::collection::vec(prop::collection::vec("[a-z]{1,6}", 0..5), 0..6),
        ) {
            let draft = ColumnDraft {
                name: "Lane".to_string(),
                tasks: tasks
                    .into_iter()
                    .map(|subtasks| TaskDraft {
                        title: "t".to_string(),
                        description: String::new(),
                        subtasks: subtasks.into_iter().map(SubtaskDraft::new).collect(),
                    })
                    .collect(),
            };

            let column = draft.materialize();
            let mut ids = HashSet::new();
            prop_assert!(ids.insert(column.id));
            for task in &column.tasks {
                prop_assert!(ids.insert(task.id));
                prop_assert_eq!(&task.status, "Lane");
                for subtask in &task.subtasks {
                    prop_assert!(ids.insert(subtask.id));
                }
            }
        }
    }
}
