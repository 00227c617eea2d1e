use tracing::debug;

use super::{Applied, Editor, EditorError, ExerciseId, Notification, SetField};
use crate::{api::ExerciseApi, storage::Storage};

/// Everything the workout view can ask of the editor
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    AddExercise { name: String },
    AddSet { exercise: ExerciseId },
    UpdateSet {
        exercise: ExerciseId,
        set: u64,
        field: SetField,
        value: String,
    },
    DeleteSet { exercise: ExerciseId, set: u64 },
    Reopen(ExerciseId),
    Close(ExerciseId),
    RequestDelete(ExerciseId),
    CancelDelete,
    ConfirmDelete,
    CopyRoutine,
    PasteRoutine,
}

impl Editor {
    /// Applies one intent, returning what to tell the user if anything
    pub async fn dispatch<A: ExerciseApi, S: Storage>(
        &mut self,
        api: &A,
        storage: &S,
        intent: Intent,
    ) -> Result<Option<Notification>, EditorError> {
        debug!(?intent, "Dispatching");
        match intent {
            Intent::AddExercise { name } => {
                self.add_exercise(&name);
            }
            Intent::AddSet { exercise } => {
                self.add_set(exercise)?;
            }
            Intent::UpdateSet {
                exercise,
                set,
                field,
                value,
            } => self.update_set_field(exercise, set, field, &value)?,
            Intent::DeleteSet { exercise, set } => self.delete_set(exercise, set)?,
            Intent::Reopen(exercise) => self.reopen_exercise(exercise)?,
            Intent::Close(exercise) => {
                self.close_exercise(api, exercise).await?;
            }
            Intent::RequestDelete(exercise) => self.request_delete(exercise)?,
            Intent::CancelDelete => self.cancel_delete(),
            Intent::ConfirmDelete => {
                if self.confirm_delete(api).await? == Applied::Deleted {
                    return Ok(Some(Notification::ExerciseDeleted));
                }
            }
            Intent::CopyRoutine => return self.copy_routine(storage).map(Some),
            Intent::PasteRoutine => return self.paste_routine(storage).map(Some),
        }
        Ok(None)
    }
}

#[cfg(test)]
mod test {
    use shared::model::Set;

    use super::Intent;
    use crate::{
        editor::{test::FakeExerciseApi, Editor, ExerciseId, ExerciseStatus, Notification, SetField},
        storage::MemoryStorage,
    };

    #[test]
    fn test_workout_session() {
        let api = FakeExerciseApi::default();
        let storage = MemoryStorage::new();
        let mut editor = Editor::new(1);

        tokio_test::block_on(async {
            let r = editor
                .dispatch(&api, &storage, Intent::AddExercise { name: "Squat".to_string() })
                .await
                .unwrap();
            assert_eq!(r, None);

            let exercise = editor.exercises()[0].id;
            let set = editor.exercises()[0].sets[0].id;
            for (field, value) in [(SetField::Reps, "5"), (SetField::Weight, "80")] {
                editor
                    .dispatch(
                        &api,
                        &storage,
                        Intent::UpdateSet {
                            exercise,
                            set,
                            field,
                            value: value.to_string(),
                        },
                    )
                    .await
                    .unwrap();
            }
            editor
                .dispatch(&api, &storage, Intent::Close(exercise))
                .await
                .unwrap();
        });

        let saved = &editor.exercises()[0];
        assert_eq!(saved.id, ExerciseId::Persisted(1));
        assert_eq!(saved.status, ExerciseStatus::Closed);
        assert_eq!(api.sets_of(1), vec![Set::new(5, 80.0)]);
    }

    #[test]
    fn test_confirmed_delete_notifies() {
        let api = FakeExerciseApi::default().with_exercise(2, "Row", vec![]);
        let storage = MemoryStorage::new();
        let mut editor = tokio_test::block_on(Editor::load(&api, 1)).unwrap();

        let r = tokio_test::block_on(async {
            editor
                .dispatch(&api, &storage, Intent::RequestDelete(ExerciseId::Persisted(2)))
                .await
                .unwrap();
            editor.dispatch(&api, &storage, Intent::ConfirmDelete).await
        });
        assert_eq!(r.unwrap(), Some(Notification::ExerciseDeleted));
        assert!(editor.exercises().is_empty());
    }

    #[test]
    fn test_paste_without_copy_notifies() {
        let api = FakeExerciseApi::default();
        let storage = MemoryStorage::new();
        let mut editor = Editor::new(1);

        let r = tokio_test::block_on(editor.dispatch(&api, &storage, Intent::PasteRoutine));
        assert_eq!(r.unwrap(), Some(Notification::NothingToPaste));
    }
}
