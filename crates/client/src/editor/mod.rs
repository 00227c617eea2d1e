//! The exercise and set editing state of one workout
//!
//! Every remote operation is split into a synchronous `begin_*` that marks the
//! exercise busy and hands out a request, and a `finish_*` that applies the
//! response. A response is only applied if its exercise is still waiting on
//! that exact request, anything else is discarded as stale.

use std::fmt;

use shared::model::{Exercise, NewExercise, Set, UpdateExercise};
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::{
    api::ExerciseApi,
    error::ClientError,
    storage::{keys, Storage},
};

mod exercise;
pub use exercise::*;

mod ids;
pub use ids::*;

mod intent;
pub use intent::*;

mod routine;
pub use routine::*;

#[derive(Debug, Clone, Error)]
pub enum EditorError {
    #[error("No exercise with id {0}")]
    UnknownExercise(ExerciseId),
    #[error("Exercise {exercise} has no set {set}")]
    UnknownSet { exercise: ExerciseId, set: u64 },
    #[error("Exercise {0} is closed")]
    NotEditable(ExerciseId),
    #[error("Exercise {0} is waiting on the server")]
    Busy(ExerciseId),
    #[error("No exercise is waiting for delete confirmation")]
    NoPendingDeletion,
    #[error("Routine error: {message}")]
    Routine { message: String },
    #[error(transparent)]
    Api(#[from] ClientError),
}

/// What the view shows after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    ExerciseDeleted,
    RoutineCopied,
    RoutinePasted,
    NothingToPaste,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Notification::ExerciseDeleted => "Ejercicio eliminado correctamente",
            Notification::RoutineCopied => "Rutina copiada",
            Notification::RoutinePasted => "Rutina pegada",
            Notification::NothingToPaste => "No hay rutina copiada",
        };
        f.write_str(message)
    }
}

/// Outcome of applying a server response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The exercise is closed under the id the server gave it
    Saved(ExerciseId),
    Deleted,
    /// The exercise moved on since the request was made, nothing changed
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveAction {
    Create { workout_id: i64, exercise: NewExercise },
    Update { id: i64, update: UpdateExercise },
}

impl SaveAction {
    fn sets(&self) -> &[Set] {
        match self {
            SaveAction::Create { exercise, .. } => &exercise.sets,
            SaveAction::Update { update, .. } => &update.sets,
        }
    }
}

/// A create or update handed out by [`Editor::begin_close`]
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    pub exercise: ExerciseId,
    pub seq: u64,
    pub action: SaveAction,
}

impl SaveRequest {
    pub async fn send<A: ExerciseApi>(&self, api: &A) -> Result<Exercise, ClientError> {
        match &self.action {
            SaveAction::Create {
                workout_id,
                exercise,
            } => api.create_exercise(*workout_id, exercise).await,
            SaveAction::Update { id, update } => api.update_exercise(*id, update).await,
        }
    }
}

/// A remote delete handed out by [`Editor::begin_delete`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteRequest {
    pub exercise: ExerciseId,
    pub seq: u64,
    pub id: i64,
}

#[derive(Debug, Clone)]
pub struct Editor {
    workout_id: i64,
    exercises: Vec<EditorExercise>,
    ids: LocalIdGenerator,
    next_seq: u64,
    pending_delete: Option<ExerciseId>,
}

impl Editor {
    pub fn new(workout_id: i64) -> Self {
        Self {
            workout_id,
            exercises: vec![],
            ids: LocalIdGenerator::new(),
            next_seq: 0,
            pending_delete: None,
        }
    }

    /// The editor over the stored exercises of the workout, all closed
    #[instrument(skip(api))]
    pub async fn load<A: ExerciseApi>(api: &A, workout_id: i64) -> Result<Self, EditorError> {
        let stored = api.fetch_exercises(workout_id).await.map_err(|e| {
            error!(?e, "Fetching exercises failed");
            e
        })?;

        let mut editor = Self::new(workout_id);
        editor.exercises = stored
            .iter()
            .map(|e| EditorExercise::stored(e, &mut editor.ids))
            .collect();
        debug!(count = editor.exercises.len(), "Loaded exercises");
        Ok(editor)
    }

    pub fn workout_id(&self) -> i64 {
        self.workout_id
    }

    pub fn exercises(&self) -> &[EditorExercise] {
        &self.exercises
    }

    pub fn exercise(&self, id: ExerciseId) -> Option<&EditorExercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    fn exercise_mut(&mut self, id: ExerciseId) -> Result<&mut EditorExercise, EditorError> {
        self.exercises
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(EditorError::UnknownExercise(id))
    }

    /// The exercise if its sets can be changed right now
    fn editable_mut(&mut self, id: ExerciseId) -> Result<&mut EditorExercise, EditorError> {
        let exercise = self.exercise_mut(id)?;
        if exercise.status.is_busy() {
            return Err(EditorError::Busy(id));
        }
        if !exercise.status.is_editable() {
            return Err(EditorError::NotEditable(id));
        }
        Ok(exercise)
    }

    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    /// Appends a new exercise, a blank name is ignored
    pub fn add_exercise(&mut self, name: &str) -> Option<ExerciseId> {
        if name.trim().is_empty() {
            return None;
        }
        let exercise = EditorExercise::new(name.to_string(), &mut self.ids);
        let id = exercise.id;
        self.exercises.push(exercise);
        debug!(%id, name, "Added exercise");
        Some(id)
    }

    /// Appends a blank set and returns its id
    pub fn add_set(&mut self, id: ExerciseId) -> Result<u64, EditorError> {
        let set_id = self.ids.next_id();
        self.editable_mut(id)?.sets.push(DraftSet::blank(set_id));
        Ok(set_id)
    }

    pub fn update_set_field(
        &mut self,
        id: ExerciseId,
        set: u64,
        field: SetField,
        value: &str,
    ) -> Result<(), EditorError> {
        let draft = self
            .editable_mut(id)?
            .set_mut(set)
            .ok_or(EditorError::UnknownSet { exercise: id, set })?;
        *draft.field_mut(field) = value.to_string();
        Ok(())
    }

    pub fn delete_set(&mut self, id: ExerciseId, set: u64) -> Result<(), EditorError> {
        let exercise = self.editable_mut(id)?;
        let before = exercise.sets.len();
        exercise.sets.retain(|s| s.id != set);
        if exercise.sets.len() == before {
            return Err(EditorError::UnknownSet { exercise: id, set });
        }
        Ok(())
    }

    /// Opens a closed exercise for changes, an open one is left alone
    pub fn reopen_exercise(&mut self, id: ExerciseId) -> Result<(), EditorError> {
        let exercise = self.exercise_mut(id)?;
        match exercise.status {
            ExerciseStatus::Saving | ExerciseStatus::Deleting => Err(EditorError::Busy(id)),
            ExerciseStatus::Closed => {
                exercise.status = ExerciseStatus::Editing;
                Ok(())
            }
            ExerciseStatus::New | ExerciseStatus::Editing => Ok(()),
        }
    }

    /// Marks the exercise as saving and builds the request that stores it
    ///
    /// Drafts that aren't a valid set are left out. Exercises with a local id
    /// are created, stored ones have their sets replaced
    pub fn begin_close(&mut self, id: ExerciseId) -> Result<SaveRequest, EditorError> {
        let workout_id = self.workout_id;
        let seq = self.next_seq();
        let exercise = self.editable_mut(id)?;

        let sets = exercise.valid_sets();
        let dropped = exercise.sets.len() - sets.len();
        if dropped > 0 {
            debug!(%id, dropped, "Leaving out incomplete sets");
        }

        let action = match id {
            ExerciseId::Local(_) => SaveAction::Create {
                workout_id,
                exercise: NewExercise::new(exercise.name.clone(), sets),
            },
            ExerciseId::Persisted(stored_id) => SaveAction::Update {
                id: stored_id,
                update: UpdateExercise::new(sets),
            },
        };

        exercise.pending = Some(Pending {
            seq,
            previous: exercise.status,
        });
        exercise.status = ExerciseStatus::Saving;

        Ok(SaveRequest {
            exercise: id,
            seq,
            action,
        })
    }

    /// Applies the outcome of a [`SaveRequest`]
    ///
    /// On success the exercise takes the server's id and name, keeps only
    /// the sets that were sent and is closed. On failure it goes back to how
    /// it was before the save with its drafts untouched
    pub fn finish_close(
        &mut self,
        request: &SaveRequest,
        result: Result<Exercise, ClientError>,
    ) -> Result<Applied, EditorError> {
        let Some(index) = self.waiting_on(request.exercise, request.seq) else {
            debug!(exercise = %request.exercise, seq = request.seq, "Discarding stale save response");
            return Ok(Applied::Stale);
        };

        let ids = &mut self.ids;
        let exercise = &mut self.exercises[index];
        let pending = exercise.pending.take();
        match result {
            Ok(saved) => {
                exercise.id = ExerciseId::Persisted(saved.id);
                exercise.name = saved.name;
                exercise.sets = request
                    .action
                    .sets()
                    .iter()
                    .map(|set| DraftSet::from_set(ids.next_id(), set))
                    .collect();
                exercise.status = ExerciseStatus::Closed;
                let saved_id = exercise.id;
                if self.pending_delete == Some(request.exercise) {
                    self.pending_delete = Some(saved_id);
                }
                debug!(id = %saved_id, "Saved exercise");
                Ok(Applied::Saved(saved_id))
            }
            Err(e) => {
                if let Some(pending) = pending {
                    exercise.status = pending.previous;
                }
                error!(exercise = %request.exercise, ?e, "Saving exercise failed");
                Err(e.into())
            }
        }
    }

    /// Saves the exercise and closes it
    #[instrument(skip(self, api))]
    pub async fn close_exercise<A: ExerciseApi>(
        &mut self,
        api: &A,
        id: ExerciseId,
    ) -> Result<Applied, EditorError> {
        let request = self.begin_close(id)?;
        let result = request.send(api).await;
        self.finish_close(&request, result)
    }

    /// Starts deleting the exercise
    ///
    /// An exercise that was never stored is removed straight away and `None`
    /// is returned. A stored one stays until the server confirms the delete
    pub fn begin_delete(&mut self, id: ExerciseId) -> Result<Option<DeleteRequest>, EditorError> {
        let seq = self.next_seq();
        let exercise = self.exercise_mut(id)?;
        if exercise.status.is_busy() {
            return Err(EditorError::Busy(id));
        }

        match id {
            ExerciseId::Local(_) => {
                self.exercises.retain(|e| e.id != id);
                debug!(%id, "Removed unsaved exercise");
                Ok(None)
            }
            ExerciseId::Persisted(stored_id) => {
                exercise.pending = Some(Pending {
                    seq,
                    previous: exercise.status,
                });
                exercise.status = ExerciseStatus::Deleting;
                Ok(Some(DeleteRequest {
                    exercise: id,
                    seq,
                    id: stored_id,
                }))
            }
        }
    }

    /// Applies the outcome of a [`DeleteRequest`], the exercise is only
    /// removed once the server has confirmed
    pub fn finish_delete(
        &mut self,
        request: &DeleteRequest,
        result: Result<(), ClientError>,
    ) -> Result<Applied, EditorError> {
        let Some(index) = self.waiting_on(request.exercise, request.seq) else {
            debug!(exercise = %request.exercise, seq = request.seq, "Discarding stale delete response");
            return Ok(Applied::Stale);
        };

        match result {
            Ok(()) => {
                self.exercises.remove(index);
                debug!(exercise = %request.exercise, "Deleted exercise");
                Ok(Applied::Deleted)
            }
            Err(e) => {
                let exercise = &mut self.exercises[index];
                if let Some(pending) = exercise.pending.take() {
                    exercise.status = pending.previous;
                }
                error!(exercise = %request.exercise, ?e, "Deleting exercise failed, keeping it");
                Err(e.into())
            }
        }
    }

    /// Deletes the exercise, remotely first if it was stored
    #[instrument(skip(self, api))]
    pub async fn delete_exercise<A: ExerciseApi>(
        &mut self,
        api: &A,
        id: ExerciseId,
    ) -> Result<Applied, EditorError> {
        match self.begin_delete(id)? {
            None => Ok(Applied::Deleted),
            Some(request) => {
                let result = api.delete_exercise(request.id).await;
                self.finish_delete(&request, result)
            }
        }
    }

    /// Index of the exercise if it is still waiting on request `seq`
    fn waiting_on(&self, id: ExerciseId, seq: u64) -> Option<usize> {
        self.exercises
            .iter()
            .position(|e| e.id == id && e.pending.map(|p| p.seq) == Some(seq))
    }

    /// Remembers which exercise the delete confirmation is for
    pub fn request_delete(&mut self, id: ExerciseId) -> Result<(), EditorError> {
        let exercise = self.exercise(id).ok_or(EditorError::UnknownExercise(id))?;
        if exercise.status.is_busy() {
            return Err(EditorError::Busy(id));
        }
        self.pending_delete = Some(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn pending_delete(&self) -> Option<ExerciseId> {
        self.pending_delete
    }

    /// Deletes the exercise the confirmation was requested for
    pub async fn confirm_delete<A: ExerciseApi>(&mut self, api: &A) -> Result<Applied, EditorError> {
        let id = self
            .pending_delete
            .take()
            .ok_or(EditorError::NoPendingDeletion)?;
        self.delete_exercise(api, id).await
    }

    /// Stores the workout's exercises and valid sets for pasting into another
    /// workout
    pub fn copy_routine<S: Storage>(&self, storage: &S) -> Result<Notification, EditorError> {
        let json = Routine::from_exercises(&self.exercises)
            .to_json()
            .map_err(|e| EditorError::Routine {
                message: e.to_string(),
            })?;
        storage
            .set(keys::COPIED_WORKOUT, &json)
            .map_err(|e| EditorError::Routine {
                message: e.to_string(),
            })?;
        debug!(exercises = self.exercises.len(), "Copied routine");
        Ok(Notification::RoutineCopied)
    }

    /// Appends the copied routine as new exercises and forgets it
    pub fn paste_routine<S: Storage>(&mut self, storage: &S) -> Result<Notification, EditorError> {
        let Some(json) = storage.get(keys::COPIED_WORKOUT) else {
            return Ok(Notification::NothingToPaste);
        };

        let routine = Routine::from_json(&json).map_err(|e| {
            warn!(?e, "Copied routine is malformed");
            EditorError::Routine {
                message: e.to_string(),
            }
        })?;

        for copied in routine.exercises {
            let id = ExerciseId::Local(self.ids.next_id());
            let sets = copied
                .sets
                .iter()
                .map(|set| DraftSet {
                    id: self.ids.next_id(),
                    reps: set.reps.to_string(),
                    weight: set.weight.to_string(),
                })
                .collect();
            self.exercises.push(EditorExercise {
                id,
                name: copied.name,
                sets,
                status: ExerciseStatus::New,
                pending: None,
            });
        }
        storage.remove(keys::COPIED_WORKOUT);
        debug!("Pasted routine");

        Ok(Notification::RoutinePasted)
    }

    /// Volume of one exercise, `None` if there is no such exercise
    pub fn exercise_volume(&self, id: ExerciseId) -> Option<f64> {
        self.exercise(id).map(EditorExercise::volume)
    }

    pub fn total_volume(&self) -> f64 {
        self.exercises
            .iter()
            .map(EditorExercise::volume)
            .fold(0.0, |acc, v| acc + v)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::{
        cell::{Cell, RefCell},
        collections::HashMap,
    };

    use shared::model::{Exercise, ExerciseWithSets, NewExercise, Set, UpdateExercise};

    use super::{Applied, Editor, EditorError, ExerciseId, ExerciseStatus, Notification, SaveAction, SetField};
    use crate::{
        api::ExerciseApi,
        error::ClientError,
        storage::{keys, MemoryStorage, Storage},
    };

    /// Keeps exercises in memory and can be told to fail every call
    #[derive(Debug, Default)]
    pub struct FakeExerciseApi {
        pub stored: RefCell<HashMap<i64, ExerciseWithSets>>,
        pub fail: Cell<bool>,
        pub deletes: Cell<usize>,
        next_id: Cell<i64>,
    }

    impl FakeExerciseApi {
        pub fn with_exercise(self, id: i64, name: &str, sets: Vec<Set>) -> Self {
            self.stored.borrow_mut().insert(
                id,
                ExerciseWithSets {
                    exercise: Exercise {
                        id,
                        name: name.to_string(),
                        workout_id: 1,
                    },
                    sets,
                },
            );
            self.next_id.set(self.next_id.get().max(id));
            self
        }

        fn check(&self) -> Result<(), ClientError> {
            if self.fail.get() {
                return Err(ClientError::Request {
                    message: "offline".to_string(),
                });
            }
            Ok(())
        }

        pub fn sets_of(&self, id: i64) -> Vec<Set> {
            self.stored.borrow()[&id].sets.clone()
        }
    }

    impl ExerciseApi for FakeExerciseApi {
        async fn fetch_exercises(&self, workout_id: i64) -> Result<Vec<ExerciseWithSets>, ClientError> {
            self.check()?;
            let mut exercises: Vec<_> = self
                .stored
                .borrow()
                .values()
                .filter(|e| e.exercise.workout_id == workout_id)
                .cloned()
                .collect();
            exercises.sort_by_key(|e| e.exercise.id);
            Ok(exercises)
        }

        async fn create_exercise(
            &self,
            workout_id: i64,
            exercise: &NewExercise,
        ) -> Result<Exercise, ClientError> {
            self.check()?;
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            let created = Exercise {
                id,
                name: exercise.name.clone(),
                workout_id,
            };
            self.stored.borrow_mut().insert(
                id,
                ExerciseWithSets {
                    exercise: created.clone(),
                    sets: exercise.sets.clone(),
                },
            );
            Ok(created)
        }

        async fn update_exercise(&self, id: i64, update: &UpdateExercise) -> Result<Exercise, ClientError> {
            self.check()?;
            let mut stored = self.stored.borrow_mut();
            let exercise = stored.get_mut(&id).ok_or(ClientError::Request {
                message: "not found".to_string(),
            })?;
            exercise.sets = update.sets.clone();
            Ok(exercise.exercise.clone())
        }

        async fn delete_exercise(&self, id: i64) -> Result<(), ClientError> {
            self.check()?;
            self.deletes.set(self.deletes.get() + 1);
            self.stored.borrow_mut().remove(&id);
            Ok(())
        }
    }

    fn offline() -> ClientError {
        ClientError::Request {
            message: "offline".to_string(),
        }
    }

    fn fill(editor: &mut Editor, id: ExerciseId, index: usize, reps: &str, weight: &str) {
        let set = editor.exercise(id).unwrap().sets[index].id;
        editor.update_set_field(id, set, SetField::Reps, reps).unwrap();
        editor.update_set_field(id, set, SetField::Weight, weight).unwrap();
    }

    fn loaded(api: &FakeExerciseApi) -> Editor {
        tokio_test::block_on(Editor::load(api, 1)).unwrap()
    }

    #[test]
    fn test_load_starts_closed() {
        let api = FakeExerciseApi::default().with_exercise(3, "Bench", vec![Set::new(5, 60.0)]);
        let editor = loaded(&api);

        assert_eq!(editor.exercises().len(), 1);
        let exercise = &editor.exercises()[0];
        assert_eq!(exercise.id, ExerciseId::Persisted(3));
        assert_eq!(exercise.status, ExerciseStatus::Closed);
        assert_eq!(exercise.sets[0].reps, "5");
        assert_eq!(exercise.sets[0].weight, "60");
    }

    #[test]
    fn test_load_failure_is_reported() {
        let api = FakeExerciseApi::default();
        api.fail.set(true);
        let r = tokio_test::block_on(Editor::load(&api, 1));
        assert!(matches!(r, Err(EditorError::Api(_))));
    }

    #[test]
    fn test_blank_name_adds_nothing() {
        let mut editor = Editor::new(1);
        assert_eq!(editor.add_exercise("   "), None);
        assert!(editor.exercises().is_empty());
    }

    #[test]
    fn test_new_exercise_is_editable_with_one_set() {
        let mut editor = Editor::new(1);
        let id = editor.add_exercise("Squat").unwrap();
        let exercise = editor.exercise(id).unwrap();
        assert!(id.is_local());
        assert_eq!(exercise.status, ExerciseStatus::New);
        assert_eq!(exercise.sets.len(), 1);

        editor.add_set(id).unwrap();
        assert_eq!(editor.exercise(id).unwrap().sets.len(), 2);
    }

    #[test]
    fn test_closed_exercise_rejects_changes() {
        let api = FakeExerciseApi::default().with_exercise(3, "Bench", vec![Set::new(5, 60.0)]);
        let mut editor = loaded(&api);
        let id = ExerciseId::Persisted(3);
        let set = editor.exercise(id).unwrap().sets[0].id;

        assert!(matches!(editor.add_set(id), Err(EditorError::NotEditable(_))));
        assert!(matches!(
            editor.update_set_field(id, set, SetField::Reps, "8"),
            Err(EditorError::NotEditable(_))
        ));
        assert!(matches!(editor.delete_set(id, set), Err(EditorError::NotEditable(_))));
        assert_eq!(editor.exercise(id).unwrap().sets[0].reps, "5");

        editor.reopen_exercise(id).unwrap();
        assert_eq!(editor.exercise(id).unwrap().status, ExerciseStatus::Editing);
        editor.update_set_field(id, set, SetField::Reps, "8").unwrap();
        assert_eq!(editor.exercise(id).unwrap().sets[0].reps, "8");
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let mut editor = Editor::new(1);
        assert!(matches!(
            editor.add_set(ExerciseId::Persisted(9)),
            Err(EditorError::UnknownExercise(_))
        ));
        let id = editor.add_exercise("Squat").unwrap();
        assert!(matches!(editor.delete_set(id, 1), Err(EditorError::UnknownSet { .. })));
    }

    #[test]
    fn test_close_creates_with_valid_sets_only() {
        let api = FakeExerciseApi::default();
        let mut editor = Editor::new(1);
        let id = editor.add_exercise("Squat").unwrap();
        fill(&mut editor, id, 0, "4", "10");
        editor.add_set(id).unwrap();
        fill(&mut editor, id, 1, "5", "0");
        editor.add_set(id).unwrap();
        fill(&mut editor, id, 2, "3", "x");

        let applied = tokio_test::block_on(editor.close_exercise(&api, id)).unwrap();
        let Applied::Saved(saved_id) = applied else {
            panic!("expected a save, got {applied:?}");
        };

        assert_eq!(saved_id, ExerciseId::Persisted(1));
        assert_eq!(api.sets_of(1), vec![Set::new(4, 10.0)]);

        let exercise = editor.exercise(saved_id).unwrap();
        assert!(exercise.is_closed());
        assert_eq!(exercise.sets.len(), 1);
        assert!(editor.exercise(id).is_none());
    }

    #[test]
    fn test_close_stored_exercise_replaces_sets() {
        let api = FakeExerciseApi::default().with_exercise(3, "Bench", vec![Set::new(5, 60.0)]);
        let mut editor = loaded(&api);
        let id = ExerciseId::Persisted(3);

        editor.reopen_exercise(id).unwrap();
        editor.add_set(id).unwrap();
        fill(&mut editor, id, 1, "3", "70");

        let request = editor.begin_close(id).unwrap();
        assert!(matches!(request.action, SaveAction::Update { id: 3, .. }));

        let result = tokio_test::block_on(request.send(&api));
        assert_eq!(editor.finish_close(&request, result).unwrap(), Applied::Saved(id));
        assert_eq!(api.sets_of(3), vec![Set::new(5, 60.0), Set::new(3, 70.0)]);
        assert!(editor.exercise(id).unwrap().is_closed());
    }

    #[test]
    fn test_failed_close_keeps_drafts_open() {
        let api = FakeExerciseApi::default();
        api.fail.set(true);
        let mut editor = Editor::new(1);
        let id = editor.add_exercise("Squat").unwrap();
        fill(&mut editor, id, 0, "4", "abc");

        let r = tokio_test::block_on(editor.close_exercise(&api, id));
        assert!(matches!(r, Err(EditorError::Api(_))));

        let exercise = editor.exercise(id).unwrap();
        assert_eq!(exercise.status, ExerciseStatus::New);
        assert_eq!(exercise.sets[0].weight, "abc");
    }

    #[test]
    fn test_saving_exercise_is_busy() {
        let mut editor = Editor::new(1);
        let id = editor.add_exercise("Squat").unwrap();
        editor.begin_close(id).unwrap();

        assert_eq!(editor.exercise(id).unwrap().status, ExerciseStatus::Saving);
        assert!(matches!(editor.add_set(id), Err(EditorError::Busy(_))));
        assert!(matches!(editor.begin_close(id), Err(EditorError::Busy(_))));
        assert!(matches!(editor.begin_delete(id), Err(EditorError::Busy(_))));
        assert!(matches!(editor.reopen_exercise(id), Err(EditorError::Busy(_))));
    }

    #[test]
    fn test_stale_save_response_is_discarded() {
        let mut editor = Editor::new(1);
        let id = editor.add_exercise("Squat").unwrap();
        let first = editor.begin_close(id).unwrap();
        editor.finish_close(&first, Err(offline())).unwrap_err();

        let second = editor.begin_close(id).unwrap();
        let late = Ok(Exercise {
            id: 7,
            name: "Squat".to_string(),
            workout_id: 1,
        });
        assert_eq!(editor.finish_close(&first, late).unwrap(), Applied::Stale);
        assert_eq!(editor.exercise(id).unwrap().status, ExerciseStatus::Saving);

        let fresh = Ok(Exercise {
            id: 8,
            name: "Squat".to_string(),
            workout_id: 1,
        });
        assert_eq!(
            editor.finish_close(&second, fresh).unwrap(),
            Applied::Saved(ExerciseId::Persisted(8))
        );
    }

    #[test]
    fn test_local_exercise_is_deleted_without_the_server() {
        let api = FakeExerciseApi::default();
        let mut editor = Editor::new(1);
        let id = editor.add_exercise("Squat").unwrap();

        let applied = tokio_test::block_on(editor.delete_exercise(&api, id)).unwrap();
        assert_eq!(applied, Applied::Deleted);
        assert!(editor.exercises().is_empty());
        assert_eq!(api.deletes.get(), 0);
    }

    #[test]
    fn test_stored_exercise_is_deleted_remotely() {
        let api = FakeExerciseApi::default().with_exercise(3, "Bench", vec![Set::new(5, 60.0)]);
        let mut editor = loaded(&api);

        let applied = tokio_test::block_on(editor.delete_exercise(&api, ExerciseId::Persisted(3))).unwrap();
        assert_eq!(applied, Applied::Deleted);
        assert!(editor.exercises().is_empty());
        assert_eq!(api.deletes.get(), 1);
        assert!(api.stored.borrow().is_empty());
    }

    #[test]
    fn test_failed_delete_keeps_the_exercise() {
        let api = FakeExerciseApi::default().with_exercise(3, "Bench", vec![]);
        let mut editor = loaded(&api);
        api.fail.set(true);

        let r = tokio_test::block_on(editor.delete_exercise(&api, ExerciseId::Persisted(3)));
        assert!(matches!(r, Err(EditorError::Api(_))));
        let exercise = editor.exercise(ExerciseId::Persisted(3)).unwrap();
        assert_eq!(exercise.status, ExerciseStatus::Closed);
    }

    #[test]
    fn test_delete_confirmation() {
        let api = FakeExerciseApi::default().with_exercise(3, "Bench", vec![]);
        let mut editor = loaded(&api);
        let id = ExerciseId::Persisted(3);

        assert!(matches!(
            tokio_test::block_on(editor.confirm_delete(&api)),
            Err(EditorError::NoPendingDeletion)
        ));

        editor.request_delete(id).unwrap();
        editor.cancel_delete();
        assert_eq!(editor.pending_delete(), None);
        assert_eq!(editor.exercises().len(), 1);

        editor.request_delete(id).unwrap();
        let applied = tokio_test::block_on(editor.confirm_delete(&api)).unwrap();
        assert_eq!(applied, Applied::Deleted);
        assert_eq!(editor.pending_delete(), None);
        assert!(editor.exercises().is_empty());
    }

    #[test]
    fn test_copy_and_paste_routine() {
        let storage = MemoryStorage::new();
        let mut source = Editor::new(1);
        let id = source.add_exercise("Squat").unwrap();
        fill(&mut source, id, 0, "5", "60");
        source.add_set(id).unwrap();
        fill(&mut source, id, 1, "", "60");
        source.add_exercise("Plank").unwrap();

        assert_eq!(source.copy_routine(&storage).unwrap(), Notification::RoutineCopied);

        let mut target = Editor::new(2);
        assert_eq!(target.paste_routine(&storage).unwrap(), Notification::RoutinePasted);
        assert_eq!(storage.get(keys::COPIED_WORKOUT), None);

        let pasted = target.exercises();
        assert_eq!(pasted.len(), 2);
        assert_eq!(pasted[0].name, "Squat");
        assert_eq!(pasted[0].status, ExerciseStatus::New);
        assert!(pasted[0].id.is_local());
        assert_eq!(pasted[0].valid_sets(), vec![Set::new(5, 60.0)]);
        assert!(pasted[1].sets.is_empty());

        assert_eq!(target.paste_routine(&storage).unwrap(), Notification::NothingToPaste);
        assert_eq!(target.exercises().len(), 2);
    }

    #[test]
    fn test_malformed_routine_changes_nothing() {
        let storage = MemoryStorage::new();
        storage.set(keys::COPIED_WORKOUT, "{\"ejercicios\": 3}").unwrap();
        let mut editor = Editor::new(1);

        assert!(matches!(
            editor.paste_routine(&storage),
            Err(EditorError::Routine { .. })
        ));
        assert!(editor.exercises().is_empty());
        assert!(storage.get(keys::COPIED_WORKOUT).is_some());
    }

    #[test]
    fn test_volumes() {
        let mut editor = Editor::new(1);
        let squat = editor.add_exercise("Squat").unwrap();
        fill(&mut editor, squat, 0, "3", "10");
        editor.add_set(squat).unwrap();
        fill(&mut editor, squat, 1, "2", "x");
        let bench = editor.add_exercise("Bench").unwrap();
        fill(&mut editor, bench, 0, "5", "20");

        assert_eq!(editor.exercise_volume(squat), Some(30.0));
        assert_eq!(editor.exercise_volume(ExerciseId::Persisted(99)), None);
        assert_eq!(editor.total_volume(), 130.0);
    }

    #[test]
    fn test_empty_volumes_are_positive_zero() {
        let api = FakeExerciseApi::default();
        let mut editor = Editor::new(1);
        assert_eq!(editor.total_volume().to_string(), "0");

        let id = editor.add_exercise("Plank").unwrap();
        let applied = tokio_test::block_on(editor.close_exercise(&api, id)).unwrap();
        let Applied::Saved(id) = applied else {
            panic!("expected a save, got {applied:?}");
        };
        assert!(editor.exercise(id).unwrap().sets.is_empty());
        assert_eq!(editor.exercise_volume(id).map(|v| v.to_string()).as_deref(), Some("0"));
        assert!(editor.total_volume().is_sign_positive());
    }

    #[test]
    fn test_whole_decimal_reps_are_saved() {
        let api = FakeExerciseApi::default();
        let mut editor = Editor::new(1);
        let id = editor.add_exercise("Squat").unwrap();
        fill(&mut editor, id, 0, "5.0", "60");
        assert_eq!(editor.exercise_volume(id), Some(300.0));

        tokio_test::block_on(editor.close_exercise(&api, id)).unwrap();
        assert_eq!(api.sets_of(1), vec![Set::new(5, 60.0)]);
        assert_eq!(editor.total_volume(), 300.0);
    }

    #[test]
    fn test_delete_confirmation_follows_the_saved_id() {
        let api = FakeExerciseApi::default();
        let mut editor = Editor::new(1);
        let id = editor.add_exercise("Squat").unwrap();

        editor.request_delete(id).unwrap();
        tokio_test::block_on(editor.close_exercise(&api, id)).unwrap();
        assert_eq!(editor.pending_delete(), Some(ExerciseId::Persisted(1)));

        let applied = tokio_test::block_on(editor.confirm_delete(&api)).unwrap();
        assert_eq!(applied, Applied::Deleted);
        assert!(editor.exercises().is_empty());
        assert_eq!(api.deletes.get(), 1);
    }

    #[test]
    fn test_notification_messages() {
        assert_eq!(Notification::ExerciseDeleted.to_string(), "Ejercicio eliminado correctamente");
        assert_eq!(Notification::NothingToPaste.to_string(), "No hay rutina copiada");
    }
}
