use http::Method;
use shared::{
    api::Object,
    model::{Exercise, ExerciseWithSets, NewExercise, UpdateExercise},
};

use super::{Api, Transport};
use crate::error::ClientError;

/// The exercise routes the editor depends on
#[allow(async_fn_in_trait)]
pub trait ExerciseApi {
    async fn fetch_exercises(&self, workout_id: i64) -> Result<Vec<ExerciseWithSets>, ClientError>;
    async fn create_exercise(
        &self,
        workout_id: i64,
        exercise: &NewExercise,
    ) -> Result<Exercise, ClientError>;
    /// Replaces every set of the exercise
    async fn update_exercise(&self, id: i64, update: &UpdateExercise) -> Result<Exercise, ClientError>;
    async fn delete_exercise(&self, id: i64) -> Result<(), ClientError>;
}

impl<T: Transport> ExerciseApi for Api<T> {
    async fn fetch_exercises(&self, workout_id: i64) -> Result<Vec<ExerciseWithSets>, ClientError> {
        self.request(Method::GET, &Object::ExerciseId.with_id(workout_id), None::<&()>)
            .await
    }

    async fn create_exercise(
        &self,
        workout_id: i64,
        exercise: &NewExercise,
    ) -> Result<Exercise, ClientError> {
        self.request(Method::POST, &Object::ExerciseId.with_id(workout_id), Some(exercise))
            .await
    }

    async fn update_exercise(&self, id: i64, update: &UpdateExercise) -> Result<Exercise, ClientError> {
        self.request(Method::PUT, &Object::ExerciseId.with_id(id), Some(update))
            .await
    }

    async fn delete_exercise(&self, id: i64) -> Result<(), ClientError> {
        self.request(Method::DELETE, &Object::ExerciseId.with_id(id), None::<&()>)
            .await
    }
}
