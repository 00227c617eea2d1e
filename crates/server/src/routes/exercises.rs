use axum::{
    extract::FromRef,
    http::StatusCode,
    routing::get,
    Router,
};
use deadpool_sqlite::Pool;
use shared::{
    api::{
        error::{Nothing, ServerError},
        response_errors::{ExerciseError, FetchError},
        Object,
    },
    model::{Exercise, ExerciseWithSets, NewExercise, UpdateExercise, ValidateModel},
};
use tracing::{debug, instrument};

use crate::{
    db::DatabaseConnection,
    extract::{Json, Path},
};

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Pool: FromRef<S>,
{
    // The id is the workout id for GET/POST and the exercise id for PUT/DELETE
    Router::new().route(
        Object::ExerciseId.path(),
        get(fetch_workout_exercises)
            .post(create_exercise)
            .put(update_exercise)
            .delete(delete_exercise),
    )
}

#[instrument(skip(conn))]
async fn fetch_workout_exercises(
    DatabaseConnection(conn): DatabaseConnection,
    Path(workout_id): Path<i64>,
) -> Result<Json<Vec<ExerciseWithSets>>, ServerError<FetchError>> {
    let exercises = conn
        .interact(move |conn| {
            Ok::<_, ServerError<FetchError>>(ExerciseWithSets::fetch_by_workout(conn, workout_id)?)
        })
        .await??;

    Ok(Json(exercises))
}

#[instrument(skip(conn))]
async fn create_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(workout_id): Path<i64>,
    Json(new_exercise): Json<NewExercise>,
) -> Result<(StatusCode, Json<Exercise>), ServerError<Nothing>> {
    new_exercise.validate()?;

    let exercise = conn
        .interact(move |conn| Ok::<_, ServerError<Nothing>>(new_exercise.create(conn, workout_id)?))
        .await??;
    debug!(id = exercise.id, "Created exercise");

    Ok((StatusCode::CREATED, Json(exercise)))
}

#[instrument(skip(conn))]
async fn update_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
    Json(update): Json<UpdateExercise>,
) -> Result<Json<Exercise>, ServerError<ExerciseError>> {
    update.validate()?;

    let exercise = conn
        .interact(move |conn| {
            let exercise = Exercise::replace_sets(conn, id, &update.sets)?
                .ok_or(ExerciseError::NotFound { id })?;
            Ok::<_, ServerError<ExerciseError>>(exercise)
        })
        .await??;

    Ok(Json(exercise))
}

#[instrument(skip(conn))]
async fn delete_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError<Nothing>> {
    let existed = conn
        .interact(move |conn| Ok::<_, ServerError<Nothing>>(Exercise::delete_with_sets(conn, id)?))
        .await??;
    debug!(existed, "Deleted exercise");

    Ok(StatusCode::NO_CONTENT)
}
