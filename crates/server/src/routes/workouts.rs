use axum::{
    extract::FromRef,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use deadpool_sqlite::Pool;
use shared::{
    api::{
        error::{Nothing, ServerError},
        payloads::DeleteConfirmation,
        response_errors::FetchError,
        Object,
    },
    model::{NewWorkout, ValidateModel, Workout},
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
    Router::new()
        .route(Object::Workout.path(), post(create_workout))
        // The id is the category id for GET and the workout id for DELETE
        .route(
            Object::WorkoutId.path(),
            get(fetch_category_workouts).delete(delete_workout),
        )
}

#[instrument(skip(conn))]
async fn fetch_category_workouts(
    DatabaseConnection(conn): DatabaseConnection,
    Path(category_id): Path<i64>,
) -> Result<Json<Vec<Workout>>, ServerError<FetchError>> {
    let workouts = conn
        .interact(move |conn| {
            Ok::<_, ServerError<FetchError>>(Workout::fetch_by_category(conn, category_id)?)
        })
        .await??;

    Ok(Json(workouts))
}

#[instrument(skip(conn))]
async fn create_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Json(new_workout): Json<NewWorkout>,
) -> Result<(StatusCode, Json<Workout>), ServerError<Nothing>> {
    new_workout.validate()?;

    let workout = conn
        .interact(move |conn| Ok::<_, ServerError<Nothing>>(new_workout.create(conn)?))
        .await??;
    debug!(id = workout.id, "Created workout");

    Ok((StatusCode::CREATED, Json(workout)))
}

#[instrument(skip(conn))]
async fn delete_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<DeleteConfirmation>, ServerError<Nothing>> {
    let deleted = conn
        .interact(move |conn| Ok::<_, ServerError<Nothing>>(Workout::delete(conn, id)?))
        .await??;
    debug!(deleted, "Deleted workout");

    Ok(Json(DeleteConfirmation::new("Workout deleted")))
}
