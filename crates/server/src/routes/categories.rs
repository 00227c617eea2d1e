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
        response_errors::CategoryError,
        Object,
    },
    model::{Category, NewCategory, ValidateModel},
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
        .route(Object::Category.path(), post(create_category))
        // The id is the user id for GET and the category id for DELETE
        .route(
            Object::CategoryId.path(),
            get(fetch_user_categories).delete(delete_category),
        )
}

#[instrument(skip(conn))]
async fn fetch_user_categories(
    DatabaseConnection(conn): DatabaseConnection,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Category>>, ServerError<CategoryError>> {
    let categories = conn
        .interact(move |conn| {
            Ok::<_, ServerError<CategoryError>>(Category::fetch_by_user(conn, &user_id)?)
        })
        .await??;

    if categories.is_empty() {
        return Err(CategoryError::NoneFound.into());
    }

    Ok(Json(categories))
}

#[instrument(skip(conn))]
async fn create_category(
    DatabaseConnection(conn): DatabaseConnection,
    Json(new_category): Json<NewCategory>,
) -> Result<(StatusCode, Json<Category>), ServerError<Nothing>> {
    new_category.validate()?;

    let category = conn
        .interact(move |conn| Ok::<_, ServerError<Nothing>>(new_category.create(conn)?))
        .await??;
    debug!(id = category.id, "Created category");

    Ok((StatusCode::CREATED, Json(category)))
}

#[instrument(skip(conn))]
async fn delete_category(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<DeleteConfirmation>, ServerError<Nothing>> {
    let deleted = conn
        .interact(move |conn| Ok::<_, ServerError<Nothing>>(Category::delete(conn, id)?))
        .await??;
    debug!(deleted, "Deleted category");

    Ok(Json(DeleteConfirmation::new("Category deleted")))
}
