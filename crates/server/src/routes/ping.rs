use axum::{http::StatusCode, Json};

pub async fn ping() -> (StatusCode, Json<()>) {
    (StatusCode::OK, Json(()))
}

pub async fn root() -> &'static str {
    "Workout tracker API, see /categorias, /entrenamientos and /ejercicios"
}
