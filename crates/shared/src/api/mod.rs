use std::fmt::Display;

use const_format::concatcp;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub mod error;
pub mod payloads;
pub mod response_errors;

pub const API_BASE_PATH: &str = "/";

/// Placeholder segment in the id paths, replaced by [`Object::with_id`]
pub const ID_SEGMENT: &str = ":id";

/// Everything but the unreserved characters is encoded in an id segment
const ID_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Root,
    Ping,
    /// `POST` a new category
    Category,
    /// `GET` by user id, `DELETE` by category id
    CategoryId,
    /// `POST` a new workout
    Workout,
    /// `GET` by category id, `DELETE` by workout id
    WorkoutId,
    /// `GET`/`POST` by workout id, `PUT`/`DELETE` by exercise id
    ExerciseId,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Root => API_BASE_PATH,
            Ping => concatcp!(API_BASE_PATH, "ping"),
            Category => concatcp!(API_BASE_PATH, "categorias"),
            CategoryId => concatcp!(API_BASE_PATH, "categorias/", ID_SEGMENT),
            Workout => concatcp!(API_BASE_PATH, "entrenamientos"),
            WorkoutId => concatcp!(API_BASE_PATH, "entrenamientos/", ID_SEGMENT),
            ExerciseId => concatcp!(API_BASE_PATH, "ejercicios/", ID_SEGMENT),
        }
    }

    pub fn with_id<I: Display>(&self, id: I) -> String {
        let id = id.to_string();
        let id = utf8_percent_encode(&id, ID_ENCODE_SET).to_string();
        self.path().replace(ID_SEGMENT, &id)
    }
}
