mod category;
pub use category::*;

mod workout;
pub use workout::*;

mod exercise;
pub use exercise::*;

mod set;
pub use set::*;

use crate::api::error::ValidationError;

pub trait ValidateModel {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl ValidateModel for () {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Pushes an error message if the trimmed name is empty
pub(crate) fn check_name(what: &str, name: &str, errors: &mut Vec<String>) {
    if name.trim().is_empty() {
        errors.push(format!("{what} name must not be empty"));
    }
}
