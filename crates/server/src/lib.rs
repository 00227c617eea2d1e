pub mod cli;
pub mod db;
pub mod extract;
pub mod routes;

mod errors;
pub use errors::*;

mod state;
pub use state::*;
