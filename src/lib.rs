pub mod data;
pub mod error;
pub mod operations;
pub mod utils;

pub use error::{QueryError, Result};
