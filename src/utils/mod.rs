pub mod config;
pub mod output;
pub mod query;
pub mod tpch;

pub use config::*;
pub use output::*;
pub use query::*;
pub use tpch::*;
