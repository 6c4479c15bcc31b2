mod accumulator;
mod filter;
mod join_aggregate;
mod query5;

pub use accumulator::*;
pub use filter::*;
pub use join_aggregate::*;
pub use query5::*;
