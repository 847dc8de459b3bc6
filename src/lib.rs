pub mod bench;
pub mod error;
pub mod fs;
pub mod search;
pub mod sets;
pub mod statistics;

pub use error::{Result, SetError};
