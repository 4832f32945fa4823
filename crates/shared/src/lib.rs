pub mod catalog;
mod date;
mod error;
mod meal_time;
pub mod slot;

pub use date::*;
pub use error::*;
pub use meal_time::*;
