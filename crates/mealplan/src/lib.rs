mod config;
mod filter;
mod history;
mod import;
mod picker;
mod planner;
mod random;
mod score;
mod select;
mod service;

pub use config::*;
pub use filter::*;
pub use history::*;
pub use import::*;
pub use picker::*;
pub use planner::*;
pub use random::*;
pub use score::*;
pub use select::*;
pub use service::*;
