mod aggregate;
mod collation;
mod lookup;
mod usage;

pub use aggregate::*;
pub use collation::*;
pub use lookup::*;
pub use usage::*;
