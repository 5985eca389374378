mod scheme;
mod table;
mod unit;

pub use scheme::*;
pub use table::*;
pub use unit::*;
