pub mod error;
pub mod http;
pub mod kv;
pub mod memory;
pub mod traits;

pub use error::SheetError;
pub use http::HttpSheet;
pub use kv::KvSheet;
pub use memory::MemorySheet;
pub use traits::{Sheet, SheetStore};
