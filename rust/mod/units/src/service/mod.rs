pub mod catalog;
pub mod export;
pub mod grid;
pub mod selection;
pub mod session;
pub mod store;

pub use session::EditSession;
pub use store::RecordStore;
