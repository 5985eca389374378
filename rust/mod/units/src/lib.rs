//! Apartment inspection tracker: the unit catalog, store synchronization,
//! selection, single-record editing, grid projection and CSV export.

pub mod model;
pub mod service;

pub use model::{BuildingScheme, OccupantType, UnitEdit, UnitRecord, UnitState, UnitTable};
pub use service::{EditSession, RecordStore};
