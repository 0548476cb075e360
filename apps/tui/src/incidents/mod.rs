pub mod record;
pub mod store;
pub mod table;

pub use record::{IncidentKey, IncidentRecord, PLACEHOLDER};
pub use store::{merge, IncidentSequence, IncidentStore};
pub use table::{incident_markers, is_industrial, render, IncidentMarker, IncidentRow, TableView};
