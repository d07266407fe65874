pub mod date_range;
pub mod entry;
pub mod field;
pub mod tags;

pub use date_range::{DateRange, Preset};
pub use entry::{NewEntry, WorkEntry};
pub use field::FieldKind;
pub use tags::Tags;
