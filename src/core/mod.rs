pub mod aggregate;
pub mod backup;
pub mod import;
pub mod log;
pub mod report;
pub mod store;
pub mod taxonomy;
