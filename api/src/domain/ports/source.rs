//! Record source port trait
//!
//! Where maintenance records come from. Loading is blocking file I/O and is
//! expected to run off the async workers.

use crate::domain::entities::MaintenanceTable;
use crate::error::SourceError;

pub trait RecordSource: Send + Sync {
    /// Read every record. Called once per generation run.
    fn load(&self) -> Result<MaintenanceTable, SourceError>;

    /// Human-readable location of the data, for logs
    fn describe(&self) -> String;
}
