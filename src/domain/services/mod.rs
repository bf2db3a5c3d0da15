//! Domain Services
//!
//! Business logic over domain entities. File access goes through the
//! `FileSystem` port and diagnostics through the `DeployEventSink` port.

mod catalog;
mod metadata;
mod structure;

pub use catalog::UnitCatalog;
pub use metadata::{version_of, MetadataAccessor};
pub use structure::{StructureValidator, REQUIRED_DIRS, REQUIRED_FILES};
