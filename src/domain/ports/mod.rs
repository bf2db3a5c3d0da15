//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod backup_archiver;
pub mod collaborators;
pub mod decision_provider;
pub mod deploy_events;
pub mod file_system;
pub mod unit_lock;

pub use backup_archiver::BackupArchiver;
pub use collaborators::{CommitOutcome, RestartInvoker, VersionControl};
pub use decision_provider::{Decision, DecisionProvider, Question};
pub use deploy_events::{DeployEvent, DeployEventSink, LogLevel, NoopEventSink};
pub use file_system::{FileSystem, FsError, FsResult, TreeEntry};
pub use unit_lock::{NoopLocker, UnitLease, UnitLocker};
