//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `DeploymentUnit` - an app directory in the source root
//! - `Descriptor` - the unit's sectioned metadata file
//! - `DeploymentPlan` - units chosen for a session with resolved versions
//! - `DeploymentResult` / `BackupArtifact` - per-unit outcomes

mod descriptor;
mod outcome;
mod plan;
mod unit;

pub use descriptor::{Descriptor, DescriptorParseError, Entry, Section};
pub use outcome::{BackupArtifact, BackupOutcome, DeploymentResult, FailureDetail};
pub use plan::{DeploymentPlan, PlannedUnit};
pub use unit::{is_valid_unit_name, DeploymentUnit, DESCRIPTOR_PATH, MANIFEST_PATH};
