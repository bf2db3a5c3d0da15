//! Domain Layer
//!
//! The deployment model: units, descriptors, plans, outcomes, and the
//! services that inspect and stamp units.
//!
//! ## Structure
//!
//! - `entities/` - DeploymentUnit, Descriptor, DeploymentPlan, DeploymentResult
//! - `value_objects/` - Stage, Version, BuildStamp, Platform, UnitSelection
//! - `services/` - MetadataAccessor, StructureValidator, UnitCatalog
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **Ports for I/O** - services reach the disk only through `FileSystem`
//! 2. **Explicit sinks** - diagnostics go to an injected `DeployEventSink`

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
