//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - One unit through validate, backup, metadata, replace, verify
//! - `SessionUseCase` - Discovery, planning, the per-unit loop, restart and commit

pub mod deploy;
pub mod session;

pub use deploy::{DeployOptions, DeployUseCase, DEFAULT_EXECUTABLE_EXTENSIONS};
pub use session::{AdvisoryOutcome, SessionReport, SessionUseCase};
