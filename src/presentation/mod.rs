//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Resolving paths from flags, config and platform defaults
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Argument definitions (`Cli`, `Commands`, `PathArgs`)
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use appdeploy::presentation::factory;
//!
//! let session = factory::create_session_use_case(events, &paths.backup_dir);
//! let report = session.run(plan, &paths.source, &options);
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, Commands, PathArgs};
pub use factory::{create_session_use_case, resolve_paths, ResolvedPaths};
