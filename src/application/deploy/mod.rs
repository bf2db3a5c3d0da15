//! Deploy Module
//!
//! Runs a single unit through validate, backup, metadata update, replace
//! and verify.
//!
//! ## Structure
//!
//! - `options` - Per-session settings shared by every unit (`DeployOptions`)
//! - `use_case` - The per-unit executor (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use appdeploy::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(LocalFs::new(), TarGzArchiver::new());
//! let result = use_case.execute(&mut unit, "2.0.0", &DeployOptions::new(target, backups));
//! ```

mod options;
mod use_case;

pub use options::{DeployOptions, DEFAULT_EXECUTABLE_EXTENSIONS};
pub use use_case::DeployUseCase;
