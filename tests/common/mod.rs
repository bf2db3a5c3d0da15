//! Common test utilities for appdeploy integration and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated source/target/backup/log directories plus a CLI runner
//! - Fixtures: app trees and descriptor contents

pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
