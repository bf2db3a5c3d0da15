//! appdeploy - deploy versioned app packages into an application host
//!
//! Each selected app runs through a fixed pipeline: validate the source,
//! back up the currently deployed copy, stamp a new version into its
//! descriptor, replace the deployed copy and verify the result. A session
//! drives the pipeline over a plan of apps and then offers a host restart
//! and a git commit of the deployed sources.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod ui;

// Re-exports for convenience
pub use application::{DeployOptions, DeployUseCase, SessionReport, SessionUseCase};
pub use config::AppDeployConfig;
pub use domain::entities::{DeploymentPlan, DeploymentResult, DeploymentUnit};
pub use domain::value_objects::{Stage, Version};
pub use error::{AppDeployError, AppDeployResult};
