//! Decision Provider Port
//!
//! The pipeline never prompts. Whoever drives a session supplies the
//! answers, either from a terminal or from command-line flags.

use crate::domain::entities::DeploymentUnit;
use crate::domain::value_objects::UnitSelection;

/// Yes/no questions asked during a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    /// Deploy the selected units?
    ProceedWithDeployment { unit_count: usize },
    /// Restart the application host now?
    RestartNow { deployed_count: usize },
    /// Commit the deployed units' sources?
    CommitChanges { deployed_count: usize },
}

/// Closed set of answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Yes,
    No,
}

impl Decision {
    pub fn is_yes(self) -> bool {
        self == Decision::Yes
    }
}

impl From<bool> for Decision {
    fn from(value: bool) -> Self {
        if value {
            Decision::Yes
        } else {
            Decision::No
        }
    }
}

pub trait DecisionProvider {
    /// Choose units from the sorted listing
    fn select_units(&self, available: &[DeploymentUnit]) -> UnitSelection;

    /// Version to deploy for a unit; `None` keeps the current version
    fn request_version(&self, unit: &DeploymentUnit) -> Option<String>;

    fn decide(&self, question: Question) -> Decision;
}
