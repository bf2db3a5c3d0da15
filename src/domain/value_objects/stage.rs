//! Stage value object - checkpoints of the per-unit pipeline
//!
//! `Pending → Validated → BackedUp → MetadataUpdated → Replaced → Verified`.
//! Stages are strictly ordered and none may be skipped.

use serde::{Deserialize, Serialize};

/// A named checkpoint in the per-unit deployment state machine
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    #[default]
    Pending,
    Validated,
    BackedUp,
    MetadataUpdated,
    Replaced,
    Verified,
}

impl Stage {
    /// All stages in pipeline order
    pub const ALL: [Stage; 6] = [
        Stage::Pending,
        Stage::Validated,
        Stage::BackedUp,
        Stage::MetadataUpdated,
        Stage::Replaced,
        Stage::Verified,
    ];

    /// The stage that follows this one, `None` for the terminal stage
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Pending => Some(Stage::Validated),
            Stage::Validated => Some(Stage::BackedUp),
            Stage::BackedUp => Some(Stage::MetadataUpdated),
            Stage::MetadataUpdated => Some(Stage::Replaced),
            Stage::Replaced => Some(Stage::Verified),
            Stage::Verified => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Verified
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Pending => "pending",
            Stage::Validated => "validated",
            Stage::BackedUp => "backed-up",
            Stage::MetadataUpdated => "metadata-updated",
            Stage::Replaced => "replaced",
            Stage::Verified => "verified",
        }
    }

    /// Operator-facing description of the transition into this stage
    pub fn transition_label(self) -> &'static str {
        match self {
            Stage::Pending => "pending",
            Stage::Validated => "source validation",
            Stage::BackedUp => "backup",
            Stage::MetadataUpdated => "metadata update",
            Stage::Replaced => "replace",
            Stage::Verified => "post-deploy verification",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
