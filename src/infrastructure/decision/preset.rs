//! Non-interactive decisions taken from command-line flags

use std::collections::HashMap;

use crate::domain::entities::{is_valid_unit_name, DeploymentUnit};
use crate::domain::ports::{Decision, DecisionProvider, Question};
use crate::domain::value_objects::UnitSelection;
use crate::error::{AppDeployError, AppDeployResult};

/// Parse one `NAME=X.Y.Z` argument
pub fn parse_app_version(value: &str) -> AppDeployResult<(String, String)> {
    match value.split_once('=') {
        Some((name, version)) if is_valid_unit_name(name.trim()) => {
            Ok((name.trim().to_string(), version.trim().to_string()))
        }
        _ => Err(AppDeployError::InvalidAppVersion {
            value: value.to_string(),
        }),
    }
}

#[derive(Debug, Clone, Default)]
pub struct PresetDecisions {
    /// Selection tokens (`all`, names, or menu numbers)
    tokens: Vec<String>,
    versions: HashMap<String, String>,
    restart: Option<bool>,
    commit: bool,
}

impl PresetDecisions {
    pub fn new(tokens: Vec<String>) -> Self {
        Self {
            tokens,
            ..Self::default()
        }
    }

    pub fn with_version(mut self, unit: impl Into<String>, version: impl Into<String>) -> Self {
        self.versions.insert(unit.into(), version.into());
        self
    }

    pub fn with_versions(mut self, versions: impl IntoIterator<Item = (String, String)>) -> Self {
        self.versions.extend(versions);
        self
    }

    pub fn with_restart(mut self, restart: Option<bool>) -> Self {
        self.restart = restart;
        self
    }

    pub fn with_commit(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    pub fn has_selection(&self) -> bool {
        !self.tokens.is_empty()
    }

    /// Explicit restart choice, if one was given
    pub fn restart(&self) -> Option<bool> {
        self.restart
    }

    /// Whether `--commit` was given
    pub fn commits(&self) -> bool {
        self.commit
    }

    pub fn version_for(&self, unit: &str) -> Option<&str> {
        self.versions.get(unit).map(String::as_str)
    }
}

impl DecisionProvider for PresetDecisions {
    fn select_units(&self, available: &[DeploymentUnit]) -> UnitSelection {
        let names: Vec<String> = available.iter().map(|u| u.name().to_string()).collect();
        UnitSelection::from_tokens(&self.tokens, &names)
    }

    fn request_version(&self, unit: &DeploymentUnit) -> Option<String> {
        self.version_for(unit.name()).map(str::to_string)
    }

    fn decide(&self, question: Question) -> Decision {
        match question {
            // Naming the units on the command line is the confirmation
            Question::ProceedWithDeployment { .. } => Decision::Yes,
            Question::RestartNow { .. } => self.restart.unwrap_or(false).into(),
            Question::CommitChanges { .. } => self.commit.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> Vec<DeploymentUnit> {
        vec![
            DeploymentUnit::new("appA", "apps/appA"),
            DeploymentUnit::new("appB", "apps/appB"),
        ]
    }

    #[test]
    fn parse_app_version_pairs() {
        assert_eq!(
            parse_app_version("appA=2.0.0").unwrap(),
            ("appA".to_string(), "2.0.0".to_string())
        );
        assert!(matches!(
            parse_app_version("2.0.0"),
            Err(AppDeployError::InvalidAppVersion { .. })
        ));
        assert!(parse_app_version("=2.0.0").is_err());
        assert_eq!(
            parse_app_version(" appA = 2.0.0 ").unwrap(),
            ("appA".to_string(), "2.0.0".to_string())
        );
    }

    #[test]
    fn parse_app_version_rejects_path_like_names() {
        for value in ["../appA=2.0.0", "apps/appA=2.0.0", "..=2.0.0"] {
            assert!(
                matches!(
                    parse_app_version(value),
                    Err(AppDeployError::InvalidAppVersion { .. })
                ),
                "accepted {value:?}"
            );
        }
    }

    #[test]
    fn preset_selects_and_rejects() {
        let preset = PresetDecisions::new(vec!["appB".into(), "ghost".into()]);
        let selection = preset.select_units(&units());
        assert_eq!(selection.units, vec!["appB"]);
        assert_eq!(selection.rejected, vec!["ghost"]);
    }

    #[test]
    fn preset_versions_and_questions() {
        let preset = PresetDecisions::new(vec!["all".into()])
            .with_version("appA", "2.0.0")
            .with_restart(Some(true));

        assert_eq!(preset.request_version(&units()[0]).as_deref(), Some("2.0.0"));
        assert_eq!(preset.request_version(&units()[1]), None);
        assert!(preset
            .decide(Question::ProceedWithDeployment { unit_count: 2 })
            .is_yes());
        assert!(preset.decide(Question::RestartNow { deployed_count: 2 }).is_yes());
        assert!(!preset
            .decide(Question::CommitChanges { deployed_count: 2 })
            .is_yes());
    }
}
