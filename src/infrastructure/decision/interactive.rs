//! Interactive Decisions
//!
//! Prompts on the terminal for anything the command line left open.
//! Answers given as flags are never asked again.

use dialoguer::{Confirm, Input, MultiSelect};

use crate::domain::entities::DeploymentUnit;
use crate::domain::ports::{Decision, DecisionProvider, Question};
use crate::domain::value_objects::UnitSelection;
use crate::infrastructure::decision::PresetDecisions;
use crate::ui::listing::unit_label;
use crate::ui::theme::AppDeployTheme;

pub struct InteractiveDecisions {
    preset: PresetDecisions,
    theme: AppDeployTheme,
    ask_versions: bool,
    assume_yes: bool,
}

impl InteractiveDecisions {
    pub fn new(preset: PresetDecisions, supports_unicode: bool) -> Self {
        Self {
            preset,
            theme: AppDeployTheme::new(supports_unicode),
            ask_versions: true,
            assume_yes: false,
        }
    }

    /// Answer the proceed confirmation with yes (`--yes`)
    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    /// Skip per-unit version prompts (keep current unless a flag says otherwise)
    pub fn without_version_prompts(mut self) -> Self {
        self.ask_versions = false;
        self
    }

    fn confirm(&self, prompt: String, default: bool) -> Decision {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .ok()
            .flatten()
            .unwrap_or(false)
            .into()
    }
}

impl DecisionProvider for InteractiveDecisions {
    fn select_units(&self, available: &[DeploymentUnit]) -> UnitSelection {
        if self.preset.has_selection() {
            return self.preset.select_units(available);
        }

        let labels: Vec<String> = available
            .iter()
            .map(unit_label)
            .collect();

        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt("Select apps to deploy (space to toggle, enter to confirm)")
            .items(&labels)
            .interact_opt()
            .ok()
            .flatten()
            .unwrap_or_default();

        UnitSelection {
            units: picked
                .into_iter()
                .filter_map(|i| available.get(i).map(|u| u.name().to_string()))
                .collect(),
            rejected: Vec::new(),
        }
    }

    fn request_version(&self, unit: &DeploymentUnit) -> Option<String> {
        if let Some(version) = self.preset.version_for(unit.name()) {
            return Some(version.to_string());
        }
        if !self.ask_versions {
            return None;
        }

        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(format!(
                "Version for {} (current {}, enter to keep)",
                unit.name(),
                unit.current_version()
            ))
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default();

        let answer = answer.trim();
        (!answer.is_empty()).then(|| answer.to_string())
    }

    fn decide(&self, question: Question) -> Decision {
        match question {
            Question::ProceedWithDeployment { .. } if self.assume_yes => Decision::Yes,
            Question::ProceedWithDeployment { unit_count } => {
                self.confirm(format!("Proceed with deployment of {unit_count} app(s)?"), false)
            }
            Question::RestartNow { deployed_count } => match self.preset.restart() {
                Some(choice) => choice.into(),
                None => self.confirm(
                    format!("{deployed_count} app(s) deployed. Restart the host now?"),
                    false,
                ),
            },
            Question::CommitChanges { .. } if self.preset.commits() => Decision::Yes,
            Question::CommitChanges { deployed_count } => self.confirm(
                format!("Commit the {deployed_count} deployed app source(s) to git?"),
                false,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_selection_skips_prompt() {
        let decisions =
            InteractiveDecisions::new(PresetDecisions::new(vec!["appA".into()]), false);
        let available = vec![
            DeploymentUnit::new("appA", "apps/appA"),
            DeploymentUnit::new("appB", "apps/appB"),
        ];
        assert_eq!(decisions.select_units(&available).units, vec!["appA"]);
    }

    #[test]
    fn preset_version_and_restart_skip_prompts() {
        let preset = PresetDecisions::new(Vec::new())
            .with_version("appA", "3.0.0")
            .with_restart(Some(false));
        let decisions = InteractiveDecisions::new(preset, true);

        let unit = DeploymentUnit::new("appA", "apps/appA");
        assert_eq!(decisions.request_version(&unit).as_deref(), Some("3.0.0"));
        assert!(!decisions
            .decide(Question::RestartNow { deployed_count: 1 })
            .is_yes());
    }

    #[test]
    fn assume_yes_skips_proceed_prompt() {
        let decisions =
            InteractiveDecisions::new(PresetDecisions::default(), true).with_assume_yes(true);
        assert!(decisions
            .decide(Question::ProceedWithDeployment { unit_count: 3 })
            .is_yes());
    }

    #[test]
    fn version_prompts_can_be_disabled() {
        let decisions =
            InteractiveDecisions::new(PresetDecisions::default(), true).without_version_prompts();
        let unit = DeploymentUnit::new("appB", "apps/appB");
        assert_eq!(decisions.request_version(&unit), None);
    }
}
