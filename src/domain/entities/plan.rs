//! DeploymentPlan entity - ordered (unit, target version) pairs for a session

use crate::domain::entities::DeploymentUnit;
use crate::domain::value_objects::resolve_version;
use crate::error::{AppDeployError, AppDeployResult};

/// One planned deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedUnit {
    pub unit: DeploymentUnit,
    /// Version to stamp; equals the current version when no valid override was given
    pub target_version: String,
}

/// Ordered set of units to deploy; each unit appears at most once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploymentPlan {
    entries: Vec<PlannedUnit>,
}

impl DeploymentPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit, resolving its target version.
    ///
    /// Malformed `requested` versions fall back to the current version.
    pub fn push(&mut self, unit: DeploymentUnit, requested: Option<&str>) -> AppDeployResult<()> {
        if self.contains(unit.name()) {
            return Err(AppDeployError::DuplicateUnit {
                unit: unit.name().to_string(),
            });
        }
        let target_version = resolve_version(requested, unit.current_version());
        self.entries.push(PlannedUnit {
            unit,
            target_version,
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.unit.name() == name)
    }

    pub fn entries(&self) -> &[PlannedUnit] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn unit_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.unit.name()).collect()
    }
}

impl IntoIterator for DeploymentPlan {
    type Item = PlannedUnit;
    type IntoIter = std::vec::IntoIter<PlannedUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str, version: &str) -> DeploymentUnit {
        DeploymentUnit::new(name, format!("/src/{name}")).with_version(version)
    }

    #[test]
    fn push_resolves_requested_version() {
        let mut plan = DeploymentPlan::new();
        plan.push(unit("a", "1.0.0"), Some("2.0.0")).unwrap();
        plan.push(unit("b", "1.3.0"), Some("two")).unwrap();
        plan.push(unit("c", "0.1.0"), None).unwrap();

        let versions: Vec<_> = plan
            .entries()
            .iter()
            .map(|e| e.target_version.as_str())
            .collect();
        assert_eq!(versions, vec!["2.0.0", "1.3.0", "0.1.0"]);
        assert_eq!(plan.unit_names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn push_rejects_duplicate_units() {
        let mut plan = DeploymentPlan::new();
        plan.push(unit("a", "1.0.0"), None).unwrap();
        let err = plan.push(unit("a", "1.0.0"), Some("2.0.0")).unwrap_err();
        assert!(matches!(err, AppDeployError::DuplicateUnit { .. }));
        assert_eq!(plan.len(), 1);
    }
}
