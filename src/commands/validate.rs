//! `appdeploy validate`: structure check without touching the target

use anyhow::Result;

use appdeploy::domain::services::{StructureValidator, UnitCatalog};
use appdeploy::domain::value_objects::UnitSelection;
use appdeploy::error::AppDeployError;
use appdeploy::infrastructure::LocalFs;
use appdeploy::ui::theme::{self, colors, Icon};

use super::CommandContext;

pub fn cmd_validate(ctx: &CommandContext, apps: &[String]) -> Result<i32> {
    let source = &ctx.paths.source;
    if !source.is_dir() {
        return Err(AppDeployError::SourceRootNotFound {
            path: source.clone(),
        }
        .into());
    }

    let fs = LocalFs::new();
    let events = ctx.output_sink();
    let units = UnitCatalog::new(&fs, events.as_ref(), source.clone()).discover()?;
    if units.is_empty() {
        return Err(AppDeployError::NoUnitsFound {
            path: source.clone(),
        }
        .into());
    }

    let names: Vec<String> = units.iter().map(|u| u.name().to_string()).collect();
    let selection = if apps.is_empty() {
        UnitSelection::from_tokens(&["all"], &names)
    } else {
        UnitSelection::from_tokens(apps, &names)
    };
    for token in &selection.rejected {
        eprintln!("Warning: invalid selection '{token}', skipping");
    }
    if selection.is_empty() {
        return Err(AppDeployError::NoUnitsSelected.into());
    }

    let validator = StructureValidator::new(&fs, events.as_ref());
    let mut failures = 0;
    for unit in units.iter().filter(|u| selection.units.iter().any(|n| n == u.name())) {
        let outcome = validator.validate(unit.source_path());
        if outcome.is_err() {
            failures += 1;
        }

        if ctx.json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "validated",
                    "unit": unit.name(),
                    "valid": outcome.is_ok(),
                    "error": outcome.as_ref().err().map(|e| e.to_string()),
                })
            );
            continue;
        }

        let color = ctx.caps.supports_color;
        let unicode = ctx.caps.supports_unicode;
        match outcome {
            Ok(()) => println!(
                "{} {} {}",
                Icon::Success.colored(color, unicode),
                unit.name(),
                theme::paint(&format!("v{}", unit.current_version()), colors::DIM, color)
            ),
            Err(e) => println!(
                "{} {}: {}",
                Icon::Error.colored(color, unicode),
                unit.name(),
                e
            ),
        }
    }

    Ok(if failures == 0 { 0 } else { 1 })
}
