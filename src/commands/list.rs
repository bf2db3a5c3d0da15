//! `appdeploy list`

use anyhow::Result;

use appdeploy::domain::ports::NoopEventSink;
use appdeploy::domain::services::UnitCatalog;
use appdeploy::error::AppDeployError;
use appdeploy::infrastructure::LocalFs;
use appdeploy::ui::listing::render_unit_list;

use super::CommandContext;

pub fn cmd_list(ctx: &CommandContext) -> Result<i32> {
    let source = &ctx.paths.source;
    if !source.is_dir() {
        return Err(AppDeployError::SourceRootNotFound {
            path: source.clone(),
        }
        .into());
    }

    let fs = LocalFs::new();
    let units = UnitCatalog::new(&fs, &NoopEventSink, source.clone()).discover()?;

    if ctx.json {
        let units: Vec<_> = units
            .iter()
            .enumerate()
            .map(|(i, u)| {
                serde_json::json!({
                    "index": i + 1,
                    "name": u.name(),
                    "version": u.current_version(),
                    "path": u.source_path().display().to_string(),
                })
            })
            .collect();
        println!(
            "{}",
            serde_json::json!({
                "event": "units",
                "source": source.display().to_string(),
                "units": units,
            })
        );
        return Ok(0);
    }

    if units.is_empty() {
        println!("No apps found in {}", source.display());
        return Ok(0);
    }
    println!("Available apps in {}:", source.display());
    print!("{}", render_unit_list(&units, ctx.caps.supports_color));
    Ok(0)
}
