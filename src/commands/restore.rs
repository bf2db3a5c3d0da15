//! `appdeploy restore`: put a backup archive back under the target apps dir

use std::path::Path;

use anyhow::Result;

use appdeploy::domain::ports::BackupArchiver;
use appdeploy::infrastructure::TarGzArchiver;
use appdeploy::ui::theme::Icon;

use super::CommandContext;

pub fn cmd_restore(ctx: &CommandContext, archive: &Path) -> Result<i32> {
    let restored = TarGzArchiver::new().restore(archive, &ctx.paths.target_apps)?;

    if ctx.json {
        println!(
            "{}",
            serde_json::json!({
                "event": "restored",
                "archive": archive.display().to_string(),
                "path": restored.display().to_string(),
            })
        );
    } else {
        println!(
            "{} Restored {} to {}",
            Icon::Success.colored(ctx.caps.supports_color, ctx.caps.supports_unicode),
            archive.display(),
            restored.display()
        );
    }
    Ok(0)
}
