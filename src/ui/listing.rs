//! Numbered unit listing shared by `list` and the selection prompt

use std::fmt::Write as _;

use crate::domain::entities::DeploymentUnit;
use crate::ui::theme::{self, colors};

/// One line per unit: `  1. name (v1.2.3)`, numbered from 1
pub fn render_unit_list(units: &[DeploymentUnit], supports_color: bool) -> String {
    let width = units.len().to_string().len();
    let mut out = String::new();
    for (i, unit) in units.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>width$}. {} {}",
            i + 1,
            theme::paint(unit.name(), colors::INFO, supports_color),
            theme::paint(
                &format!("(v{})", unit.current_version()),
                colors::DIM,
                supports_color
            ),
        );
    }
    out
}

/// Menu label for a unit in interactive selection
pub fn unit_label(unit: &DeploymentUnit) -> String {
    format!("{} (v{})", unit.name(), unit.current_version())
}
