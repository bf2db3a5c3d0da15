//! Decision Provider Implementations
//!
//! - InteractiveDecisions: dialoguer prompts for anything not given as a flag
//! - PresetDecisions: answers fixed up front (CI, scripts, `--yes`)

mod interactive;
mod preset;

pub use interactive::InteractiveDecisions;
pub use preset::{parse_app_version, PresetDecisions};
