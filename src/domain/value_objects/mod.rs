//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod platform;
mod selection;
mod stage;
mod version;

pub use platform::{Platform, PlatformProfile};
pub use selection::UnitSelection;
pub use stage::Stage;
pub use version::{base_label, relabel, resolve_version, BuildStamp, Version, DEFAULT_VERSION};
