//! Session Module
//!
//! - `report` - Aggregated outcome (`SessionReport`, `AdvisoryOutcome`)
//! - `use_case` - Orchestration across units (`SessionUseCase`)

mod report;
mod use_case;

pub use report::{AdvisoryOutcome, SessionReport};
pub use use_case::SessionUseCase;
