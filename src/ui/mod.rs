//! Terminal presentation: theme tokens, capability detection, listings and
//! the end-of-session summary

pub mod listing;
pub mod summary;
pub mod terminal;
pub mod theme;
