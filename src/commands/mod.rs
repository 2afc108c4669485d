//! Command implementations for Rigup CLI

pub mod completions;
pub mod configure;
pub mod version;
