//! Common utilities shared across modules
//!
//! - `fs`: file writes with unified error handling
//! - `path_utils`: path display and package reference helpers
//! - `string_utils`: case conversions for stubs

pub mod fs;
pub mod path_utils;
pub mod string_utils;
