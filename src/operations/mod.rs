//! Operations module for configuring packages
//!
//! `ConfigureOperation` coordinates:
//! - Resolver: loading the package contract (from resolver module)
//! - Stubs: publishing templated files (from stubs module)
//! - Installer: running the dependency manager (from installer module)
//! - Rc file: registering providers and meta files (from rcfile module)
//! - UI: every notice goes through the injected logger (from ui module)

pub mod configure;

pub use configure::{ConfigureOperation, ConfigureOptions};
