//! Packages configured without a manifest

use crate::error::Result;
use crate::operations::configure::ConfigureCommand;

use super::SetupContract;

/// Built-in stubs are looked up from the project root
const BUILTIN_STUBS_ROOT: &str = ".";

const VINEJS_PROVIDER: &str = "@adonisjs/core/providers/vinejs_provider";
const EDGE_PROVIDER: &str = "@adonisjs/core/providers/edge_provider";
const EDGE_VIEWS_PATTERN: &str = "resources/views/**/*.edge";

/// Names resolved without touching the filesystem
pub const BUILTIN_PACKAGES: [&str; 2] = ["vinejs", "edge"];

/// Contract for a built-in package name
pub fn contract(name: &str) -> Option<SetupContract> {
    let contract = SetupContract::new().with_stubs_root(BUILTIN_STUBS_ROOT);
    match name {
        "vinejs" => Some(contract.with_hook(configure_vinejs)),
        "edge" => Some(contract.with_hook(configure_edge)),
        _ => None,
    }
}

fn configure_vinejs(command: &mut ConfigureCommand<'_>) -> Result<()> {
    command.update_rc_file(|rc| {
        rc.add_provider(VINEJS_PROVIDER)?;
        Ok(())
    })?;
    Ok(())
}

fn configure_edge(command: &mut ConfigureCommand<'_>) -> Result<()> {
    command.update_rc_file(|rc| {
        rc.add_provider(EDGE_PROVIDER)?;
        rc.add_meta_file(EDGE_VIEWS_PATTERN, false)?;
        Ok(())
    })?;
    Ok(())
}
