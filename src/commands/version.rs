//! Version command implementation

use crate::error::Result;
use crate::resolver::builtin::BUILTIN_PACKAGES;

/// Run version command
pub fn run() -> Result<()> {
    println!("rigup {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!("  Built-in packages: {}", BUILTIN_PACKAGES.join(", "));

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
