use clap::Parser;

/// Arguments for the configure command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Configure a local package:\n    rigup configure ./packages/cors\n\n\
                   Configure a package from node_modules:\n    rigup configure @acme/cors\n\n\
                   Overwrite files published earlier:\n    rigup configure ./packages/cors --force\n\n\
                   Only print the install commands:\n    rigup configure ./packages/cors --no-install")]
pub struct ConfigureArgs {
    /// Package to configure: a path, a built-in name or a package in node_modules
    pub package: String,

    /// Overwrite existing files when publishing stubs
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Print the install commands instead of running the dependency manager
    #[arg(long)]
    pub no_install: bool,

    /// Seconds to wait for the dependency manager (0 disables the limit)
    #[arg(long, value_name = "SECS")]
    pub install_timeout: Option<u64>,
}
