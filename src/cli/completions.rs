use clap::Parser;

/// Arguments for the completions command
///
/// The shell name is validated when the script is generated, so an unknown
/// shell is reported as a regular rigup error rather than a usage error.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Load bash completions for the current session:\n    source <(rigup completions bash)\n\n\
                  Install zsh completions:\n    rigup completions zsh > \"${fpath[1]}/_rigup\"\n\n\
                  Install fish completions:\n    rigup completions fish > ~/.config/fish/completions/rigup.fish\n\n\
                  Load PowerShell completions:\n    rigup completions pwsh | Out-String | Invoke-Expression")]
pub struct CompletionsArgs {
    /// Target shell: bash, elvish, fish, powershell (or pwsh), zsh
    #[arg(value_name = "SHELL")]
    pub shell: String,
}
