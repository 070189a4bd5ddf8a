//! Shell completion script generation.

use clap::{CommandFactory, ValueEnum};
use clap_complete::{generate, Shell};

/// Shell types for completion script generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

impl From<ShellType> for Shell {
    fn from(shell: ShellType) -> Self {
        match shell {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }
}

/// Write a static completion script for the chosen shell to stdout.
pub fn generate_script(shell: ShellType) {
    let mut cmd = crate::Cli::command();
    let name = cmd.get_name().to_string();
    generate(Shell::from(shell), &mut cmd, name, &mut std::io::stdout());
}
