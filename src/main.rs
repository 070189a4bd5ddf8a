use clap::{Parser, Subcommand};

mod aws;
mod cli;
mod config;
mod dispatch;
mod error;
mod inventory;
mod select;
mod ssh;
mod ui;

pub use error::{AllyError, Result};

use cli::commands::ConnectArgs;
use cli::completions::ShellType;

#[derive(Parser)]
#[command(name = "ally")]
#[command(about = "Discover and connect to EC2 instances by name")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover and act on running EC2 instances
    Instances {
        #[command(subcommand)]
        command: InstanceCommands,
    },

    /// Manage saved connection defaults
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        shell: ShellType,
    },
}

#[derive(Subcommand)]
enum InstanceCommands {
    /// List running instances matching a pattern
    List {
        /// Pattern in name to filter with
        #[arg(short, long, default_value = "")]
        search: String,

        /// AWS region override
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Open an interactive SSH session to an instance
    Shell {
        /// Pattern in name to filter with
        #[arg(short, long, default_value = "")]
        search: String,

        /// Login username (default = centos)
        #[arg(short, long)]
        username: Option<String>,

        /// SSH port (default = 22)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to SSH keys (default = ~/.ssh)
        #[arg(short, long)]
        key_path: Option<String>,

        /// AWS region override
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Copy a local file to instance(s)
    Copy {
        /// Local file to copy
        file: std::path::PathBuf,

        /// Pattern in name to filter with
        #[arg(short, long, default_value = "")]
        search: String,

        /// Login username (default = centos)
        #[arg(short, long)]
        username: Option<String>,

        /// SSH port (default = 22)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to SSH keys (default = ~/.ssh)
        #[arg(short, long)]
        key_path: Option<String>,

        /// Location on the remote server the file is placed (default = ~)
        #[arg(short, long)]
        directory: Option<String>,

        /// AWS region override
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Execute a command on instance(s)
    Exec {
        /// Command to run remotely
        command: String,

        /// Pattern in name to filter with
        #[arg(short, long, default_value = "")]
        search: String,

        /// Login username (default = centos)
        #[arg(short, long)]
        username: Option<String>,

        /// SSH port (default = 22)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to SSH keys (default = ~/.ssh)
        #[arg(short, long)]
        key_path: Option<String>,

        /// AWS region override
        #[arg(short, long)]
        region: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a saved default (username, port, key-path, directory, region)
    Set {
        /// Setting key
        key: String,
        /// Setting value
        value: String,
    },

    /// Remove a saved default
    Unset {
        /// Setting key
        key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Instances { command } => match command {
            InstanceCommands::List { search, region } => {
                cli::commands::list::execute(search, region).await?;
                Ok(())
            }
            InstanceCommands::Shell {
                search,
                username,
                port,
                key_path,
                region,
            } => {
                let connect = ConnectArgs {
                    username,
                    port,
                    key_path,
                    region,
                };
                cli::commands::shell::execute(search, connect).await?;
                Ok(())
            }
            InstanceCommands::Copy {
                file,
                search,
                username,
                port,
                key_path,
                directory,
                region,
            } => {
                let connect = ConnectArgs {
                    username,
                    port,
                    key_path,
                    region,
                };
                cli::commands::copy::execute(file, directory, search, connect).await?;
                Ok(())
            }
            InstanceCommands::Exec {
                command,
                search,
                username,
                port,
                key_path,
                region,
            } => {
                let connect = ConnectArgs {
                    username,
                    port,
                    key_path,
                    region,
                };
                cli::commands::exec::execute(command, search, connect).await?;
                Ok(())
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => {
                cli::commands::config::show()?;
                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                cli::commands::config::set(&key, &value)?;
                Ok(())
            }
            ConfigCommands::Unset { key } => {
                cli::commands::config::unset(&key)?;
                Ok(())
            }
        },
        Commands::Completions { shell } => {
            cli::completions::generate_script(shell);
            Ok(())
        }
    }
}
