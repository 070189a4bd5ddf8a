pub mod config;
pub mod copy;
pub mod exec;
pub mod list;
pub mod shell;

use crate::aws::client::AwsClients;
use crate::aws::ec2::instance::running_instances;
use crate::config::settings::Settings;
use crate::dispatch::AccessConfig;
use crate::inventory::{filter_and_sort, normalize, ResolvedInstance};
use crate::select::TargetSelection;
use crate::ui::create_spinner;
use crate::Result;

/// Connection flags shared by `shell`, `copy`, and `exec`.
#[derive(Debug, Clone, Default)]
pub struct ConnectArgs {
    pub username: Option<String>,
    pub port: Option<u16>,
    pub key_path: Option<String>,
    pub region: Option<String>,
}

impl ConnectArgs {
    /// Resolve the flags against saved settings into the access config
    /// handed to the dispatcher.
    pub fn access(&self, settings: &Settings) -> AccessConfig {
        AccessConfig {
            username: settings.resolve_username(self.username.clone()),
            port: settings.resolve_port(self.port),
            key_dir: settings.resolve_key_dir(self.key_path.clone()),
        }
    }
}

/// Fetch the running-instance snapshot, normalize it, and filter it by the
/// search pattern. The one AWS round trip every instances subcommand makes.
pub async fn gather_instances(
    search: &str,
    region: Option<&str>,
) -> Result<Vec<ResolvedInstance>> {
    let spinner = create_spinner("Fetching instances...");
    let clients = AwsClients::new(region).await?;
    let records = running_instances(&clients).await?;
    spinner.finish_and_clear();

    filter_and_sort(normalize(&records, true), search)
}

/// Exit-code policy for a fresh selection: an empty match set was already
/// reported by the resolver and is fatal; a cancel ends the run cleanly.
pub fn exit_if_empty(selection: &TargetSelection) {
    if *selection == TargetSelection::Empty {
        std::process::exit(1);
    }
}
