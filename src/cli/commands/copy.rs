use std::path::PathBuf;

use crate::config::settings::{expand_tilde, Settings};
use crate::dispatch::{dispatch, Action, ActionRequest};
use crate::select::{resolve, ConsolePrompt};
use crate::ssh::SshTransport;
use crate::Result;

use super::{exit_if_empty, gather_instances, ConnectArgs};

pub async fn execute(
    file: PathBuf,
    directory: Option<String>,
    search: String,
    connect: ConnectArgs,
) -> Result<()> {
    let settings = Settings::load()?;
    let region = settings.resolve_region(connect.region.clone());

    let candidates = gather_instances(&search, region.as_deref()).await?;
    let selection = resolve(&candidates, &mut ConsolePrompt)?;
    exit_if_empty(&selection);

    let request = ActionRequest {
        action: Action::Copy {
            local_path: expand_tilde(&file.to_string_lossy()),
            remote_dir: settings.resolve_remote_dir(directory),
        },
        access: connect.access(&settings),
    };

    dispatch(selection, &request, &mut SshTransport)
}
