//! Transport that shells out to the system `ssh` and `scp` binaries.

use std::borrow::Cow;
use std::process::{Command, Stdio};

use crate::dispatch::{Action, RemoteCall, Transport};
use crate::{AllyError, Result};

pub struct SshTransport;

impl Transport for SshTransport {
    fn invoke(&mut self, call: &RemoteCall) -> Result<()> {
        let mut cmd = build_command(call);

        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| transport_error(&call.action, e.to_string()))?;

        if !status.success() {
            return Err(transport_error(
                &call.action,
                format!("exited with code: {:?}", status.code()),
            ));
        }

        Ok(())
    }
}

/// Build the process invocation for one remote call without running it.
///
/// `Execute` passes the remote command as a single quoted argument so the
/// remote shell sees it exactly as the user typed it; `-t` keeps remote
/// output attached to the local terminal.
pub fn build_command(call: &RemoteCall) -> Command {
    let destination = format!("{}@{}", call.username, call.host);

    match &call.action {
        Action::Shell => {
            let mut cmd = Command::new("ssh");
            cmd.arg("-i")
                .arg(&call.key_file)
                .arg("-p")
                .arg(call.port.to_string())
                .arg(&destination);
            cmd
        }
        Action::Copy {
            local_path,
            remote_dir,
        } => {
            let mut cmd = Command::new("scp");
            cmd.arg("-i")
                .arg(&call.key_file)
                .arg("-P")
                .arg(call.port.to_string())
                .arg(local_path)
                .arg(format!("{}:{}", destination, remote_dir));
            cmd
        }
        Action::Execute { command } => {
            let mut cmd = Command::new("ssh");
            cmd.arg("-t")
                .arg("-i")
                .arg(&call.key_file)
                .arg("-p")
                .arg(call.port.to_string())
                .arg(&destination)
                .arg(shell_escape::escape(Cow::from(command.as_str())).as_ref());
            cmd
        }
    }
}

fn transport_error(action: &Action, detail: String) -> AllyError {
    match action {
        Action::Copy { .. } => AllyError::ScpTransfer(detail),
        Action::Shell | Action::Execute { .. } => AllyError::SshCommand(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn call(action: Action) -> RemoteCall {
        RemoteCall {
            username: "centos".to_string(),
            host: "10.0.0.5".to_string(),
            port: 2222,
            key_file: PathBuf::from("/home/op/.ssh/prod-key.pem"),
            action,
        }
    }

    fn argv(cmd: &Command) -> Vec<String> {
        std::iter::once(cmd.get_program())
            .chain(cmd.get_args())
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_shell_command_line() {
        let cmd = build_command(&call(Action::Shell));
        assert_eq!(
            argv(&cmd),
            vec![
                "ssh",
                "-i",
                "/home/op/.ssh/prod-key.pem",
                "-p",
                "2222",
                "centos@10.0.0.5",
            ]
        );
    }

    #[test]
    fn test_copy_command_line() {
        let action = Action::Copy {
            local_path: PathBuf::from("build.tar"),
            remote_dir: "/tmp".to_string(),
        };
        let cmd = build_command(&call(action));
        assert_eq!(
            argv(&cmd),
            vec![
                "scp",
                "-i",
                "/home/op/.ssh/prod-key.pem",
                "-P",
                "2222",
                "build.tar",
                "centos@10.0.0.5:/tmp",
            ]
        );
    }

    #[test]
    fn test_execute_command_line_quotes_the_remote_command() {
        let action = Action::Execute {
            command: "tail -f /var/log/messages".to_string(),
        };
        let cmd = build_command(&call(action));
        assert_eq!(
            argv(&cmd),
            vec![
                "ssh",
                "-t",
                "-i",
                "/home/op/.ssh/prod-key.pem",
                "-p",
                "2222",
                "centos@10.0.0.5",
                "'tail -f /var/log/messages'",
            ]
        );
    }

    #[test]
    fn test_execute_plain_word_needs_no_quoting() {
        let action = Action::Execute {
            command: "uptime".to_string(),
        };
        let cmd = build_command(&call(action));
        assert_eq!(argv(&cmd).last().map(String::as_str), Some("uptime"));
    }

    #[test]
    fn test_copy_failure_maps_to_scp_error() {
        let action = Action::Copy {
            local_path: PathBuf::from("f"),
            remote_dir: "~".to_string(),
        };
        let err = transport_error(&action, "boom".to_string());
        assert!(matches!(err, AllyError::ScpTransfer(_)));

        let err = transport_error(&Action::Shell, "boom".to_string());
        assert!(matches!(err, AllyError::SshCommand(_)));
    }
}
