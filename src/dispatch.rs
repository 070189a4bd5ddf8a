use std::path::{Path, PathBuf};

use crate::inventory::ResolvedInstance;
use crate::select::TargetSelection;
use crate::{AllyError, Result};

/// Connection settings threaded from the command line into every remote
/// invocation. Resolved once per run; never read from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessConfig {
    pub username: String,
    pub port: u16,
    pub key_dir: PathBuf,
}

/// What to do on each resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open an interactive session. Single target only.
    Shell,
    /// Copy a local file into `remote_dir` on the target.
    Copy {
        local_path: PathBuf,
        remote_dir: String,
    },
    /// Run a command on the target with remote output visible.
    Execute { command: String },
}

/// A validated remote-action request, ready to fan out.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    pub action: Action,
    pub access: AccessConfig,
}

/// One concrete transport invocation against a single host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCall {
    pub username: String,
    pub host: String,
    pub port: u16,
    pub key_file: PathBuf,
    pub action: Action,
}

/// External mechanism that performs the remote action. Blocking; the
/// dispatcher never has two invocations in flight.
pub trait Transport {
    fn invoke(&mut self, call: &RemoteCall) -> Result<()>;
}

/// Fan the requested action out over the selection, one target at a time.
///
/// Empty and cancelled selections dispatch nothing. A failed invocation is
/// reported with the target's identity and the loop moves on to the next
/// target; one unreachable host must not block the rest of a multi-pick.
pub fn dispatch(
    selection: TargetSelection,
    request: &ActionRequest,
    transport: &mut dyn Transport,
) -> Result<()> {
    let targets = match selection {
        TargetSelection::Empty | TargetSelection::Cancelled => return Ok(()),
        TargetSelection::Single(instance) => vec![instance],
        TargetSelection::Multiple(instances) => {
            if request.action == Action::Shell {
                return Err(AllyError::MultiTargetUnsupported);
            }
            instances
        }
    };

    for instance in targets {
        let call = RemoteCall {
            username: request.access.username.clone(),
            host: instance.private_address.clone(),
            port: request.access.port,
            key_file: key_file_path(&request.access.key_dir, &instance.key_name),
            action: request.action.clone(),
        };

        announce(&instance, &request.action);

        if let Err(e) = transport.invoke(&call) {
            eprintln!(
                "..failed on {} ({}): {}",
                instance.display_name, instance.private_address, e
            );
        }
    }

    Ok(())
}

/// Credential path for an instance: `{key_dir}/{key_name}.pem`.
pub fn key_file_path(key_dir: &Path, key_name: &str) -> PathBuf {
    key_dir.join(format!("{}.pem", key_name))
}

fn announce(instance: &ResolvedInstance, action: &Action) {
    match action {
        Action::Shell => println!(
            "..connecting to {} @ {}",
            instance.display_name, instance.private_address
        ),
        Action::Copy { local_path, .. } => println!(
            "..copying {} to {} ({})",
            local_path.display(),
            instance.display_name,
            instance.private_address
        ),
        Action::Execute { command } => println!(
            "..executing {} on {} ({})",
            command, instance.display_name, instance.private_address
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingTransport {
        calls: Vec<RemoteCall>,
        fail_hosts: Vec<String>,
    }

    impl RecordingTransport {
        fn new() -> Self {
            Self {
                calls: Vec::new(),
                fail_hosts: Vec::new(),
            }
        }

        fn failing_on(host: &str) -> Self {
            Self {
                calls: Vec::new(),
                fail_hosts: vec![host.to_string()],
            }
        }
    }

    impl Transport for RecordingTransport {
        fn invoke(&mut self, call: &RemoteCall) -> Result<()> {
            self.calls.push(call.clone());
            if self.fail_hosts.contains(&call.host) {
                return Err(AllyError::SshCommand("exited with code: Some(255)".into()));
            }
            Ok(())
        }
    }

    fn instance(name: &str, host: &str, key_name: &str) -> ResolvedInstance {
        ResolvedInstance {
            id: format!("i-{}", name),
            display_name: name.to_string(),
            private_address: host.to_string(),
            public_address: String::new(),
            key_name: key_name.to_string(),
            name_column_width: name.len(),
        }
    }

    fn shell_request() -> ActionRequest {
        ActionRequest {
            action: Action::Shell,
            access: AccessConfig {
                username: "centos".to_string(),
                port: 22,
                key_dir: PathBuf::from("/home/op/.ssh"),
            },
        }
    }

    fn copy_request(remote_dir: &str) -> ActionRequest {
        ActionRequest {
            action: Action::Copy {
                local_path: PathBuf::from("payload.tar"),
                remote_dir: remote_dir.to_string(),
            },
            access: shell_request().access,
        }
    }

    #[test]
    fn test_empty_selection_invokes_nothing() {
        let mut transport = RecordingTransport::new();
        dispatch(TargetSelection::Empty, &shell_request(), &mut transport).unwrap();
        assert!(transport.calls.is_empty());
    }

    #[test]
    fn test_cancelled_selection_invokes_nothing() {
        let mut transport = RecordingTransport::new();
        dispatch(TargetSelection::Cancelled, &shell_request(), &mut transport).unwrap();
        assert!(transport.calls.is_empty());
    }

    #[test]
    fn test_single_shell_invokes_once_with_derived_key() {
        let mut transport = RecordingTransport::new();
        let selection = TargetSelection::Single(instance("web-1", "10.0.0.5", "prod-key"));

        dispatch(selection, &shell_request(), &mut transport).unwrap();

        assert_eq!(transport.calls.len(), 1);
        let call = &transport.calls[0];
        assert_eq!(call.username, "centos");
        assert_eq!(call.host, "10.0.0.5");
        assert_eq!(call.port, 22);
        assert_eq!(call.key_file, PathBuf::from("/home/op/.ssh/prod-key.pem"));
    }

    #[test]
    fn test_multi_target_shell_is_rejected() {
        let mut transport = RecordingTransport::new();
        let selection = TargetSelection::Multiple(vec![
            instance("web-1", "10.0.0.5", "k"),
            instance("web-2", "10.0.0.6", "k"),
        ]);

        let result = dispatch(selection, &shell_request(), &mut transport);

        assert!(matches!(result, Err(AllyError::MultiTargetUnsupported)));
        assert!(transport.calls.is_empty());
    }

    #[test]
    fn test_copy_fans_out_in_selection_order() {
        let mut transport = RecordingTransport::new();
        let selection = TargetSelection::Multiple(vec![
            instance("web-2", "10.0.0.6", "key-b"),
            instance("web-1", "10.0.0.5", "key-a"),
        ]);

        dispatch(selection, &copy_request("/tmp"), &mut transport).unwrap();

        let hosts: Vec<&str> = transport.calls.iter().map(|c| c.host.as_str()).collect();
        assert_eq!(hosts, vec!["10.0.0.6", "10.0.0.5"]);
        // Each target authenticates with its own key
        assert_eq!(
            transport.calls[0].key_file,
            PathBuf::from("/home/op/.ssh/key-b.pem")
        );
        assert_eq!(
            transport.calls[1].key_file,
            PathBuf::from("/home/op/.ssh/key-a.pem")
        );
    }

    #[test]
    fn test_fan_out_continues_past_a_failed_target() {
        let mut transport = RecordingTransport::failing_on("10.0.0.5");
        let selection = TargetSelection::Multiple(vec![
            instance("web-1", "10.0.0.5", "k"),
            instance("web-2", "10.0.0.6", "k"),
        ]);

        let result = dispatch(selection, &copy_request("/tmp"), &mut transport);

        assert!(result.is_ok());
        assert_eq!(transport.calls.len(), 2);
    }

    #[test]
    fn test_execute_supports_multiple_targets() {
        let mut transport = RecordingTransport::new();
        let request = ActionRequest {
            action: Action::Execute {
                command: "uptime".to_string(),
            },
            access: shell_request().access,
        };
        let selection = TargetSelection::Multiple(vec![
            instance("web-1", "10.0.0.5", "k"),
            instance("web-2", "10.0.0.6", "k"),
        ]);

        dispatch(selection, &request, &mut transport).unwrap();
        assert_eq!(transport.calls.len(), 2);
    }

    #[test]
    fn test_key_file_path() {
        assert_eq!(
            key_file_path(Path::new("/keys"), "staging"),
            PathBuf::from("/keys/staging.pem")
        );
    }
}
