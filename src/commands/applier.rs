//! Command application.
//!
//! The applier is an injected capability so the monitor can be exercised
//! with a deterministic fake; the real one hands each command line to the
//! system shell.

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

use crate::commands::file::read_command_file;

/// Errors raised while applying a command file.
#[derive(Debug, Error)]
pub enum ApplyError {
    /// The command file could not be read.
    #[error("failed to read command file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The command file held no commands after trimming.
    #[error("command file {path} is empty")]
    EmptyFile { path: String },

    /// The command process could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and was rejected.
    #[error("command `{command}` failed: {detail}")]
    CommandRejected { command: String, detail: String },
}

/// Applies one opaque command to the running system.
#[async_trait]
pub trait CommandApplier: Send + Sync {
    async fn apply(&self, command: &str) -> Result<(), ApplyError>;
}

/// Applier that runs each command through the system shell.
pub struct ShellApplier;

#[async_trait]
impl CommandApplier for ShellApplier {
    async fn apply(&self, command: &str) -> Result<(), ApplyError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ApplyError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ApplyError::CommandRejected {
                command: command.to_string(),
                detail: format!("{} ({})", output.status, stderr.trim()),
            })
        }
    }
}

/// Apply a command file in order, stopping at the first rejected command.
///
/// Command files are ordered; later lines routinely depend on earlier
/// ones, so there is no point pushing on past a rejection. The commands
/// already applied stand; rollback is the operator's call, not ours.
/// Returns the number of commands applied.
pub async fn apply_command_file<A>(applier: &A, path: &Path) -> Result<usize, ApplyError>
where
    A: CommandApplier + ?Sized,
{
    let commands = read_command_file(path)?;

    for command in &commands {
        tracing::debug!(command = %command, "Applying command");
        applier.apply(command).await?;
    }

    Ok(commands.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Applier that accepts everything except commands containing "reject".
    #[derive(Default)]
    struct ScriptedApplier {
        applied: Mutex<Vec<String>>,
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl CommandApplier for ScriptedApplier {
        async fn apply(&self, command: &str) -> Result<(), ApplyError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            if command.contains("reject") {
                return Err(ApplyError::CommandRejected {
                    command: command.to_string(),
                    detail: "scripted".to_string(),
                });
            }
            self.applied.lock().unwrap().push(command.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_applies_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.conf");
        std::fs::write(&path, "first\nsecond\nthird\n").unwrap();

        let applier = ScriptedApplier::default();
        let count = apply_command_file(&applier, &path).await.unwrap();
        assert_eq!(count, 3);
        assert_eq!(
            applier.applied.lock().unwrap().as_slice(),
            ["first", "second", "third"]
        );
    }

    #[tokio::test]
    async fn test_stops_at_first_rejection() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.conf");
        std::fs::write(&path, "first\nreject this\nthird\n").unwrap();

        let applier = ScriptedApplier::default();
        let err = apply_command_file(&applier, &path).await.unwrap_err();
        match err {
            ApplyError::CommandRejected { command, .. } => assert_eq!(command, "reject this"),
            other => panic!("unexpected error: {other}"),
        }
        // The prefix was applied, the suffix never attempted.
        assert_eq!(applier.applied.lock().unwrap().as_slice(), ["first"]);
        assert_eq!(applier.attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_shell_applier_runs_commands() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("marker");
        let applier = ShellApplier;

        applier
            .apply(&format!("touch {}", marker.display()))
            .await
            .unwrap();
        assert!(marker.exists());

        let err = applier.apply("exit 3").await.unwrap_err();
        assert!(matches!(err, ApplyError::CommandRejected { .. }));
    }
}
