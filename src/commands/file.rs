//! Command file parsing.
//!
//! Command files are line-oriented ordered lists of opaque commands, one
//! per line, exactly as an operator would type them.

use std::path::Path;

use crate::commands::applier::ApplyError;

/// Read a command file into an ordered command list.
///
/// Lines are trimmed and blank lines dropped. A leading `enable` line is
/// discarded: the applier already runs privileged and would reject it.
pub fn read_command_file(path: &Path) -> Result<Vec<String>, ApplyError> {
    let content = std::fs::read_to_string(path).map_err(|source| ApplyError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let mut commands: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    if commands.first().map(String::as_str) == Some("enable") {
        commands.remove(0);
    }

    if commands.is_empty() {
        return Err(ApplyError::EmptyFile {
            path: path.display().to_string(),
        });
    }

    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commands.conf");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_reads_ordered_commands() {
        let (_dir, path) = write_file("router bgp 65001\nneighbor 10.1.1.1 shutdown\n");
        let commands = read_command_file(&path).unwrap();
        assert_eq!(
            commands,
            vec!["router bgp 65001", "neighbor 10.1.1.1 shutdown"]
        );
    }

    #[test]
    fn test_trims_and_skips_blank_lines() {
        let (_dir, path) = write_file("  first \n\n\t\nsecond\n\n");
        let commands = read_command_file(&path).unwrap();
        assert_eq!(commands, vec!["first", "second"]);
    }

    #[test]
    fn test_drops_leading_enable() {
        let (_dir, path) = write_file("enable\nconfigure something\n");
        let commands = read_command_file(&path).unwrap();
        assert_eq!(commands, vec!["configure something"]);

        // Only a *leading* enable is special.
        let (_dir, path) = write_file("configure something\nenable\n");
        let commands = read_command_file(&path).unwrap();
        assert_eq!(commands, vec!["configure something", "enable"]);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_command_file(&dir.path().join("nope.conf")).unwrap_err();
        assert!(matches!(err, ApplyError::Read { .. }));
    }

    #[test]
    fn test_effectively_empty_file() {
        let (_dir, path) = write_file("\n  \nenable\n");
        let err = read_command_file(&path).unwrap_err();
        assert!(matches!(err, ApplyError::EmptyFile { .. }));
    }
}
