//! [`WindowManager`] implementation backed by the `aerospace` CLI.
//!
//! Every method spawns one short-lived `aerospace` process and waits for it
//! to exit.  There is no timeout: a hung client hangs the caller.

use super::parse::{self, ParseError, MONITORS_FORMAT, MOUSE_MONITOR_FORMAT, WORKSPACES_FORMAT};
use crate::command::{Monitor, Snapshot};
use crate::traits::WindowManager;
use log::debug;
use std::process::{Command, ExitStatus};

/// AeroSpace-backed window manager.
pub struct AerospaceWm {
    bin: String,
}

/// Errors that can occur when talking to AeroSpace.
#[derive(Debug, thiserror::Error)]
pub enum AerospaceError {
    /// The client could not be started at all (e.g. not installed).
    #[error("failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    /// The client exited with a non-zero status.
    #[error("{command} failed ({status}): {output}")]
    Failed {
        command: String,
        status: ExitStatus,
        output: String,
    },
    /// A command that should be silent printed something.
    #[error("unexpected output from {command}: {output}")]
    UnexpectedOutput { command: String, output: String },
    #[error("failed to parse aerospace output: {0}")]
    Parse(#[from] ParseError),
}

impl Default for AerospaceWm {
    fn default() -> Self {
        Self::new()
    }
}

impl AerospaceWm {
    /// Use the `aerospace` binary found on `PATH`.
    pub fn new() -> Self {
        Self::with_binary("aerospace")
    }

    /// Use a specific client binary.
    pub fn with_binary(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.bin, args.join(" "))
    }

    fn run(&self, args: &[&str]) -> Result<std::process::Output, AerospaceError> {
        debug!("running {}", self.describe(args));
        Command::new(&self.bin)
            .args(args)
            .output()
            .map_err(|source| AerospaceError::Spawn {
                command: self.describe(args),
                source,
            })
    }

    /// Run a read-only query and return its stdout.
    fn query(&self, args: &[&str]) -> Result<String, AerospaceError> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(AerospaceError::Failed {
                command: self.describe(args),
                status: output.status,
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run a command that must succeed silently.
    ///
    /// AeroSpace reports some failures on stdout/stderr while still exiting
    /// with status 0, so any output counts as an error.
    fn execute(&self, args: &[&str]) -> Result<(), AerospaceError> {
        let output = self.run(args)?;
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let combined = combined.trim().to_string();

        if !output.status.success() {
            return Err(AerospaceError::Failed {
                command: self.describe(args),
                status: output.status,
                output: combined,
            });
        }
        if !combined.is_empty() {
            return Err(AerospaceError::UnexpectedOutput {
                command: self.describe(args),
                output: combined,
            });
        }
        Ok(())
    }
}

//  WindowManager implementation

impl WindowManager for AerospaceWm {
    type Error = AerospaceError;

    fn snapshot(&self) -> Result<Snapshot, Self::Error> {
        let output = self.query(&["list-workspaces", "--all", "--format", WORKSPACES_FORMAT])?;
        Ok(parse::parse_workspaces(&output)?)
    }

    fn monitors(&self) -> Result<Vec<Monitor>, Self::Error> {
        let output = self.query(&["list-monitors", "--format", MONITORS_FORMAT])?;
        Ok(parse::parse_monitors(&output)?)
    }

    fn mouse_monitor(&self) -> Result<u32, Self::Error> {
        let output = self.query(&["list-monitors", "--mouse", "--format", MOUSE_MONITOR_FORMAT])?;
        Ok(parse::parse_mouse_monitor(&output)?)
    }

    fn move_workspace_to_monitor(&self, workspace: &str, monitor_id: u32) -> Result<(), Self::Error> {
        let monitor = monitor_id.to_string();
        self.execute(&["move-workspace-to-monitor", "--workspace", workspace, &monitor])
    }

    fn move_window_to_workspace(&self, workspace: &str, focus_follows: bool) -> Result<(), Self::Error> {
        if focus_follows {
            self.execute(&["move-node-to-workspace", "--focus-follows-window", workspace])
        } else {
            self.execute(&["move-node-to-workspace", workspace])
        }
    }

    fn switch_workspace(&self, workspace: &str) -> Result<(), Self::Error> {
        self.execute(&["workspace", workspace])
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    // `sh -c <script> <args...>` stands in for the client: the script sees
    // the aerospace arguments shifted by one (`$0` is the first of them).

    fn fake(script: &str) -> (AerospaceWm, Vec<String>) {
        (AerospaceWm::with_binary("sh"), vec!["-c".into(), script.into()])
    }

    fn run_with(wm: &AerospaceWm, prefix: &[String], args: &[&str]) -> Result<(), AerospaceError> {
        let mut all: Vec<&str> = prefix.iter().map(String::as_str).collect();
        all.extend_from_slice(args);
        wm.execute(&all)
    }

    #[test]
    fn silent_success_is_ok() {
        let (wm, prefix) = fake("exit 0");
        assert!(run_with(&wm, &prefix, &["workspace", "A"]).is_ok());
    }

    #[test]
    fn output_with_zero_status_is_an_error() {
        let (wm, prefix) = fake("echo 'Workspace Z does not exist'");
        let err = run_with(&wm, &prefix, &["workspace", "Z"]).unwrap_err();
        match err {
            AerospaceError::UnexpectedOutput { output, .. } => {
                assert_eq!(output, "Workspace Z does not exist")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn non_zero_status_captures_output() {
        let (wm, prefix) = fake("echo boom >&2; exit 3");
        let err = run_with(&wm, &prefix, &["workspace", "A"]).unwrap_err();
        match err {
            AerospaceError::Failed { output, status, .. } => {
                assert_eq!(output, "boom");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn missing_binary_is_a_spawn_error() {
        let wm = AerospaceWm::with_binary("/nonexistent/aerospace");
        let err = wm.switch_workspace("A").unwrap_err();
        assert!(matches!(err, AerospaceError::Spawn { .. }));
        assert!(err.to_string().contains("/nonexistent/aerospace workspace A"));
    }

    #[test]
    fn query_returns_stdout() {
        let wm = AerospaceWm::with_binary("sh");
        let out = wm.query(&["-c", "printf '2\\n'"]).unwrap();
        assert_eq!(parse::parse_mouse_monitor(&out).unwrap(), 2);
    }

    #[test]
    fn query_output_feeds_monitor_parser() {
        let wm = AerospaceWm::with_binary("sh");
        let out = wm.query(&["-c", "printf '1|DELL\\n2|Built-in Retina Display\\n'"]).unwrap();
        let monitors = parse::parse_monitors(&out).unwrap();
        assert_eq!(monitors.len(), 2);
        assert_eq!(monitors[1].name, "Built-in Retina Display");
    }

    #[test]
    fn failing_query_is_an_error() {
        let wm = AerospaceWm::with_binary("sh");
        let err = wm.query(&["-c", "echo 'not running' >&2; exit 1"]).unwrap_err();
        assert!(err.to_string().contains("not running"));
    }
}
