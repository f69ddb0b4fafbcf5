//! Parsers for the pipe-delimited output of the `aerospace` query commands.
//!
//! The formats are requested explicitly with `--format`, see
//! [`WORKSPACES_FORMAT`], [`MONITORS_FORMAT`] and [`MOUSE_MONITOR_FORMAT`].

use crate::command::{Monitor, Snapshot, Workspace};

/// `--format` argument for `aerospace list-workspaces --all`.
pub const WORKSPACES_FORMAT: &str =
    "%{workspace}|%{workspace-is-focused}|%{workspace-is-visible}|%{monitor-id}|%{monitor-name}";

/// `--format` argument for `aerospace list-monitors`.
pub const MONITORS_FORMAT: &str = "%{monitor-id}|%{monitor-name}";

/// `--format` argument for `aerospace list-monitors --mouse`.
pub const MOUSE_MONITOR_FORMAT: &str = "%{monitor-id}";

/// Malformed query output.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid workspace output format: {0}")]
    WorkspaceLine(String),
    #[error("invalid monitor output format: {0}")]
    MonitorLine(String),
    #[error("invalid {field} value: {value}")]
    Bool { field: &'static str, value: String },
    #[error("invalid monitor ID: {0}")]
    MonitorId(String),
}

/// Parse `list-workspaces` output into a [`Snapshot`].
///
/// Blank lines are skipped.  The monitor name is the last field and may
/// itself contain `|`.
pub fn parse_workspaces(output: &str) -> Result<Snapshot, ParseError> {
    let workspaces = output
        .trim()
        .lines()
        .filter(|line| !line.is_empty())
        .map(parse_workspace_line)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Snapshot::from_workspaces(workspaces))
}

fn parse_workspace_line(line: &str) -> Result<Workspace, ParseError> {
    let parts: Vec<&str> = line.splitn(5, '|').collect();
    let [name, focused, visible, monitor_id, monitor_name] = parts[..] else {
        return Err(ParseError::WorkspaceLine(line.to_string()));
    };
    Ok(Workspace {
        name: name.to_string(),
        is_focused: parse_bool("workspace-is-focused", focused)?,
        is_visible: parse_bool("workspace-is-visible", visible)?,
        monitor_id: parse_monitor_id(monitor_id)?,
        monitor_name: monitor_name.to_string(),
    })
}

/// Parse `list-monitors` output, keeping AeroSpace's left-to-right order.
///
/// Blank lines are skipped.  The name may contain `|`.
pub fn parse_monitors(output: &str) -> Result<Vec<Monitor>, ParseError> {
    output
        .trim()
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| -> Result<Monitor, ParseError> {
            let (id, name) = line
                .split_once('|')
                .ok_or_else(|| ParseError::MonitorLine(line.to_string()))?;
            Ok(Monitor {
                id: parse_monitor_id(id)?,
                name: name.to_string(),
            })
        })
        .collect()
}

/// Parse `list-monitors --mouse` output: a single monitor id.
pub fn parse_mouse_monitor(output: &str) -> Result<u32, ParseError> {
    parse_monitor_id(output.trim())
}

fn parse_bool(field: &'static str, value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::Bool {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_monitor_id(value: &str) -> Result<u32, ParseError> {
    value
        .parse()
        .map_err(|_| ParseError::MonitorId(value.to_string()))
}
