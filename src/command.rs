//! Commands and types used throughout aeromanager.
//!
//! [`Command`] is the set of actions the command line can request, and
//! [`Monitor`] / [`Workspace`] / [`Snapshot`] describe what AeroSpace
//! reports about the current desktop.

use clap::Subcommand;
use std::collections::BTreeMap;
use std::fmt;

/// Every action the workspace manager can perform.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Rearrange workspaces based on the monitor setup
    Rearrange,

    /// Switch workspace on the monitor under the cursor (1-5 or 6-0)
    Hyprworkspace {
        /// Workspace number, 0 stands for 10
        #[arg(allow_negative_numbers = true)]
        number: i32,
    },

    /// Move the focused window to a workspace on the monitor under the cursor
    Hyprmove {
        /// Workspace number, 0 stands for 10
        #[arg(
            allow_negative_numbers = true,
            required_unless_present = "visible",
            conflicts_with = "visible"
        )]
        number: Option<i32>,

        /// Move to the workspace currently visible on the monitor under the cursor
        #[arg(long)]
        visible: bool,
    },

    /// Print the monitors and workspaces AeroSpace reports
    Status,
}

/// A monitor as reported by AeroSpace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    /// 1-based sequential number, ordered left to right as arranged in the
    /// macOS display settings.
    pub id: u32,
    /// Display name (e.g. `"Built-in Retina Display"`).
    pub name: String,
}

/// A workspace as reported by `aerospace list-workspaces`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub name: String,
    /// True for the single workspace holding keyboard focus.
    pub is_focused: bool,
    /// True if this is the workspace currently shown on its monitor.
    pub is_visible: bool,
    /// Id of the monitor the workspace belongs to.
    pub monitor_id: u32,
    pub monitor_name: String,
}

/// Workspaces and monitors read from a single query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Workspaces in the order AeroSpace listed them.
    pub workspaces: Vec<Workspace>,
    /// One entry per distinct monitor, ordered by id.
    pub monitors: Vec<Monitor>,
}

impl Snapshot {
    /// Build a snapshot, deriving the monitor list from the monitors the
    /// workspaces reference.
    pub fn from_workspaces(workspaces: Vec<Workspace>) -> Self {
        let by_id: BTreeMap<u32, &str> = workspaces
            .iter()
            .map(|ws| (ws.monitor_id, ws.monitor_name.as_str()))
            .collect();
        let monitors = by_id
            .into_iter()
            .map(|(id, name)| Monitor {
                id,
                name: name.to_string(),
            })
            .collect();
        Self {
            workspaces,
            monitors,
        }
    }

    /// Whether a workspace called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.workspaces.iter().any(|ws| ws.name == name)
    }

    /// The workspace currently shown on `monitor_id`, if any.
    pub fn visible_on(&self, monitor_id: u32) -> Option<&Workspace> {
        self.workspaces
            .iter()
            .find(|ws| ws.monitor_id == monitor_id && ws.is_visible)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for monitor in &self.monitors {
            writeln!(f, "monitor {}: {}", monitor.id, monitor.name)?;
            for ws in self.workspaces.iter().filter(|ws| ws.monitor_id == monitor.id) {
                let flags = match (ws.is_focused, ws.is_visible) {
                    (true, _) => " (focused)",
                    (false, true) => " (visible)",
                    (false, false) => "",
                };
                writeln!(f, "  {}{}", ws.name, flags)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn workspace(name: &str, monitor_id: u32, monitor_name: &str) -> Workspace {
    Workspace {
        name: name.into(),
        is_focused: false,
        is_visible: false,
        monitor_id,
        monitor_name: monitor_name.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitors_are_derived_in_id_order() {
        let snap = Snapshot::from_workspaces(vec![
            workspace("R1", 3, "XZ272U P (1)"),
            workspace("A", 2, "Built-in Retina Display"),
            workspace("L1", 1, "XZ272U P (2)"),
            workspace("B", 2, "Built-in Retina Display"),
        ]);
        assert_eq!(
            snap.monitors,
            vec![
                Monitor { id: 1, name: "XZ272U P (2)".into() },
                Monitor { id: 2, name: "Built-in Retina Display".into() },
                Monitor { id: 3, name: "XZ272U P (1)".into() },
            ]
        );
        assert_eq!(snap.workspaces[0].name, "R1");
        assert_eq!(snap.workspaces.len(), 4);
    }

    #[test]
    fn empty_snapshot_has_no_monitors() {
        let snap = Snapshot::from_workspaces(Vec::new());
        assert!(snap.monitors.is_empty());
        assert!(!snap.contains("A"));
    }

    #[test]
    fn contains_matches_exact_names() {
        let snap = Snapshot::from_workspaces(vec![workspace("L1", 1, "DELL")]);
        assert!(snap.contains("L1"));
        assert!(!snap.contains("L"));
        assert!(!snap.contains("l1"));
    }

    #[test]
    fn visible_on_picks_the_visible_workspace() {
        let mut shown = workspace("L2", 1, "DELL");
        shown.is_visible = true;
        let snap = Snapshot::from_workspaces(vec![workspace("L1", 1, "DELL"), shown]);
        assert_eq!(snap.visible_on(1).map(|ws| ws.name.as_str()), Some("L2"));
        assert!(snap.visible_on(2).is_none());
    }

    #[test]
    fn display_groups_workspaces_by_monitor() {
        let mut focused = workspace("A", 2, "Built-in");
        focused.is_focused = true;
        focused.is_visible = true;
        let mut visible = workspace("L1", 1, "DELL");
        visible.is_visible = true;
        let snap = Snapshot::from_workspaces(vec![focused, visible, workspace("L2", 1, "DELL")]);
        assert_eq!(
            snap.to_string(),
            "monitor 1: DELL\n  L1 (visible)\n  L2\nmonitor 2: Built-in\n  A (focused)\n"
        );
    }
}
