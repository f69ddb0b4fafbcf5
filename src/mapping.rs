//! Workspace-number to workspace-name mapping.
//!
//! The number keys `1`–`0` are translated into a workspace name depending on
//! how many monitors are attached and which monitor is targeted:
//!
//! | monitors | target         | 1–5      | 6–0                  |
//! |----------|----------------|----------|----------------------|
//! | 1        | —              | `L1..L5` | `R1..R5`             |
//! | 2        | built-in       | see rule | see rule             |
//! | 2        | external       | `L1..L5` | `R1..R5`             |
//! | 3        | built-in       | see rule | see rule             |
//! | 3        | left external  | `L1..L5` | `L1..L5` (wraps)     |
//! | 3        | right external | `R1..R5` | `R1..R5` (wraps)     |
//!
//! The built-in rule is selected by [`BuiltinRule`].

use crate::command::Monitor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Substring identifying the laptop display in AeroSpace monitor names.
pub const DEFAULT_BUILTIN_MARKER: &str = "Built-in";

/// A validated workspace number in `1..=10`.
///
/// The `0` key is treated as `10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkspaceNumber(u8);

impl WorkspaceNumber {
    /// Validate a raw key number. Accepts `0..=10`.
    pub fn new(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self(10)),
            1..=10 => Some(Self(raw as u8)),
            _ => None,
        }
    }

    /// The number in `1..=10`.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Position within its half of the keyboard row, in `1..=5`.
    pub fn slot(self) -> u8 {
        (self.0 - 1) % 5 + 1
    }

    /// True for the `6`–`0` half.
    pub fn is_upper(self) -> bool {
        self.0 > 5
    }
}

impl fmt::Display for WorkspaceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Naming scheme for workspaces on the built-in display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinRule {
    /// `1..5 -> A..E`, `6..0 -> F..J`.
    #[default]
    Letters,
    /// `1..5 -> B1..B5`, `6..0` wraps to `B1..B5`.
    Numbered,
}

/// Which monitor a workspace is meant to live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    BuiltIn,
    Left,
    Right,
}

/// The built-in display and the external monitors of a setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorRoles {
    pub builtin: Option<u32>,
    /// External monitor ids in ascending (left-to-right) order.
    pub externals: Vec<u32>,
}

impl MonitorRoles {
    /// Split `monitors` into the built-in display and the rest.
    ///
    /// If several names contain `marker`, the last one listed is the
    /// built-in display and the others count as externals.
    pub fn resolve(monitors: &[Monitor], marker: &str) -> Self {
        let builtin = monitors
            .iter()
            .rev()
            .find(|m| m.name.contains(marker))
            .map(|m| m.id);
        let mut externals: Vec<u32> = monitors
            .iter()
            .map(|m| m.id)
            .filter(|id| Some(*id) != builtin)
            .collect();
        externals.sort_unstable();
        Self { builtin, externals }
    }

    /// Left external monitor of a two-external setup.
    pub fn left(&self) -> Option<u32> {
        match self.externals.as_slice() {
            [left, _] => Some(*left),
            _ => None,
        }
    }

    /// Right external monitor of a two-external setup.
    pub fn right(&self) -> Option<u32> {
        match self.externals.as_slice() {
            [_, right] => Some(*right),
            _ => None,
        }
    }
}

/// Pure number-to-name lookup.
#[derive(Debug, Clone)]
pub struct WorkspaceMapper {
    rule: BuiltinRule,
    marker: String,
}

impl Default for WorkspaceMapper {
    fn default() -> Self {
        Self::new(BuiltinRule::default(), DEFAULT_BUILTIN_MARKER)
    }
}

impl WorkspaceMapper {
    pub fn new(rule: BuiltinRule, marker: impl Into<String>) -> Self {
        Self {
            rule,
            marker: marker.into(),
        }
    }

    pub fn rule(&self) -> BuiltinRule {
        self.rule
    }

    /// Resolve monitor roles using this mapper's built-in marker.
    pub fn roles(&self, monitors: &[Monitor]) -> MonitorRoles {
        MonitorRoles::resolve(monitors, &self.marker)
    }

    /// Map `num` to the workspace name it selects on monitor `target`.
    pub fn map(&self, num: WorkspaceNumber, target: u32, monitors: &[Monitor]) -> String {
        match monitors.len() {
            2 => {
                let is_builtin = monitors
                    .iter()
                    .any(|m| m.id == target && m.name.contains(&self.marker));
                if is_builtin {
                    self.builtin_name(num)
                } else {
                    single_monitor_name(num)
                }
            }
            3 => {
                let roles = self.roles(monitors);
                if roles.builtin == Some(target) {
                    self.builtin_name(num)
                } else if roles.left() == Some(target) {
                    format!("L{}", num.slot())
                } else if roles.right() == Some(target) {
                    format!("R{}", num.slot())
                } else {
                    single_monitor_name(num)
                }
            }
            _ => single_monitor_name(num),
        }
    }

    fn builtin_name(&self, num: WorkspaceNumber) -> String {
        match self.rule {
            BuiltinRule::Letters => char::from(b'A' + num.get() - 1).to_string(),
            BuiltinRule::Numbered => format!("B{}", num.slot()),
        }
    }

    /// Which monitor a workspace called `name` belongs on, or `None` for
    /// names outside the scheme.
    pub fn placement(&self, name: &str) -> Option<Placement> {
        let bytes = name.as_bytes();
        match bytes {
            [b'A'..=b'L'] => Some(Placement::BuiltIn),
            [b'L', b'1'..=b'5'] => Some(Placement::Left),
            [b'R', b'1'..=b'5'] => Some(Placement::Right),
            [b'B', b'1'..=b'5'] if self.rule == BuiltinRule::Numbered => Some(Placement::BuiltIn),
            _ => None,
        }
    }
}

/// `1..5 -> L1..L5`, `6..0 -> R1..R5`.
fn single_monitor_name(num: WorkspaceNumber) -> String {
    if num.is_upper() {
        format!("R{}", num.slot())
    } else {
        format!("L{}", num.slot())
    }
}
