//! The executors that tie the query layer, the mapper and the window
//! manager together.
//!
//! [`WorkspaceManager`] reacts to [`Command`]s by reading a fresh
//! [`Snapshot`] and issuing calls to the [`WindowManager`] trait.

use crate::command::{Command, Snapshot};
use crate::config::{Config, HomeWorkspaces};
use crate::mapping::{Placement, WorkspaceMapper, WorkspaceNumber};
use crate::traits::WindowManager;
use log::{debug, info, warn};

/// Largest monitor setup the naming scheme covers.
const MAX_MONITORS: usize = 3;

/// Possible errors from the executors.
#[derive(Debug, thiserror::Error)]
pub enum ManagerError {
    #[error("invalid workspace number: {0} (must be 1-5 or 6-0)")]
    InvalidWorkspaceNumber(i32),

    #[error("a workspace number or --visible is required")]
    MissingWorkspaceNumber,

    #[error("unsupported monitor configuration: {0} monitors")]
    UnsupportedMonitorCount(usize),

    #[error("could not identify monitors for {0}")]
    MonitorsNotIdentified(String),

    #[error("workspace {0} does not exist")]
    UnknownWorkspace(String),

    #[error("no visible workspace found on monitor {0}")]
    NoVisibleWorkspace(u32),

    /// The window manager returned an error.
    #[error("{context}: {message}")]
    WindowManager { context: String, message: String },
}

/// Wrap a backend error with a description of what was being attempted.
fn wm_error<E: std::fmt::Display>(context: impl Into<String>) -> impl FnOnce(E) -> ManagerError {
    let context = context.into();
    move |e| ManagerError::WindowManager {
        context,
        message: e.to_string(),
    }
}

/// Target monitor for each [`Placement`] during a rearrange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Targets {
    builtin: u32,
    left: u32,
    right: u32,
}

impl Targets {
    fn monitor_for(&self, placement: Placement) -> u32 {
        match placement {
            Placement::BuiltIn => self.builtin,
            Placement::Left => self.left,
            Placement::Right => self.right,
        }
    }
}

/// Runs the rearrange / switch / move actions.
///
/// Generic over any [`WindowManager`] implementation.
///
/// # Typical usage
///
/// ```ignore
/// let manager = WorkspaceManager::from_config(AerospaceWm::new(), &Config::default());
/// manager.handle(Command::Hyprworkspace { number: 3 })?;
/// ```
pub struct WorkspaceManager<W: WindowManager> {
    wm: W,
    mapper: WorkspaceMapper,
    homes: HomeWorkspaces,
}

impl<W: WindowManager> WorkspaceManager<W> {
    pub fn new(wm: W, mapper: WorkspaceMapper, homes: HomeWorkspaces) -> Self {
        Self { wm, mapper, homes }
    }

    pub fn from_config(wm: W, config: &Config) -> Self {
        Self::new(wm, config.mapper(), config.home_workspaces.clone())
    }

    /// Access the underlying window manager.
    pub fn wm(&self) -> &W {
        &self.wm
    }

    /// Process a single [`Command`].
    ///
    /// Returns a short report for the user, printed on stdout by the binary.
    pub fn handle(&self, cmd: Command) -> Result<String, ManagerError> {
        match cmd {
            Command::Rearrange => self.rearrange(),
            Command::Hyprworkspace { number } => self.switch_workspace(number),
            Command::Hyprmove { visible: true, .. } => self.move_window_to_visible(),
            Command::Hyprmove {
                number: Some(number),
                ..
            } => self.move_window(number),
            Command::Hyprmove { number: None, .. } => Err(ManagerError::MissingWorkspaceNumber),
            Command::Status => self.status(),
        }
    }

    /// Describe every monitor and the workspaces on it.
    ///
    /// The monitor list comes from its own query so that monitors without
    /// any workspace are listed as well.
    pub fn status(&self) -> Result<String, ManagerError> {
        let mut snapshot = self.snapshot()?;
        snapshot.monitors = self
            .wm
            .monitors()
            .map_err(wm_error("failed to list monitors"))?;
        Ok(snapshot.to_string().trim_end().to_string())
    }

    /// Fetch the current workspaces and monitors.
    pub fn snapshot(&self) -> Result<Snapshot, ManagerError> {
        self.wm
            .snapshot()
            .map_err(wm_error("failed to get workspace and monitor info"))
    }

    fn mouse_monitor(&self) -> Result<u32, ManagerError> {
        self.wm
            .mouse_monitor()
            .map_err(wm_error("failed to get mouse monitor"))
    }

    //  Rearrange

    /// Move every workspace to the monitor its name assigns it to, then
    /// focus the home workspaces.
    ///
    /// Stops at the first failed move; moves already made are kept.
    pub fn rearrange(&self) -> Result<String, ManagerError> {
        let snapshot = self.snapshot()?;
        let count = snapshot.monitors.len();
        info!(
            "found {} monitors and {} workspaces ({:?} built-in names)",
            count,
            snapshot.workspaces.len(),
            self.mapper.rule()
        );

        let mut moved = 0;
        if let Some(targets) = self.rearrange_targets(&snapshot)? {
            for ws in &snapshot.workspaces {
                let Some(placement) = self.mapper.placement(&ws.name) else {
                    debug!("skipping workspace {}", ws.name);
                    continue;
                };
                let target = targets.monitor_for(placement);
                if ws.monitor_id == target {
                    continue;
                }
                info!("moving workspace {} to monitor {}", ws.name, target);
                self.wm
                    .move_workspace_to_monitor(&ws.name, target)
                    .map_err(wm_error(format!("failed to move workspace {}", ws.name)))?;
                moved += 1;
            }
        }

        for home in self.homes.for_monitor_count(count) {
            if let Err(e) = self.wm.switch_workspace(home) {
                warn!("could not focus home workspace {}: {}", home, e);
            }
        }
        Ok(format!(
            "Moved {} of {} workspaces across {} monitors",
            moved,
            snapshot.workspaces.len(),
            count
        ))
    }

    /// Monitor assignment for the current setup, or `None` when a single
    /// monitor leaves nothing to move.
    fn rearrange_targets(&self, snapshot: &Snapshot) -> Result<Option<Targets>, ManagerError> {
        let roles = self.mapper.roles(&snapshot.monitors);
        match (snapshot.monitors.len(), roles.builtin, roles.externals.as_slice()) {
            (1, _, _) => Ok(None),
            (2, Some(builtin), &[external]) => {
                info!("built-in monitor: {}, external monitor: {}", builtin, external);
                Ok(Some(Targets {
                    builtin,
                    left: external,
                    right: external,
                }))
            }
            (3, Some(builtin), &[left, right]) => {
                info!(
                    "built-in: {}, left external: {}, right external: {}",
                    builtin, left, right
                );
                Ok(Some(Targets {
                    builtin,
                    left,
                    right,
                }))
            }
            (2, _, _) => Err(ManagerError::MonitorsNotIdentified(
                "a built-in and an external monitor".into(),
            )),
            (3, _, _) => Err(ManagerError::MonitorsNotIdentified(
                "a built-in and two external monitors".into(),
            )),
            (count, _, _) => Err(ManagerError::UnsupportedMonitorCount(count)),
        }
    }

    //  Switch / move

    /// Resolve `number` to a workspace on the monitor under the cursor.
    ///
    /// Validation happens before anything is sent to the window manager.
    fn resolve(&self, number: i32) -> Result<(String, u32), ManagerError> {
        let num =
            WorkspaceNumber::new(number).ok_or(ManagerError::InvalidWorkspaceNumber(number))?;
        let snapshot = self.snapshot()?;
        let mouse_monitor = self.mouse_monitor()?;

        if snapshot.monitors.len() > MAX_MONITORS {
            return Err(ManagerError::UnsupportedMonitorCount(snapshot.monitors.len()));
        }

        let target = self.mapper.map(num, mouse_monitor, &snapshot.monitors);
        if !snapshot.contains(&target) {
            return Err(ManagerError::UnknownWorkspace(target));
        }
        Ok((target, mouse_monitor))
    }

    /// Switch to workspace `number` on the monitor under the cursor.
    pub fn switch_workspace(&self, number: i32) -> Result<String, ManagerError> {
        let (target, monitor) = self.resolve(number)?;
        self.wm
            .switch_workspace(&target)
            .map_err(wm_error(format!("failed to switch to workspace {}", target)))?;
        Ok(format!("Switched to workspace {} on monitor {}", target, monitor))
    }

    /// Move the focused window to workspace `number` on the monitor under
    /// the cursor.  Focus stays on the current workspace.
    pub fn move_window(&self, number: i32) -> Result<String, ManagerError> {
        let (target, monitor) = self.resolve(number)?;
        self.wm
            .move_window_to_workspace(&target, false)
            .map_err(wm_error(format!("failed to move window to workspace {}", target)))?;
        Ok(format!(
            "Moved focused window to workspace {} on monitor {}",
            target, monitor
        ))
    }

    /// Move the focused window to whatever workspace is showing on the
    /// monitor under the cursor.
    pub fn move_window_to_visible(&self) -> Result<String, ManagerError> {
        let snapshot = self.snapshot()?;
        let monitor = self.mouse_monitor()?;
        let target = snapshot
            .visible_on(monitor)
            .map(|ws| ws.name.clone())
            .ok_or(ManagerError::NoVisibleWorkspace(monitor))?;
        self.wm
            .move_window_to_workspace(&target, false)
            .map_err(wm_error(format!("failed to move window to workspace {}", target)))?;
        Ok(format!(
            "Moved focused window to visible workspace {} on monitor {}",
            target, monitor
        ))
    }
}
