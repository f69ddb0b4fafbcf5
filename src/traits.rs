//! Core trait that decouples aeromanager from the AeroSpace CLI.
//!
//! The [`WorkspaceManager`](crate::manager::WorkspaceManager) only depends on
//! [`WindowManager`]; the concrete backend lives in
//! [`aerospace`](crate::aerospace) and tests use a recording stub.

use crate::command::{Monitor, Snapshot};

/// Abstraction over a window manager that can report its workspaces and
/// move them around.
///
/// Every call is a blocking round trip.  Nothing is cached between calls.
pub trait WindowManager {
    /// The error type produced by this window manager.
    type Error: std::error::Error + Send + 'static;

    /// Return every workspace together with the monitors they live on.
    fn snapshot(&self) -> Result<Snapshot, Self::Error>;

    /// Return every connected monitor, ordered left to right.
    fn monitors(&self) -> Result<Vec<Monitor>, Self::Error>;

    /// Return the id of the monitor under the mouse cursor.
    fn mouse_monitor(&self) -> Result<u32, Self::Error>;

    /// Move `workspace` to the monitor with id `monitor_id`.
    fn move_workspace_to_monitor(&self, workspace: &str, monitor_id: u32)
        -> Result<(), Self::Error>;

    /// Move the focused window to `workspace`.
    ///
    /// When `focus_follows` is false the user stays on the current workspace.
    fn move_window_to_workspace(&self, workspace: &str, focus_follows: bool)
        -> Result<(), Self::Error>;

    /// Show `workspace` on its monitor and focus it.
    fn switch_workspace(&self, workspace: &str) -> Result<(), Self::Error>;
}

#[cfg(test)]
pub(crate) mod mock {
    use super::WindowManager;
    use crate::command::{Monitor, Snapshot};
    use std::cell::RefCell;

    /// One call made against [`RecorderWm`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Snapshot,
        Monitors,
        MouseMonitor,
        MoveWorkspace(String, u32),
        MoveWindow(String, bool),
        Switch(String),
    }

    impl Call {
        /// Whether the call changes window manager state.
        pub fn is_write(&self) -> bool {
            matches!(
                self,
                Call::MoveWorkspace(..) | Call::MoveWindow(..) | Call::Switch(_)
            )
        }
    }

    /// A test double that serves a fixed snapshot and records every call.
    #[derive(Debug, Default)]
    pub struct RecorderWm {
        pub snapshot: Snapshot,
        pub mouse_monitor: u32,
        /// Served by `monitors()`; defaults to the snapshot's monitors.
        pub monitors: Option<Vec<Monitor>>,
        /// Moving or switching to this workspace fails.
        pub failing_workspace: Option<String>,
        pub calls: RefCell<Vec<Call>>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("recorder error: {0}")]
    pub struct RecorderErr(pub String);

    impl RecorderWm {
        pub fn new(snapshot: Snapshot, mouse_monitor: u32) -> Self {
            Self {
                snapshot,
                mouse_monitor,
                ..Self::default()
            }
        }

        pub fn with_monitors(mut self, monitors: Vec<Monitor>) -> Self {
            self.monitors = Some(monitors);
            self
        }

        pub fn failing_on(mut self, workspace: &str) -> Self {
            self.failing_workspace = Some(workspace.into());
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        /// Only the calls that change state.
        pub fn writes(&self) -> Vec<Call> {
            self.calls().into_iter().filter(Call::is_write).collect()
        }

        fn record(&self, call: Call, workspace: &str) -> Result<(), RecorderErr> {
            self.calls.borrow_mut().push(call);
            if self.failing_workspace.as_deref() == Some(workspace) {
                return Err(RecorderErr(format!("cannot touch {}", workspace)));
            }
            Ok(())
        }
    }

    impl WindowManager for RecorderWm {
        type Error = RecorderErr;

        fn snapshot(&self) -> Result<Snapshot, RecorderErr> {
            self.calls.borrow_mut().push(Call::Snapshot);
            Ok(self.snapshot.clone())
        }

        fn monitors(&self) -> Result<Vec<Monitor>, RecorderErr> {
            self.calls.borrow_mut().push(Call::Monitors);
            Ok(self
                .monitors
                .clone()
                .unwrap_or_else(|| self.snapshot.monitors.clone()))
        }

        fn mouse_monitor(&self) -> Result<u32, RecorderErr> {
            self.calls.borrow_mut().push(Call::MouseMonitor);
            Ok(self.mouse_monitor)
        }

        fn move_workspace_to_monitor(&self, ws: &str, monitor_id: u32) -> Result<(), RecorderErr> {
            self.record(Call::MoveWorkspace(ws.into(), monitor_id), ws)
        }

        fn move_window_to_workspace(&self, ws: &str, focus_follows: bool) -> Result<(), RecorderErr> {
            self.record(Call::MoveWindow(ws.into(), focus_follows), ws)
        }

        fn switch_workspace(&self, ws: &str) -> Result<(), RecorderErr> {
            self.record(Call::Switch(ws.into()), ws)
        }
    }
}
