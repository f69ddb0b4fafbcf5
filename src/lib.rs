//! **aeromanager** — monitor-aware workspace management for AeroSpace.
//!
//! Workspaces follow a fixed naming scheme: single letters (`A`, `B`, …)
//! live on the built-in display, `L1`–`L5` on the left external monitor and
//! `R1`–`R5` on the right one.  A number key `1`–`0` is translated into one
//! of those names depending on how many monitors are attached and which one
//! the mouse cursor is on.
//!
//! # Architecture
//!
//! * [`traits::WindowManager`] — abstracts the queries and commands we send
//!   to the window manager so the executors can be tested without a running
//!   AeroSpace instance.
//! * [`mapping`] — the pure number-to-workspace-name lookup.
//! * [`manager::WorkspaceManager`] — the rearrange / switch / move executors.
//!
//! The concrete backend lives in [`aerospace`] and shells out to the
//! `aerospace` CLI.

pub mod aerospace;
pub mod command;
pub mod config;
pub mod manager;
pub mod mapping;
pub mod traits;
