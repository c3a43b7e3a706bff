//! Workspace synchronization engine.
//!
//! One [`WorkspaceEngine`] task owns a session for the duration of a
//! workspace visit. Views drive it through a cloneable [`WorkspaceHandle`]
//! and observe it through snapshots and [`WorkspaceEvent`]s.
//!
//! [`WorkspaceEvent`]: artisan_types::workspace::WorkspaceEvent

mod command;
pub mod engine;
pub mod handle;
pub mod session;


pub use engine::WorkspaceEngine;
pub use handle::WorkspaceHandle;
