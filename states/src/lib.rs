//! Reactive state runtime.
//!
//! [`State`]s are plain values owned by [`StateCtx`]. [`Compute`]s derive from
//! states (or are fed by commands) and are re-run when a dependency changes.
//! [`Command`]s are async side effects, run only when dispatched, that report
//! back through an updater.

mod command;
mod compute;
mod ctx;
mod error;
mod snapshot;
mod state;
mod task;
mod time;
mod updater;

pub use command::{Command, CommandFuture};
pub use compute::{Compute, ComputeDeps, Dep, assign_impl};
pub use ctx::{StateCtx, SyncStatus};
pub use error::Error;
pub use snapshot::CommandSnapshot;
pub use state::State;
pub use task::{TaskHandle, TaskId};
pub use time::Time;
pub use updater::{LatestOnlyUpdater, Updater};

/// Re-exported so commands can name the token they are handed.
pub use tokio_util::sync::CancellationToken;
