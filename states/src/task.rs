//! Identity and cancellation for command tasks.
//!
//! Every flush of a command gets a fresh [`TaskId`]: the command's `TypeId`
//! plus a generation taken from a counter owned by `StateCtx`. The newest
//! generation per command type wins; older tasks are cancelled through their
//! [`TaskHandle`] and whatever they still publish is dropped on sync.

use std::any::TypeId;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId {
    type_id: TypeId,
    generation: u64,
}

impl TaskId {
    pub fn new(type_id: TypeId, generation: u64) -> Self {
        Self {
            type_id,
            generation,
        }
    }

    /// The command type that spawned the task.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Higher is newer.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A spawned command task together with its cancellation token.
///
/// Cancellation is cooperative: the command has to observe
/// `CancellationToken::cancelled()` for `cancel` to have any effect.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: TaskId,
    cancel_token: CancellationToken,
}

impl TaskHandle {
    pub fn new(id: TaskId, cancel_token: CancellationToken) -> Self {
        Self { id, cancel_token }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn cancel(&self) {
        self.cancel_token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
