use std::any::{Any, TypeId, type_name};

use flume::Sender;
use log::debug;

use crate::{Compute, TaskId};

/// A pending replacement for a compute, drained by `StateCtx::sync_computes`.
pub(crate) struct Update {
    pub(crate) target: TypeId,
    pub(crate) origin: Option<TaskId>,
    pub(crate) value: Box<dyn Any + Send>,
}

/// Publishes new compute values back to the owning `StateCtx`.
///
/// Cheap to clone and `Send`, so it can be moved into async work.
#[derive(Clone)]
pub struct Updater {
    send: Sender<Update>,
}

impl Updater {
    pub(crate) fn new(send: Sender<Update>) -> Self {
        Self { send }
    }

    pub fn set<T: Compute + Send>(&self, value: T) {
        self.push(None, value);
    }

    fn push<T: Compute + Send>(&self, origin: Option<TaskId>, value: T) {
        let update = Update {
            target: TypeId::of::<T>(),
            origin,
            value: Box::new(value),
        };
        if self.send.send(update).is_err() {
            debug!("StateCtx is gone, dropped update for {}", type_name::<T>());
        }
    }
}

/// Updater bound to one command task.
///
/// Once a newer task of the same command type is spawned, everything this
/// updater publishes is discarded during sync.
#[derive(Clone)]
pub struct LatestOnlyUpdater {
    inner: Updater,
    task: TaskId,
}

impl LatestOnlyUpdater {
    pub(crate) fn new(inner: Updater, task: TaskId) -> Self {
        Self { inner, task }
    }

    pub fn set<T: Compute + Send>(&self, value: T) {
        self.inner.push(Some(self.task), value);
    }

    pub fn task_id(&self) -> TaskId {
        self.task
    }
}
