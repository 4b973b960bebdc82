use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use crate::{Error, State};

/// Owned clones of the snapshot-able states, taken when a command is flushed.
///
/// Commands run off the UI thread, so they never see `StateCtx` itself.
#[derive(Default)]
pub struct CommandSnapshot {
    states: BTreeMap<TypeId, Box<dyn Any + Send>>,
}

impl CommandSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, id: TypeId, value: Box<dyn Any + Send>) {
        self.states.insert(id, value);
    }

    pub fn state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
            .ok_or(Error::SnapshotMissing {
                name: type_name::<T>(),
            })
    }
}
