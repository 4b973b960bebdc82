use std::any::{Any, TypeId, type_name};
use std::collections::BTreeMap;

use log::warn;

use crate::ctx::ComputeSlot;
use crate::{State, Updater};

/// The states and computes a [`Compute`] reads.
///
/// Whenever one of them changes the compute is marked dirty and re-runs on
/// the next `StateCtx::run_computed`.
#[derive(Debug, Clone, Default)]
pub struct ComputeDeps {
    states: Vec<TypeId>,
    computes: Vec<TypeId>,
}

impl ComputeDeps {
    /// No dependencies: the compute is a cache written by commands.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn state<T: State>(mut self) -> Self {
        self.states.push(TypeId::of::<T>());
        self
    }

    pub fn compute<T: Compute>(mut self) -> Self {
        self.computes.push(TypeId::of::<T>());
        self
    }

    pub fn depends_on(&self, id: &TypeId) -> bool {
        self.states.contains(id) || self.computes.contains(id)
    }
}

/// Derived (or command-fed) value cached inside [`StateCtx`](crate::StateCtx).
///
/// `compute` must stay free of side effects: it can run implicitly at
/// startup and after any dependency changes. Network IO belongs in a
/// [`Command`](crate::Command) that publishes into a compute via its updater.
pub trait Compute: Any {
    fn deps(&self) -> ComputeDeps;

    fn compute(&self, deps: Dep<'_>, updater: Updater);

    fn as_any(&self) -> &dyn Any;

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>);
}

/// Replaces `target` with the boxed value when the types line up.
pub fn assign_impl<T: Compute>(target: &mut T, new_self: Box<dyn Any + Send>) {
    match new_self.downcast::<T>() {
        Ok(value) => *target = *value,
        Err(_) => warn!("Dropped update of mismatched type for {}", type_name::<T>()),
    }
}

/// Read-only view over the registered states and computes, handed to
/// [`Compute::compute`].
pub struct Dep<'a> {
    states: &'a BTreeMap<TypeId, Box<dyn State>>,
    computes: &'a BTreeMap<TypeId, ComputeSlot>,
}

impl<'a> Dep<'a> {
    pub(crate) fn new(
        states: &'a BTreeMap<TypeId, Box<dyn State>>,
        computes: &'a BTreeMap<TypeId, ComputeSlot>,
    ) -> Self {
        Self { states, computes }
    }

    pub fn state<T: State>(&self) -> Option<&'a T> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
    }

    pub fn compute<T: Compute>(&self) -> Option<&'a T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.compute.as_any().downcast_ref::<T>())
    }
}
