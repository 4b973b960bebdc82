use std::any::{TypeId, type_name};
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use flume::{Receiver, Sender};
use log::{debug, error, warn};
use tokio_util::sync::CancellationToken;

use crate::command::CommandFuture;
use crate::updater::Update;
use crate::{
    Command, CommandSnapshot, Compute, ComputeDeps, Dep, Error, LatestOnlyUpdater, State,
    TaskHandle, TaskId, Updater,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    /// Recorded but never computed.
    #[default]
    BeforeInit,
    /// A dependency changed since the last run.
    Dirty,
    Clean,
}

pub(crate) struct ComputeSlot {
    pub(crate) compute: Box<dyn Compute>,
    pub(crate) deps: ComputeDeps,
    pub(crate) status: SyncStatus,
}

/// Owner of every state, compute and command of the app.
///
/// Lives on the UI thread. A frame typically looks like:
///
/// ```ignore
/// ctx.sync_computes();   // apply what commands published
/// render(&mut ctx);      // read states/computes, update states, dispatch commands
/// ctx.flush_commands();  // spawn dispatched commands
/// ctx.run_computed();    // refresh dirty derived values
/// ```
pub struct StateCtx {
    states: BTreeMap<TypeId, Box<dyn State>>,
    computes: BTreeMap<TypeId, ComputeSlot>,
    // computes run in registration order
    compute_order: Vec<TypeId>,
    commands: BTreeMap<TypeId, Arc<dyn Command>>,
    command_queue: VecDeque<(TypeId, &'static str)>,
    latest_tasks: BTreeMap<TypeId, TaskHandle>,
    generation: u64,
    send: Sender<Update>,
    recv: Receiver<Update>,
    #[cfg(not(target_arch = "wasm32"))]
    tasks: tokio::task::JoinSet<()>,
}

impl Default for StateCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StateCtx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCtx")
            .field("states", &self.states.len())
            .field("computes", &self.compute_order.len())
            .field("commands", &self.commands.len())
            .field("queued", &self.command_queue.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl StateCtx {
    pub fn new() -> Self {
        let (send, recv) = flume::unbounded();
        Self {
            states: BTreeMap::new(),
            computes: BTreeMap::new(),
            compute_order: Vec::new(),
            commands: BTreeMap::new(),
            command_queue: VecDeque::new(),
            latest_tasks: BTreeMap::new(),
            generation: 0,
            send,
            recv,
            #[cfg(not(target_arch = "wasm32"))]
            tasks: tokio::task::JoinSet::new(),
        }
    }

    pub fn add_state<T: State>(&mut self, state: T) {
        let id = TypeId::of::<T>();
        if self.states.insert(id, Box::new(state)).is_some() {
            debug!("Replaced state {}", type_name::<T>());
        }
        self.mark_dependents_dirty(&id);
    }

    pub fn record_compute<T: Compute>(&mut self, compute: T) {
        let id = TypeId::of::<T>();
        let slot = ComputeSlot {
            deps: compute.deps(),
            compute: Box::new(compute),
            status: SyncStatus::BeforeInit,
        };
        if self.computes.insert(id, slot).is_none() {
            self.compute_order.push(id);
        }
    }

    pub fn record_command<T: Command>(&mut self, command: T) {
        self.commands.insert(TypeId::of::<T>(), Arc::new(command));
    }

    pub fn try_state<T: State>(&self) -> Result<&T, Error> {
        self.states
            .get(&TypeId::of::<T>())
            .and_then(|state| state.as_any().downcast_ref::<T>())
            .ok_or(Error::StateNotFound {
                name: type_name::<T>(),
            })
    }

    /// # Panics
    /// Panics if `T` was never added with [`StateCtx::add_state`].
    pub fn state<T: State>(&self) -> &T {
        match self.try_state::<T>() {
            Ok(state) => state,
            Err(err) => panic!("{err}"),
        }
    }

    /// Mutable access; computes depending on `T` are marked dirty up front.
    ///
    /// # Panics
    /// Panics if `T` was never added with [`StateCtx::add_state`].
    pub fn state_mut<T: State>(&mut self) -> &mut T {
        let id = TypeId::of::<T>();
        self.mark_dependents_dirty(&id);
        match self
            .states
            .get_mut(&id)
            .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        {
            Some(state) => state,
            None => panic!(
                "{}",
                Error::StateNotFound {
                    name: type_name::<T>()
                }
            ),
        }
    }

    pub fn update<T: State>(&mut self, f: impl FnOnce(&mut T)) {
        f(self.state_mut::<T>());
    }

    pub fn cached<T: Compute>(&self) -> Option<&T> {
        self.computes
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.compute.as_any().downcast_ref::<T>())
    }

    pub fn status_of<T: Compute>(&self) -> Option<SyncStatus> {
        self.computes
            .get(&TypeId::of::<T>())
            .map(|slot| slot.status)
    }

    pub fn updater(&self) -> Updater {
        Updater::new(self.send.clone())
    }

    pub fn mark_dirty(&mut self, id: &TypeId) {
        if let Some(slot) = self.computes.get_mut(id) {
            slot.status = SyncStatus::Dirty;
        }
    }

    pub fn mark_clean(&mut self, id: &TypeId) {
        if let Some(slot) = self.computes.get_mut(id) {
            slot.status = SyncStatus::Clean;
        }
    }

    fn mark_dependents_dirty(&mut self, changed: &TypeId) {
        for slot in self.computes.values_mut() {
            if slot.status == SyncStatus::Clean && slot.deps.depends_on(changed) {
                slot.status = SyncStatus::Dirty;
            }
        }
    }

    /// Applies every update published since the last call.
    ///
    /// Updates coming from a superseded command task are dropped. Returns the
    /// number of computes that were replaced.
    pub fn sync_computes(&mut self) -> usize {
        #[cfg(not(target_arch = "wasm32"))]
        self.reap_finished_tasks();

        let mut applied = 0;
        while let Ok(update) = self.recv.try_recv() {
            if let Some(origin) = update.origin
                && !self.is_latest(origin)
            {
                debug!(
                    "Dropped stale update from task generation {}",
                    origin.generation()
                );
                continue;
            }
            let Some(slot) = self.computes.get_mut(&update.target) else {
                warn!("Dropped update for a compute that was never recorded");
                continue;
            };
            slot.compute.assign_box(update.value);
            slot.status = SyncStatus::Clean;
            applied += 1;
            self.mark_dependents_dirty(&update.target);
        }
        applied
    }

    fn is_latest(&self, task: TaskId) -> bool {
        self.latest_tasks
            .get(&task.type_id())
            .is_some_and(|handle| handle.id() == task)
    }

    /// Re-runs every compute that is dirty or was never computed.
    pub fn run_computed(&mut self) {
        let order = self.compute_order.clone();
        for id in order {
            let needs_run = self
                .computes
                .get(&id)
                .is_some_and(|slot| slot.status != SyncStatus::Clean);
            if !needs_run {
                continue;
            }
            let updater = self.updater();
            if let Some(slot) = self.computes.get(&id) {
                slot.compute
                    .compute(Dep::new(&self.states, &self.computes), updater);
            }
            self.mark_clean(&id);
            // later computes in the order may read what this one published
            self.sync_computes();
        }
    }

    /// Queues a command; nothing runs until [`StateCtx::flush_commands`].
    pub fn dispatch<T: Command>(&mut self) {
        debug!("Dispatch {}", type_name::<T>());
        self.command_queue
            .push_back((TypeId::of::<T>(), type_name::<T>()));
    }

    pub fn queued_commands(&self) -> usize {
        self.command_queue.len()
    }

    /// Spawns every queued command and returns how many were spawned.
    ///
    /// A command type that is still running from an earlier flush gets its
    /// previous task cancelled.
    pub fn flush_commands(&mut self) -> usize {
        let mut spawned = 0;
        while let Some((id, name)) = self.command_queue.pop_front() {
            let Some(command) = self.commands.get(&id).cloned() else {
                error!("{}", Error::CommandNotFound { name });
                continue;
            };

            self.generation += 1;
            let task = TaskId::new(id, self.generation);
            let handle = TaskHandle::new(task, CancellationToken::new());
            if let Some(previous) = self.latest_tasks.insert(id, handle.clone()) {
                debug!(
                    "Cancelling {name} generation {} in favour of {}",
                    previous.id().generation(),
                    task.generation()
                );
                previous.cancel();
            }

            let future = command.run(
                self.snapshot(),
                LatestOnlyUpdater::new(self.updater(), task),
                handle.cancellation_token(),
            );
            self.spawn(future);
            spawned += 1;
        }
        spawned
    }

    fn snapshot(&self) -> CommandSnapshot {
        let mut snap = CommandSnapshot::new();
        for (id, state) in &self.states {
            if let Some(value) = state.snapshot() {
                snap.insert(*id, value);
            }
        }
        snap
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn spawn(&mut self, future: CommandFuture) {
        self.tasks.spawn(future);
    }

    #[cfg(target_arch = "wasm32")]
    fn spawn(&mut self, future: CommandFuture) {
        wasm_bindgen_futures::spawn_local(future);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn reap_finished_tasks(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            if let Err(err) = result {
                error!("Command task failed: {err}");
            }
        }
    }

    /// Number of spawned command tasks not yet joined.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Waits for one command task; `false` when none are left.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn await_next_task(&mut self) -> bool {
        match self.tasks.join_next().await {
            Some(Ok(())) => true,
            Some(Err(err)) => {
                error!("Command task failed: {err}");
                true
            }
            None => false,
        }
    }

    /// Flushes queued commands, waits for all tasks and applies their results.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn settle(&mut self) {
        self.sync_computes();
        self.flush_commands();
        while self.await_next_task().await {
            self.sync_computes();
        }
        self.sync_computes();
        self.run_computed();
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::assign_impl;

    #[derive(Debug, Default, Clone, Copy)]
    struct Counter(i32);

    impl State for Counter {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
            Some(Box::new(*self))
        }
    }

    #[derive(Debug, Default)]
    struct Doubled {
        value: i32,
        runs: u32,
    }

    impl Compute for Doubled {
        fn deps(&self) -> ComputeDeps {
            ComputeDeps::none().state::<Counter>()
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            let counter = deps.state::<Counter>().map_or(0, |c| c.0);
            updater.set(Self {
                value: counter * 2,
                runs: self.runs + 1,
            });
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default)]
    struct PlusOne(i32);

    impl Compute for PlusOne {
        fn deps(&self) -> ComputeDeps {
            ComputeDeps::none().compute::<Doubled>()
        }

        fn compute(&self, deps: Dep<'_>, updater: Updater) {
            let doubled = deps.compute::<Doubled>().map_or(0, |d| d.value);
            updater.set(Self(doubled + 1));
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    #[derive(Debug, Default)]
    struct Echo {
        value: i32,
        generation: u64,
    }

    impl Compute for Echo {
        fn deps(&self) -> ComputeDeps {
            ComputeDeps::none()
        }

        fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
            assign_impl(self, new_self);
        }
    }

    struct EchoCommand;

    impl Command for EchoCommand {
        fn run(
            &self,
            snap: CommandSnapshot,
            updater: LatestOnlyUpdater,
            _cancel: CancellationToken,
        ) -> CommandFuture {
            let value = snap.state::<Counter>().map_or(-1, |c| c.0);
            Box::pin(async move {
                updater.set(Echo {
                    value,
                    generation: updater.task_id().generation(),
                });
            })
        }
    }

    fn ctx_with_counter(start: i32) -> StateCtx {
        let mut ctx = StateCtx::new();
        ctx.add_state(Counter(start));
        ctx.record_compute(Doubled::default());
        ctx.record_compute(PlusOne::default());
        ctx
    }

    #[test]
    fn computes_run_once_before_init() {
        let mut ctx = ctx_with_counter(4);
        assert_eq!(ctx.status_of::<Doubled>(), Some(SyncStatus::BeforeInit));

        ctx.run_computed();

        assert_eq!(ctx.cached::<Doubled>().map(|d| d.value), Some(8));
        assert_eq!(ctx.cached::<PlusOne>().map(|p| p.0), Some(9));
        assert_eq!(ctx.status_of::<Doubled>(), Some(SyncStatus::Clean));

        ctx.run_computed();
        assert_eq!(ctx.cached::<Doubled>().map(|d| d.runs), Some(1));
    }

    #[test]
    fn updating_a_state_recomputes_dependents_transitively() {
        let mut ctx = ctx_with_counter(1);
        ctx.run_computed();

        ctx.update::<Counter>(|c| c.0 = 10);
        assert_eq!(ctx.status_of::<Doubled>(), Some(SyncStatus::Dirty));

        ctx.run_computed();
        assert_eq!(ctx.cached::<Doubled>().map(|d| d.value), Some(20));
        assert_eq!(ctx.cached::<PlusOne>().map(|p| p.0), Some(21));
        assert_eq!(ctx.cached::<Doubled>().map(|d| d.runs), Some(2));
    }

    #[test]
    fn plain_updater_applies_on_sync() {
        let mut ctx = ctx_with_counter(0);
        ctx.record_compute(Echo::default());

        ctx.updater().set(Echo {
            value: 5,
            generation: 0,
        });
        assert_eq!(ctx.cached::<Echo>().map(|e| e.value), Some(0));

        assert_eq!(ctx.sync_computes(), 1);
        assert_eq!(ctx.cached::<Echo>().map(|e| e.value), Some(5));
    }

    #[test]
    fn missing_state_is_reported_by_name() {
        let ctx = StateCtx::new();
        let err = ctx.try_state::<Counter>().err();

        assert!(matches!(err, Some(Error::StateNotFound { .. })));
        assert!(
            err.map(|e| e.to_string())
                .unwrap_or_default()
                .contains("Counter")
        );
        assert!(ctx.cached::<Doubled>().is_none());
    }

    #[tokio::test]
    async fn command_reads_snapshot_and_publishes() {
        let mut ctx = ctx_with_counter(3);
        ctx.record_compute(Echo::default());
        ctx.record_command(EchoCommand);

        ctx.dispatch::<EchoCommand>();
        assert_eq!(ctx.queued_commands(), 1);
        ctx.settle().await;

        assert_eq!(ctx.queued_commands(), 0);
        assert_eq!(ctx.task_count(), 0);
        assert_eq!(ctx.cached::<Echo>().map(|e| e.value), Some(3));
    }

    #[tokio::test]
    async fn superseded_command_results_are_dropped() {
        let mut ctx = ctx_with_counter(1);
        ctx.record_compute(Echo::default());
        ctx.record_command(EchoCommand);

        ctx.dispatch::<EchoCommand>();
        ctx.dispatch::<EchoCommand>();
        ctx.settle().await;

        assert_eq!(ctx.cached::<Echo>().map(|e| e.generation), Some(2));
    }

    #[tokio::test]
    async fn unregistered_command_is_skipped() {
        let mut ctx = ctx_with_counter(1);
        ctx.dispatch::<EchoCommand>();
        ctx.settle().await;

        assert_eq!(ctx.task_count(), 0);
        assert_eq!(ctx.queued_commands(), 0);
    }
}
