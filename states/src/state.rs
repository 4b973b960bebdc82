use std::any::Any;

/// A value owned by [`StateCtx`](crate::StateCtx).
///
/// States are written on the UI thread only: directly through
/// `StateCtx::update` / `StateCtx::state_mut`, never through an updater.
/// A state that commands need to read must return a clone from
/// [`State::snapshot`].
pub trait State: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Clone handed to commands when they are flushed.
    ///
    /// States returning `None` are invisible to commands.
    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        None
    }
}
