use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("State not registered: {name}")]
    StateNotFound {
        name: &'static str,
    },
    #[error("State {name} was not captured in the command snapshot")]
    SnapshotMissing {
        name: &'static str,
    },
    #[error("Command not registered: {name}")]
    CommandNotFound {
        name: &'static str,
    },
}
