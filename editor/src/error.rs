use thiserror::Error;
use worldedit_world::EntityKind;

/// Requests the session refuses before building any edit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("cannot insert {kind}: the world already holds the maximum of {max}")]
    CapacityExceeded { kind: EntityKind, max: usize },
    #[error("{kind} #{id} does not exist")]
    EntityNotFound { kind: EntityKind, id: u32 },
    #[error("no entity of the requested kind is being created")]
    NothingStaged,
    #[error("a path needs at least one node before it can be created")]
    EmptyCreationPath,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}

pub type EditorResult<T = ()> = Result<T, EditorError>;
