//! Engine error types.

use thiserror::Error;

use crate::container::ContainerId;

/// API misuse errors surfaced by the engine.
///
/// Internal failure modes (degenerate layouts, reconciliation desync,
/// failing hooks) never raise; they degrade to "no visual update this tick".
#[derive(Debug, Error)]
pub enum SortError {
    #[error("unknown container {0}")]
    UnknownContainer(ContainerId),

    #[error("item is not a member of this container")]
    UnknownItem,

    #[error("a drag session is already active")]
    SessionActive,
}
