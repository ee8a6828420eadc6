pub mod comment_store;
pub mod user_session_store;

pub use comment_store::*;
pub use user_session_store::*;

/// Result of an ownership-checked mutation.
///
/// A requester that does not own the document gets `Forbidden`, an unknown
/// identifier gets `NotFound`; neither touches the stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    NotFound,
    Forbidden,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == MutationOutcome::Applied
    }
}
