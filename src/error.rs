use thiserror::Error;

/// Convenience alias for results returned by the collections in this crate.
pub type Result<T> = std::result::Result<T, AvlError>;

/// Failures reported by [`AvlSet`](crate::avl_tree::AvlSet).
///
/// Every failure leaves the set exactly as it was before the call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvlError {
    /// An element comparing equal to the inserted value is already stored.
    #[error("an equal element is already present in the tree")]
    DuplicateKey,
    /// No stored element compares equal to the requested value.
    #[error("no equal element is present in the tree")]
    NotFound,
    /// The destination offset lies past the end of the destination buffer.
    #[error("offset {offset} is out of range for a buffer of length {len}")]
    OutOfRange { offset: usize, len: usize },
    /// The destination buffer cannot hold every element from the given offset.
    #[error("buffer has room for {available} elements but {required} are needed")]
    InsufficientCapacity { required: usize, available: usize },
}
