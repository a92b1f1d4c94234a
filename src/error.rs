//! Error types for invalid transducers and misused algorithms.

/// Top-level errors raised by this crate.
///
/// `Invariant` covers malformed values passed to (or produced during)
/// construction; `Precondition` covers algorithms invoked on values that
/// don't meet their documented preconditions (e.g. isomorphism on a
/// non-trim transducer). Neither variant is used for ordinary "no result"
/// outcomes such as a diverging `traverse` — those are `Option::None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FreeBandError {
    /// A transducer value violates one of the invariants of §3 (I1-I4).
    #[error("invariant violation: {0}")]
    Invariant(String),
    /// An algorithm's documented precondition does not hold for its input.
    #[error("precondition violation: {0}")]
    Precondition(String),
}

impl FreeBandError {
    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::Invariant(msg.into())
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }
}
