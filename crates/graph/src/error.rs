//! Error types produced by the graph crate.
//!
//! Everything here is an *upstream* failure from the point of view of the
//! fingerprint engine: the graph provider handed over something malformed, or
//! an annotation step (ring perception, aromaticity) failed. The engine wraps
//! these errors without rewriting them so callers can see exactly which
//! collaborator broke.
//!
//! | Error | Raised by |
//! |-------|-----------|
//! | [`UnknownAtom`](GraphError::UnknownAtom) | [`MolGraph::add_bond`](crate::MolGraph::add_bond), ring validation |
//! | [`SelfLoop`](GraphError::SelfLoop) | [`MolGraph::add_bond`](crate::MolGraph::add_bond) |
//! | [`DuplicateBond`](GraphError::DuplicateBond) | [`MolGraph::add_bond`](crate::MolGraph::add_bond) |
//! | [`InvalidRing`](GraphError::InvalidRing) | [`MolGraph::set_rings`](crate::MolGraph::set_rings) |
//! | [`MissingRingAnnotation`](GraphError::MissingRingAnnotation) | [`AnnotatedRings`](crate::AnnotatedRings) |
//! | [`RingPerception`](GraphError::RingPerception) | external ring finders |
//! | [`Aromaticity`](GraphError::Aromaticity) | external aromaticity models |
use thiserror::Error;

/// Errors raised while building or annotating a [`MolGraph`](crate::MolGraph).
///
/// ```rust
/// use graph::GraphError;
///
/// let err = GraphError::RingPerception("too many cycles".into());
/// assert_eq!(err.to_string(), "ring perception failed: too many cycles");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// An atom index does not exist in the graph.
    #[error("unknown atom index {index}")]
    UnknownAtom { index: usize },

    /// A bond would connect an atom to itself.
    #[error("bond from atom {index} to itself")]
    SelfLoop { index: usize },

    /// The two atoms are already bonded.
    #[error("atoms {a} and {b} are already bonded")]
    DuplicateBond { a: usize, b: usize },

    /// A ring annotation does not describe a closed cycle of the graph.
    #[error("invalid ring annotation: {0}")]
    InvalidRing(String),

    /// Ring information was requested but the provider never annotated the graph.
    #[error("graph carries no ring annotation")]
    MissingRingAnnotation,

    /// The ring-perception collaborator failed.
    #[error("ring perception failed: {0}")]
    RingPerception(String),

    /// The aromaticity collaborator failed.
    #[error("aromaticity perception failed: {0}")]
    Aromaticity(String),
}
