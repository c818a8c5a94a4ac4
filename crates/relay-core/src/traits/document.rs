//! Trait for entities kept in a document collection.

/// An entity stored in its own collection and addressed by a typed id.
///
/// The id type converts to and from the raw `i64` sequence value so that a
/// single generic collection can serve every entity.
pub trait Document: Clone + Send + Sync + 'static {
    /// Typed identifier of this entity.
    type Id: Copy + Eq + Send + Sync + Into<i64> + From<i64> + 'static;

    /// Returns the identifier of this document.
    fn id(&self) -> Self::Id;
}
