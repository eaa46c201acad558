//! Common traits.

/// Since [`crate::protocol`] entities are immutable by design (they represent compiled XML
/// definitions), we use the
/// [builder](https://rust-unofficial.github.io/patterns/patterns/creational/builder.html)
/// pattern instead of a constructor.
pub trait Builder {
    /// Entity which is subject to the `builder` pattern.
    type Buildable: Buildable;

    /// Creates an instance of the buildable entity.
    fn build(&self) -> Self::Buildable;
}

/// Subject of the `builder` pattern.
///
/// See: [`Builder`].
pub trait Buildable {
    /// Builder for this entity.
    type Builder: Builder;

    /// Instantiates a builder initialised with current values.
    fn to_builder(&self) -> Self::Builder;
}
