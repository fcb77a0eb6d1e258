//! Records that are told apart by id rather than by content.

/// A record with a stable, strongly-typed id.
///
/// Members, expenses and settlements are entities: two expenses with equal
/// amounts and splits are still two expenses. Pipelines deduplicate on
/// [`Entity::id`], never on field equality.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
