//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are domain objects that are **immutable** and **compared by value**.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (`Money::from_minor(500)` equals any other 5.00)
/// - **Entity**: Has identity (two members named "Sam" are still different members)
///
/// To "modify" a value object, create a new one: `Money::checked_add` returns a
/// fresh amount instead of mutating the receiver.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
