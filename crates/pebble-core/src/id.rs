//! Strongly-typed identifiers and the [`MaterialWeights`] map.

use indexmap::IndexMap;
use std::fmt;

/// Identifies a pebble material (fuel, graphite moderator, poison, ...).
///
/// Material ids are opaque to the packing engine; they are carried through
/// configuration so downstream tooling can assign them to packed pebbles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub u32);

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MaterialId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Fraction of the pebble population assigned to each material.
///
/// Insertion-ordered so that iteration (and any tie-breaking a consumer
/// performs on equal weights) is deterministic.
pub type MaterialWeights = IndexMap<MaterialId, f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn material_id_display_and_from() {
        let id: MaterialId = 7.into();
        assert_eq!(id, MaterialId(7));
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn material_weights_keep_insertion_order() {
        let mut w = MaterialWeights::new();
        w.insert(MaterialId(9), 0.25);
        w.insert(MaterialId(1), 0.75);
        let keys: Vec<_> = w.keys().copied().collect();
        assert_eq!(keys, vec![MaterialId(9), MaterialId(1)]);
    }
}
