//! Piece registry and candidate queries.
//!
//! The `PieceRegistry` stores piece definitions and answers the questions
//! a decision layer asks when building a prompt: "which healing pieces
//! cost at most 3?", "which attacks are not magic?".
//!
//! The standard catalogue is built once and shared read-only for the
//! life of the process.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use super::catalogue::standard_pieces;
use super::definition::{Piece, PieceCategory, Rarity};

static STANDARD: Lazy<PieceRegistry> = Lazy::new(|| {
    let mut registry = PieceRegistry::new();
    for piece in standard_pieces() {
        registry.register(piece);
    }
    registry
});

/// Registry of piece definitions.
///
/// ## Example
///
/// ```
/// use rpg_kernel::pieces::{PieceCategory, PieceQuery, PieceRegistry};
///
/// let registry = PieceRegistry::standard();
/// let fireball = registry.get("fireball").unwrap();
/// assert_eq!(fireball.cost, 5);
///
/// let cheap_heals = registry.query(
///     &PieceQuery::new().category(PieceCategory::Healing).max_cost(3),
/// );
/// assert!(cheap_heals.iter().all(|p| p.cost <= 3));
/// ```
#[derive(Clone, Debug, Default)]
pub struct PieceRegistry {
    pieces: Vec<Piece>,
    index: FxHashMap<&'static str, usize>,
}

impl PieceRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in catalogue.
    #[must_use]
    pub fn standard() -> &'static PieceRegistry {
        &STANDARD
    }

    /// Register a piece.
    ///
    /// Panics if a piece with the same id already exists.
    pub fn register(&mut self, piece: Piece) {
        if self.index.contains_key(piece.id) {
            panic!("Piece with id {:?} already registered", piece.id);
        }
        self.index.insert(piece.id, self.pieces.len());
        self.pieces.push(piece);
    }

    /// Get a piece by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Piece> {
        self.index.get(id).map(|&i| &self.pieces[i])
    }

    /// Check if a piece id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get the number of registered pieces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Iterate over all pieces in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter()
    }

    /// Find pieces matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Piece>
    where
        F: Fn(&Piece) -> bool,
    {
        self.pieces.iter().filter(move |p| predicate(p))
    }

    /// Pieces matching a query, in registration order.
    #[must_use]
    pub fn query(&self, query: &PieceQuery) -> Vec<&Piece> {
        self.find(|p| query.matches(p)).collect()
    }
}

/// Filter for candidate pieces. Unset fields match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceQuery {
    pub category: Option<PieceCategory>,
    pub rarity: Option<Rarity>,
    /// Every listed tag must be present.
    pub include_tags: Vec<String>,
    /// No listed tag may be present.
    pub exclude_tags: Vec<String>,
    pub min_cost: Option<u32>,
    pub max_cost: Option<u32>,
}

impl PieceQuery {
    /// A query matching every piece.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: PieceCategory) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.include_tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn without_tag(mut self, tag: impl Into<String>) -> Self {
        self.exclude_tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn min_cost(mut self, cost: u32) -> Self {
        self.min_cost = Some(cost);
        self
    }

    #[must_use]
    pub fn max_cost(mut self, cost: u32) -> Self {
        self.max_cost = Some(cost);
        self
    }

    /// Does a piece satisfy every set criterion?
    #[must_use]
    pub fn matches(&self, piece: &Piece) -> bool {
        self.category.map_or(true, |c| piece.category == c)
            && self.rarity.map_or(true, |r| piece.rarity == r)
            && self.min_cost.map_or(true, |min| piece.cost >= min)
            && self.max_cost.map_or(true, |max| piece.cost <= max)
            && self.include_tags.iter().all(|t| piece.has_tag(t))
            && !self.exclude_tags.iter().any(|t| piece.has_tag(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Target;
    use crate::effects::Effect;

    #[test]
    fn test_register_and_get() {
        let mut registry = PieceRegistry::new();
        registry.register(
            Piece::new("jab", "Jab", PieceCategory::Attack, 1)
                .with_effect(Effect::damage(Target::Enemy, 2)),
        );

        assert_eq!(registry.get("jab").unwrap().name, "Jab");
        assert!(registry.get("hook").is_none());
        assert!(registry.contains("jab"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_id_panics() {
        let mut registry = PieceRegistry::new();
        registry.register(Piece::new("jab", "Jab", PieceCategory::Attack, 1));
        registry.register(Piece::new("jab", "Other Jab", PieceCategory::Attack, 2));
    }

    #[test]
    fn test_standard_catalogue_is_shared() {
        let a = PieceRegistry::standard();
        let b = PieceRegistry::standard();
        assert!(std::ptr::eq(a, b));
        assert!(!a.is_empty());
    }

    #[test]
    fn test_standard_costs() {
        let registry = PieceRegistry::standard();
        assert_eq!(registry.get("basic_strike").unwrap().cost, 2);
        assert_eq!(registry.get("fireball").unwrap().cost, 5);
    }

    #[test]
    fn test_every_standard_piece_has_effects() {
        for piece in PieceRegistry::standard().iter() {
            assert!(!piece.effects.is_empty(), "{} has no effects", piece.id);
            assert!(!piece.narration_hint.is_empty(), "{} has no hint", piece.id);
            for effect in &piece.effects {
                assert_eq!(effect.source(), piece.id);
            }
        }
    }

    #[test]
    fn test_query_by_category_and_cost() {
        let registry = PieceRegistry::standard();
        let heals = registry.query(&PieceQuery::new().category(PieceCategory::Healing).max_cost(3));

        let ids: Vec<_> = heals.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["minor_heal", "second_wind"]);
    }

    #[test]
    fn test_query_tags() {
        let registry = PieceRegistry::standard();

        let traps = registry.query(&PieceQuery::new().with_tag("trap").without_tag("poison"));
        assert!(!traps.is_empty());
        assert!(traps.iter().all(|p| p.has_tag("trap") && !p.has_tag("poison")));

        let magic_fire = registry.query(&PieceQuery::new().with_tag("magic").with_tag("fire"));
        assert_eq!(magic_fire.len(), 1);
        assert_eq!(magic_fire[0].id, "fireball");
    }

    #[test]
    fn test_query_rarity_and_min_cost() {
        let registry = PieceRegistry::standard();
        let legendary = registry.query(&PieceQuery::new().rarity(Rarity::Legendary));
        assert!(legendary.iter().all(|p| p.rarity == Rarity::Legendary));

        let pricey = registry.query(&PieceQuery::new().min_cost(6));
        assert!(pricey.iter().all(|p| p.cost >= 6));
        assert!(!pricey.is_empty());
    }

    #[test]
    fn test_empty_query_matches_all() {
        let registry = PieceRegistry::standard();
        assert_eq!(registry.query(&PieceQuery::new()).len(), registry.len());
    }
}
