//! Piece definitions - static, reusable effect bundles.
//!
//! A `Piece` lets a decision layer pick *what kind* of thing happens
//! ("a fireball", "a small purse") without inventing numbers. The numbers
//! live in the piece's effect list; the decision only chooses ids.
//!
//! Pieces never reference each other, and their narration hint is
//! descriptive text for the generator, never executed.

use serde::Serialize;
use smallvec::SmallVec;

use crate::effects::Effect;

/// Broad grouping used to filter candidates for a decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceCategory {
    /// Player strikes at the adversary.
    Attack,
    /// Adversary strikes at the player.
    EnemyAction,
    Defense,
    Healing,
    Reward,
    /// Traps and hazards.
    Hazard,
    /// Shrines, blessings, and curses.
    Blessing,
    /// Combat start and end.
    Encounter,
    Narrative,
}

/// How often a piece should come up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// An immutable catalogue entry.
///
/// ## Example
///
/// ```
/// use rpg_kernel::core::Target;
/// use rpg_kernel::effects::Effect;
/// use rpg_kernel::pieces::{Piece, PieceCategory, Rarity};
///
/// let jab = Piece::new("jab", "Jab", PieceCategory::Attack, 1)
///     .with_rarity(Rarity::Common)
///     .with_tags(["melee", "quick"])
///     .with_effect(Effect::damage(Target::Enemy, 3))
///     .with_hint("A quick jab to keep them honest.");
///
/// assert!(jab.has_tag("melee"));
/// assert_eq!(jab.cost, 1);
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct Piece {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PieceCategory,
    pub rarity: Rarity,
    /// Power-budget units this piece consumes.
    pub cost: u32,
    pub tags: SmallVec<[&'static str; 4]>,
    pub effects: Vec<Effect>,
    /// Prompt-side description. Never executed.
    pub narration_hint: &'static str,
}

impl Piece {
    /// Create a common piece with no effects.
    #[must_use]
    pub fn new(id: &'static str, name: &'static str, category: PieceCategory, cost: u32) -> Self {
        Self {
            id,
            name,
            category,
            rarity: Rarity::Common,
            cost,
            tags: SmallVec::new(),
            effects: Vec::new(),
            narration_hint: "",
        }
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    /// Add tags (builder pattern).
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = &'static str>) -> Self {
        for tag in tags {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    /// Add an effect (builder pattern).
    ///
    /// Effects without a source are stamped with the piece id.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        let effect = if effect.source().is_empty() {
            effect.from_source(self.id)
        } else {
            effect
        };
        self.effects.push(effect);
        self
    }

    /// Set the narration hint (builder pattern).
    #[must_use]
    pub fn with_hint(mut self, hint: &'static str) -> Self {
        self.narration_hint = hint;
        self
    }

    /// Does the piece carry this tag?
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| *t == tag)
    }
}
