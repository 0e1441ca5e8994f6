//! Game state: the single aggregate every effect reads and rewrites.
//!
//! ## GameState
//!
//! - Player: health, currency, experience, inventory, status effects, stance
//! - Adversary: present only while a combat session is active
//! - Companions: keyed by id, each with health, statuses, and disposition
//!
//! ## Value Semantics
//!
//! The state is a value. Applying an effect clones it and returns the
//! modified copy; the input is never touched. Collections use `im`
//! persistent structures so the clone is O(1) and unchanged parts are
//! shared between the old and new value.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::config::PERMANENT_DURATION;
use super::ids::{CompanionId, ItemId, StatusId};
use super::target::Target;

/// Whether a status effect helps or hinders its bearer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Buff,
    Debuff,
    #[default]
    Neutral,
}

/// A status effect attached to an actor.
///
/// `name` is the stacking identity: an actor carries at most one entry per
/// name. A duration of `-1` means the effect lasts until removed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StatusEffect {
    /// Assigned by the kernel when absent.
    #[serde(default)]
    pub id: Option<StatusId>,

    pub name: String,

    #[serde(default)]
    pub polarity: Polarity,

    /// Remaining turns, or `-1` for "until removed".
    #[serde(default = "permanent")]
    pub duration: i32,

    #[serde(default = "one")]
    pub stacks: u32,

    /// Sparse stat modifiers (e.g. `"attack": 2`).
    #[serde(default)]
    pub modifiers: OrdMap<String, i64>,
}

fn permanent() -> i32 {
    PERMANENT_DURATION
}

fn one() -> u32 {
    1
}

impl StatusEffect {
    /// Create a neutral, single-stack status effect.
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            polarity: Polarity::Neutral,
            duration,
            stacks: 1,
            modifiers: OrdMap::new(),
        }
    }

    /// Set the polarity (builder pattern).
    #[must_use]
    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Add a stat modifier (builder pattern).
    #[must_use]
    pub fn with_modifier(mut self, stat: impl Into<String>, delta: i64) -> Self {
        self.modifiers.insert(stat.into(), delta);
        self
    }

    /// Set an explicit id (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<StatusId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Does this effect last until explicitly removed?
    #[must_use]
    pub fn is_permanent(&self) -> bool {
        self.duration == PERMANENT_DURATION
    }
}

/// Combat posture of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    #[default]
    Balanced,
    Aggressive,
    Defensive,
    Evasive,
}

/// An inventory item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Item {
    /// Assigned by the kernel when absent.
    #[serde(default)]
    pub id: Option<ItemId>,

    pub name: String,

    /// Free-form category (weapon, consumable, key, ...).
    #[serde(default)]
    pub kind: String,

    #[serde(default = "one")]
    pub quantity: u32,
}

impl Item {
    /// Create a single, id-less item.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: kind.into(),
            quantity: 1,
        }
    }

    /// Set an explicit id (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the quantity (builder pattern).
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// The player character.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub health: i64,
    pub max_health: i64,
    pub currency: i64,
    pub experience: i64,
    pub inventory: Vector<Item>,
    pub statuses: Vector<StatusEffect>,
    pub stance: Stance,
}

impl PlayerState {
    /// Create a player at full health with nothing in their pockets.
    #[must_use]
    pub fn new(max_health: i64) -> Self {
        Self {
            health: max_health,
            max_health,
            currency: 0,
            experience: 0,
            inventory: Vector::new(),
            statuses: Vector::new(),
            stance: Stance::default(),
        }
    }

    /// Set current health (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: i64) -> Self {
        self.health = health;
        self
    }

    /// Set currency (builder pattern).
    #[must_use]
    pub fn with_currency(mut self, currency: i64) -> Self {
        self.currency = currency;
        self
    }

    /// Add an item (builder pattern).
    #[must_use]
    pub fn with_item(mut self, item: Item) -> Self {
        self.inventory.push_back(item);
        self
    }

    /// Look up an inventory item by id.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.inventory.iter().find(|i| i.id.as_ref() == Some(id))
    }
}

/// The opponent of the current combat session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Adversary {
    pub id: String,
    pub name: String,
    pub health: i64,
    pub max_health: i64,

    /// Integer attributes (attack, defense, ...). Opaque to the kernel.
    #[serde(default)]
    pub attributes: OrdMap<String, i64>,

    #[serde(default)]
    pub statuses: Vector<StatusEffect>,
}

impl Adversary {
    /// Create an adversary at full health.
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_health: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            health: max_health,
            max_health,
            attributes: OrdMap::new(),
            statuses: Vector::new(),
        }
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: i64) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }
}

/// A companion travelling with the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Companion {
    pub id: CompanionId,
    pub name: String,
    pub health: i64,
    pub max_health: i64,
    pub statuses: Vector<StatusEffect>,
    /// How the companion feels about the player. Positive is warmer.
    pub disposition: i64,
}

impl Companion {
    /// Create a companion at full health with neutral disposition.
    pub fn new(id: impl Into<CompanionId>, name: impl Into<String>, max_health: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            health: max_health,
            max_health,
            statuses: Vector::new(),
            disposition: 0,
        }
    }
}

/// Health pool of an actor, as seen by damage and heal handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vitals {
    pub health: i64,
    pub max_health: i64,
}

/// Compact view of the state recorded before and after each effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDigest {
    pub player_health: i64,
    pub currency: i64,
    pub experience: i64,
    pub inventory_size: usize,
    pub player_statuses: usize,
    pub stance: Stance,
    pub in_combat: bool,
    pub enemy_health: Option<i64>,
}

/// The complete kernel state for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub player: PlayerState,

    /// Present only while `in_combat` is set.
    pub adversary: Option<Adversary>,

    pub in_combat: bool,

    pub companions: OrdMap<CompanionId, Companion>,

    next_item_seq: u64,
    next_status_seq: u64,
}

impl GameState {
    /// Create a state around a player, out of combat and without companions.
    #[must_use]
    pub fn new(player: PlayerState) -> Self {
        Self {
            player,
            adversary: None,
            in_combat: false,
            companions: OrdMap::new(),
            next_item_seq: 0,
            next_status_seq: 0,
        }
    }

    /// Add a companion (builder pattern).
    #[must_use]
    pub fn with_companion(mut self, companion: Companion) -> Self {
        self.companions.insert(companion.id.clone(), companion);
        self
    }

    /// Start the state mid-combat (builder pattern).
    #[must_use]
    pub fn with_adversary(mut self, adversary: Adversary) -> Self {
        self.adversary = Some(adversary);
        self.in_combat = true;
        self
    }

    /// Is there an adversary to act on?
    #[must_use]
    pub fn has_active_enemy(&self) -> bool {
        self.in_combat && self.adversary.is_some()
    }

    /// Does the target refer to an actor that exists right now?
    #[must_use]
    pub fn target_exists(&self, target: &Target) -> bool {
        match target {
            Target::Player => true,
            Target::Enemy => self.has_active_enemy(),
            Target::Companion(id) => self.companions.contains_key(id),
        }
    }

    // === Vitals ===

    /// Read an actor's health pool.
    #[must_use]
    pub fn vitals(&self, target: &Target) -> Option<Vitals> {
        match target {
            Target::Player => Some(Vitals {
                health: self.player.health,
                max_health: self.player.max_health,
            }),
            Target::Enemy => self.adversary.as_ref().map(|a| Vitals {
                health: a.health,
                max_health: a.max_health,
            }),
            Target::Companion(id) => self.companions.get(id).map(|c| Vitals {
                health: c.health,
                max_health: c.max_health,
            }),
        }
    }

    /// Overwrite an actor's current health. Missing actors are ignored.
    pub fn set_health(&mut self, target: &Target, health: i64) {
        match target {
            Target::Player => self.player.health = health,
            Target::Enemy => {
                if let Some(adversary) = self.adversary.as_mut() {
                    adversary.health = health;
                }
            }
            Target::Companion(id) => {
                if let Some(companion) = self.companions.get_mut(id) {
                    companion.health = health;
                }
            }
        }
    }

    // === Status Effects ===

    /// Read an actor's status effects.
    #[must_use]
    pub fn statuses(&self, target: &Target) -> Option<&Vector<StatusEffect>> {
        match target {
            Target::Player => Some(&self.player.statuses),
            Target::Enemy => self.adversary.as_ref().map(|a| &a.statuses),
            Target::Companion(id) => self.companions.get(id).map(|c| &c.statuses),
        }
    }

    /// Mutable access to an actor's status effects.
    pub fn statuses_mut(&mut self, target: &Target) -> Option<&mut Vector<StatusEffect>> {
        match target {
            Target::Player => Some(&mut self.player.statuses),
            Target::Enemy => self.adversary.as_mut().map(|a| &mut a.statuses),
            Target::Companion(id) => self.companions.get_mut(id).map(|c| &mut c.statuses),
        }
    }

    /// Find a status effect on an actor by name.
    #[must_use]
    pub fn status_named(&self, target: &Target, name: &str) -> Option<&StatusEffect> {
        self.statuses(target)?.iter().find(|s| s.name == name)
    }

    // === ID Allocation ===

    /// Allocate the next item id.
    pub fn alloc_item_id(&mut self) -> ItemId {
        let id = ItemId::assigned(self.next_item_seq);
        self.next_item_seq += 1;
        id
    }

    /// Allocate the next status id.
    pub fn alloc_status_id(&mut self) -> StatusId {
        let id = StatusId::assigned(self.next_status_seq);
        self.next_status_seq += 1;
        id
    }

    // === Audit ===

    /// Summarize the fields effects touch.
    #[must_use]
    pub fn digest(&self) -> StateDigest {
        StateDigest {
            player_health: self.player.health,
            currency: self.player.currency,
            experience: self.player.experience,
            inventory_size: self.player.inventory.len(),
            player_statuses: self.player.statuses.len(),
            stance: self.player.stance,
            in_combat: self.in_combat,
            enemy_health: self.adversary.as_ref().map(|a| a.health),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        GameState::new(PlayerState::new(100).with_currency(50))
            .with_companion(Companion::new("mira", "Mira", 40))
    }

    #[test]
    fn test_new_state() {
        let state = sample_state();

        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.currency, 50);
        assert!(!state.in_combat);
        assert!(!state.has_active_enemy());
        assert_eq!(state.companions.len(), 1);
    }

    #[test]
    fn test_target_exists() {
        let state = sample_state();

        assert!(state.target_exists(&Target::Player));
        assert!(!state.target_exists(&Target::Enemy));
        assert!(state.target_exists(&Target::companion("mira")));
        assert!(!state.target_exists(&Target::companion("ghost")));

        let fighting = state.with_adversary(Adversary::new("wolf", "Wolf", 30));
        assert!(fighting.target_exists(&Target::Enemy));
    }

    #[test]
    fn test_set_health_per_target() {
        let mut state = sample_state().with_adversary(Adversary::new("wolf", "Wolf", 30));

        state.set_health(&Target::Player, 90);
        state.set_health(&Target::Enemy, 10);
        state.set_health(&Target::companion("mira"), 5);
        state.set_health(&Target::companion("ghost"), 1);

        assert_eq!(state.vitals(&Target::Player).unwrap().health, 90);
        assert_eq!(state.vitals(&Target::Enemy).unwrap().health, 10);
        assert_eq!(state.vitals(&Target::companion("mira")).unwrap().health, 5);
        assert!(state.vitals(&Target::companion("ghost")).is_none());
    }

    #[test]
    fn test_alloc_ids_are_sequential() {
        let mut state = sample_state();

        assert_eq!(state.alloc_item_id().as_str(), "item-0");
        assert_eq!(state.alloc_item_id().as_str(), "item-1");
        assert_eq!(state.alloc_status_id().as_str(), "status-0");
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample_state();
        let mut copy = original.clone();

        copy.player.inventory.push_back(Item::new("rope", "tool"));
        copy.player.health = 1;

        assert!(original.player.inventory.is_empty());
        assert_eq!(original.player.health, 100);
    }

    #[test]
    fn test_status_json_defaults() {
        let status: StatusEffect = serde_json::from_str(r#"{"name":"poisoned"}"#).unwrap();

        assert_eq!(status.duration, PERMANENT_DURATION);
        assert_eq!(status.stacks, 1);
        assert_eq!(status.polarity, Polarity::Neutral);
        assert!(status.id.is_none());
        assert!(status.modifiers.is_empty());
    }

    #[test]
    fn test_digest() {
        let state = sample_state();
        let digest = state.digest();

        assert_eq!(digest.player_health, 100);
        assert_eq!(digest.currency, 50);
        assert_eq!(digest.enemy_health, None);
    }
}
