//! Effect definitions.
//!
//! Effects are atomic, data-only instructions describing one state
//! mutation. The set is closed: adding a mechanic means adding a variant
//! here and an arm to the validator and applier matches, which the
//! compiler then insists on.
//!
//! ## Wire Shape
//!
//! Effects serialize with an internal `type` tag in snake_case and
//! camelCase fields, the shape the decision layer emits:
//!
//! ```
//! use rpg_kernel::effects::Effect;
//!
//! let effect: Effect = serde_json::from_str(
//!     r#"{"type":"damage","target":"enemy","amount":6,"canKill":true}"#,
//! ).unwrap();
//! assert_eq!(effect.magnitude(), Some(6));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{Adversary, Item, ItemId, Stance, StatusEffect, StatusId, Target};

/// How a combat session ended. Informational only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatResult {
    #[default]
    Victory,
    Defeat,
    Fled,
    Truce,
}

/// An atomic state-mutation instruction.
///
/// ## Health
/// - `Damage`: subtract from an actor's health
/// - `Heal`: add to an actor's health
///
/// ## Resources
/// - `ModifyCurrency`, `ModifyExperience`: signed deltas on the player
/// - `AddItem`, `RemoveItem`: inventory changes
///
/// ## Status
/// - `ApplyStatus`: attach or refresh a status effect
/// - `RemoveStatus`: detach a status effect by id
///
/// ## Combat
/// - `StartCombat`, `EndCombat`: open and close a combat session
/// - `ChangeStance`: set the player's posture
///
/// ## Other
/// - `Narrative`: no state change; keeps narration ordered with mutations
/// - `Composite`: a descriptive wrapper, flattened by the executor
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Effect {
    Damage {
        target: Target,
        amount: i64,
        #[serde(default)]
        source: String,
        /// When false, damage stops at 1 health.
        #[serde(default = "default_true")]
        can_kill: bool,
        /// Carried for the log; mitigation is the decision layer's concern.
        #[serde(default)]
        ignore_defense: bool,
    },

    Heal {
        target: Target,
        amount: i64,
        #[serde(default)]
        source: String,
        /// When true, the ceiling is 1.5x max health.
        #[serde(default)]
        can_overheal: bool,
    },

    #[serde(alias = "modify_gold")]
    ModifyCurrency {
        amount: i64,
        #[serde(default)]
        source: String,
    },

    ModifyExperience {
        amount: i64,
        #[serde(default)]
        source: String,
    },

    AddItem {
        item: Item,
        #[serde(default)]
        source: String,
    },

    RemoveItem {
        item_id: ItemId,
        #[serde(default)]
        source: String,
    },

    ApplyStatus {
        #[serde(default)]
        target: Target,
        status: StatusEffect,
        #[serde(default)]
        source: String,
    },

    RemoveStatus {
        #[serde(default)]
        target: Target,
        status_id: StatusId,
        #[serde(default)]
        source: String,
    },

    StartCombat {
        adversary: Adversary,
        #[serde(default)]
        source: String,
    },

    EndCombat {
        #[serde(default)]
        result: CombatResult,
        #[serde(default)]
        source: String,
    },

    ChangeStance {
        stance: Stance,
        #[serde(default)]
        source: String,
    },

    Narrative {
        text: String,
        #[serde(default)]
        source: String,
    },

    Composite {
        effects: Vec<Effect>,
        #[serde(default)]
        description: String,
        #[serde(default)]
        source: String,
    },
}

fn default_true() -> bool {
    true
}

/// The discriminant of an [`Effect`], for logs and dispatch tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Damage,
    Heal,
    ModifyCurrency,
    ModifyExperience,
    AddItem,
    RemoveItem,
    ApplyStatus,
    RemoveStatus,
    StartCombat,
    EndCombat,
    ChangeStance,
    Narrative,
    Composite,
}

impl EffectKind {
    /// Every kind in the instruction set.
    pub const ALL: [EffectKind; 13] = [
        EffectKind::Damage,
        EffectKind::Heal,
        EffectKind::ModifyCurrency,
        EffectKind::ModifyExperience,
        EffectKind::AddItem,
        EffectKind::RemoveItem,
        EffectKind::ApplyStatus,
        EffectKind::RemoveStatus,
        EffectKind::StartCombat,
        EffectKind::EndCombat,
        EffectKind::ChangeStance,
        EffectKind::Narrative,
        EffectKind::Composite,
    ];

    /// The wire tag for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            EffectKind::Damage => "damage",
            EffectKind::Heal => "heal",
            EffectKind::ModifyCurrency => "modify_currency",
            EffectKind::ModifyExperience => "modify_experience",
            EffectKind::AddItem => "add_item",
            EffectKind::RemoveItem => "remove_item",
            EffectKind::ApplyStatus => "apply_status",
            EffectKind::RemoveStatus => "remove_status",
            EffectKind::StartCombat => "start_combat",
            EffectKind::EndCombat => "end_combat",
            EffectKind::ChangeStance => "change_stance",
            EffectKind::Narrative => "narrative",
            EffectKind::Composite => "composite",
        }
    }

    /// The wire fields this kind accepts besides `type`.
    #[must_use]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            EffectKind::Damage => &["target", "amount", "source", "canKill", "ignoreDefense"],
            EffectKind::Heal => &["target", "amount", "source", "canOverheal"],
            EffectKind::ModifyCurrency | EffectKind::ModifyExperience => &["amount", "source"],
            EffectKind::AddItem => &["item", "source"],
            EffectKind::RemoveItem => &["itemId", "source"],
            EffectKind::ApplyStatus => &["target", "status", "source"],
            EffectKind::RemoveStatus => &["target", "statusId", "source"],
            EffectKind::StartCombat => &["adversary", "source"],
            EffectKind::EndCombat => &["result", "source"],
            EffectKind::ChangeStance => &["stance", "source"],
            EffectKind::Narrative => &["text", "source"],
            EffectKind::Composite => &["effects", "description", "source"],
        }
    }

    /// Look up a kind by wire tag, accepting legacy aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "modify_gold" {
            return Some(EffectKind::ModifyCurrency);
        }
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Effect {
    // === Constructors ===

    /// Lethal damage to a target.
    pub fn damage(target: Target, amount: i64) -> Self {
        Self::Damage {
            target,
            amount,
            source: String::new(),
            can_kill: true,
            ignore_defense: false,
        }
    }

    /// Heal a target up to its max health.
    pub fn heal(target: Target, amount: i64) -> Self {
        Self::Heal {
            target,
            amount,
            source: String::new(),
            can_overheal: false,
        }
    }

    /// Change the player's currency by a signed amount.
    pub fn currency(amount: i64) -> Self {
        Self::ModifyCurrency {
            amount,
            source: String::new(),
        }
    }

    /// Change the player's experience by a signed amount.
    pub fn experience(amount: i64) -> Self {
        Self::ModifyExperience {
            amount,
            source: String::new(),
        }
    }

    /// Give the player an item.
    pub fn add_item(item: Item) -> Self {
        Self::AddItem {
            item,
            source: String::new(),
        }
    }

    /// Take an item from the player.
    pub fn remove_item(item_id: impl Into<ItemId>) -> Self {
        Self::RemoveItem {
            item_id: item_id.into(),
            source: String::new(),
        }
    }

    /// Attach a status effect to a target.
    pub fn apply_status(target: Target, status: StatusEffect) -> Self {
        Self::ApplyStatus {
            target,
            status,
            source: String::new(),
        }
    }

    /// Remove a status effect from a target.
    pub fn remove_status(target: Target, status_id: impl Into<StatusId>) -> Self {
        Self::RemoveStatus {
            target,
            status_id: status_id.into(),
            source: String::new(),
        }
    }

    /// Open a combat session against an adversary.
    pub fn start_combat(adversary: Adversary) -> Self {
        Self::StartCombat {
            adversary,
            source: String::new(),
        }
    }

    /// Close the current combat session.
    pub fn end_combat(result: CombatResult) -> Self {
        Self::EndCombat {
            result,
            source: String::new(),
        }
    }

    /// Change the player's stance.
    pub fn stance(stance: Stance) -> Self {
        Self::ChangeStance {
            stance,
            source: String::new(),
        }
    }

    /// A narration-only effect.
    pub fn narrative(text: impl Into<String>) -> Self {
        Self::Narrative {
            text: text.into(),
            source: String::new(),
        }
    }

    /// Wrap effects in a described composite.
    pub fn composite(description: impl Into<String>, effects: impl IntoIterator<Item = Effect>) -> Self {
        Self::Composite {
            effects: effects.into_iter().collect(),
            description: description.into(),
            source: String::new(),
        }
    }

    // === Builders ===

    /// Set the source string (builder pattern).
    #[must_use]
    pub fn from_source(mut self, new_source: impl Into<String>) -> Self {
        *self.source_mut() = new_source.into();
        self
    }

    /// Make damage stop at 1 health. No effect on other variants.
    #[must_use]
    pub fn non_lethal(mut self) -> Self {
        if let Self::Damage { can_kill, .. } = &mut self {
            *can_kill = false;
        }
        self
    }

    /// Mark damage as ignoring defense. No effect on other variants.
    #[must_use]
    pub fn ignoring_defense(mut self) -> Self {
        if let Self::Damage { ignore_defense, .. } = &mut self {
            *ignore_defense = true;
        }
        self
    }

    /// Allow a heal to exceed max health. No effect on other variants.
    #[must_use]
    pub fn overheal(mut self) -> Self {
        if let Self::Heal { can_overheal, .. } = &mut self {
            *can_overheal = true;
        }
        self
    }

    // === Accessors ===

    /// The discriminant of this effect.
    #[must_use]
    pub fn kind(&self) -> EffectKind {
        match self {
            Effect::Damage { .. } => EffectKind::Damage,
            Effect::Heal { .. } => EffectKind::Heal,
            Effect::ModifyCurrency { .. } => EffectKind::ModifyCurrency,
            Effect::ModifyExperience { .. } => EffectKind::ModifyExperience,
            Effect::AddItem { .. } => EffectKind::AddItem,
            Effect::RemoveItem { .. } => EffectKind::RemoveItem,
            Effect::ApplyStatus { .. } => EffectKind::ApplyStatus,
            Effect::RemoveStatus { .. } => EffectKind::RemoveStatus,
            Effect::StartCombat { .. } => EffectKind::StartCombat,
            Effect::EndCombat { .. } => EffectKind::EndCombat,
            Effect::ChangeStance { .. } => EffectKind::ChangeStance,
            Effect::Narrative { .. } => EffectKind::Narrative,
            Effect::Composite { .. } => EffectKind::Composite,
        }
    }

    /// The actor this effect touches. Player-only effects report the player;
    /// narrative, composite, and combat lifecycle effects report none.
    #[must_use]
    pub fn target(&self) -> Option<&Target> {
        const PLAYER: &Target = &Target::Player;
        match self {
            Effect::Damage { target, .. }
            | Effect::Heal { target, .. }
            | Effect::ApplyStatus { target, .. }
            | Effect::RemoveStatus { target, .. } => Some(target),
            Effect::ModifyCurrency { .. }
            | Effect::ModifyExperience { .. }
            | Effect::AddItem { .. }
            | Effect::RemoveItem { .. }
            | Effect::ChangeStance { .. } => Some(PLAYER),
            Effect::StartCombat { .. }
            | Effect::EndCombat { .. }
            | Effect::Narrative { .. }
            | Effect::Composite { .. } => None,
        }
    }

    /// Where this effect came from (a piece id, an item, the narrator, ...).
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Effect::Damage { source, .. }
            | Effect::Heal { source, .. }
            | Effect::ModifyCurrency { source, .. }
            | Effect::ModifyExperience { source, .. }
            | Effect::AddItem { source, .. }
            | Effect::RemoveItem { source, .. }
            | Effect::ApplyStatus { source, .. }
            | Effect::RemoveStatus { source, .. }
            | Effect::StartCombat { source, .. }
            | Effect::EndCombat { source, .. }
            | Effect::ChangeStance { source, .. }
            | Effect::Narrative { source, .. }
            | Effect::Composite { source, .. } => source,
        }
    }

    fn source_mut(&mut self) -> &mut String {
        match self {
            Effect::Damage { source, .. }
            | Effect::Heal { source, .. }
            | Effect::ModifyCurrency { source, .. }
            | Effect::ModifyExperience { source, .. }
            | Effect::AddItem { source, .. }
            | Effect::RemoveItem { source, .. }
            | Effect::ApplyStatus { source, .. }
            | Effect::RemoveStatus { source, .. }
            | Effect::StartCombat { source, .. }
            | Effect::EndCombat { source, .. }
            | Effect::ChangeStance { source, .. }
            | Effect::Narrative { source, .. }
            | Effect::Composite { source, .. } => source,
        }
    }

    /// The numeric magnitude of damage, heal, currency, and experience effects.
    #[must_use]
    pub fn magnitude(&self) -> Option<i64> {
        match self {
            Effect::Damage { amount, .. }
            | Effect::Heal { amount, .. }
            | Effect::ModifyCurrency { amount, .. }
            | Effect::ModifyExperience { amount, .. } => Some(*amount),
            _ => None,
        }
    }

    /// Is this a composite wrapper?
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Effect::Composite { .. })
    }

    /// Count leaf effects, looking through composites.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Effect::Composite { effects, .. } => effects.iter().map(Effect::leaf_count).sum(),
            _ => 1,
        }
    }
}
