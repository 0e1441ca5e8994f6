//! Piece resolution: ids in, a flat effect list out.
//!
//! Resolution is all-or-nothing. An unknown id or a selection that costs
//! more than the budget fails the whole call with zero effects, so a
//! half-resolved turn can never reach the executor.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::config::{HEAVY_POWER_MULTIPLIER, LIGHT_POWER_MULTIPLIER};
use crate::effects::Effect;

use super::registry::PieceRegistry;

/// How hard a turn should hit. Scales damage and heal amounts only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerLevel {
    Light,
    #[default]
    Medium,
    Heavy,
}

impl PowerLevel {
    /// Multiplier applied to damage and heal amounts.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            PowerLevel::Light => LIGHT_POWER_MULTIPLIER,
            PowerLevel::Medium => 1.0,
            PowerLevel::Heavy => HEAVY_POWER_MULTIPLIER,
        }
    }

    /// Scale an amount, rounding to the nearest integer.
    #[must_use]
    pub fn scale(self, amount: i64) -> i64 {
        match self {
            PowerLevel::Medium => amount,
            _ => (amount as f64 * self.multiplier()).round() as i64,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PowerLevel::Light => "light",
            PowerLevel::Medium => "medium",
            PowerLevel::Heavy => "heavy",
        }
    }
}

impl fmt::Display for PowerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PowerLevel {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(PowerLevel::Light),
            "medium" => Ok(PowerLevel::Medium),
            "heavy" => Ok(PowerLevel::Heavy),
            other => Err(ResolutionError::UnknownPowerLevel(other.to_string())),
        }
    }
}

/// Why a piece selection could not be resolved.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Unknown piece: {0}")]
    UnknownPiece(String),

    #[error("Pieces cost {total} but the budget is {budget}")]
    OverBudget { total: u32, budget: u32 },

    #[error("No pieces selected")]
    NoPieces,

    #[error("Unknown power level: {0}")]
    UnknownPowerLevel(String),
}

/// Outcome of resolving a piece selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    pub success: bool,
    /// Expanded effects in selection order. Empty on failure.
    pub effects: Vec<Effect>,
    /// Every problem found. Empty on success.
    pub errors: Vec<ResolutionError>,
    /// Summed cost of the known pieces.
    pub total_cost: u32,
}

impl Resolution {
    fn failure(errors: Vec<ResolutionError>, total_cost: u32) -> Self {
        Self {
            success: false,
            effects: Vec::new(),
            errors,
            total_cost,
        }
    }

    /// Convert into a `Result`, keeping the effects or the errors.
    pub fn into_result(self) -> Result<Vec<Effect>, Vec<ResolutionError>> {
        if self.success {
            Ok(self.effects)
        } else {
            Err(self.errors)
        }
    }
}

/// Resolve piece ids against a registry.
///
/// Steps, in order: every id must exist; the summed cost must fit the
/// budget; the pieces' effects are concatenated in selection order; damage
/// and heal amounts are scaled by the power level.
///
/// ```
/// use rpg_kernel::pieces::{resolve, PieceRegistry, PowerLevel};
///
/// let registry = PieceRegistry::standard();
/// let r = resolve(registry, &["basic_strike", "fireball"], 6, PowerLevel::Medium);
/// assert!(!r.success);
/// assert!(r.effects.is_empty());
/// assert_eq!(r.errors.len(), 1);
/// ```
pub fn resolve<S: AsRef<str>>(
    registry: &PieceRegistry,
    piece_ids: &[S],
    max_budget: u32,
    power_level: PowerLevel,
) -> Resolution {
    if piece_ids.is_empty() {
        return Resolution::failure(vec![ResolutionError::NoPieces], 0);
    }

    let mut pieces = Vec::with_capacity(piece_ids.len());
    let mut errors = Vec::new();
    for id in piece_ids {
        match registry.get(id.as_ref()) {
            Some(piece) => pieces.push(piece),
            None => errors.push(ResolutionError::UnknownPiece(id.as_ref().to_string())),
        }
    }

    let total_cost = pieces.iter().map(|p| p.cost).sum::<u32>();

    if !errors.is_empty() {
        warn!(unknown = errors.len(), "piece resolution failed");
        return Resolution::failure(errors, total_cost);
    }

    if total_cost > max_budget {
        warn!(total_cost, max_budget, "piece selection over budget");
        return Resolution::failure(
            vec![ResolutionError::OverBudget {
                total: total_cost,
                budget: max_budget,
            }],
            total_cost,
        );
    }

    let effects: Vec<Effect> = pieces
        .iter()
        .flat_map(|p| p.effects.iter())
        .map(|e| scale_effect(e, power_level))
        .collect();

    debug!(
        pieces = pieces.len(),
        effects = effects.len(),
        total_cost,
        power = %power_level,
        "pieces resolved"
    );

    Resolution {
        success: true,
        effects,
        errors: Vec::new(),
        total_cost,
    }
}

/// Scale damage and heal amounts, recursing into composites.
#[must_use]
pub fn scale_effect(effect: &Effect, power_level: PowerLevel) -> Effect {
    let mut scaled = effect.clone();
    match &mut scaled {
        Effect::Damage { amount, .. } | Effect::Heal { amount, .. } => {
            *amount = power_level.scale(*amount);
        }
        Effect::Composite { effects, .. } => {
            for child in effects.iter_mut() {
                *child = scale_effect(child, power_level);
            }
        }
        _ => {}
    }
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Target;

    fn registry() -> &'static PieceRegistry {
        PieceRegistry::standard()
    }

    #[test]
    fn test_resolve_within_budget() {
        let r = resolve(registry(), &["basic_strike", "minor_heal"], 6, PowerLevel::Medium);

        assert!(r.success);
        assert!(r.errors.is_empty());
        assert_eq!(r.total_cost, 4);
        assert_eq!(r.effects.len(), 2);
        assert_eq!(r.effects[0].magnitude(), Some(6));
        assert_eq!(r.effects[0].source(), "basic_strike");
    }

    #[test]
    fn test_over_budget_fails_whole_selection() {
        let r = resolve(registry(), &["basic_strike", "fireball"], 6, PowerLevel::Medium);

        assert!(!r.success);
        assert!(r.effects.is_empty());
        assert_eq!(r.total_cost, 7);
        assert_eq!(r.errors, vec![ResolutionError::OverBudget { total: 7, budget: 6 }]);
    }

    #[test]
    fn test_budget_is_inclusive() {
        let r = resolve(registry(), &["basic_strike", "fireball"], 7, PowerLevel::Medium);
        assert!(r.success);
    }

    #[test]
    fn test_every_unknown_id_is_reported() {
        let r = resolve(registry(), &["ghost", "basic_strike", "phantom"], 100, PowerLevel::Medium);

        assert!(!r.success);
        assert!(r.effects.is_empty());
        assert_eq!(
            r.errors,
            vec![
                ResolutionError::UnknownPiece("ghost".into()),
                ResolutionError::UnknownPiece("phantom".into()),
            ]
        );
    }

    #[test]
    fn test_empty_selection_fails() {
        let ids: [&str; 0] = [];
        let r = resolve(registry(), &ids, 10, PowerLevel::Medium);
        assert_eq!(r.errors, vec![ResolutionError::NoPieces]);
    }

    #[test]
    fn test_power_scaling() {
        let heavy = resolve(registry(), &["basic_strike"], 10, PowerLevel::Heavy);
        assert_eq!(heavy.effects[0].magnitude(), Some(9));

        let light = resolve(registry(), &["basic_strike"], 10, PowerLevel::Light);
        // 6 * 0.6 = 3.6
        assert_eq!(light.effects[0].magnitude(), Some(4));
    }

    #[test]
    fn test_scaling_leaves_other_effects_alone() {
        let r = resolve(registry(), &["combat_victory"], 10, PowerLevel::Heavy);
        let unscaled = &registry().get("combat_victory").unwrap().effects;
        assert_eq!(&r.effects, unscaled);
    }

    #[test]
    fn test_scaling_recurses_into_composites() {
        let effect = Effect::composite(
            "volley",
            [Effect::damage(Target::Enemy, 10), Effect::currency(10)],
        );
        let scaled = scale_effect(&effect, PowerLevel::Heavy);

        match scaled {
            Effect::Composite { effects, .. } => {
                assert_eq!(effects[0].magnitude(), Some(15));
                assert_eq!(effects[1].magnitude(), Some(10));
            }
            other => panic!("expected composite, got {other:?}"),
        }
    }

    #[test]
    fn test_power_level_parse() {
        assert_eq!("heavy".parse::<PowerLevel>().unwrap(), PowerLevel::Heavy);
        assert!("extreme".parse::<PowerLevel>().is_err());
        assert_eq!(PowerLevel::default(), PowerLevel::Medium);
    }

    #[test]
    fn test_into_result() {
        let ok = resolve(registry(), &["insight"], 5, PowerLevel::Medium).into_result();
        assert_eq!(ok.unwrap().len(), 1);

        let err = resolve(registry(), &["nope"], 5, PowerLevel::Medium).into_result();
        assert!(err.is_err());
    }
}
