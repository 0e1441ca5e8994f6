//! Decisions: what the generator hands the kernel each turn.
//!
//! Two shapes are accepted. The piece shape is the primary one: the
//! generator names catalogue pieces and a power level, and the kernel
//! supplies the numbers. The effects shape carries raw effects and is the
//! primitive the piece shape compiles down to.
//!
//! ```json
//! { "narration": "...", "pieceIds": ["basic_strike"], "powerLevel": "heavy" }
//! { "narration": "...", "effects": [{ "type": "damage", "target": "enemy", "amount": 6 }] }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::KernelError;
use crate::effects::{Effect, EffectKind};
use crate::pieces::PowerLevel;

/// A decoded decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged, rename_all_fields = "camelCase")]
pub enum Decision {
    Pieces {
        narration: String,
        piece_ids: Vec<String>,
        power_level: Option<PowerLevel>,
    },
    Effects {
        narration: String,
        effects: Vec<Effect>,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PiecesShape {
    #[serde(default)]
    narration: String,
    piece_ids: Vec<String>,
    #[serde(default)]
    power_level: Option<PowerLevel>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct EffectsShape {
    #[serde(default)]
    narration: String,
    effects: Vec<Effect>,
}

impl Decision {
    /// A raw-effects decision.
    #[must_use]
    pub fn effects(narration: impl Into<String>, effects: impl IntoIterator<Item = Effect>) -> Self {
        Decision::Effects {
            narration: narration.into(),
            effects: effects.into_iter().collect(),
        }
    }

    /// A piece decision at the default power level.
    #[must_use]
    pub fn pieces<S: Into<String>>(narration: impl Into<String>, piece_ids: impl IntoIterator<Item = S>) -> Self {
        Decision::Pieces {
            narration: narration.into(),
            piece_ids: piece_ids.into_iter().map(Into::into).collect(),
            power_level: None,
        }
    }

    /// Set the power level of a piece decision (builder pattern).
    ///
    /// Has no effect on a raw-effects decision.
    #[must_use]
    pub fn with_power(mut self, level: PowerLevel) -> Self {
        if let Decision::Pieces { power_level, .. } = &mut self {
            *power_level = Some(level);
        }
        self
    }

    /// Decode a decision from JSON.
    ///
    /// Every effect's `type` is checked against the closed instruction set
    /// before anything else is decoded, so a decision naming an unknown
    /// effect fails loudly instead of being partially understood.
    ///
    /// ```
    /// use rpg_kernel::core::KernelError;
    /// use rpg_kernel::rules::Decision;
    ///
    /// let err = Decision::from_json(r#"{"effects":[{"type":"teleport"}]}"#).unwrap_err();
    /// assert!(matches!(err, KernelError::UnknownEffectType(t) if t == "teleport"));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, KernelError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode a decision from an already parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, KernelError> {
        let Some(object) = value.as_object() else {
            return Err(KernelError::MalformedDecision("decision must be a JSON object".into()));
        };

        let has_pieces = object.contains_key("pieceIds");
        let has_effects = object.contains_key("effects");

        match (has_pieces, has_effects) {
            (true, true) => Err(KernelError::MalformedDecision(
                "decision has both `pieceIds` and `effects`".into(),
            )),
            (true, false) => {
                let shape: PiecesShape = serde_json::from_value(value).map_err(malformed)?;
                Ok(Decision::Pieces {
                    narration: shape.narration,
                    piece_ids: shape.piece_ids,
                    power_level: shape.power_level,
                })
            }
            (false, true) => {
                let Some(list) = value.get("effects").and_then(Value::as_array) else {
                    return Err(KernelError::MalformedDecision("`effects` must be an array".into()));
                };
                for (index, effect) in list.iter().enumerate() {
                    check_effect_type(effect, index)?;
                }
                let shape: EffectsShape = serde_json::from_value(value).map_err(malformed)?;
                Ok(Decision::Effects {
                    narration: shape.narration,
                    effects: shape.effects,
                })
            }
            (false, false) => Err(KernelError::MalformedDecision(
                "decision needs `pieceIds` or `effects`".into(),
            )),
        }
    }

    /// Encode back to JSON.
    pub fn to_json(&self) -> Result<String, KernelError> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn narration(&self) -> &str {
        match self {
            Decision::Pieces { narration, .. } | Decision::Effects { narration, .. } => narration,
        }
    }

    /// Is this a piece decision?
    #[must_use]
    pub fn is_pieces(&self) -> bool {
        matches!(self, Decision::Pieces { .. })
    }
}

fn malformed(err: serde_json::Error) -> KernelError {
    KernelError::MalformedDecision(err.to_string())
}

/// Check an effect object's `type` tag and field names, looking inside composites.
///
/// `index` is the top-level position reported on a missing tag.
fn check_effect_type(value: &Value, index: usize) -> Result<(), KernelError> {
    let Some(object) = value.as_object() else {
        return Err(KernelError::MalformedDecision(format!(
            "effect at index {index} is not an object"
        )));
    };

    let name = match object.get("type") {
        Some(Value::String(name)) => name,
        Some(other) => {
            return Err(KernelError::MalformedDecision(format!(
                "effect at index {index} has a non-string type: {other}"
            )))
        }
        None => return Err(KernelError::MissingEffectType(index)),
    };

    let kind = EffectKind::from_name(name).ok_or_else(|| KernelError::UnknownEffectType(name.clone()))?;

    if let Some(key) = object
        .keys()
        .find(|key| key.as_str() != "type" && !kind.fields().contains(&key.as_str()))
    {
        return Err(KernelError::MalformedDecision(format!(
            "effect at index {index} has unknown field `{key}` for {name}"
        )));
    }

    if kind == EffectKind::Composite {
        if let Some(Value::Array(children)) = object.get("effects") {
            for child in children {
                check_effect_type(child, index)?;
            }
        }
    }
    Ok(())
}
