//! Effect target selectors.
//!
//! Every targeted effect names the actor it touches:
//! - `player`: the player character
//! - `enemy`: the current adversary (only meaningful in combat)
//! - `companion:<id>`: a companion travelling with the player
//!
//! Targets serialize as those plain strings so the decision layer can
//! emit them directly.
//!
//! ```
//! use rpg_kernel::core::Target;
//!
//! let t: Target = "companion:mira".parse().unwrap();
//! assert_eq!(t.to_string(), "companion:mira");
//! assert!("ally".parse::<Target>().is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::KernelError;
use super::ids::CompanionId;

const COMPANION_PREFIX: &str = "companion:";

/// The actor an effect applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Target {
    /// The player character.
    #[default]
    Player,
    /// The active adversary.
    Enemy,
    /// A companion, by id.
    Companion(CompanionId),
}

impl Target {
    /// Target a companion by id.
    pub fn companion(id: impl Into<CompanionId>) -> Self {
        Self::Companion(id.into())
    }

    /// Does this target require an active combat session?
    #[must_use]
    pub fn is_combat_scoped(&self) -> bool {
        matches!(self, Target::Enemy)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Player => f.write_str("player"),
            Target::Enemy => f.write_str("enemy"),
            Target::Companion(id) => write!(f, "{COMPANION_PREFIX}{id}"),
        }
    }
}

impl FromStr for Target {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player" => Ok(Target::Player),
            "enemy" => Ok(Target::Enemy),
            other => match other.strip_prefix(COMPANION_PREFIX) {
                Some(id) if !id.is_empty() => Ok(Target::Companion(CompanionId::new(id))),
                _ => Err(KernelError::InvalidTarget(other.to_string())),
            },
        }
    }
}

impl TryFrom<String> for Target {
    type Error = KernelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Target> for String {
    fn from(target: Target) -> Self {
        target.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_targets() {
        assert_eq!("player".parse::<Target>().unwrap(), Target::Player);
        assert_eq!("enemy".parse::<Target>().unwrap(), Target::Enemy);
        assert_eq!(
            "companion:bram".parse::<Target>().unwrap(),
            Target::companion("bram")
        );
    }

    #[test]
    fn test_reject_malformed_targets() {
        assert!("companion:".parse::<Target>().is_err());
        assert!("Player".parse::<Target>().is_err());
        assert!("".parse::<Target>().is_err());
    }

    #[test]
    fn test_target_json() {
        let json = serde_json::to_string(&Target::companion("bram")).unwrap();
        assert_eq!(json, "\"companion:bram\"");

        let err = serde_json::from_str::<Target>("\"boss\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_combat_scope() {
        assert!(Target::Enemy.is_combat_scoped());
        assert!(!Target::Player.is_combat_scoped());
    }
}
