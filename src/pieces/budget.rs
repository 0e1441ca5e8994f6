//! Power budget sizing.
//!
//! Deeper into a run, encounters may spend more. Each context grows
//! linearly with depth up to a hard cap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::config::{BOSS_BUDGET, ENEMY_BUDGET, SHRINE_BUDGET, TRAP_BUDGET};
use crate::core::KernelError;

/// What kind of encounter a budget is sized for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetContext {
    Enemy,
    Boss,
    Trap,
    Shrine,
}

impl BudgetContext {
    pub const ALL: [BudgetContext; 4] = [
        BudgetContext::Enemy,
        BudgetContext::Boss,
        BudgetContext::Trap,
        BudgetContext::Shrine,
    ];

    /// The sizing rule for this context.
    #[must_use]
    pub fn rule(self) -> BudgetRule {
        let (base, per_depth, cap) = match self {
            BudgetContext::Enemy => ENEMY_BUDGET,
            BudgetContext::Boss => BOSS_BUDGET,
            BudgetContext::Trap => TRAP_BUDGET,
            BudgetContext::Shrine => SHRINE_BUDGET,
        };
        BudgetRule {
            base,
            per_depth,
            cap,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BudgetContext::Enemy => "enemy",
            BudgetContext::Boss => "boss",
            BudgetContext::Trap => "trap",
            BudgetContext::Shrine => "shrine",
        }
    }
}

impl fmt::Display for BudgetContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BudgetContext {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetContext::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| KernelError::MalformedDecision(format!("unknown budget context {s:?}")))
    }
}

/// Linear budget growth: `min(cap, base + per_depth * depth)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BudgetRule {
    pub base: u32,
    pub per_depth: u32,
    pub cap: u32,
}

impl BudgetRule {
    #[must_use]
    pub fn at_depth(&self, depth: u32) -> u32 {
        self.per_depth
            .saturating_mul(depth)
            .saturating_add(self.base)
            .min(self.cap)
    }
}

/// Budget for a context at a progression depth.
///
/// ```
/// use rpg_kernel::pieces::{budget_for, BudgetContext};
///
/// assert_eq!(budget_for(BudgetContext::Enemy, 0), 5);
/// assert_eq!(budget_for(BudgetContext::Enemy, 100), 12);
/// ```
#[must_use]
pub fn budget_for(context: BudgetContext, depth: u32) -> u32 {
    context.rule().at_depth(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_grows_with_depth() {
        assert_eq!(budget_for(BudgetContext::Boss, 0), 8);
        assert_eq!(budget_for(BudgetContext::Boss, 3), 14);
        assert_eq!(budget_for(BudgetContext::Trap, 2), 5);
        assert_eq!(budget_for(BudgetContext::Shrine, 1), 5);
    }

    #[test]
    fn test_budget_is_capped() {
        for context in BudgetContext::ALL {
            let rule = context.rule();
            assert_eq!(budget_for(context, u32::MAX), rule.cap);
            assert!(budget_for(context, 0) <= rule.cap);
        }
    }

    #[test]
    fn test_budget_is_monotonic() {
        for context in BudgetContext::ALL {
            let mut last = 0;
            for depth in 0..30 {
                let b = budget_for(context, depth);
                assert!(b >= last);
                last = b;
            }
        }
    }

    #[test]
    fn test_context_parse() {
        assert_eq!("boss".parse::<BudgetContext>().unwrap(), BudgetContext::Boss);
        assert!("dragon".parse::<BudgetContext>().is_err());
    }
}
