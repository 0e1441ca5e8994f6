//! The kernel entry point: decision in, new state and report out.
//!
//! A piece decision is resolved against the registry under the budget for
//! its context and depth, then executed. A raw-effects decision goes
//! straight to the executor. Either way the executor is the only code
//! that touches the state.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::{GameState, KernelError};
use crate::effects::{execute, Effect, ExecutionReport, SkippedEffect};
use crate::pieces::{budget_for, resolve, BudgetContext, PieceRegistry, ResolutionError};

use super::decision::Decision;

/// Why a decision produced no new state.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecisionError {
    /// The piece selection could not be resolved. Nothing was executed.
    #[error("piece resolution failed: {}", join_errors(.0))]
    Resolution(Vec<ResolutionError>),

    /// Every effect in a non-empty decision was skipped.
    #[error("action could not be completed")]
    NothingApplied { skipped: Vec<SkippedEffect> },
}

fn join_errors(errors: &[ResolutionError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure of a call that starts from raw JSON.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error(transparent)]
    Decode(#[from] KernelError),

    #[error(transparent)]
    Decision(#[from] DecisionError),
}

/// A successfully run decision.
#[derive(Clone, Debug)]
pub struct DecisionOutcome {
    pub report: ExecutionReport,
    /// The generator's narration, passed through untouched.
    pub narration: String,
    /// Summed piece cost. Zero for raw-effects decisions.
    pub total_cost: u32,
    /// Budget the pieces were checked against, if any.
    pub budget: Option<u32>,
}

impl DecisionOutcome {
    /// The state after the decision.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.report.state
    }
}

/// Effects a decision compiles to, before execution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledDecision {
    pub effects: Vec<Effect>,
    pub total_cost: u32,
    pub budget: Option<u32>,
}

/// Runs decisions against a piece registry.
///
/// ```
/// use rpg_kernel::core::{Adversary, GameState, PlayerState};
/// use rpg_kernel::pieces::BudgetContext;
/// use rpg_kernel::rules::{Decision, Kernel};
///
/// let state = GameState::new(PlayerState::new(100))
///     .with_adversary(Adversary::new("wolf", "Wolf", 30));
/// let decision = Decision::pieces("You swing.", ["basic_strike"]);
///
/// let outcome = Kernel::standard()
///     .apply(&state, &decision, BudgetContext::Enemy, 0)
///     .unwrap();
/// assert_eq!(outcome.state().adversary.as_ref().unwrap().health, 24);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Kernel<'r> {
    registry: &'r PieceRegistry,
}

impl Kernel<'static> {
    /// A kernel over the built-in catalogue.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(PieceRegistry::standard())
    }
}

impl<'r> Kernel<'r> {
    #[must_use]
    pub fn new(registry: &'r PieceRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &'r PieceRegistry {
        self.registry
    }

    /// Turn a decision into its effect list without executing it.
    pub fn compile(
        &self,
        decision: &Decision,
        context: BudgetContext,
        depth: u32,
    ) -> Result<CompiledDecision, DecisionError> {
        match decision {
            Decision::Effects { effects, .. } => Ok(CompiledDecision {
                effects: effects.clone(),
                total_cost: 0,
                budget: None,
            }),
            Decision::Pieces {
                piece_ids,
                power_level,
                ..
            } => {
                let budget = budget_for(context, depth);
                let resolution = resolve(
                    self.registry,
                    piece_ids,
                    budget,
                    power_level.unwrap_or_default(),
                );
                let total_cost = resolution.total_cost;
                let effects = resolution.into_result().map_err(DecisionError::Resolution)?;
                Ok(CompiledDecision {
                    effects,
                    total_cost,
                    budget: Some(budget),
                })
            }
        }
    }

    /// Run a decision against a state.
    ///
    /// The input state is left untouched; on success the successor is in
    /// the outcome's report.
    pub fn apply(
        &self,
        state: &GameState,
        decision: &Decision,
        context: BudgetContext,
        depth: u32,
    ) -> Result<DecisionOutcome, DecisionError> {
        let compiled = self.compile(decision, context, depth)?;
        let report = execute(state.clone(), &compiled.effects);

        if !compiled.effects.is_empty() && !report.any_applied() {
            warn!(skipped = report.skipped.len(), "decision had no effect");
            return Err(DecisionError::NothingApplied {
                skipped: report.skipped,
            });
        }

        if report.is_clean() {
            debug!(applied = report.applied.len(), %context, depth, "decision applied");
        } else {
            info!(
                applied = report.applied.len(),
                skipped = report.skipped.len(),
                %context,
                depth,
                "decision partially applied"
            );
        }

        Ok(DecisionOutcome {
            report,
            narration: decision.narration().to_string(),
            total_cost: compiled.total_cost,
            budget: compiled.budget,
        })
    }

    /// Decode a JSON decision and run it.
    pub fn apply_json(
        &self,
        state: &GameState,
        json: &str,
        context: BudgetContext,
        depth: u32,
    ) -> Result<DecisionOutcome, TurnError> {
        let decision = Decision::from_json(json)?;
        Ok(self.apply(state, &decision, context, depth)?)
    }
}
