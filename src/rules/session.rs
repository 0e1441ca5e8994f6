//! Session context: one playthrough's state, dice, and progress.
//!
//! Everything that would otherwise be process-wide mutable state lives on
//! an explicitly constructed `Session`. Two sessions never share anything
//! but the read-only piece registry, so they can run side by side.
//!
//! ## Snapshots
//!
//! A `SessionSnapshot` captures state, RNG position, depth and turn. It
//! encodes to bytes with bincode; restoring it reproduces every future
//! roll exactly.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::DISPOSITION_LIMIT;
use crate::core::{
    CompanionId, GameRng, GameRngState, GameState, KernelError, PlayerState, StatusEffect, Target,
};
use crate::effects::{execute, tick_statuses, Effect, ExecutionReport, Rejection};
use crate::pieces::{budget_for, BudgetContext, PieceRegistry};
use crate::tiers::{
    blessing_status, resolve_disposition_tier, reward_effect, BlessingKind, BlessingTier,
    DispositionDirection, DispositionTier, RewardKind, RewardTier,
};

use super::decision::Decision;
use super::kernel::{DecisionError, DecisionOutcome, Kernel, TurnError};

/// A running playthrough.
///
/// ```
/// use rpg_kernel::core::PlayerState;
/// use rpg_kernel::rules::Session;
/// use rpg_kernel::tiers::{RewardKind, RewardTier};
///
/// let mut session = Session::new(PlayerState::new(100), 42);
/// let report = session.grant_reward(RewardKind::Gold, RewardTier::Small);
/// assert!(report.is_clean());
/// assert!(session.state().player.currency >= 5);
/// ```
#[derive(Clone, Debug)]
pub struct Session<'r> {
    kernel: Kernel<'r>,
    state: GameState,
    rng: GameRng,
    depth: u32,
    turn: u32,
}

impl Session<'static> {
    /// Start a session over the built-in catalogue.
    #[must_use]
    pub fn new(player: PlayerState, seed: u64) -> Self {
        Self::from_state(Kernel::standard(), GameState::new(player), seed)
    }

    /// Rebuild a session over the built-in catalogue from a snapshot.
    #[must_use]
    pub fn restore(snapshot: &SessionSnapshot) -> Self {
        Self::restore_with(Kernel::standard(), snapshot)
    }
}

impl<'r> Session<'r> {
    /// Start a session from an existing state.
    #[must_use]
    pub fn from_state(kernel: Kernel<'r>, state: GameState, seed: u64) -> Self {
        info!(seed, "session started");
        Self {
            kernel,
            state,
            rng: GameRng::new(seed),
            depth: 0,
            turn: 0,
        }
    }

    /// Start a session with a custom piece registry.
    #[must_use]
    pub fn with_registry(registry: &'r PieceRegistry, state: GameState, seed: u64) -> Self {
        Self::from_state(Kernel::new(registry), state, seed)
    }

    /// Rebuild a session from a snapshot.
    #[must_use]
    pub fn restore_with(kernel: Kernel<'r>, snapshot: &SessionSnapshot) -> Self {
        debug!(turn = snapshot.turn, depth = snapshot.depth, "session restored");
        Self {
            kernel,
            state: snapshot.state.clone(),
            rng: GameRng::from_state(&snapshot.rng),
            depth: snapshot.depth,
            turn: snapshot.turn,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn kernel(&self) -> Kernel<'r> {
        self.kernel
    }

    /// Piece budget for a context at the current depth.
    #[must_use]
    pub fn budget(&self, context: BudgetContext) -> u32 {
        budget_for(context, self.depth)
    }

    /// Move one level deeper.
    pub fn descend(&mut self) {
        self.depth = self.depth.saturating_add(1);
        debug!(depth = self.depth, "descended");
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.depth = depth;
    }

    // === Turn operations ===

    /// Run a decision at the current depth and keep the result.
    ///
    /// On error the state is unchanged.
    pub fn apply_decision(
        &mut self,
        decision: &Decision,
        context: BudgetContext,
    ) -> Result<DecisionOutcome, DecisionError> {
        let outcome = self.kernel.apply(&self.state, decision, context, self.depth)?;
        self.state = outcome.report.state.clone();
        Ok(outcome)
    }

    /// Decode a JSON decision and run it.
    pub fn apply_json(&mut self, json: &str, context: BudgetContext) -> Result<DecisionOutcome, TurnError> {
        let decision = Decision::from_json(json)?;
        Ok(self.apply_decision(&decision, context)?)
    }

    /// Run raw effects through the executor and keep the result.
    pub fn run_effects(&mut self, effects: &[Effect]) -> ExecutionReport {
        let report = execute(self.state.clone(), effects);
        self.state = report.state.clone();
        report
    }

    /// Roll a tiered reward and pay it out.
    pub fn grant_reward(&mut self, kind: RewardKind, tier: RewardTier) -> ExecutionReport {
        let effects: Vec<Effect> = reward_effect(kind, tier, &mut self.rng).into_iter().collect();
        debug!(?kind, ?tier, "reward granted");
        self.run_effects(&effects)
    }

    /// Lay a blessing or curse on a target.
    ///
    /// `name` is the status stacking key and `stat` the modified attribute.
    pub fn bless(
        &mut self,
        target: Target,
        name: &str,
        stat: &str,
        kind: BlessingKind,
        tier: BlessingTier,
    ) -> ExecutionReport {
        let status: StatusEffect = blessing_status(name, stat, kind, tier);
        let effect = Effect::apply_status(target, status).from_source("blessing");
        self.run_effects(&[effect])
    }

    /// Shift a companion's disposition. Returns the new disposition.
    ///
    /// Disposition is kept within `±DISPOSITION_LIMIT`.
    pub fn shift_disposition(
        &mut self,
        companion: &CompanionId,
        direction: DispositionDirection,
        tier: DispositionTier,
    ) -> Result<i64, Rejection> {
        let shift = resolve_disposition_tier(direction, tier);
        let Some(entry) = self.state.companions.get_mut(companion) else {
            return Err(Rejection::UnknownCompanion(companion.to_string()));
        };
        entry.disposition = entry
            .disposition
            .saturating_add(shift)
            .clamp(-DISPOSITION_LIMIT, DISPOSITION_LIMIT);
        debug!(companion = %companion, shift, disposition = entry.disposition, "disposition shifted");
        Ok(entry.disposition)
    }

    /// Close the turn: status durations advance and the counter moves on.
    pub fn end_turn(&mut self) {
        self.state = tick_statuses(&self.state);
        self.turn = self.turn.saturating_add(1);
        debug!(turn = self.turn, "turn ended");
    }

    // === Persistence ===

    /// Capture everything needed to resume this session.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            rng: self.rng.state(),
            depth: self.depth,
            turn: self.turn,
        }
    }
}

/// Serializable session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: GameState,
    pub rng: GameRngState,
    pub depth: u32,
    pub turn: u32,
}

impl SessionSnapshot {
    /// Encode to bytes for the persistence layer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, KernelError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KernelError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
