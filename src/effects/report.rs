//! Execution reports.
//!
//! An `ExecutionReport` is everything the executor knows after running an
//! effect list: the final state, what was applied, what was skipped and
//! why, the narration in order, and a per-effect audit log that is enough
//! to replay or explain the run.

use serde::Serialize;

use crate::core::{GameState, StateDigest, Target};

use super::{Effect, EffectKind, Rejection};

/// An effect that failed validation, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEffect {
    pub effect: Effect,
    pub reason: Rejection,
}

/// What happened to a logged effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum LogOutcome {
    Applied,
    Skipped(String),
}

/// One audit log line.
///
/// `sequence` is a logical clock: the position of the effect in the
/// flattened run. Wall-clock time is the host's concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub sequence: u32,
    pub kind: EffectKind,
    pub target: Option<Target>,
    pub source: String,
    /// How many composites enclose this effect.
    pub depth: usize,
    pub before: StateDigest,
    pub after: StateDigest,
    pub outcome: LogOutcome,
}

/// The full result of running an effect list.
#[derive(Clone, Debug)]
pub struct ExecutionReport {
    pub state: GameState,
    pub applied: Vec<Effect>,
    pub skipped: Vec<SkippedEffect>,
    pub narrative: Vec<String>,
    pub log: Vec<LogEntry>,
}

impl ExecutionReport {
    pub(crate) fn empty(state: GameState) -> Self {
        Self {
            state,
            applied: Vec::new(),
            skipped: Vec::new(),
            narrative: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Did every effect apply?
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Did anything at all apply?
    #[must_use]
    pub fn any_applied(&self) -> bool {
        !self.applied.is_empty()
    }

    /// Narration joined into one paragraph.
    #[must_use]
    pub fn narration(&self) -> String {
        self.narrative.join(" ")
    }

    /// Skip reasons as display strings, in order.
    #[must_use]
    pub fn skip_reasons(&self) -> Vec<String> {
        self.skipped.iter().map(|s| s.reason.to_string()).collect()
    }
}
