//! Effect system: the instruction set and the machinery that runs it.
//!
//! - `Effect`: the closed set of atomic state mutations
//! - `validate`: pure precondition check against state and limits
//! - `apply`: pure state transition, one handler per effect type
//! - `execute`: validate-then-apply over a list, producing a report
//!
//! ## Design Philosophy
//!
//! Effects come from an untrusted generator. Nothing reaches the state
//! without passing `validate`, and nothing that fails it stops the rest of
//! the list. The executor is the only code path that should be fed
//! effects from outside the kernel.

mod applier;
mod effect;
mod executor;
mod report;
mod summary;
mod validator;

pub use applier::{apply, tick_statuses};
pub use effect::{CombatResult, Effect, EffectKind};
pub use executor::{execute, execute_state, validate_effects, EffectPreview};
pub use report::{ExecutionReport, LogEntry, LogOutcome, SkippedEffect};
pub use summary::{summarize, summarize_all};
pub use validator::{validate, Rejection};
