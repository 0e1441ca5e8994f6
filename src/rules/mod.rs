//! Rules layer: decisions, the kernel entry point, and sessions.
//!
//! The kernel never decides *what* happens. It takes a decision from the
//! generator, checks that it is permitted, and applies it:
//! - `Decision`: the two accepted decision shapes and their JSON decoding
//! - `Kernel`: resolve, budget-check, and execute one decision
//! - `Session`: a playthrough's state, seeded RNG, depth, and turn

mod decision;
mod kernel;
mod session;

pub use decision::Decision;
pub use kernel::{CompiledDecision, DecisionError, DecisionOutcome, Kernel, TurnError};
pub use session::{Session, SessionSnapshot};
