//! Pieces: named, costed bundles of effects.
//!
//! A decision layer that picks pieces instead of writing raw effects only
//! chooses *which* things happen. Numbers come from the catalogue, total
//! power comes from the budget, and scaling comes from the power level.
//!
//! ## Key Types
//!
//! - `Piece`: Immutable catalogue entry (id, cost, tags, effects)
//! - `PieceRegistry`: Lookup and filtering over pieces
//! - `resolve`: Ids to a flat effect list, all-or-nothing
//! - `budget_for`: How much a context may spend at a given depth

mod budget;
mod catalogue;
mod definition;
mod registry;
mod resolver;

pub use budget::{budget_for, BudgetContext, BudgetRule};
pub use definition::{Piece, PieceCategory, Rarity};
pub use registry::{PieceQuery, PieceRegistry};
pub use resolver::{resolve, scale_effect, PowerLevel, Resolution, ResolutionError};
