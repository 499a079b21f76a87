//! Movement profiles and step pricing.
//!
//! [`MovementCostEvaluator`] is the only place that turns a step into feet; the
//! pathfinder, zone flood fill, and path re-pricing all go through it.
mod cost;
mod profile;

pub use cost::{DiagonalParity, MovementCostEvaluator, StepKind};
pub use profile::{MovementMode, MovementProfile};
