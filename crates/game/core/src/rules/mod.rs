//! Rules resolution: checks, conditions, grapples, aid, and reactions.
//!
//! Services never publish events. Mutators append [`ConditionDelta`] records
//! to a caller-owned buffer and return result structs; the caller decides what
//! to publish and when.
mod aid;
mod check;
mod conditions;
mod grapple;
mod reaction;

pub use aid::{AidOutcome, AidService, PreparedAid};
pub use check::{
    CheckResult, CheckSource, DegreeOfSuccess, OpposedOutcome, OpposedResult, OpposedRoll,
    resolve_degree, roll_check, roll_opposed_check, roll_perception, roll_save, roll_skill_check,
};
pub use conditions::{ConditionChange, ConditionDelta, ConditionRules, ConditionService};
pub use grapple::{GrappleRelation, GrappleService, HoldState};
pub use reaction::{ReactionKind, ReactionOption, ReactionService, ReactionTrigger};
