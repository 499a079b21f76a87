//! Deterministic rules and spatial reasoning for squad-based tactical combat.
//!
//! `tactics-core` covers the grid (cells, edges, vertical links), movement
//! pricing, parity-aware pathfinding and movement zones, and the d20 rules
//! pipeline (checks, strikes, damage, conditions, grapples, aid, reactions).
//! Every operation is synchronous and free of I/O; randomness and occupancy
//! are injected through [`env`], and rule services hand delta records back to
//! the caller instead of publishing events.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod grid;
pub mod movement;
pub mod pathfinding;
pub mod rules;
pub mod state;

pub use combat::{
    DamageApplied, DamageRoll, ShieldBlockOutcome, StrikeFailure, StrikeResolver, StrikeResult,
    apply_damage, armor_class, perform_strike, shield_block,
};
pub use config::{GameConfig, GridConfig, RuleConstants};
pub use env::{DiceRoller, NoOccupancy, OccupancyOracle, PcgDice, ScriptedDice};
pub use error::{ErrorSeverity, GameError};
pub use grid::{Cell, CellCoord, CellFlags, Edge, EdgeKind, GridStore, TerrainKind, VerticalLink};
pub use movement::{DiagonalParity, MovementCostEvaluator, MovementMode, MovementProfile, StepKind};
pub use pathfinding::{MovementZone, Path, Pathfinder};
pub use rules::{
    AidService, CheckResult, CheckSource, ConditionDelta, ConditionRules, ConditionService,
    DegreeOfSuccess, GrappleService, HoldState, ReactionService, ReactionTrigger, resolve_degree,
};
pub use state::{
    ActionEconomy, Combatant, ConditionKind, EntityId, OccupancyMap, ResourceMeter, Roster, Team,
};
