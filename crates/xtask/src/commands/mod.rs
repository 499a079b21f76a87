//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod inspect_map;
mod path;
mod zone;

pub use inspect_map::InspectMap;
pub use path::Path;
pub use zone::Zone;
