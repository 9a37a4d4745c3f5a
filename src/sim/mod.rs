//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only
//! - Stable iteration order (roster order, ordered cell sets)
//! - No rendering or platform dependencies

pub mod agent;
pub mod bot;
pub mod fill;
pub mod grid;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use agent::{Agent, AgentKind, BotBrain, BotPhase, Direction, Palette};
pub use fill::{Capture, fill_territory};
pub use grid::{AgentId, Cell, Grid};
pub use snapshot::{AgentView, Snapshot, Standing};
pub use state::{DeathCause, GameEvent, GamePhase, GameState, MatchEnd, PLAYER};
pub use tick::{CellStep, tick};
