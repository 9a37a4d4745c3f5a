//! Paper Territory - territory-capture arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid ownership, trails, fill, kills, bots)
//! - `tuning`: Data-driven game balance and starting roster
//! - `web`: wasm-bindgen handle for the browser front end

pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use sim::{Direction, GamePhase, GameState, Snapshot, tick};
pub use tuning::SimConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// World is WORLD_SIZE x WORLD_SIZE cells
    pub const WORLD_SIZE: i32 = 200;
    /// External tick cadence (the core itself never sleeps)
    pub const TICK_RATE_HZ: u32 = 60;

    /// Movement per tick, in cells
    pub const PLAYER_SPEED: f32 = 0.12;
    /// Bots are deliberately slower than the player
    pub const BOT_SPEED: f32 = 0.1;

    /// Starting territory is a (2r+1) x (2r+1) block around the spawn cell
    pub const START_TERRITORY_RADIUS: i32 = 3;
    /// Player position is clamped this far inside the world edge
    pub const PLAYER_EDGE_INSET: f32 = 0.5;
    /// Bots are turned back toward the interior inside this margin
    pub const BOT_EDGE_MARGIN: f32 = 5.0;

    /// Bot re-plans when its timer exceeds BASE + U[0,1) * JITTER
    pub const BOT_TIMER_BASE: f32 = 20.0;
    pub const BOT_TIMER_JITTER: f32 = 40.0;
    /// Trail length after which a bot heads home
    pub const BOT_RETURN_TRAIL: usize = 30;
    /// Trail remnant length that also sends a bot home while inside its land
    pub const BOT_REMNANT_TRAIL: usize = 5;
    /// Chance of a roaming turn per re-plan
    pub const BOT_TURN_CHANCE: f64 = 0.3;

    /// Per dead bot, per tick
    pub const RESPAWN_CHANCE: f64 = 0.01;
    pub const RESPAWN_ATTEMPTS: u32 = 100;
    /// Half-width of the window that must be unclaimed around a respawn
    pub const RESPAWN_CLEAR_RADIUS: i32 = 4;
    /// Respawn centres are drawn from [PAD, WORLD_SIZE - PAD)
    pub const RESPAWN_EDGE_PAD: i32 = 10;
}

/// Grid cell containing a continuous position
#[inline]
pub fn cell_of(pos: Vec2) -> sim::Cell {
    sim::Cell::new(pos.x.floor() as i32, pos.y.floor() as i32)
}

/// Centre point of a cell in world units
#[inline]
pub fn cell_center(cell: sim::Cell) -> Vec2 {
    Vec2::new(cell.x as f32 + 0.5, cell.y as f32 + 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_of_floors_subcell_positions() {
        assert_eq!(cell_of(Vec2::new(10.99, 3.01)), sim::Cell::new(10, 3));
        assert_eq!(cell_of(Vec2::new(0.5, 199.5)), sim::Cell::new(0, 199));
    }

    #[test]
    fn test_cell_center_roundtrips_through_cell_of() {
        let cell = sim::Cell::new(42, 7);
        assert_eq!(cell_of(cell_center(cell)), cell);
    }
}
