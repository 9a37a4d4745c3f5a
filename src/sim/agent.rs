//! Agent state: the player and the bots
//!
//! Agents never hold their territory directly; it lives in the [`Grid`]
//! keyed by [`AgentId`].
//!
//! [`Grid`]: super::grid::Grid

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::{AgentId, Cell};
use crate::{cell_center, cell_of};

/// Axis-aligned heading. Screen convention: +y points down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit step in cells
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn vector(self) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32)
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }

    /// The three headings that are not a U-turn from `self`
    pub fn turns(self) -> [Direction; 3] {
        let mut out = [self; 3];
        let mut i = 0;
        for dir in Self::ALL {
            if !dir.is_reverse_of(self) {
                out[i] = dir;
                i += 1;
            }
        }
        out
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "arrowup" => Some(Direction::Up),
            "down" | "arrowdown" => Some(Direction::Down),
            "left" | "arrowleft" => Some(Direction::Left),
            "right" | "arrowright" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Colour triple as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub main: u32,
    pub light: u32,
    pub dark: u32,
}

impl Palette {
    pub const PLAYER: Palette = Palette::new(0x3b82f6, 0x60a5fa, 0x1d4ed8);
    pub const RED: Palette = Palette::new(0xef4444, 0xf87171, 0xb91c1c);
    pub const GREEN: Palette = Palette::new(0x22c55e, 0x4ade80, 0x15803d);
    pub const PURPLE: Palette = Palette::new(0xa855f7, 0xc084fc, 0x7c3aed);
    pub const GOLD: Palette = Palette::new(0xf59e0b, 0xfbbf24, 0xd97706);
    pub const PINK: Palette = Palette::new(0xec4899, 0xf472b6, 0xbe185d);

    pub const fn new(main: u32, light: u32, dark: u32) -> Self {
        Self { main, light, dark }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentKind {
    Player,
    Bot,
}

/// What a bot is currently trying to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BotPhase {
    /// Wandering outward, growing a trail
    #[default]
    Expand,
    /// Steering back toward the territory centroid to seal the loop;
    /// held until the trail is committed
    Return,
}

/// Bot-only behavioural state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BotBrain {
    /// Ticks since the last re-plan
    pub timer: u32,
    pub phase: BotPhase,
}

/// One competitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub palette: Palette,
    pub kind: AgentKind,
    /// Continuous position in cell units
    pub pos: Vec2,
    pub heading: Direction,
    /// Applied at the start of the next tick
    pub pending_heading: Direction,
    /// Cells walked since leaving own territory (distinct, in order)
    pub trail: Vec<Cell>,
    pub alive: bool,
    pub kills: u32,
    pub brain: BotBrain,
}

impl Agent {
    pub fn new(id: AgentId, name: &str, palette: Palette, kind: AgentKind, start: Cell) -> Self {
        Self {
            id,
            name: name.to_string(),
            palette,
            kind,
            pos: cell_center(start),
            heading: Direction::Right,
            pending_heading: Direction::Right,
            trail: Vec::new(),
            alive: true,
            kills: 0,
            brain: BotBrain::default(),
        }
    }

    pub fn is_bot(&self) -> bool {
        self.kind == AgentKind::Bot
    }

    pub fn is_player(&self) -> bool {
        self.kind == AgentKind::Player
    }

    /// Cell currently occupied
    pub fn cell(&self) -> Cell {
        cell_of(self.pos)
    }

    /// Move `speed` cells along the current heading
    pub fn advance(&mut self, speed: f32) {
        self.pos += self.heading.vector() * speed;
    }

    pub fn trail_contains(&self, cell: Cell) -> bool {
        self.trail.contains(&cell)
    }

    /// Re-enter play at `cell` with a clean slate (territory is stamped by the caller)
    pub fn respawn_at(&mut self, cell: Cell, heading: Direction) {
        self.pos = cell_center(cell);
        self.heading = heading;
        self.pending_heading = heading;
        self.trail.clear();
        self.alive = true;
        self.brain = BotBrain::default();
    }

    /// Zero the agent out; the caller releases its cells on the grid
    pub fn mark_dead(&mut self) {
        self.alive = false;
        self.trail.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_exclude_reversal() {
        for dir in Direction::ALL {
            let turns = dir.turns();
            assert!(!turns.contains(&dir.reverse()));
            assert!(turns.contains(&dir));
        }
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!(Direction::from_str("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_str("LEFT"), Some(Direction::Left));
        assert_eq!(Direction::from_str("sideways"), None);
        assert_eq!(Direction::from_str(Direction::Down.as_str()), Some(Direction::Down));
    }

    #[test]
    fn test_advance_moves_along_heading() {
        let mut agent = Agent::new(AgentId(0), "t", Palette::PLAYER, AgentKind::Player, Cell::new(5, 5));
        agent.heading = Direction::Up;
        agent.advance(0.5);
        assert!((agent.pos.y - 5.0).abs() < 1e-6);
        assert_eq!(agent.cell(), Cell::new(5, 5));
        agent.advance(0.25);
        assert_eq!(agent.cell(), Cell::new(5, 4));
    }

    #[test]
    fn test_respawn_resets_trail_and_brain() {
        let mut agent = Agent::new(AgentId(1), "b", Palette::RED, AgentKind::Bot, Cell::new(5, 5));
        agent.trail.push(Cell::new(6, 5));
        agent.brain.timer = 17;
        agent.mark_dead();
        assert!(!agent.alive);
        assert!(agent.trail.is_empty());

        agent.respawn_at(Cell::new(20, 20), Direction::Down);
        assert!(agent.alive);
        assert_eq!(agent.cell(), Cell::new(20, 20));
        assert_eq!(agent.heading, Direction::Down);
        assert_eq!(agent.brain, BotBrain::default());
    }
}
