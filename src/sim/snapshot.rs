//! Read-only view of the simulation for renderers and HUDs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::{Direction, Palette};
use super::grid::{AgentId, Cell};
use super::state::GameState;

/// One living agent as seen from outside
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub name: String,
    pub palette: Palette,
    pub is_player: bool,
    pub pos: Vec2,
    pub heading: Direction,
    pub trail: Vec<Cell>,
    /// Owned cells in (x, y) order
    pub territory: Vec<Cell>,
    pub kills: u32,
}

/// Leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    pub id: AgentId,
    pub name: String,
    pub main_color: u32,
    pub territory_cells: usize,
    /// Share of the whole world, 0-100
    pub percent: f32,
    pub kills: u32,
    pub is_player: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub world_size: i32,
    pub match_over: bool,
    /// Living agents in creation order
    pub agents: Vec<AgentView>,
    /// Living agents by territory, largest first
    pub standings: Vec<Standing>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let total = state.config.total_cells().max(1) as f32;
        let living = state.agents.iter().filter(|a| a.alive);

        let agents: Vec<AgentView> = living
            .clone()
            .map(|a| AgentView {
                id: a.id,
                name: a.name.clone(),
                palette: a.palette,
                is_player: a.is_player(),
                pos: a.pos,
                heading: a.heading,
                trail: a.trail.clone(),
                territory: state.grid.territory(a.id).iter().copied().collect(),
                kills: a.kills,
            })
            .collect();

        let standings = rank(
            living
                .map(|a| {
                    let cells = state.grid.territory_len(a.id);
                    Standing {
                        id: a.id,
                        name: a.name.clone(),
                        main_color: a.palette.main,
                        territory_cells: cells,
                        percent: cells as f32 / total * 100.0,
                        kills: a.kills,
                        is_player: a.is_player(),
                    }
                })
                .collect(),
        );

        Self {
            tick: state.time_ticks,
            world_size: state.config.world_size,
            match_over: state.is_match_over(),
            agents,
            standings,
        }
    }

    pub fn player(&self) -> Option<&AgentView> {
        self.agents.iter().find(|a| a.is_player)
    }

    /// 1-based leaderboard position of the player
    pub fn player_rank(&self) -> Option<usize> {
        self.standings.iter().position(|s| s.is_player).map(|i| i + 1)
    }
}

/// Sort by territory, largest first. Stable, so ties keep creation order.
pub fn rank(mut standings: Vec<Standing>) -> Vec<Standing> {
    standings.sort_by(|a, b| b.territory_cells.cmp(&a.territory_cells));
    standings
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
