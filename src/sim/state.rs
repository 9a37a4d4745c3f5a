//! Game state and match lifecycle
//!
//! Owns the grid, the roster and the seeded RNG. Everything that changes
//! ownership or liveness (kills, respawns, resets) goes through here so the
//! grid and the agents never drift apart.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, AgentKind, Direction};
use super::grid::{AgentId, Cell, Grid};
use crate::tuning::SimConfig;

/// The human player is always the first roster entry
pub const PLAYER: AgentId = AgentId(0);

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Player died or the match was abandoned; ticks are ignored
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Walked back onto its own trail
    OwnTrail,
    /// Stepped onto another agent's live trail
    CrossedTrail { owner: AgentId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEnd {
    PlayerKilled,
    Abandoned,
}

/// Things that happened during the last tick, for sound/flash hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    TerritoryCaptured { agent: AgentId, gained: usize },
    AgentKilled {
        victim: AgentId,
        killer: Option<AgentId>,
        cause: DeathCause,
    },
    BotRespawned { agent: AgentId, at: Cell },
    MatchOver { reason: MatchEnd },
}

/// Complete simulation state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Roster in creation order; index == `AgentId`
    pub agents: Vec<Agent>,
    pub grid: Grid,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
}

impl GameState {
    /// New match with the default roster and tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SimConfig::default())
    }

    /// New match with custom tuning. Invalid configs fall back to defaults.
    pub fn with_config(seed: u64, config: SimConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(reason) => {
                log::warn!("Rejected sim config ({reason}), using defaults");
                SimConfig::default()
            }
        };
        let mut state = Self {
            grid: Grid::new(config.world_size, config.roster.len()),
            config,
            seed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            agents: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.populate();
        state
    }

    /// Put every agent back on its starting block
    fn populate(&mut self) {
        self.grid = Grid::new(self.config.world_size, self.config.roster.len());
        self.agents = self
            .config
            .roster
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let kind = if i == 0 { AgentKind::Player } else { AgentKind::Bot };
                let start = Cell::new(spec.start.0, spec.start.1);
                Agent::new(AgentId(i as u32), &spec.name, spec.palette, kind, start)
            })
            .collect();

        for i in 0..self.agents.len() {
            let (id, start) = (self.agents[i].id, self.agents[i].cell());
            self.grid.stamp_square(start, self.config.start_territory_radius, id);
        }

        log::info!(
            "Match started: {} agents on a {}x{} world (seed {})",
            self.agents.len(),
            self.config.world_size,
            self.config.world_size,
            self.seed
        );
    }

    /// Re-initialize world and agents to their starting state
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.events.clear();
        self.populate();
    }

    /// Stop the match without a death
    pub fn abandon(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::MatchOver {
                reason: MatchEnd::Abandoned,
            });
            log::info!("Match abandoned at tick {}", self.time_ticks);
        }
    }

    pub fn is_match_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn player(&self) -> &Agent {
        &self.agents[PLAYER.index()]
    }

    pub fn player_mut(&mut self) -> &mut Agent {
        &mut self.agents[PLAYER.index()]
    }

    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    pub fn territory_len(&self, id: AgentId) -> usize {
        self.grid.territory_len(id)
    }

    /// Queue the player's next heading. U-turns against the current heading
    /// are ignored. Returns whether the heading was accepted.
    pub fn set_player_heading(&mut self, dir: Direction) -> bool {
        let player = self.player_mut();
        if dir.is_reverse_of(player.heading) {
            return false;
        }
        player.pending_heading = dir;
        true
    }

    /// Zero out `victim`: trail dropped, cells vacated, marked dead.
    /// Killing the player ends the match.
    pub fn kill(&mut self, victim: AgentId, killer: Option<AgentId>, cause: DeathCause) {
        if !self.agents[victim.index()].alive {
            return;
        }
        self.agents[victim.index()].mark_dead();
        let freed = self.grid.release(victim);
        if let Some(killer) = killer {
            self.agents[killer.index()].kills += 1;
        }
        self.events.push(GameEvent::AgentKilled {
            victim,
            killer,
            cause,
        });
        log::debug!(
            "{} died ({:?}), {} cells freed",
            self.agents[victim.index()].name,
            cause,
            freed
        );

        if victim == PLAYER {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::MatchOver {
                reason: MatchEnd::PlayerKilled,
            });
            log::info!(
                "Match over at tick {}: player killed ({:?})",
                self.time_ticks,
                cause
            );
        }
    }

    /// Look for an unclaimed spot and bring a dead bot back there.
    /// Returns false when every attempt hit claimed land.
    pub fn try_respawn(&mut self, id: AgentId) -> bool {
        let agent = &self.agents[id.index()];
        if agent.alive || !agent.is_bot() {
            return false;
        }

        let world = self.config.world_size;
        let pad = self.config.respawn_edge_pad;
        for _ in 0..self.config.respawn_attempts {
            let at = Cell::new(
                self.rng.random_range(pad..world - pad),
                self.rng.random_range(pad..world - pad),
            );
            if !self.grid.is_region_clear(at, self.config.respawn_clear_radius) {
                continue;
            }

            let heading = Direction::ALL[self.rng.random_range(0..Direction::ALL.len())];
            self.agents[id.index()].respawn_at(at, heading);
            self.grid.stamp_square(at, self.config.start_territory_radius, id);
            self.events.push(GameEvent::BotRespawned { agent: id, at });
            log::info!(
                "{} respawned at ({}, {}) heading {}",
                self.agents[id.index()].name,
                at.x,
                at.y,
                heading.as_str()
            );
            return true;
        }

        log::trace!("No clear respawn spot for {} this tick", self.agents[id.index()].name);
        false
    }
}
