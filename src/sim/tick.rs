//! Fixed-step simulation tick
//!
//! Order within a tick is fixed:
//! 1. apply the player's queued heading
//! 2. move the player and resolve its trail/territory
//! 3. existing bot trails under the player's new cell kill the player
//! 4. steer, move and resolve each bot in roster order
//! 5. bots standing on the player's trail die (credited to the player)
//! 6. dead bots may respawn
//!
//! A player death in stage 2 or 3 ends the tick right there; bots do not move.

use glam::Vec2;
use rand::Rng;

use super::bot::steer_bot;
use super::fill::{Capture, fill_territory};
use super::grid::{AgentId, Cell};
use super::state::{DeathCause, GameEvent, GamePhase, GameState, PLAYER};

/// Result of moving an agent into its current cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStep {
    /// Inside own territory with nothing to commit
    Home,
    /// Back home; the trail was committed
    Captured(Capture),
    /// Outside, trail grew by one cell
    Trailing,
    /// Outside, still in the cell last added to the trail
    Lingering,
    /// Outside, on a cell already in the trail
    SelfCollision,
}

/// Advance the game state by one fixed step
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.events.clear();
    state.time_ticks += 1;

    // Player
    let inset = state.config.player_edge_inset;
    let max = state.config.world_size as f32 - inset;
    let speed = state.config.player_speed;
    let player = state.player_mut();
    player.heading = player.pending_heading;
    player.advance(speed);
    player.pos = player.pos.clamp(Vec2::splat(inset), Vec2::splat(max));

    if resolve_cell(state, PLAYER) == CellStep::SelfCollision {
        state.kill(PLAYER, None, DeathCause::OwnTrail);
        return;
    }

    let player_cell = state.player().cell();
    if let Some(owner) = trail_owner_at(state, player_cell, PLAYER) {
        state.kill(PLAYER, None, DeathCause::CrossedTrail { owner });
        return;
    }

    // Bots
    for i in 1..state.agents.len() {
        if !state.agents[i].alive {
            continue;
        }
        let id = state.agents[i].id;
        steer_bot(&mut state.agents[i], &state.grid, &state.config, &mut state.rng);
        state.agents[i].advance(state.config.bot_speed);

        if resolve_cell(state, id) == CellStep::SelfCollision {
            state.kill(id, None, DeathCause::OwnTrail);
            continue;
        }

        // Crossing another bot's trail is fatal for the crosser, nobody is credited
        let cell = state.agents[i].cell();
        if let Some(owner) = trail_owner_at(state, cell, id) {
            state.kill(id, None, DeathCause::CrossedTrail { owner });
        }
    }

    // Bots caught on the player's trail
    if !state.player().trail.is_empty() {
        let caught: Vec<AgentId> = state.agents[1..]
            .iter()
            .filter(|b| b.alive && state.player().trail_contains(b.cell()))
            .map(|b| b.id)
            .collect();
        for victim in caught {
            state.kill(victim, Some(PLAYER), DeathCause::CrossedTrail { owner: PLAYER });
        }
    }

    // Respawns
    let respawn_chance = state.config.respawn_chance;
    for i in 1..state.agents.len() {
        if !state.agents[i].alive && state.rng.random_bool(respawn_chance) {
            let id = state.agents[i].id;
            state.try_respawn(id);
        }
    }
}

/// Apply the trail/territory state machine to the agent's current cell
pub fn resolve_cell(state: &mut GameState, id: AgentId) -> CellStep {
    let agent = &mut state.agents[id.index()];
    let cell = agent.cell();

    if state.grid.owns(id, cell) {
        if agent.trail.is_empty() {
            return CellStep::Home;
        }
        let capture = fill_territory(&mut state.grid, id, &mut agent.trail);
        if capture.gained > 0 {
            state.events.push(GameEvent::TerritoryCaptured {
                agent: id,
                gained: capture.gained,
            });
            log::debug!("{} captured {} cells", agent.name, capture.gained);
        }
        return CellStep::Captured(capture);
    }

    if agent.trail.last() == Some(&cell) {
        CellStep::Lingering
    } else if agent.trail_contains(cell) {
        CellStep::SelfCollision
    } else {
        agent.trail.push(cell);
        CellStep::Trailing
    }
}

/// First living bot (other than `exclude`) whose trail covers `cell`
fn trail_owner_at(state: &GameState, cell: Cell, exclude: AgentId) -> Option<AgentId> {
    state.agents[1..]
        .iter()
        .find(|b| b.id != exclude && b.alive && !b.trail.is_empty() && b.trail_contains(cell))
        .map(|b| b.id)
}
