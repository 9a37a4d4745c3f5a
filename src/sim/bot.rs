//! Bot steering
//!
//! No lookahead, no opponent modelling: bots wander, and once their trail
//! gets long they head for the middle of their land to seal it.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::Rng;

use super::agent::{Agent, BotPhase, Direction};
use super::grid::{Cell, Grid};
use crate::tuning::SimConfig;

/// Pick this tick's heading for `bot`
pub fn steer_bot<R: Rng>(bot: &mut Agent, grid: &Grid, config: &SimConfig, rng: &mut R) {
    bot.brain.timer += 1;

    let threshold = config.bot_timer_base + rng.random::<f32>() * config.bot_timer_jitter;
    if bot.brain.timer as f32 > threshold {
        bot.brain.timer = 0;
        replan(bot, grid, config, rng);
    }

    if let Some(dir) = edge_escape(bot.pos, config.world_size as f32, config.bot_edge_margin) {
        bot.heading = dir;
    }
}

fn replan<R: Rng>(bot: &mut Agent, grid: &Grid, config: &SimConfig, rng: &mut R) {
    let in_territory = grid.owns(bot.id, bot.cell());
    let trail = bot.trail.len();

    // Once homing, keep homing until the trail is committed
    let homing = bot.brain.phase == BotPhase::Return && trail > 0;
    if homing || trail > config.bot_return_trail || (in_territory && trail > config.bot_remnant_trail) {
        bot.brain.phase = BotPhase::Return;
        if let Some(center) = centroid(grid.territory(bot.id)) {
            bot.heading = toward(bot.pos, center);
        }
    } else {
        bot.brain.phase = BotPhase::Expand;
        if rng.random_bool(config.bot_turn_chance) {
            let turns = bot.heading.turns();
            bot.heading = turns[rng.random_range(0..turns.len())];
        }
    }
}

/// Inward heading when within `margin` of an edge. Later checks win.
pub fn edge_escape(pos: Vec2, world: f32, margin: f32) -> Option<Direction> {
    let mut dir = None;
    if pos.x < margin {
        dir = Some(Direction::Right);
    }
    if pos.x > world - margin {
        dir = Some(Direction::Left);
    }
    if pos.y < margin {
        dir = Some(Direction::Down);
    }
    if pos.y > world - margin {
        dir = Some(Direction::Up);
    }
    dir
}

/// Mean coordinate of the owned cells
pub fn centroid(territory: &BTreeSet<Cell>) -> Option<Vec2> {
    if territory.is_empty() {
        return None;
    }
    let sum = territory
        .iter()
        .fold(Vec2::ZERO, |acc, c| acc + Vec2::new(c.x as f32, c.y as f32));
    Some(sum / territory.len() as f32)
}

/// Axis heading that most reduces the distance to `target` (ties go vertical)
pub fn toward(from: Vec2, target: Vec2) -> Direction {
    let d = target - from;
    if d.x.abs() > d.y.abs() {
        if d.x > 0.0 { Direction::Right } else { Direction::Left }
    } else if d.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::agent::{AgentKind, Palette};
    use crate::sim::grid::AgentId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn bot_at(x: i32, y: i32) -> (Agent, Grid) {
        let id = AgentId(0);
        let mut grid = Grid::new(200, 1);
        grid.stamp_square(Cell::new(x, y), 3, id);
        (Agent::new(id, "bot", Palette::RED, AgentKind::Bot, Cell::new(x, y)), grid)
    }

    #[test]
    fn test_edge_escape_turns_inward() {
        assert_eq!(edge_escape(Vec2::new(2.0, 100.0), 200.0, 5.0), Some(Direction::Right));
        assert_eq!(edge_escape(Vec2::new(198.0, 100.0), 200.0, 5.0), Some(Direction::Left));
        assert_eq!(edge_escape(Vec2::new(100.0, 4.9), 200.0, 5.0), Some(Direction::Down));
        assert_eq!(edge_escape(Vec2::new(100.0, 196.0), 200.0, 5.0), Some(Direction::Up));
        assert_eq!(edge_escape(Vec2::new(100.0, 100.0), 200.0, 5.0), None);
        // Corner: the y check runs last
        assert_eq!(edge_escape(Vec2::new(1.0, 1.0), 200.0, 5.0), Some(Direction::Down));
    }

    #[test]
    fn test_centroid_of_block() {
        let (_, grid) = bot_at(50, 60);
        let c = centroid(grid.territory(AgentId(0))).expect("non-empty");
        assert!((c - Vec2::new(50.0, 60.0)).length() < 1e-4);
        assert_eq!(centroid(&BTreeSet::new()), None);
    }

    #[test]
    fn test_toward_prefers_dominant_axis() {
        let from = Vec2::new(10.0, 10.0);
        assert_eq!(toward(from, Vec2::new(20.0, 12.0)), Direction::Right);
        assert_eq!(toward(from, Vec2::new(9.0, 2.0)), Direction::Up);
        assert_eq!(toward(from, Vec2::new(14.0, 14.0)), Direction::Down);
    }

    #[test]
    fn test_long_trail_heads_home() {
        let (mut bot, grid) = bot_at(50, 50);
        let config = SimConfig::default();
        bot.pos = Vec2::new(50.5, 80.5);
        bot.heading = Direction::Down;
        bot.trail = (54..=80).map(|y| Cell::new(50, y)).collect();
        bot.trail.extend((51..=55).map(|x| Cell::new(x, 80)));
        bot.brain.timer = 1000;

        let mut rng = Pcg32::seed_from_u64(7);
        steer_bot(&mut bot, &grid, &config, &mut rng);

        assert_eq!(bot.heading, Direction::Up);
        assert_eq!(bot.brain.phase, BotPhase::Return);
        assert_eq!(bot.brain.timer, 0);
    }

    #[test]
    fn test_return_phase_keeps_homing_on_short_trail() {
        let (mut bot, grid) = bot_at(50, 50);
        let config = SimConfig {
            bot_turn_chance: 1.0,
            ..SimConfig::default()
        };
        bot.pos = Vec2::new(60.5, 50.5);
        bot.heading = Direction::Down;
        bot.trail = (54..=60).map(|x| Cell::new(x, 50)).collect();
        bot.brain.phase = BotPhase::Return;
        bot.brain.timer = 1000;

        let mut rng = Pcg32::seed_from_u64(3);
        steer_bot(&mut bot, &grid, &config, &mut rng);

        assert_eq!(bot.heading, Direction::Left);
        assert_eq!(bot.brain.phase, BotPhase::Return);

        // Trail committed: back to roaming
        bot.trail.clear();
        bot.brain.timer = 1000;
        steer_bot(&mut bot, &grid, &config, &mut rng);
        assert_eq!(bot.brain.phase, BotPhase::Expand);
    }

    #[test]
    fn test_roaming_never_reverses() {
        let config = SimConfig {
            bot_turn_chance: 1.0,
            ..SimConfig::default()
        };
        let mut rng = Pcg32::seed_from_u64(42);
        for start in Direction::ALL {
            for _ in 0..50 {
                let (mut bot, grid) = bot_at(100, 100);
                bot.heading = start;
                bot.brain.timer = 1000;
                steer_bot(&mut bot, &grid, &config, &mut rng);
                assert_ne!(bot.heading, start.reverse());
                assert_eq!(bot.brain.phase, BotPhase::Expand);
            }
        }
    }

    #[test]
    fn test_timer_counts_up_between_replans() {
        let (mut bot, grid) = bot_at(100, 100);
        let config = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..10 {
            steer_bot(&mut bot, &grid, &config, &mut rng);
        }
        // Threshold is at least 20, so no re-plan yet
        assert_eq!(bot.brain.timer, 10);
        assert_eq!(bot.heading, Direction::Right);
    }
}
