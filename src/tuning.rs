//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`SimConfig`], defaulting to
//! the values in [`crate::consts`]. Configs can be loaded from JSON; missing
//! fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Palette;

/// A roster entry: who starts where, in which colours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub palette: Palette,
    /// Spawn cell (x, y)
    pub start: (i32, i32),
}

impl AgentSpec {
    pub fn new(name: &str, palette: Palette, x: i32, y: i32) -> Self {
        Self {
            name: name.to_string(),
            palette,
            start: (x, y),
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world_size: i32,
    pub player_speed: f32,
    pub bot_speed: f32,
    pub start_territory_radius: i32,
    pub player_edge_inset: f32,
    pub bot_edge_margin: f32,

    // === Bot behaviour ===
    pub bot_timer_base: f32,
    pub bot_timer_jitter: f32,
    pub bot_return_trail: usize,
    pub bot_remnant_trail: usize,
    pub bot_turn_chance: f64,

    // === Respawn ===
    pub respawn_chance: f64,
    pub respawn_attempts: u32,
    pub respawn_clear_radius: i32,
    pub respawn_edge_pad: i32,

    /// First entry is the human player, the rest are bots
    pub roster: Vec<AgentSpec>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_size: WORLD_SIZE,
            player_speed: PLAYER_SPEED,
            bot_speed: BOT_SPEED,
            start_territory_radius: START_TERRITORY_RADIUS,
            player_edge_inset: PLAYER_EDGE_INSET,
            bot_edge_margin: BOT_EDGE_MARGIN,

            bot_timer_base: BOT_TIMER_BASE,
            bot_timer_jitter: BOT_TIMER_JITTER,
            bot_return_trail: BOT_RETURN_TRAIL,
            bot_remnant_trail: BOT_REMNANT_TRAIL,
            bot_turn_chance: BOT_TURN_CHANCE,

            respawn_chance: RESPAWN_CHANCE,
            respawn_attempts: RESPAWN_ATTEMPTS,
            respawn_clear_radius: RESPAWN_CLEAR_RADIUS,
            respawn_edge_pad: RESPAWN_EDGE_PAD,

            roster: default_roster(WORLD_SIZE),
        }
    }
}

/// The classic six-agent lineup, placed relative to the world size
pub fn default_roster(world: i32) -> Vec<AgentSpec> {
    // 30 cells in from the edge on the reference 200 world
    let near = world * 3 / 20;
    let half = world / 2;
    let far = world - near;
    vec![
        AgentSpec::new("You", Palette::PLAYER, near, half),
        AgentSpec::new("RedKing", Palette::RED, far, near),
        AgentSpec::new("GreenMachine", Palette::GREEN, far, far),
        AgentSpec::new("PurpleRain", Palette::PURPLE, near, far),
        AgentSpec::new("GoldRush", Palette::GOLD, half, near),
        AgentSpec::new("PinkPanther", Palette::PINK, half, far),
    ]
}

impl SimConfig {
    /// Parse a config from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Small world for tests and demos: the player plus `bots` default bots
    /// squeezed into a `world` x `world` grid.
    pub fn small(world: i32, bots: usize) -> Self {
        let mut roster = default_roster(world);
        roster.truncate(bots + 1);
        Self {
            world_size: world,
            roster,
            ..Self::default()
        }
    }

    pub fn total_cells(&self) -> usize {
        (self.world_size as usize) * (self.world_size as usize)
    }

    /// Check the config describes a playable world.
    ///
    /// Speeds must stay below one cell per tick so trails never skip cells.
    pub fn validate(&self) -> Result<(), String> {
        if self.world_size < 2 * self.respawn_edge_pad + 1 {
            return Err(format!(
                "world_size {} leaves no room for respawns (edge pad {})",
                self.world_size, self.respawn_edge_pad
            ));
        }
        for (label, speed) in [("player_speed", self.player_speed), ("bot_speed", self.bot_speed)] {
            if !(speed > 0.0 && speed < 1.0) {
                return Err(format!("{label} must be in (0, 1), got {speed}"));
            }
        }
        for (label, p) in [
            ("bot_turn_chance", self.bot_turn_chance),
            ("respawn_chance", self.respawn_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{label} must be a probability, got {p}"));
            }
        }
        if self.start_territory_radius < 0 || self.respawn_clear_radius < self.start_territory_radius {
            return Err(format!(
                "respawn_clear_radius {} must cover start_territory_radius {}",
                self.respawn_clear_radius, self.start_territory_radius
            ));
        }
        // Positions must floor to an on-world cell
        if !(self.player_edge_inset >= 0.5 && self.player_edge_inset * 2.0 < self.world_size as f32) {
            return Err(format!(
                "player_edge_inset must be in [0.5, {}), got {}",
                self.world_size as f32 / 2.0,
                self.player_edge_inset
            ));
        }
        if self.bot_edge_margin <= self.bot_speed {
            return Err(format!(
                "bot_edge_margin {} must exceed bot_speed {}",
                self.bot_edge_margin, self.bot_speed
            ));
        }
        if self.bot_edge_margin * 2.0 >= self.world_size as f32 {
            return Err(format!(
                "bot_edge_margin {} too large for world_size {}",
                self.bot_edge_margin, self.world_size
            ));
        }
        if self.roster.is_empty() {
            return Err("roster needs at least the player".to_string());
        }
        for spec in &self.roster {
            let (x, y) = spec.start;
            if x < 0 || y < 0 || x >= self.world_size || y >= self.world_size {
                return Err(format!("{} starts outside the world at ({x}, {y})", spec.name));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.roster.len(), 6);
        assert_eq!(config.roster[0].start, (30, 100));
        assert_eq!(config.roster[2].start, (170, 170));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "bot_speed": 0.05, "respawn_chance": 0.5 }"#)
            .expect("valid json");
        assert_eq!(config.bot_speed, 0.05);
        assert_eq!(config.respawn_chance, 0.5);
        assert_eq!(config.world_size, WORLD_SIZE);
        assert_eq!(config.roster.len(), 6);
    }

    #[test]
    fn test_json_roundtrip_preserves_roster() {
        let config = SimConfig::small(40, 2);
        let json = config.to_json().expect("serializable");
        let back = SimConfig::from_json(&json).expect("parseable");
        assert_eq!(back, config);
    }

    #[test]
    fn test_validate_rejects_fast_agents() {
        let config = SimConfig {
            player_speed: 1.5,
            ..SimConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("player_speed"));
    }

    #[test]
    fn test_validate_rejects_player_inset_off_grid() {
        let flush = SimConfig {
            player_edge_inset: 0.0,
            ..SimConfig::small(40, 0)
        };
        assert!(flush.validate().unwrap_err().contains("player_edge_inset"));

        let huge = SimConfig {
            player_edge_inset: 20.0,
            ..SimConfig::small(40, 0)
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bot_margin_below_step() {
        let config = SimConfig {
            bot_edge_margin: 0.05,
            ..SimConfig::default()
        };
        assert!(config.validate().unwrap_err().contains("bot_edge_margin"));
    }

    #[test]
    fn test_validate_rejects_offworld_start() {
        let mut config = SimConfig::default();
        config.roster[1].start = (250, 10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_small_world_scales_roster_inside_bounds() {
        let config = SimConfig::small(40, 1);
        assert_eq!(config.roster.len(), 2);
        assert!(config.validate().is_ok());
    }
}
