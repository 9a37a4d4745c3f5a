//! Paper Territory headless runner
//!
//! Plays a match with a scripted player that carves square loops, logging
//! standings as it goes. The browser build is driven from `web.rs` instead.
//!
//! Usage: `paper-territory [seed] [ticks] [config.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use paper_territory::consts::TICK_RATE_HZ;
    use paper_territory::sim::{Direction, GameEvent, GameState, tick};
    use paper_territory::tuning::SimConfig;

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args.first().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let ticks: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(60 * TICK_RATE_HZ as u64);
    let config = match args.get(2) {
        Some(path) => match std::fs::read_to_string(path).map(|json| SimConfig::from_json(&json)) {
            Ok(Ok(config)) => config,
            Ok(Err(e)) => {
                log::error!("Failed to parse {}: {}", path, e);
                std::process::exit(2);
            }
            Err(e) => {
                log::error!("Failed to read {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => SimConfig::default(),
    };

    log::info!("Paper Territory (native) starting with seed {}", seed);
    let mut state = GameState::with_config(seed, config);

    // Turn clockwise every ~5 cells: Right, Down, Left, Up, ...
    let leg = (5.0 / state.config.player_speed).ceil() as u64;
    let mut heading = Direction::Right;
    for step in 0..ticks {
        if step > 0 && step % leg == 0 {
            heading = match heading {
                Direction::Right => Direction::Down,
                Direction::Down => Direction::Left,
                Direction::Left => Direction::Up,
                Direction::Up => Direction::Right,
            };
            state.set_player_heading(heading);
        }

        tick(&mut state);

        for event in &state.events {
            if let GameEvent::AgentKilled { victim, killer, .. } = event {
                log::info!(
                    "tick {}: {} eliminated{}",
                    state.time_ticks,
                    state.agent(*victim).name,
                    killer
                        .map(|k| format!(" by {}", state.agent(k).name))
                        .unwrap_or_default()
                );
            }
        }

        if state.is_match_over() {
            break;
        }
        if state.time_ticks % (10 * TICK_RATE_HZ as u64) == 0 {
            let snap = state.snapshot();
            log::info!(
                "tick {}: player rank {:?} of {}",
                snap.tick,
                snap.player_rank(),
                snap.standings.len()
            );
        }
    }

    let snap = state.snapshot();
    println!(
        "Finished after {} ticks{}",
        snap.tick,
        if snap.match_over { " (match over)" } else { "" }
    );
    for (rank, s) in snap.standings.iter().enumerate() {
        println!(
            "#{:<2} {:<14} {:>6.2}%  {:>5} cells  {} kills{}",
            rank + 1,
            s.name,
            s.percent,
            s.territory_cells,
            s.kills,
            if s.is_player { "  <- you" } else { "" }
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::wasm_start`, this is just to satisfy the compiler
}
