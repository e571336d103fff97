mod game;
mod particles;
mod render;

use clap::Parser;
use log::{error, info, warn};
use macroquad::prelude::Conf;
use siege_duel::config::MatchConfig;
use siege_duel::logging;
use siege_duel::{ConfigError, Duel, MatchEngine, Player, TurnOutcome};
use std::process;

/// One scripted shot for headless play.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Shot {
    angle: f64,
    speed: f64,
}

fn parse_shot(s: &str) -> Result<Shot, ConfigError> {
    let invalid = || ConfigError::InvalidShot(s.to_string());
    let (angle, speed) = s.split_once(',').ok_or_else(invalid)?;
    let angle: f64 = angle.trim().parse().map_err(|_| invalid())?;
    let speed: f64 = speed.trim().parse().map_err(|_| invalid())?;
    if !angle.is_finite() || !speed.is_finite() {
        return Err(invalid());
    }
    Ok(Shot { angle, speed })
}

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Debug filter to specify log topics (e.g., "flight,collision")
    /// Available topics: flight, collision, turn
    #[arg(long)]
    debug_filter: Option<String>,

    /// Downward acceleration in units/s²
    #[arg(long)]
    gravity: Option<f64>,

    /// Fraction of speed kept on floor and bunker bounces (0..=1)
    #[arg(long)]
    restitution: Option<f64>,

    /// Damage per unit of mass and impact speed
    #[arg(long)]
    damage_factor: Option<f64>,

    /// Wall bounces before a shell is spent
    #[arg(long)]
    max_bounces: Option<u32>,

    /// Play without a window: fire these shots in turn order (e.g. --shot 45,150)
    #[arg(long = "shot", value_name = "ANGLE,SPEED", value_parser = parse_shot)]
    shots: Vec<Shot>,
}

fn build_config(args: &Args) -> Result<MatchConfig, ConfigError> {
    let mut config = MatchConfig::default();
    if let Some(gravity) = args.gravity {
        config.gravity = gravity;
    }
    if let Some(restitution) = args.restitution {
        config.restitution = restitution;
    }
    if let Some(damage_factor) = args.damage_factor {
        config.damage_factor = damage_factor;
    }
    if let Some(max_bounces) = args.max_bounces {
        config.max_bounces = max_bounces;
    }
    config.validate()?;
    Ok(config)
}

fn window_conf() -> Conf {
    let (width, height) = render::Renderer::window_size();
    Conf {
        window_title: "Siege Duel".to_owned(),
        window_width: width,
        window_height: height,
        window_resizable: false,
        ..Default::default()
    }
}

fn log_standing(engine: &MatchEngine) {
    for player in [Player::One, Player::Two] {
        let resistances: Vec<String> = engine
            .obstacles(player)
            .iter()
            .map(|o| format!("{:.1}", o.resistance()))
            .collect();
        info!("{} bunkers: [{}]", player, resistances.join(", "));
    }
}

/// Plays the scripted shots to completion and returns the winner, if any.
fn run_headless(config: MatchConfig, shots: &[Shot]) -> Option<Player> {
    let mut duel = Duel::new(MatchEngine::standard(config));

    for (turn, shot) in shots.iter().enumerate() {
        let shooter = duel.engine().current_player();
        info!(
            "Turn {}: {} fires at {:.1} deg, speed {:.1}",
            turn + 1,
            shooter,
            shot.angle,
            shot.speed
        );
        if !duel.fire(shot.angle, shot.speed) {
            warn!("Shot {} was refused", turn + 1);
            continue;
        }
        match duel.resolve_shot() {
            Some(TurnOutcome::Victory(winner)) => {
                log_standing(duel.engine());
                if turn + 1 < shots.len() {
                    info!("Ignoring {} remaining shot(s)", shots.len() - turn - 1);
                }
                return Some(winner);
            }
            Some(TurnOutcome::NextTurn(next)) => info!("Shot settled; {} is up", next),
            None => {}
        }
    }

    log_standing(duel.engine());
    info!("No winner after {} shot(s)", shots.len());
    None
}

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // Setup logger with debug filters if provided
    let log_level = logging::parse_level(&args.log_level);
    if let Err(e) = logging::init_logger(log_level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    if let Some(filter) = args.debug_filter.as_deref() {
        let unknown = logging::unknown_topics(filter);
        if !unknown.is_empty() {
            warn!(
                "Ignoring unknown debug topic(s) {}; known topics: {}",
                unknown.join(", "),
                logging::TOPICS.join(", ")
            );
        }
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid match configuration: {}", e);
            process::exit(2);
        }
    };

    if !args.shots.is_empty() {
        info!("Running {} scripted shot(s) headless", args.shots.len());
        run_headless(config, &args.shots);
        return;
    }

    info!("Initializing Siege Duel...");
    macroquad::Window::from_config(window_conf(), async move {
        let mut game = game::Game::new(config);
        let mut renderer = render::Renderer::new();
        info!("Renderer initialized.");
        game.run(&mut renderer).await;
    });
}
