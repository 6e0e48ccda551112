//! # Dungeon Heroes Main Entry Point
//!
//! Parses arguments, sets up logging and runs the frame loop: read input,
//! step the simulation once, draw the snapshot.

use clap::Parser;
use dungeon_heroes::{
    DungeonError, DungeonResult, DungeonTemplate, GameConfig, GameState, InputHandler,
    MacroquadDisplay, MenuCommand, Phase, SaveService,
};
use macroquad::prelude::*;
use std::path::PathBuf;
#[cfg(not(feature = "dev-tools"))]
use log::{error, info, warn};
#[cfg(feature = "dev-tools")]
use tracing::{error, info, warn};

/// Slot used by the quick save and quick load keys.
const QUICK_SAVE_SLOT: &str = "quicksave";

/// Command line arguments for Dungeon Heroes.
#[derive(Parser, Debug)]
#[command(name = "dungeon-heroes")]
#[command(about = "A side-scrolling dungeon crawler with three hero classes")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dungeon layout: cross, square, demo or full
    #[arg(short, long)]
    template: Option<DungeonTemplate>,

    /// Skip hero select and start as knight, cleric or archer
    #[arg(long)]
    hero: Option<String>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for save files
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Enable development mode with debug logging
    #[arg(long)]
    dev_mode: bool,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Dungeon Heroes".to_owned(),
        window_width: 1024,
        window_height: 576,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() -> DungeonResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level, args.dev_mode)?;
    info!("Starting Dungeon Heroes v{}", dungeon_heroes::VERSION);

    let config = build_config(&args)?;
    run_game(config, args.hero.as_deref()).await
}

/// Initializes the logging system based on the specified log level.
///
/// `RUST_LOG` overrides the level when set.
fn initialize_logging(log_level: &str, dev_mode: bool) -> DungeonResult<()> {
    let level = if dev_mode { "debug" } else { log_level };
    level
        .parse::<log::LevelFilter>()
        .map_err(|_| DungeonError::Configuration(format!("Unknown log level '{}'", level)))?;

    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init()
            .map_err(|e| DungeonError::Configuration(format!("Logging setup failed: {}", e)))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
            .format_timestamp_millis()
            .try_init()
            .map_err(|e| DungeonError::Configuration(format!("Logging setup failed: {}", e)))?;
    }

    Ok(())
}

/// Settings file first, then command line overrides.
fn build_config(args: &Args) -> DungeonResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(template) = args.template {
        config.template = template;
    }
    if let Some(dir) = &args.save_dir {
        config.save_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

/// Runs the main frame loop.
async fn run_game(config: GameConfig, hero: Option<&str>) -> DungeonResult<()> {
    info!(
        "Dungeon '{}' {}x{}, seed {}",
        config.template, config.grid_size.0, config.grid_size.1, config.seed
    );
    let saves = SaveService::new(config.save_dir.clone());
    let mut state = GameState::with_persistence(config, saves);
    let input = InputHandler::new();
    let mut display = MacroquadDisplay::new();

    display.add_message("Choose your hero: 1 Knight, 2 Cleric, 3 Archer");
    if let Some(tag) = hero {
        select_hero(&mut state, &mut display, tag);
    }

    loop {
        #[cfg(feature = "dev-tools")]
        let _frame = tracing::trace_span!("frame").entered();

        // Input
        let frame_input = input.poll();
        if let Some(command) = input.poll_menu() {
            if !handle_menu(command, &mut state, &mut display) {
                break;
            }
        }

        // Simulation
        let events = state.step(get_frame_time(), &frame_input);
        display.push_events(&events);

        // Presentation
        display.render(&state.snapshot())?;

        next_frame().await;
    }

    info!("Game loop ended");
    Ok(())
}

fn select_hero(state: &mut GameState, display: &mut MacroquadDisplay, tag: &str) {
    match state.select_hero(tag) {
        Ok(events) => display.push_events(&events),
        Err(e) => {
            error!("Could not start a run: {}", e);
            display.add_message(format!("Could not start: {}", e));
        }
    }
}

/// Applies a menu command. Returns false when the game should exit.
fn handle_menu(command: MenuCommand, state: &mut GameState, display: &mut MacroquadDisplay) -> bool {
    match command {
        MenuCommand::SelectHero(tag) => {
            if state.phase() == Phase::HeroSelect {
                select_hero(state, display, tag);
            }
        }
        MenuCommand::Save => match state.save(QUICK_SAVE_SLOT) {
            Ok(_) => display.add_message("Game saved"),
            Err(e) => {
                warn!("Save failed: {}", e);
                display.add_message(format!("Save failed: {}", e));
            }
        },
        MenuCommand::Load => match state.load(QUICK_SAVE_SLOT) {
            Ok(()) => display.add_message("Game loaded"),
            Err(e) => display.add_message(format!("Load failed: {}", e)),
        },
        MenuCommand::Restart => {
            if state.phase() != Phase::HeroSelect {
                state.reset();
                display.messages.clear();
                display.add_message("Choose your hero: 1 Knight, 2 Cleric, 3 Archer");
            }
        }
        MenuCommand::Quit => {
            info!("Player quit the game");
            return false;
        }
    }
    true
}
