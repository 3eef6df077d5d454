use std::io::BufRead;
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use crossbeam_channel::{Receiver, bounded};
use thiserror::Error;

use minicraft::utils::settings::{
    GameSettings, HotbarSettings, SettingsError, default_settings_path, load_or_default,
    save_settings,
};
use minicraft::{Outcome, Session, TerrainPreset, VoxelError, raycast};

use super::command::{Command, HELP, parse};

/// MiniCraft voxel sandbox, driven by line commands on stdin
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// World size along X
    #[arg(long)]
    width: Option<i32>,

    /// World size along Z
    #[arg(long)]
    depth: Option<i32>,

    /// Number of layers a column may reach
    #[arg(long)]
    max_stack: Option<i32>,

    /// Terrain preset: waves, flat or noise
    #[arg(long)]
    terrain: Option<TerrainPreset>,

    /// Seed for the noise preset
    #[arg(long)]
    seed: Option<u32>,

    /// Use the four-slot Grass/Dirt/Stone/Wood hotbar
    #[arg(long, default_value_t = false)]
    palette: bool,

    /// Generate around the origin instead of from (0, 0)
    #[arg(long, default_value_t = false)]
    centered: bool,

    /// Settings file (defaults to the platform config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long, default_value_t = false)]
    save_settings: bool,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Voxel(#[from] VoxelError),
    #[error("Failed to spawn input thread: {0}")]
    Thread(#[from] std::io::Error),
}

impl Args {
    fn apply(&self, settings: &mut GameSettings) {
        let world = &mut settings.world;
        if let Some(width) = self.width {
            world.extent_x = width;
        }
        if let Some(depth) = self.depth {
            world.extent_z = depth;
        }
        if let Some(max_stack) = self.max_stack {
            world.max_stack = max_stack;
        }
        if let Some(terrain) = self.terrain {
            world.terrain = terrain;
        }
        if let Some(seed) = self.seed {
            world.seed = seed;
        }
        if self.centered {
            world.centered = true;
        }
        if self.palette {
            settings.hotbar = HotbarSettings::palette();
        }
    }
}

/// Reads stdin on its own thread so the game loop only sees whole lines.
fn spawn_input_reader() -> Result<Receiver<String>, std::io::Error> {
    let (tx, rx) = bounded::<String>(64);
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;
    Ok(rx)
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Placed { pos, block } => format!("placed {} at {}", block, pos),
        Outcome::Broken { pos, block } => format!("broke {} at {}", block, pos),
        Outcome::Selected { index, block } => format!("slot {} -> {}", index, block),
        Outcome::FlightToggled(on) => format!("flying: {}", on),
        Outcome::MouseLockToggled(locked) => format!("mouse locked: {}", locked),
        Outcome::QuitRequested => "quit requested".to_string(),
        Outcome::Moved { dy } => format!("moved dy={:.3}", dy),
        Outcome::Nothing => "nothing".to_string(),
    }
}

fn execute(session: &mut Session, command: Command) -> bool {
    match command {
        Command::Event(event) => match session.handle(event) {
            Ok(outcome) => {
                println!("{}", describe(&outcome));
                if outcome == Outcome::QuitRequested {
                    return false;
                }
            }
            Err(e) => {
                tracing::warn!("Rejected {:?}: {}", event, e);
                println!("error: {}", e);
            }
        },
        Command::Look { origin, direction } => {
            let reach = session.settings().player.reach;
            let world = session.world().read();
            match raycast(&world, origin, direction, reach) {
                Some(hit) => {
                    let block = world.get(hit.block_pos).map(|b| b.name()).unwrap_or("air");
                    match hit.normal() {
                        Some(normal) => println!(
                            "{} at {} face {} ({:.2} away)",
                            block, hit.block_pos, normal, hit.distance
                        ),
                        None => println!("inside {} at {}", block, hit.block_pos),
                    }
                }
                None => println!("nothing in reach"),
            }
        }
        Command::Get(pos) => match session.world().read().get(pos) {
            Some(block) => println!("{} at {}", block, pos),
            None => println!("air at {}", pos),
        },
        Command::Top { x, z } => match session.world().read().column_top(x, z) {
            Some(y) => println!("top of ({}, {}) is y={}", x, z, y),
            None => println!("column ({}, {}) is empty", x, z),
        },
        Command::Count => println!("{} blocks", session.world().read().len()),
        Command::Hotbar => {
            let hotbar = session.hotbar();
            let names: Vec<String> = hotbar
                .slots()
                .iter()
                .enumerate()
                .map(|(i, block)| {
                    if i == hotbar.index() {
                        format!("[{}]", block)
                    } else {
                        block.to_string()
                    }
                })
                .collect();
            println!("{}", names.join(" "));
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return false,
    }
    true
}

pub fn run() -> Result<(), AppError> {
    let args = Args::parse();

    let settings_path = args.settings.clone().or_else(default_settings_path);
    let mut settings = match &settings_path {
        Some(path) => load_or_default(path),
        None => {
            tracing::warn!("No config directory available, using default settings");
            GameSettings::default()
        }
    };
    args.apply(&mut settings);

    if args.save_settings {
        match &settings_path {
            Some(path) => {
                save_settings(path, &settings)?;
                tracing::info!("Saved settings to {}", path.display());
            }
            None => tracing::warn!("Nowhere to save settings"),
        }
    }

    let mut session = Session::new(settings)?;
    let spawn = session.spawn_point();
    tracing::info!(
        "Spawn at ({:.1}, {:.1}, {:.1}), holding {}",
        spawn.x,
        spawn.y,
        spawn.z,
        session.hotbar().current()
    );
    println!("Type 'help' for commands.");

    let lines = spawn_input_reader()?;
    for line in lines.iter() {
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(command) => {
                if !execute(&mut session, command) {
                    break;
                }
            }
            Err(e) => println!("error: {}", e),
        }
    }

    tracing::info!("Session ended with {} blocks", session.world().read().len());
    Ok(())
}
