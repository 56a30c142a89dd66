use std::path::Path;

use oomph_math::Vec3;
use oomph_server::actor::PlayerHandle;
use oomph_server::config::OomphConfig;
use oomph_sim::{InputState, MovementState, Simulator};
use oomph_world::{Block, MemoryWorld};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt};
use tracing::{info, warn};

const DEFAULT_CONFIG: &str = "oomph.toml";
const PLAYER_ID: u64 = 1;

fn load_config(path: &str) -> OomphConfig {
    if !Path::new(path).exists() && path == DEFAULT_CONFIG {
        return OomphConfig::default();
    }
    match OomphConfig::load(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}");
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());
    let config = load_config(&path);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    // Stdout carries results; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Oomph harness v{} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "World: {} at y={}, {} chunk radius",
        config.world.floor_block, config.world.floor_y, config.world.radius_chunks
    );
    info!("Movement: {:?}", config.movement);

    let floor = Block::named(&config.world.floor_block);
    let world = MemoryWorld::flat(config.world.floor_y, floor, config.world.radius_chunks);

    let spawn = Vec3::new(0.5, (config.world.floor_y + 1) as f32, 0.5);
    let mut state = MovementState::new();
    state.set_pos(spawn);
    state.on_ground = true;
    state.set_ready(true);
    let player = PlayerHandle::spawn(
        PLAYER_ID,
        Simulator::with_state(state, config.movement.clone()),
        world,
    );

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut processed = 0u64;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Failed to read stdin: {e}");
                        break;
                    }
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let input: InputState = match serde_json::from_str(line) {
                    Ok(input) => input,
                    Err(e) => {
                        warn!("Skipping malformed input: {e}");
                        continue;
                    }
                };

                let result = match player.tick(input).await {
                    Ok(Ok(result)) => result,
                    Ok(Err(e)) => {
                        warn!(player = player.id(), "Input rejected: {e}");
                        continue;
                    }
                    Err(e) => {
                        warn!("{e}");
                        break;
                    }
                };
                processed += 1;

                match serde_json::to_string(&result) {
                    Ok(mut json) => {
                        json.push('\n');
                        if stdout.write_all(json.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => warn!("Failed to encode result: {e}"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    let _ = stdout.flush().await;
    let _ = player.shutdown().await;
    info!("Processed {processed} inputs");
}
