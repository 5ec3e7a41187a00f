//! # Life Demo
//!
//! The dual-core Game of Life demo: seed a board, then render and compute
//! generations forever, printing the classic per-generation line. Pass a
//! TOML config path to override the built-in demo constants.
//!
//! Run with: `cargo run --release --bin life [config.toml]`

use std::process::ExitCode;

use mitosis::{ConsoleObserver, Engine, FrameBuffer};
use mitosis_core::SimulationConfig;

fn load_config() -> Result<SimulationConfig, String> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|err| format!("cannot read {path}: {err}"))?;
            SimulationConfig::from_toml(&text).map_err(|err| err.to_string())
        }
        None => Ok(SimulationConfig::default()),
    }
}

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let frame = FrameBuffer::new(
        config.width as u32 * config.cell_size,
        config.height as u32 * config.cell_size,
    );
    let engine = match Engine::new(&config, frame) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Conway's Game of Life: matrix size {} x {}",
        config.width, config.height
    );

    // No terminal state: the cycle runs until the process is killed.
    engine.run(&mut ConsoleObserver, None);
    ExitCode::SUCCESS
}
