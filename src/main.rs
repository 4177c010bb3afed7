//! Drive a live elevator controller from stdin.
//!
//! One event per line (`CALL up`, `SELECT 3`, ...); blank lines and lines
//! starting with `#` are skipped. The program exits once input is closed and
//! the car has settled.
//!
//! ```text
//! printf 'CALL up\nSELECT 4\n' | RUST_LOG=debug elevator-sim
//! ```

use clap::Parser;
use crossbeam_channel as cbc;
use liftstate::{Controller, ControllerConfig, Event, SystemClock};
use log::{error, info, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Longest wait between polls when no timer is pending.
const IDLE_WAIT: Duration = Duration::from_secs(60);

#[derive(Parser, Debug)]
#[clap(name = "elevator-sim", version, about = "Simulate a single elevator car, reading events from stdin")]
struct Args {
    /// TOML configuration file
    #[clap(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print every snapshot as a JSON line on stdout instead of logging it
    #[clap(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ControllerConfig::load(path)?,
        None => ControllerConfig::default(),
    };
    info!(
        "Floors 1..={}, tick {} ms, arrival dwell {} ms, error dwell {} ms",
        config.max_level, config.tick_interval_ms, config.arrival_dwell_ms, config.error_dwell_ms
    );

    let mut lift = Controller::new(config, SystemClock::new())?;
    let json = args.json;
    lift.subscribe(move |snapshot| {
        if !json {
            info!("{snapshot}");
            return;
        }
        match serde_json::to_string(snapshot) {
            Ok(line) => println!("{line}"),
            Err(err) => error!("Failed to encode snapshot: {err}"),
        }
    });

    let (line_tx, line_rx) = cbc::unbounded::<String>();
    thread::Builder::new()
        .name("stdin_reader".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        })?;

    let mut input_open = true;
    loop {
        let wait = lift.clock().time_until_next();
        if input_open {
            cbc::select! {
                recv(line_rx) -> line => match line {
                    Ok(line) => handle_line(&mut lift, &line),
                    Err(_) => input_open = false,
                },
                default(wait.unwrap_or(IDLE_WAIT)) => {}
            }
        } else {
            match wait {
                Some(wait) => thread::sleep(wait),
                None => break,
            }
        }
        lift.poll();
    }

    info!("Input closed and car settled at level {}", lift.context().current_level);
    Ok(())
}

fn handle_line(lift: &mut Controller<SystemClock>, line: &str) {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return;
    }
    match line.parse::<Event>() {
        // Rejections are already logged by the controller.
        Ok(event) => {
            let _ = lift.dispatch(event);
        }
        Err(err) => warn!("{err}"),
    }
}
