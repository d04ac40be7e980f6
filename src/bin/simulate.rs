//! Autopilot delivery simulator CLI.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # 200 runs over levels 1-10
//!   cargo run --bin simulate -- -n 50 -l 5     # 50 runs over levels 1-5
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use orbital_delivery::core::config::DeliveryConfig;
use orbital_delivery::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, write_json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("simulate: {}", message);
            eprintln!("Run 'simulate --help' for usage.");
            std::process::exit(1);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              ORBITAL DELIVERY SIMULATOR                       ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Levels:         1-{}", config.max_level);
    println!("  Max Ticks:      {}", config.max_ticks_per_attempt);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("simulate: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", report.to_text());

    if write_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("simulate: failed to write {}: {}", filename, e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut write_json = false;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "-n" | "--runs" => {
                config.num_runs = parse_value("--runs", value)?;
                i += 1;
            }
            "-l" | "--levels" => {
                config.max_level = parse_value("--levels", value)?;
                i += 1;
            }
            "-s" | "--seed" => {
                config.seed = Some(parse_value("--seed", value)?);
                i += 1;
            }
            "-t" | "--ticks" => {
                config.max_ticks_per_attempt = parse_value("--ticks", value)?;
                i += 1;
            }
            "-c" | "--config" => {
                let path = value.ok_or("--config needs a path")?;
                config.delivery =
                    DeliveryConfig::load(Path::new(path)).map_err(|e| e.to_string())?;
                i += 1;
            }
            "--quick" => {
                let delivery = config.delivery.clone();
                config = SimConfig::quick(5);
                config.delivery = delivery;
            }
            "--json" => write_json = true,
            "-v" | "--verbose" => config.verbosity = 2,
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    if config.max_level == 0 {
        return Err("--levels must be at least 1".to_string());
    }
    Ok((config, write_json))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    let raw = value.ok_or_else(|| format!("{} needs a value", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid value '{}' for {}", raw, flag))
}

fn print_help() {
    println!("Orbital Delivery Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>      Number of runs (default: 200)");
    println!("    -l, --levels <L>    Highest level flown per run (default: 10)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -t, --ticks <T>     Max descent ticks per attempt (default: 5000)");
    println!("    -c, --config <P>    Flight model config file (JSON)");
    println!("    --quick             Quick check (25 runs over levels 1-5)");
    println!("    --json              Save JSON report");
    println!("    -v, --verbose       Print every attempt");
    println!("    -h, --help          Show this help");
}
