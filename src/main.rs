mod input;
mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{campaign_event, InputAction, InputLatch};
use orbital_delivery::build_info;
use orbital_delivery::core::config::{project_dirs, DeliveryConfig};
use orbital_delivery::core::constants::{LOG_FILE_NAME, MAX_FRAME_CATCHUP_MS};
use orbital_delivery::delivery::{Campaign, CampaignFlow};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Command-line options for a game session.
#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    config: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--seed" => {
                let raw = args.get(i + 1).ok_or("--seed needs a number")?;
                let seed = raw
                    .parse()
                    .map_err(|_| format!("invalid seed '{}'", raw))?;
                options.seed = Some(seed);
                i += 1;
            }
            "--config" => {
                let raw = args.get(i + 1).ok_or("--config needs a path")?;
                options.config = Some(PathBuf::from(raw));
                i += 1;
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }
    Ok(options)
}

fn print_help() {
    println!("Orbital Delivery - land fragile and urgent packages on a moving target\n");
    println!("Usage: orbital-delivery [options]\n");
    println!("Options:");
    println!("  --seed N       Seed the level and package generator");
    println!("  --config PATH  Load tuning from a JSON file");
    println!("  --version      Show version information");
    println!("  --help         Show this help message\n");
    println!("Controls:");
    println!("  Space/Enter    Confirm");
    println!("  Left/A Right/D Rotate");
    println!("  Up/W           Thrust");
    println!("  Esc/Q          Back to title / quit");
}

/// Send log output to a file in the data directory. The terminal belongs to
/// the TUI, so nothing is logged when no file can be opened.
fn init_logging() {
    let Some(dirs) = project_dirs() else {
        return;
    };
    let dir = dirs.data_dir();
    if fs::create_dir_all(dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join(LOG_FILE_NAME)) else {
        return;
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    log::info!(
        "{} started at {}",
        build_info::version_string(),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'orbital-delivery --help' for usage.");
            std::process::exit(1);
        }
    };

    init_logging();

    let config = match DeliveryConfig::resolve(options.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("orbital-delivery: {}", e);
            std::process::exit(1);
        }
    };
    let seed = options.seed.unwrap_or_else(rand::random);
    log::info!("Seed {}", seed);
    let mut campaign = Campaign::new(config, StdRng::seed_from_u64(seed));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut campaign);

    // Cleanup terminal, even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let stats = campaign.stats();
    log::info!(
        "Exit: {} deliveries, {} safe, best level {}",
        stats.deliveries,
        stats.safe_landings,
        stats.best_level
    );
    result
}

/// Draw, read input and step fixed ticks until the player quits.
fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    campaign: &mut Campaign<StdRng>,
) -> io::Result<()> {
    let tick = Duration::from_secs_f64(campaign.config().tick_seconds);
    let max_catchup = Duration::from_millis(MAX_FRAME_CATCHUP_MS);
    let mut latch = InputLatch::default();
    let mut accumulator = Duration::ZERO;
    let mut last_frame = Instant::now();

    loop {
        terminal.draw(|frame| ui::draw_campaign(frame, campaign))?;

        // Drain every pending key before the next tick
        let mut timeout = tick.saturating_sub(accumulator);
        while event::poll(timeout)? {
            timeout = Duration::ZERO;
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let Some(action) = input::map_key(key) else {
                continue;
            };
            if action == InputAction::ForceQuit {
                return Ok(());
            }
            match campaign_event(action) {
                Some(event) => {
                    let flow = campaign
                        .handle(event)
                        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
                    if flow == CampaignFlow::Quit {
                        return Ok(());
                    }
                    latch.clear();
                }
                None => latch.press(action),
            }
        }

        let now = Instant::now();
        accumulator += now.duration_since(last_frame).min(max_catchup);
        last_frame = now;

        while accumulator >= tick {
            accumulator -= tick;
            let controls = latch.step();
            campaign.tick(&controls);
        }
    }
}
