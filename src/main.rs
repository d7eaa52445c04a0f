use anyhow::{bail, Context, Result};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::info;

use action_tennis::config::{self, Config};
use action_tennis::logging::{self, LogTarget};
use action_tennis::session;
use action_tennis::terminal_input::{KeyMap, KeyboardInput};
use action_tennis::ui::{EventLog, TerminalRenderer};
use action_tennis::Simulation;

/// Command line options
#[derive(Debug, Default)]
struct Args {
    config_path: Option<PathBuf>,
    seed: Option<u64>,
    debug: bool,
    headless: bool,
    ticks: Option<u64>,
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let program = argv.first().map(String::as_str).unwrap_or("action-tennis");
    let Some(args) = parse_args(&argv[1.min(argv.len())..])? else {
        print_usage(program);
        return Ok(());
    };

    let log_target = if args.headless {
        LogTarget::Stderr
    } else if args.debug {
        LogTarget::File(logging::default_log_path())
    } else {
        LogTarget::Off
    };
    logging::init(&log_target)?;

    let config = config::load_config(args.config_path.as_deref())?;
    let mut sim = match args.seed {
        Some(seed) => Simulation::with_seed(&config, seed)?,
        None => Simulation::from_entropy(&config)?,
    };
    info!(seed = ?args.seed, headless = args.headless, "starting");

    if args.headless {
        let report = session::run_headless(&mut sim, &mut EventLog::default(), args.ticks)?;
        println!(
            "Player {} - {} CPU after {} ticks (smashes: player {}, cpu {})",
            report.player_score,
            report.cpu_score,
            report.ticks,
            report.player_smashes,
            report.cpu_smashes
        );
        return Ok(());
    }

    run_terminal(&config, &mut sim)
}

/// Set up the terminal, play, and always restore the terminal afterwards
fn run_terminal(config: &Config, sim: &mut Simulation) -> Result<()> {
    let keymap = KeyMap::from_bindings(&config.keybindings).context("invalid key binding")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events give exact held-key state where the terminal supports them
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    info!(release_events, "terminal ready");

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    let mut renderer = TerminalRenderer::new(terminal, &config.display, &config.keybindings);
    let mut keyboard = KeyboardInput::new(keymap, release_events);

    let result = session::run_game_vs_cpu(&mut renderer, &mut keyboard, sim, config);

    // Restore terminal
    let terminal = renderer.terminal_mut();
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Parse command line arguments; `None` means help was requested
fn parse_args(args: &[String]) -> Result<Option<Args>> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = iter.next().context("--config requires a path")?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--seed" | "-s" => {
                let value = iter.next().context("--seed requires a number")?;
                parsed.seed = Some(value.parse().with_context(|| format!("bad seed {value:?}"))?);
            }
            "--ticks" | "-t" => {
                let value = iter.next().context("--ticks requires a number")?;
                parsed.ticks = Some(
                    value
                        .parse()
                        .with_context(|| format!("bad tick count {value:?}"))?,
                );
            }
            "--debug" | "-d" => parsed.debug = true,
            "--headless" => parsed.headless = true,
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {other} (try --help)"),
        }
    }

    if parsed.ticks.is_some() && !parsed.headless {
        bail!("--ticks only applies with --headless");
    }
    Ok(Some(parsed))
}

fn print_usage(program: &str) {
    println!("Action Tennis - smash your way past the CPU");
    println!();
    println!("Usage:");
    println!("  {}                      # Play in the terminal", program);
    println!("  {} --headless [--ticks N] # Simulate an idle player vs CPU", program);
    println!();
    println!("Options:");
    println!("  -c, --config <path>   Config file (default: {})", config::get_config_path().display());
    println!("  -s, --seed <u64>      Seed the simulation for a reproducible match");
    println!("  -d, --debug           Write a debug log to {}", logging::default_log_path().display());
    println!("  -t, --ticks <n>       Tick limit for --headless");
    println!();
    println!("Controls: arrow keys move, Enter starts, P pauses, R resets, Q quits.");
    println!("Move against the ball as you hit it to SMASH; keep moving to charge up.");
}
