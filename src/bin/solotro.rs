use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::prelude::*;
use solotro::advisor::{AdvisorConfig, DiscardAdvisor};
use solotro::deck::Sampler;
use solotro::persistence::{default_state_path, Store};
use solotro::tui::{app::AppState, controller};
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[clap(version, about = "Four-seat wildcard card game in the terminal")]
struct Cli {
    /// Seed for a reproducible game.
    #[clap(long)]
    seed: Option<u64>,
    /// Save file location (default: $SOLOTRO_SAVE or ~/.solotro-state-v1.json).
    #[clap(long)]
    save_file: Option<PathBuf>,
    /// Do not load or save the game.
    #[clap(long, conflicts_with = "save_file")]
    no_save: bool,
    /// Time budget for the discard hint, in milliseconds.
    #[clap(long, default_value_t = 1200)]
    hint_budget_ms: u64,
    /// Write logs to this file while the TUI is running.
    #[clap(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    let mut builder = env_logger::builder();
    builder.format_target(false).format_timestamp_millis();
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .filter_level(log::LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        // the TUI owns stderr once it starts
        None => {
            builder.filter_level(log::LevelFilter::Warn);
        }
    }
    builder.init();
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    if !io::stdout().is_terminal() {
        println!(
            "solotro needs a real terminal (TTY).\n\
             Run it in a terminal and press q to quit. Version: {}",
            solotro::VERSION
        );
        return Ok(());
    }

    let store = if cli.no_save {
        Store::disabled()
    } else {
        let path = cli.save_file.clone().or_else(default_state_path);
        if path.is_none() {
            warn!("no save location ($HOME unset); the game will not be saved");
        }
        Store::new(path)
    };
    let (game_sampler, hint_sampler) = match cli.seed {
        Some(seed) => (Sampler::seeded(seed), Sampler::seeded(seed.wrapping_add(1))),
        None => (Sampler::from_entropy(), Sampler::from_entropy()),
    };
    let config = AdvisorConfig::default().with_budget(Duration::from_millis(cli.hint_budget_ms));
    let advisor = DiscardAdvisor::new(config, hint_sampler);
    let mut app = AppState::resume(store, game_sampler, advisor);
    info!("starting in round {} ({} phase)", app.state().round(), app.state().phase());

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
