mod app;
mod config;
mod keys;
mod log_buffer;
mod ui;

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use app::App;
use clap::Parser;
use config::Config;
use encore_core::{self as ec, Step, StrategyKind};
use keys::Action;
use log_buffer::{LogBuffer, LogBufferLayer};

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Picks the first karaoke song for your group, and who sings it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Config file to use. Written with defaults if it doesn't exist.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `general.strategy` from the config file.
    #[arg(long)]
    strategy: Option<StrategyKind>,
    /// Overrides `general.seed` from the config file.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to the in-app panel and a file, never stdout.
    let log_buffer = LogBuffer::new();
    let log_file = std::fs::File::create("encore-tui.log")?;
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(LogBufferLayer::new(log_buffer.clone()))
        .with(file_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("encore=info")),
        )
        .init();

    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(Config::FILENAME));
    if !config_path.exists() {
        Config::default().save(&config_path)?;
    }
    let mut config = Config::load(&config_path)?;
    if let Some(strategy) = args.strategy {
        config.general.strategy = strategy;
    }
    if args.seed.is_some() {
        config.general.seed = args.seed;
    }

    let (selection_tx, selection_rx) = std::sync::mpsc::channel::<ec::SelectionState>();
    let logic = ec::Logic::new(ec::LogicArgs {
        strategy: config.general.build_strategy(&config.server)?,
        min_latency: config.general.min_latency(),
        selection_tx,
    })?;

    let tick_rate = config.ui.tick_rate();
    let mut app = App::new(config, logic, selection_rx, log_buffer);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::draw(frame, app))?;
            app.needs_redraw = false;
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            // Process the first event, then drain all remaining queued events.
            let process_event = |evt: Event, app: &mut App| match evt {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    handle_key_event(app, &key);
                    app.needs_redraw = true;
                }
                Event::Resize(_, _) => app.needs_redraw = true,
                _ => {}
            };

            process_event(event::read()?, app);
            while event::poll(Duration::ZERO)? {
                process_event(event::read()?, app);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key_event(app: &mut App, key: &event::KeyEvent) {
    if app.quit_confirming {
        match keys::quit_confirm_action(key) {
            Action::Select => app.should_quit = true,
            _ => app.quit_confirming = false,
        }
        return;
    }

    if app.show_logs {
        if let Some(action) = keys::logs_action(key)
            && let Some(ui::logs::LogsAction::Close) = ui::logs::handle_key(&mut app.logs, action)
        {
            app.toggle_logs();
        }
        return;
    }

    match app.session.step() {
        Step::Home => match keys::home_action(key) {
            Some(Action::Select) => app.start(),
            Some(Action::Logs) => app.toggle_logs(),
            Some(Action::Quit) => app.quit_confirming = true,
            _ => {}
        },
        Step::Members => {
            let typing = app.members.field.is_text();
            if let Some(action) = keys::members_action(key, typing)
                && let Some(ma) = app.members.handle_key(&app.session.roster, action)
            {
                use ui::members::MembersAction;
                match ma {
                    MembersAction::Add => app.add_member(),
                    MembersAction::Remove(id) => app.remove_member(&id),
                    MembersAction::Continue => app.complete_members(),
                    MembersAction::Quit => app.quit_confirming = true,
                    MembersAction::ToggleLogs => app.toggle_logs(),
                }
            }
        }
        Step::Settings => {
            if let Some(action) = keys::settings_action(key)
                && let Some(sa) = app.settings.handle_key(action)
            {
                use ui::settings::SettingsAction;
                match sa {
                    SettingsAction::Submit(preferences) => app.submit_settings(preferences),
                    SettingsAction::Quit => app.quit_confirming = true,
                    SettingsAction::ToggleLogs => app.toggle_logs(),
                }
            }
        }
        Step::Result => match keys::result_action(key) {
            Some(Action::ProposeAgain) => app.propose_again(),
            Some(Action::StartOver) => app.reset(),
            Some(Action::Logs) => app.toggle_logs(),
            Some(Action::Quit) => app.quit_confirming = true,
            _ => {}
        },
    }
}
