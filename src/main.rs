mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::{App, parse_entry_id};
use crate::state::app_settings::{AppSettings, parse_log_level};
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use fpl_api::client::{FplApi, StaticDataCache};
use fpl_api::gameweek::DeadlineOverrides;
use log::{LevelFilter, error};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

/// Overrides collected from the command line.
#[derive(Debug, Default)]
struct CliArgs {
    team: Option<String>,
    log_level: Option<LevelFilter>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(cli) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();

    let mut settings = AppSettings::load();
    if let Some(team) = cli.team {
        settings.team_id = Some(team);
    }
    if cli.log_level.is_some() {
        settings.log_level = cli.log_level;
    }

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal()?;

    tui_logger::init_logger(LevelFilter::Trace)?;
    tui_logger::set_default_level(LevelFilter::Error);

    let api = FplApi::new()
        .with_base_url(settings.api_base.as_str())
        .with_proxy(settings.proxy.as_str());
    let app = Arc::new(Mutex::new(App::new(settings)));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let cache = StaticDataCache::new(api, DeadlineOverrides::season_2025_26());
    let network_worker = NetworkWorker::new(cache, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Clock tick thread, drives the deadline countdown
    let clock_tx = ui_event_tx.clone();
    let clock_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            if clock_tx.send(UiEvent::ClockTick).await.is_err() {
                break;
            }
        }
    });

    // Trigger initial loads on startup
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    clock_task.abort();

    Ok(())
}

/// None when the process should exit right away (help, version).
fn handle_cli_args() -> Option<CliArgs> {
    let mut cli = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return None;
            }
            "-V" | "--version" => {
                println!("fpltui {}", env!("CARGO_PKG_VERSION"));
                return None;
            }
            "-t" | "--team" => {
                let value = args.next().unwrap_or_default();
                if parse_entry_id(&value).is_none() {
                    exit_with_usage(&format!("Not a team id or entry URL: {value:?}"));
                }
                cli.team = Some(value);
            }
            "-l" | "--log-level" => {
                let value = args.next().unwrap_or_default();
                let Some(level) = parse_log_level(&value) else {
                    exit_with_usage(&format!("Unknown log level: {value:?}"));
                };
                cli.log_level = Some(level);
            }
            _ => exit_with_usage(&format!("Unknown argument: {arg}")),
        }
    }

    Some(cli)
}

fn exit_with_usage(message: &str) -> ! {
    eprintln!("{message}\n\n{}", usage_text());
    std::process::exit(2);
}

fn usage_text() -> &'static str {
    "fpltui - Fantasy Premier League terminal dashboard

Usage:
  fpltui [--team <id-or-url>] [--log-level <level>]
  fpltui --help
  fpltui --version

Options:
  -t, --team <id-or-url>    Team id or entry URL (not saved)
  -l, --log-level <level>   error, warn, info, debug or trace

Environment:
  FPLTUI_TEAM_ID    Team id, overrides the saved one
  FPLTUI_API_BASE   API base URL (default https://fantasy.premierleague.com/api)
  FPLTUI_PROXY      Prefix for every request, e.g. https://corsproxy.io/?
  FPLTUI_LOG        Log level

The team entered with `t` is saved to $XDG_CONFIG_HOME/fpltui/settings.json."
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw && !loading.is_loading {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw =
                    handle_network_response(response, &app, &network_requests, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let entry_id = app.lock().await.state.team.entry_id;
            let _ = network_requests.send(NetworkRequest::LoadStaticData).await;
            if let Some(entry_id) = entry_id {
                let _ = network_requests.send(NetworkRequest::LoadTeam { entry_id }).await;
            }
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::ClockTick => {
            let mut guard = app.lock().await;
            guard.on_clock_tick(chrono::Utc::now());
            guard.state.static_data.status.next.is_some()
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
            return true;
        }
        NetworkResponse::StaticDataLoaded { dataset, status } => {
            let mut guard = app.lock().await;
            guard.on_static_data_loaded(dataset, status);
        }
        NetworkResponse::StatusResolved { status } => {
            let mut guard = app.lock().await;
            guard.on_status_resolved(status);
        }
        NetworkResponse::FixturesLoaded { fixtures } => {
            let mut guard = app.lock().await;
            guard.on_fixtures_loaded(fixtures);
        }
        NetworkResponse::TeamLoaded { entry, history, picks } => {
            let mut guard = app.lock().await;
            let league = guard.on_team_loaded(entry, history, picks);
            drop(guard);
            if let Some(league_id) = league {
                let _ = network_requests
                    .send(NetworkRequest::LoadLeague { league_id, page: 1 })
                    .await;
            }
        }
        NetworkResponse::LeagueLoaded { standings } => {
            let mut guard = app.lock().await;
            guard.on_league_loaded(standings);
        }
        NetworkResponse::RivalLoaded { rival_id, rival_name, mine, theirs } => {
            let mut guard = app.lock().await;
            guard.on_rival_loaded(rival_id, rival_name, mine, theirs);
        }
        NetworkResponse::PlayerLoaded { summary } => {
            let mut guard = app.lock().await;
            guard.on_player_loaded(summary);
        }
        NetworkResponse::Error { message } => {
            error!("Network error: {message}");
            let mut guard = app.lock().await;
            guard.on_error(message);
        }
    }
    !loading.is_loading
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        cursor::Hide,
        terminal::EnterAlternateScreen,
        terminal::Clear(terminal::ClearType::All)
    )?;
    terminal::enable_raw_mode()
}

/// Best effort: also runs from the panic hook.
pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(
        stdout,
        cursor::MoveTo(0, 0),
        terminal::Clear(terminal::ClearType::All),
        terminal::LeaveAlternateScreen,
        cursor::Show
    );
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
