use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if guard.state.prompt.active {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => {
                crate::cleanup_terminal();
                std::process::exit(0);
            }
            (KeyCode::Esc, _) => guard.state.prompt.cancel(),
            (KeyCode::Backspace, _) => guard.state.prompt.backspace(),
            (KeyCode::Enter, _) => {
                if let Some(entry_id) = guard.submit_team_prompt() {
                    guard.update_tab(MenuItem::Team);
                    drop(guard);
                    let _ = network_requests.send(NetworkRequest::LoadTeam { entry_id }).await;
                }
            }
            (Char(c), _) => guard.state.prompt.push(c),
            _ => {}
        }
        return;
    }

    let mut request = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Team),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Fixtures),
        (_, Char('3'), _) => guard.update_tab(MenuItem::League),
        (_, Char('4'), _) => guard.update_tab(MenuItem::Rivals),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Team
        (MenuItem::Team, Char('j') | KeyCode::Down, _) => guard.state.team.select_next(),
        (MenuItem::Team, Char('k') | KeyCode::Up, _) => guard.state.team.select_prev(),
        (MenuItem::Team, KeyCode::Enter, _) => {
            request = guard
                .state
                .team
                .selected_pick()
                .map(|p| NetworkRequest::LoadPlayer { player_id: p.element });
        }

        // Fixtures
        (MenuItem::Fixtures, Char('j') | KeyCode::Down, _) => guard.state.fixtures.scroll_down(),
        (MenuItem::Fixtures, Char('k') | KeyCode::Up, _) => guard.state.fixtures.scroll_up(),

        // League
        (MenuItem::League, Char('j') | KeyCode::Down, _) => guard.state.league.select_next(),
        (MenuItem::League, Char('k') | KeyCode::Up, _) => guard.state.league.select_prev(),
        (MenuItem::League, Char('n') | KeyCode::Right, _) => {
            request = league_page_request(&guard, guard.state.league.next_page());
        }
        (MenuItem::League, Char('p') | KeyCode::Left, _) => {
            request = league_page_request(&guard, guard.state.league.prev_page());
        }
        (MenuItem::League, Char('l'), _) => {
            request = guard
                .cycle_league()
                .map(|league_id| NetworkRequest::LoadLeague { league_id, page: 1 });
        }
        (MenuItem::League, KeyCode::Enter, _) => request = guard.select_rival(),

        // Global
        (_, Char('t'), _) => guard.state.prompt.open(),
        (_, Char('R'), _) => request = Some(NetworkRequest::Reload),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    // A reload also refreshes the loaded team.
    let team_reload = matches!(request, Some(NetworkRequest::Reload))
        .then_some(guard.state.team.entry_id)
        .flatten();

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
    if let Some(entry_id) = team_reload {
        let _ = network_requests.send(NetworkRequest::LoadTeam { entry_id }).await;
    }
}

fn league_page_request(app: &App, page: Option<u32>) -> Option<NetworkRequest> {
    let league_id = app.state.league.league_id?;
    page.map(|page| NetworkRequest::LoadLeague { league_id, page })
}
