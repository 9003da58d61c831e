use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use chrono::{DateTime, Utc};
use fpl_api::gameweek::GameweekStatus;
use fpl_api::input::extract_identifier;
use fpl_api::{
    EntryHistory, EntrySummary, Fixture, GameweekPicks, LeagueStandings, PlayerSummary,
    StaticDataset,
};
use log::{error, info, warn};
use std::sync::Arc;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Team,
    Fixtures,
    League,
    Rivals,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let mut app = Self { state: AppState::new(), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app.state.team.entry_id = app.settings.team_id.as_deref().and_then(parse_entry_id);
        if app.settings.team_id.is_some() && app.state.team.entry_id.is_none() {
            app.state.last_error = Some("Saved team id is not valid; press t to enter one".into());
        }
        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_static_data_loaded(&mut self, dataset: Arc<StaticDataset>, status: GameweekStatus) {
        self.state.last_error = None;
        self.state.team.rebuild_formation(Some(dataset.as_ref()));
        self.state.static_data.dataset = Some(dataset);
        self.state.static_data.status = status;
    }

    /// Deadlines only, used when the bootstrap itself could not be fetched.
    pub fn on_status_resolved(&mut self, status: GameweekStatus) {
        self.state.static_data.status = status;
    }

    pub fn on_fixtures_loaded(&mut self, fixtures: Vec<Fixture>) {
        let Some(dataset) = self.state.static_data.dataset.clone() else {
            warn!("fixtures arrived before bootstrap data, ignoring");
            return;
        };
        let status = &self.state.static_data.status;
        self.state.fixtures.load(&fixtures, status, &dataset);
    }

    /// Returns the league to show if none is selected yet.
    pub fn on_team_loaded(
        &mut self,
        entry: EntrySummary,
        history: EntryHistory,
        picks: Option<GameweekPicks>,
    ) -> Option<u32> {
        self.state.last_error = None;
        let first_league = entry.classic_leagues.first().map(|l| l.id);
        let dataset = self.state.static_data.dataset.clone();
        self.state.team.load(entry, history, picks, dataset.as_deref());

        if self.state.league.league_id.is_none() {
            self.state.league.league_index = 0;
            return first_league;
        }
        None
    }

    pub fn on_league_loaded(&mut self, standings: LeagueStandings) {
        self.state.last_error = None;
        self.state.league.load(standings);
    }

    pub fn on_rival_loaded(
        &mut self,
        rival_id: u32,
        rival_name: String,
        mine: GameweekPicks,
        theirs: GameweekPicks,
    ) {
        self.state.last_error = None;
        self.state.rival.load(rival_id, rival_name, &mine, &theirs);
    }

    pub fn on_player_loaded(&mut self, summary: PlayerSummary) {
        self.state.team.player = Some(summary);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    pub fn on_clock_tick(&mut self, now: DateTime<Utc>) {
        self.state.now = now;
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Team id prompt
    // -----------------------------------------------------------------------

    /// Validate the typed identifier and remember it. Invalid input is
    /// reported here and never reaches the network.
    pub fn submit_team_prompt(&mut self) -> Option<u32> {
        let input = self.state.prompt.submit();
        let Some(entry_id) = parse_entry_id(&input) else {
            self.state.last_error = Some(format!("Not a team id or entry URL: {:?}", input.trim()));
            return None;
        };

        if let Err(e) = self.settings.save_team_id(&entry_id.to_string()) {
            error!("could not save team id: {e:#}");
        }
        info!("switching to entry {entry_id}");

        self.state.last_error = None;
        self.state.team.entry_id = Some(entry_id);
        self.state.league.league_id = None;
        self.state.rival = Default::default();
        Some(entry_id)
    }

    // -----------------------------------------------------------------------
    // League / rivals
    // -----------------------------------------------------------------------

    /// Step to the next of the manager's classic leagues.
    pub fn cycle_league(&mut self) -> Option<u32> {
        let leagues = &self.state.team.entry.as_ref()?.classic_leagues;
        if leagues.is_empty() {
            return None;
        }
        let index = (self.state.league.league_index + 1) % leagues.len();
        self.state.league.league_index = index;
        Some(leagues[index].id)
    }

    /// Request for comparing against the highlighted league entry. Switches to
    /// the Rivals tab as a side-effect.
    pub fn select_rival(&mut self) -> Option<NetworkRequest> {
        let Some(entry_id) = self.state.team.entry_id else {
            self.state.last_error = Some("Load your team first (press t)".into());
            return None;
        };
        let rival = self.state.league.selected_entry()?;
        if rival.entry == entry_id {
            self.state.last_error = Some("That's you; pick another manager".into());
            return None;
        }
        let Some(gameweek) = self.comparison_gameweek() else {
            self.state.last_error = Some("No gameweek has started yet".into());
            return None;
        };

        let request = NetworkRequest::LoadRival {
            entry_id,
            rival_id: rival.entry,
            rival_name: rival.entry_name.clone(),
            gameweek,
        };
        self.update_tab(MenuItem::Rivals);
        Some(request)
    }

    fn comparison_gameweek(&self) -> Option<u8> {
        self.state
            .team
            .picks
            .as_ref()
            .map(|p| p.event)
            .or_else(|| self.state.static_data.status.current.as_ref().map(|e| e.id))
    }
}

/// Entry id from a bare id or an entry URL.
pub fn parse_entry_id(input: &str) -> Option<u32> {
    extract_identifier(input)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpl_api::{ClassicLeague, Event, LeagueStandingEntry, Pick, Player, Position, Team};

    fn app() -> App {
        let settings_path = std::env::temp_dir()
            .join(format!("fpltui-app-{}", std::process::id()))
            .join("settings.json");
        App::new(AppSettings { settings_path, ..AppSettings::default() })
    }

    fn standings(entries: &[(u32, &str)]) -> LeagueStandings {
        LeagueStandings {
            league_id: 314,
            page: 1,
            entries: entries
                .iter()
                .map(|&(entry, name)| LeagueStandingEntry {
                    entry,
                    entry_name: name.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn entry_ids_parse_from_ids_and_urls() {
        assert_eq!(parse_entry_id("35868"), Some(35868));
        assert_eq!(parse_entry_id("https://fantasy.premierleague.com/entry/12345/event/7"), Some(12345));
        assert_eq!(parse_entry_id("abc"), None);
        assert_eq!(parse_entry_id("99999999999999"), None);
    }

    #[test]
    fn invalid_prompt_input_sets_error() {
        let mut app = app();
        app.state.prompt.open();
        app.state.prompt.input = "not a team".into();
        assert_eq!(app.submit_team_prompt(), None);
        assert!(app.state.last_error.is_some());
        assert_eq!(app.state.team.entry_id, None);
    }

    #[test]
    fn first_team_load_picks_first_league() {
        let mut app = app();
        let entry = EntrySummary {
            id: 1,
            classic_leagues: vec![
                ClassicLeague { id: 314, ..Default::default() },
                ClassicLeague { id: 99, ..Default::default() },
            ],
            ..Default::default()
        };
        assert_eq!(app.on_team_loaded(entry.clone(), EntryHistory::default(), None), Some(314));

        app.on_league_loaded(standings(&[(1, "Me")]));
        assert_eq!(app.on_team_loaded(entry, EntryHistory::default(), None), None);
        assert_eq!(app.cycle_league(), Some(99));
        assert_eq!(app.cycle_league(), Some(314));
    }

    #[test]
    fn selecting_rival_builds_request_and_switches_tab() {
        let mut app = app();
        app.state.team.entry_id = Some(1);
        app.state.team.picks = Some(GameweekPicks { event: 12, ..Default::default() });
        app.on_league_loaded(standings(&[(1, "Me"), (2, "Them")]));

        assert!(app.select_rival().is_none(), "own entry is rejected");
        assert!(app.state.last_error.is_some());

        app.state.league.select_next();
        match app.select_rival() {
            Some(NetworkRequest::LoadRival { entry_id, rival_id, rival_name, gameweek }) => {
                assert_eq!((entry_id, rival_id, gameweek), (1, 2, 12));
                assert_eq!(rival_name, "Them");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(app.state.active_tab, MenuItem::Rivals);
    }

    #[test]
    fn status_from_overrides_shows_without_dataset() {
        let mut app = app();
        let next = Event { id: 3, is_next: true, ..Default::default() };
        app.on_status_resolved(GameweekStatus { current: None, next: Some(next) });
        assert!(app.state.static_data.dataset.is_none());
        assert_eq!(app.state.static_data.status.next.as_ref().map(|e| e.id), Some(3));

        let fixtures = vec![Fixture { id: 1, event: Some(3), team_h: 1, team_a: 2, ..Default::default() }];
        app.on_fixtures_loaded(fixtures);
        assert!(app.state.fixtures.ranking.is_empty(), "no clubs to lay out yet");
    }

    #[test]
    fn dataset_without_fixtures_still_places_team() {
        let mut app = app();
        let types = [1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 1, 2, 3, 4];
        let dataset = StaticDataset {
            teams: vec![Team { id: 1, short_name: "ARS".into(), ..Default::default() }],
            players: types
                .iter()
                .enumerate()
                .map(|(i, &t)| Player {
                    id: i as u32 + 1,
                    team: 1,
                    position: Position::from_element_type(t).unwrap_or_default(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        };
        app.on_static_data_loaded(Arc::new(dataset), GameweekStatus::default());

        let picks = GameweekPicks {
            event: 3,
            picks: (1..=15).map(|i| Pick { element: i, position: i as u8, ..Default::default() }).collect(),
            ..Default::default()
        };
        app.on_team_loaded(EntrySummary { id: 1, ..Default::default() }, EntryHistory::default(), Some(picks));
        let formation = app.state.team.formation.as_ref().unwrap();
        assert_eq!(formation.label, "4-4-2");
        assert_eq!(formation.starters.len(), 11);

        app.on_fixtures_loaded(vec![Fixture { id: 1, event: Some(1), team_h: 1, team_a: 2, ..Default::default() }]);
        assert_eq!(app.state.fixtures.ranking, vec![1]);
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::League);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::League);
    }
}
