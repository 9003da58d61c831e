use crate::app::MenuItem;
use chrono::{DateTime, Utc};
use fpl_api::differential::find_differentials;
use fpl_api::fixtures::{DEFAULT_WINDOW_SIZE, FixtureWindow, build_window, rank_by_difficulty};
use fpl_api::gameweek::GameweekStatus;
use fpl_api::identicon::Identicon;
use fpl_api::squad::{Formation, derive_formation};
use fpl_api::{
    EntryHistory, EntrySummary, Fixture, GameweekPicks, LeagueStandingEntry, LeagueStandings,
    Pick, PlayerSummary, StaticDataset,
};
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Bootstrap data
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StaticState {
    pub dataset: Option<Arc<StaticDataset>>,
    pub status: GameweekStatus,
}

impl StaticState {
    pub fn dataset(&self) -> Option<&StaticDataset> {
        self.dataset.as_deref()
    }

    pub fn team_short_name(&self, team_id: u32) -> String {
        self.dataset()
            .and_then(|d| d.team(team_id))
            .map(|t| t.short_name.clone())
            .unwrap_or_else(|| "???".to_string())
    }
}

// ---------------------------------------------------------------------------
// Team tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamState {
    pub entry_id: Option<u32>,
    pub entry: Option<EntrySummary>,
    pub history: Option<EntryHistory>,
    pub picks: Option<GameweekPicks>,
    pub formation: Option<Formation>,
    /// Why the pitch can't be drawn, e.g. too few picks.
    pub formation_error: Option<String>,
    /// Index into `picks.picks`.
    pub selected: usize,
    pub player: Option<PlayerSummary>,
}

impl TeamState {
    pub fn load(
        &mut self,
        entry: EntrySummary,
        history: EntryHistory,
        picks: Option<GameweekPicks>,
        dataset: Option<&StaticDataset>,
    ) {
        if self.entry_id != Some(entry.id) {
            self.selected = 0;
            self.player = None;
        }
        self.entry_id = Some(entry.id);
        self.entry = Some(entry);
        self.history = Some(history);
        self.picks = picks;
        self.rebuild_formation(dataset);
    }

    /// Positions come from the bootstrap, so this reruns when it (re)loads.
    pub fn rebuild_formation(&mut self, dataset: Option<&StaticDataset>) {
        self.formation = None;
        self.formation_error = None;
        let Some(picks) = self.picks.as_ref() else {
            return;
        };
        match derive_formation(&picks.picks, |id| dataset.and_then(|d| d.position_of(id))) {
            Ok(formation) => self.formation = Some(formation),
            Err(e) => self.formation_error = Some(e.to_string()),
        }
    }

    pub fn select_next(&mut self) {
        let max = self.pick_count().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_pick(&self) -> Option<&Pick> {
        self.picks.as_ref()?.picks.get(self.selected)
    }

    pub fn identicon(&self) -> Option<Identicon> {
        let entry = self.entry.as_ref()?;
        Some(Identicon::for_name(entry.id, Some(&entry.manager_name())))
    }

    fn pick_count(&self) -> usize {
        self.picks.as_ref().map(|p| p.picks.len()).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Fixtures tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FixturesState {
    pub window: FixtureWindow,
    /// Team ids, easiest run first.
    pub ranking: Vec<u32>,
    pub start_gw: u8,
    pub scroll_offset: u16,
}

impl FixturesState {
    pub fn load(&mut self, fixtures: &[Fixture], status: &GameweekStatus, dataset: &StaticDataset) {
        self.start_gw = window_start(status);
        self.window = build_window(fixtures, self.start_gw, DEFAULT_WINDOW_SIZE, &dataset.team_ids());
        self.ranking = rank_by_difficulty(&self.window);
        self.scroll_offset = 0;
    }

    pub fn scroll_down(&mut self) {
        let max = self.ranking.len().saturating_sub(1) as u16;
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

/// First gameweek of the difficulty window: the next one to be played.
fn window_start(status: &GameweekStatus) -> u8 {
    status
        .next
        .as_ref()
        .map(|e| e.id)
        .or_else(|| status.current.as_ref().map(|e| e.id.saturating_add(1)))
        .unwrap_or(1)
}

// ---------------------------------------------------------------------------
// League tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LeagueState {
    pub league_id: Option<u32>,
    pub standings: Option<LeagueStandings>,
    pub selected: usize,
    /// Which of the manager's classic leagues is shown.
    pub league_index: usize,
}

impl LeagueState {
    pub fn load(&mut self, standings: LeagueStandings) {
        if self.league_id != Some(standings.league_id) {
            self.selected = 0;
        }
        self.league_id = Some(standings.league_id);
        self.selected = self.selected.min(standings.entries.len().saturating_sub(1));
        self.standings = Some(standings);
    }

    pub fn next_page(&self) -> Option<u32> {
        let standings = self.standings.as_ref()?;
        standings.has_next.then_some(standings.page + 1)
    }

    pub fn prev_page(&self) -> Option<u32> {
        let page = self.standings.as_ref()?.page;
        (page > 1).then_some(page - 1)
    }

    pub fn select_next(&mut self) {
        let len = self.standings.as_ref().map(|s| s.entries.len()).unwrap_or(0);
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_entry(&self) -> Option<&LeagueStandingEntry> {
        self.standings.as_ref()?.entries.get(self.selected)
    }
}

// ---------------------------------------------------------------------------
// Rivals tab
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RivalState {
    pub rival_id: Option<u32>,
    pub rival_name: String,
    pub gameweek: u8,
    /// Players only the rival owns.
    pub theirs_only: Vec<Pick>,
    /// Players only the user owns.
    pub mine_only: Vec<Pick>,
}

impl RivalState {
    pub fn load(&mut self, rival_id: u32, rival_name: String, mine: &GameweekPicks, theirs: &GameweekPicks) {
        self.rival_id = Some(rival_id);
        self.rival_name = rival_name;
        self.gameweek = theirs.event;
        self.theirs_only = find_differentials(&mine.picks, &theirs.picks);
        self.mine_only = find_differentials(&theirs.picks, &mine.picks);
    }
}

// ---------------------------------------------------------------------------
// Team id prompt
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct PromptState {
    pub active: bool,
    pub input: String,
}

impl PromptState {
    pub fn open(&mut self) {
        self.active = true;
        self.input.clear();
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.input.clear();
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// Close the prompt and hand back what was typed.
    pub fn submit(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.input)
    }
}

// ---------------------------------------------------------------------------
// Top-level state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// Wall clock as of the last tick; drives the deadline countdown.
    pub now: DateTime<Utc>,
    pub static_data: StaticState,
    pub team: TeamState,
    pub fixtures: FixturesState,
    pub league: LeagueState,
    pub rival: RivalState,
    pub prompt: PromptState,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            show_logs: false,
            last_error: None,
            now: Utc::now(),
            static_data: StaticState::default(),
            team: TeamState::default(),
            fixtures: FixturesState::default(),
            league: LeagueState::default(),
            rival: RivalState::default(),
            prompt: PromptState::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fpl_api::{Event, Player, Position, Team};

    fn dataset() -> StaticDataset {
        let types = [1, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 1, 2, 3, 4];
        StaticDataset {
            events: Vec::new(),
            teams: (1..=3)
                .map(|id| Team { id, short_name: format!("T{id}"), ..Default::default() })
                .collect(),
            players: types
                .iter()
                .enumerate()
                .map(|(i, &t)| Player {
                    id: i as u32 + 1,
                    web_name: format!("P{}", i + 1),
                    position: Position::from_element_type(t).unwrap_or_default(),
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn picks(n: u32, event: u8) -> GameweekPicks {
        GameweekPicks {
            event,
            picks: (1..=n)
                .map(|i| Pick { element: i, position: i as u8, is_captain: i == 6, ..Default::default() })
                .collect(),
            ..Default::default()
        }
    }

    fn entry(id: u32) -> EntrySummary {
        EntrySummary {
            id,
            player_first_name: "Jane".into(),
            player_last_name: "Doe".into(),
            ..Default::default()
        }
    }

    #[test]
    fn team_load_derives_formation() {
        let mut team = TeamState::default();
        team.load(entry(7), EntryHistory::default(), Some(picks(15, 3)), Some(&dataset()));
        let formation = team.formation.as_ref().unwrap();
        assert_eq!(formation.label, "3-5-2");
        assert_eq!(formation.captain().map(|p| p.element), Some(6));
        assert!(team.formation_error.is_none());
        assert_eq!(team.identicon().unwrap().initials.as_deref(), Some("JD"));
    }

    #[test]
    fn short_squad_reports_error_instead_of_pitch() {
        let mut team = TeamState::default();
        team.load(entry(7), EntryHistory::default(), Some(picks(9, 3)), Some(&dataset()));
        assert!(team.formation.is_none());
        assert!(team.formation_error.as_deref().unwrap().contains("9 picks"));
    }

    #[test]
    fn selection_is_clamped_to_squad() {
        let mut team = TeamState::default();
        team.load(entry(7), EntryHistory::default(), Some(picks(15, 3)), None);
        for _ in 0..20 {
            team.select_next();
        }
        assert_eq!(team.selected_pick().map(|p| p.element), Some(15));
        team.select_prev();
        assert_eq!(team.selected, 13);

        team.load(entry(8), EntryHistory::default(), Some(picks(15, 3)), None);
        assert_eq!(team.selected, 0, "new manager resets the cursor");
    }

    #[test]
    fn fixtures_window_starts_at_next_gameweek() {
        let status = GameweekStatus {
            current: Some(Event { id: 10, ..Default::default() }),
            next: Some(Event { id: 11, ..Default::default() }),
        };
        let fixtures = vec![Fixture {
            id: 1,
            event: Some(11),
            team_h: 1,
            team_a: 2,
            team_h_difficulty: 2,
            team_a_difficulty: 4,
            ..Default::default()
        }];
        let mut state = FixturesState::default();
        state.load(&fixtures, &status, &dataset());
        assert_eq!(state.start_gw, 11);
        assert_eq!(state.window.len(), 3);
        assert!(state.window.values().all(|slots| slots.len() == DEFAULT_WINDOW_SIZE));
        assert_eq!(state.ranking.len(), 3);

        let season_over = GameweekStatus { current: Some(Event { id: 38, ..Default::default() }), next: None };
        assert_eq!(window_start(&season_over), 39);
        assert_eq!(window_start(&GameweekStatus::default()), 1);
    }

    #[test]
    fn league_paging_follows_has_next() {
        let mut league = LeagueState::default();
        assert_eq!(league.next_page(), None);
        league.load(LeagueStandings {
            league_id: 314,
            page: 1,
            has_next: true,
            entries: vec![LeagueStandingEntry::default(); 3],
            ..Default::default()
        });
        assert_eq!(league.next_page(), Some(2));
        assert_eq!(league.prev_page(), None);

        league.select_next();
        league.select_next();
        league.select_next();
        assert_eq!(league.selected, 2);

        league.load(LeagueStandings { league_id: 314, page: 2, entries: vec![LeagueStandingEntry::default()], ..Default::default() });
        assert_eq!(league.selected, 0);
        assert_eq!(league.next_page(), None);
        assert_eq!(league.prev_page(), Some(1));
    }

    #[test]
    fn rival_differentials_go_both_ways() {
        let mine = GameweekPicks {
            event: 4,
            picks: [1, 2, 3].iter().map(|&element| Pick { element, ..Default::default() }).collect(),
            ..Default::default()
        };
        let theirs = GameweekPicks {
            event: 4,
            picks: [3, 4, 5].iter().map(|&element| Pick { element, ..Default::default() }).collect(),
            ..Default::default()
        };
        let mut rival = RivalState::default();
        rival.load(9, "Rival FC".into(), &mine, &theirs);
        let ids = |p: &[Pick]| p.iter().map(|p| p.element).collect::<Vec<_>>();
        assert_eq!(ids(&rival.theirs_only), vec![4, 5]);
        assert_eq!(ids(&rival.mine_only), vec![1, 2]);
        assert_eq!(rival.gameweek, 4);
    }

    #[test]
    fn prompt_collects_and_clears_input() {
        let mut prompt = PromptState::default();
        prompt.open();
        for c in "123x".chars() {
            prompt.push(c);
        }
        prompt.backspace();
        assert_eq!(prompt.submit(), "123");
        assert!(!prompt.active);
        assert!(prompt.input.is_empty());
    }
}
