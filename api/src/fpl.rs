/// Wire types for the public Fantasy Premier League API.
/// Base: https://fantasy.premierleague.com/api
/// These map to the clean domain types in client.rs.
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Bootstrap  (/bootstrap-static/)
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct BootstrapResponse {
    #[serde(default)]
    pub events: Vec<FplEvent>,
    #[serde(default)]
    pub teams: Vec<FplTeam>,
    #[serde(default)]
    pub elements: Vec<FplElement>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplEvent {
    pub id: u8,
    #[serde(default)]
    pub name: String,
    pub deadline_time: Option<String>, // ISO 8601, UTC
    #[serde(default)]
    pub finished: bool,
    #[serde(default)]
    pub is_previous: bool,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_next: bool,
    pub average_entry_score: Option<u32>,
    pub highest_score: Option<u32>,
    pub most_captained: Option<u32>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplTeam {
    pub id: u32,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub strength_defence_home: u32,
    #[serde(default)]
    pub strength_defence_away: u32,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplElement {
    pub id: u32,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub team: u32,
    #[serde(default)]
    pub element_type: u8,
    #[serde(default)]
    pub web_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub second_name: String,
    #[serde(default)]
    pub now_cost: u16,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub goals_scored: u16,
    #[serde(default)]
    pub assists: u16,
    #[serde(default)]
    pub bonus: u16,
    /// Decimal carried as a string, e.g. "5.2".
    pub form: Option<String>,
    pub selected_by_percent: Option<String>,
}

// ---------------------------------------------------------------------------
// Manager entry  (/entry/{id}/, /entry/{id}/history/, /entry/{id}/event/{gw}/picks/)
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct EntryResponse {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub player_first_name: String,
    #[serde(default)]
    pub player_last_name: String,
    /// Null before the manager's first deadline.
    pub current_event: Option<u8>,
    pub summary_overall_points: Option<i32>,
    pub summary_overall_rank: Option<u32>,
    pub summary_event_points: Option<i32>,
    pub last_deadline_value: Option<u16>,
    pub last_deadline_bank: Option<u16>,
    #[serde(default)]
    pub leagues: EntryLeagues,
}

#[derive(Deserialize, Default, Debug)]
pub struct EntryLeagues {
    #[serde(default)]
    pub classic: Vec<EntryClassicLeague>,
}

#[derive(Deserialize, Default, Debug)]
pub struct EntryClassicLeague {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub entry_rank: Option<u32>,
}

#[derive(Deserialize, Default, Debug)]
pub struct HistoryResponse {
    #[serde(default)]
    pub current: Vec<HistoryRow>,
    #[serde(default)]
    pub chips: Vec<HistoryChip>,
}

#[derive(Deserialize, Default, Debug)]
pub struct HistoryRow {
    pub event: u8,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub total_points: i32,
    pub overall_rank: Option<u32>,
    #[serde(default)]
    pub bank: u16,
    #[serde(default)]
    pub value: u16,
    #[serde(default)]
    pub event_transfers: u16,
    #[serde(default)]
    pub event_transfers_cost: u16,
    #[serde(default)]
    pub points_on_bench: i32,
}

#[derive(Deserialize, Default, Debug)]
pub struct HistoryChip {
    #[serde(default)]
    pub name: String,
    pub event: u8,
}

#[derive(Deserialize, Default, Debug)]
pub struct PicksResponse {
    /// Order matches the squad: 1-11 starting, 12-15 bench.
    #[serde(default)]
    pub picks: Vec<FplPick>,
    pub active_chip: Option<String>,
    pub entry_history: Option<PicksEntryHistory>,
}

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplPick {
    pub element: u32,
    #[serde(default)]
    pub position: u8,
    #[serde(default)]
    pub multiplier: u8,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_vice_captain: bool,
}

#[derive(Deserialize, Default, Debug)]
pub struct PicksEntryHistory {
    pub event: u8,
    #[serde(default)]
    pub points: i32,
}

// ---------------------------------------------------------------------------
// Classic league standings  (/leagues-classic/{id}/standings/)
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct StandingsResponse {
    #[serde(default)]
    pub league: StandingsLeague,
    #[serde(default)]
    pub standings: StandingsPage,
}

#[derive(Deserialize, Default, Debug)]
pub struct StandingsLeague {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Deserialize, Default, Debug)]
pub struct StandingsPage {
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub page: u32,
    /// Empty for a league with no entries yet.
    #[serde(default)]
    pub results: Vec<StandingsRow>,
}

#[derive(Deserialize, Default, Debug)]
pub struct StandingsRow {
    pub entry: u32,
    #[serde(default)]
    pub entry_name: String,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub last_rank: u32,
    #[serde(default)]
    pub event_total: i32,
    #[serde(default)]
    pub total: i32,
}

// ---------------------------------------------------------------------------
// Player summary  (/element-summary/{id}/)
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug)]
pub struct ElementSummaryResponse {
    #[serde(default)]
    pub fixtures: Vec<ElementFixture>,
    #[serde(default)]
    pub history: Vec<ElementHistory>,
}

#[derive(Deserialize, Default, Debug)]
pub struct ElementFixture {
    pub event: Option<u8>,
    #[serde(default)]
    pub team_h: u32,
    #[serde(default)]
    pub team_a: u32,
    #[serde(default)]
    pub is_home: bool,
    #[serde(default)]
    pub difficulty: u8,
}

#[derive(Deserialize, Default, Debug)]
pub struct ElementHistory {
    #[serde(default)]
    pub round: u8,
    #[serde(default)]
    pub opponent_team: u32,
    #[serde(default)]
    pub total_points: i32,
    #[serde(default)]
    pub minutes: u16,
    #[serde(default)]
    pub goals_scored: u16,
    #[serde(default)]
    pub assists: u16,
}

// ---------------------------------------------------------------------------
// Fixtures  (/fixtures/), a top-level array
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default, Debug, Clone)]
pub struct FplFixture {
    pub id: u32,
    /// Null for fixtures postponed without a new date.
    pub event: Option<u8>,
    pub team_h: u32,
    pub team_a: u32,
    #[serde(default)]
    pub team_h_difficulty: u8,
    #[serde(default)]
    pub team_a_difficulty: u8,
    pub kickoff_time: Option<String>,
    #[serde(default)]
    pub finished: bool,
    pub team_h_score: Option<u8>,
    pub team_a_score: Option<u8>,
}
