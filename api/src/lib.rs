pub mod client;
pub mod differential;
pub mod fixtures;
pub mod fpl;
pub mod gameweek;
pub mod identicon;
pub mod input;
pub mod squad;

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Domain types, independent of the FPL wire format
// ---------------------------------------------------------------------------

/// Reference data from one bootstrap load: every club, player and gameweek.
#[derive(Debug, Clone, Default)]
pub struct StaticDataset {
    pub events: Vec<Event>,
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
}

impl StaticDataset {
    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn team(&self, id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_by_code(&self, code: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.code == code)
    }

    pub fn event(&self, id: u8) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn current_event(&self) -> Option<&Event> {
        self.events.iter().find(|e| e.is_current)
    }

    pub fn next_event(&self) -> Option<&Event> {
        self.events.iter().find(|e| e.is_next)
    }

    pub fn position_of(&self, player_id: u32) -> Option<Position> {
        self.player(player_id).map(|p| p.position)
    }

    pub fn team_ids(&self) -> Vec<u32> {
        self.teams.iter().map(|t| t.id).collect()
    }
}

/// A gameweek.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub id: u8,
    pub name: String,
    pub deadline_time: Option<DateTime<Utc>>,
    pub is_previous: bool,
    pub is_current: bool,
    pub is_next: bool,
    pub finished: bool,
    pub average_entry_score: Option<u32>,
    pub highest_score: Option<u32>,
    pub most_captained: Option<u32>,
}

/// A Premier League club.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    pub id: u32,
    pub code: u32,
    pub name: String,       // "Manchester City"
    pub short_name: String, // "MCI"
    pub strength_defence_home: u32,
    pub strength_defence_away: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    #[default]
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Upstream `element_type`: 1=GK, 2=DEF, 3=MID, 4=FWD.
    pub fn from_element_type(element_type: u8) -> Option<Self> {
        match element_type {
            1 => Some(Position::Goalkeeper),
            2 => Some(Position::Defender),
            3 => Some(Position::Midfielder),
            4 => Some(Position::Forward),
            _ => None,
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GKP",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub id: u32,
    pub code: u32, // photo key
    pub team: u32,
    pub position: Position,
    pub web_name: String,
    pub first_name: String,
    pub second_name: String,
    pub now_cost: u16, // tenths of £m
    pub stats: SeasonStats,
}

impl Player {
    pub fn price(&self) -> f32 {
        f32::from(self.now_cost) / 10.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonStats {
    pub total_points: i32,
    pub goals_scored: u16,
    pub assists: u16,
    pub bonus: u16,
    pub form: f32,
    pub selected_by_percent: f32,
}

/// One slot of a manager's 15-man squad for a gameweek.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pick {
    pub element: u32,
    pub position: u8, // 1..=15; 1-11 start, 12-15 bench in priority order
    pub multiplier: u8,
    pub is_captain: bool,
    pub is_vice_captain: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameweekPicks {
    pub event: u8,
    pub active_chip: Option<String>,
    pub points: i32,
    pub picks: Vec<Pick>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixture {
    pub id: u32,
    pub event: Option<u8>, // None = not yet scheduled
    pub team_h: u32,
    pub team_a: u32,
    pub team_h_difficulty: u8,
    pub team_a_difficulty: u8,
    pub kickoff_time: Option<DateTime<Utc>>,
    pub finished: bool,
    pub score: Option<(u8, u8)>, // (home, away)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueStandingEntry {
    pub entry: u32,
    pub entry_name: String,
    pub player_name: String,
    pub rank: u32,
    pub last_rank: u32,
    pub event_total: i32,
    pub total: i32,
}

impl LeagueStandingEntry {
    /// Positive when the manager climbed since last gameweek.
    pub fn movement(&self) -> i64 {
        if self.last_rank == 0 {
            return 0;
        }
        i64::from(self.last_rank) - i64::from(self.rank)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeagueStandings {
    pub league_id: u32,
    pub league_name: String,
    pub page: u32,
    pub has_next: bool,
    pub entries: Vec<LeagueStandingEntry>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassicLeague {
    pub id: u32,
    pub name: String,
    pub entry_rank: Option<u32>,
}

/// A manager's entry (their FPL "team").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntrySummary {
    pub id: u32,
    pub name: String,
    pub player_first_name: String,
    pub player_last_name: String,
    pub current_event: Option<u8>,
    pub overall_points: i32,
    pub overall_rank: Option<u32>,
    pub event_points: i32,
    pub last_deadline_value: Option<u16>, // tenths of £m
    pub last_deadline_bank: Option<u16>,
    pub classic_leagues: Vec<ClassicLeague>,
}

impl EntrySummary {
    pub fn manager_name(&self) -> String {
        format!("{} {}", self.player_first_name, self.player_last_name)
            .trim()
            .to_string()
    }

    pub fn team_value(&self) -> Option<f32> {
        self.last_deadline_value.map(|v| f32::from(v) / 10.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameweekHistory {
    pub event: u8,
    pub points: i32,
    pub total_points: i32,
    pub overall_rank: Option<u32>,
    pub bank: u16,
    pub value: u16,
    pub event_transfers: u16,
    pub event_transfers_cost: u16,
    pub points_on_bench: i32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChipPlay {
    pub name: String,
    pub event: u8,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryHistory {
    pub gameweeks: Vec<GameweekHistory>,
    pub chips: Vec<ChipPlay>,
}

impl EntryHistory {
    pub fn best_gameweek(&self) -> Option<&GameweekHistory> {
        self.gameweeks.iter().max_by_key(|g| g.points)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpcomingFixture {
    pub event: Option<u8>,
    pub opponent: u32,
    pub is_home: bool,
    pub difficulty: u8,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerGameweek {
    pub round: u8,
    pub opponent_team: u32,
    pub total_points: i32,
    pub minutes: u16,
    pub goals_scored: u16,
    pub assists: u16,
}

/// Per-player detail fetched on demand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerSummary {
    pub player_id: u32,
    pub fixtures: Vec<UpcomingFixture>,
    pub history: Vec<PlayerGameweek>,
}

impl PlayerSummary {
    /// Points over the most recent `n` gameweeks played.
    pub fn recent_points(&self, n: usize) -> i32 {
        self.history.iter().rev().take(n).map(|h| h.total_points).sum()
    }
}
