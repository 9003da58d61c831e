use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use fpl_api::gameweek::GameweekStatus;
use fpl_api::{
    EntryHistory, EntrySummary, Fixture, GameweekPicks, LeagueStandings, PlayerSummary,
    StaticDataset,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadStaticData,
    LoadTeam { entry_id: u32 },
    LoadLeague { league_id: u32, page: u32 },
    LoadRival { entry_id: u32, rival_id: u32, rival_name: String, gameweek: u8 },
    LoadPlayer { player_id: u32 },
    /// Drop cached bootstrap data and fetch it again.
    Reload,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    StaticDataLoaded { dataset: Arc<StaticDataset>, status: GameweekStatus },
    /// Bootstrap failed; status resolved from deadline overrides alone.
    StatusResolved { status: GameweekStatus },
    FixturesLoaded { fixtures: Vec<Fixture> },
    TeamLoaded {
        entry: EntrySummary,
        history: EntryHistory,
        /// None before the manager's first deadline.
        picks: Option<GameweekPicks>,
    },
    LeagueLoaded { standings: LeagueStandings },
    RivalLoaded {
        rival_id: u32,
        rival_name: String,
        mine: GameweekPicks,
        theirs: GameweekPicks,
    },
    PlayerLoaded { summary: PlayerSummary },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    ClockTick,
}
