use crate::fpl::{
    BootstrapResponse, ElementSummaryResponse, EntryResponse, FplElement, FplEvent, FplFixture,
    FplPick, FplTeam, HistoryResponse, PicksResponse, StandingsResponse,
};
use crate::gameweek::{DeadlineOverrides, GameweekStatus, resolve_status};
use crate::{
    ChipPlay, ClassicLeague, EntryHistory, EntrySummary, Event, Fixture, GameweekHistory,
    GameweekPicks, LeagueStandingEntry, LeagueStandings, Pick, Player, PlayerGameweek,
    PlayerSummary, Position, SeasonStats, StaticDataset, Team, UpcomingFixture,
};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

pub type ApiResult<T> = Result<T, ApiError>;

pub const FPL_API_BASE: &str = "https://fantasy.premierleague.com/api";

/// Fantasy Premier League API client.
///
/// Requests go to `{proxy}{base_url}{path}`. The proxy prefix is empty unless
/// a relay such as `https://corsproxy.io/?` is configured.
#[derive(Debug, Clone)]
pub struct FplApi {
    client: Client,
    timeout: Duration,
    base_url: String,
    proxy: String,
}

impl Default for FplApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("fpltui/0.1 (terminal fpl dashboard)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            base_url: FPL_API_BASE.to_string(),
            proxy: String::new(),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl FplApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = proxy.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reference dump: every club, player and gameweek. Deadlines are as
    /// reported upstream; [`StaticDataCache`] applies the overrides.
    pub async fn fetch_bootstrap(&self) -> ApiResult<StaticDataset> {
        let raw: BootstrapResponse = self.get("/bootstrap-static/").await?;
        Ok(map_bootstrap(raw))
    }

    pub async fn fetch_entry(&self, entry_id: u32) -> ApiResult<EntrySummary> {
        let raw: EntryResponse = self.get(&format!("/entry/{entry_id}/")).await?;
        Ok(map_entry(raw))
    }

    pub async fn fetch_entry_history(&self, entry_id: u32) -> ApiResult<EntryHistory> {
        let raw: HistoryResponse = self.get(&format!("/entry/{entry_id}/history/")).await?;
        Ok(map_history(raw))
    }

    /// Squad for one gameweek, in squad order.
    pub async fn fetch_picks(&self, entry_id: u32, gameweek: u8) -> ApiResult<GameweekPicks> {
        let raw: PicksResponse = self
            .get(&format!("/entry/{entry_id}/event/{gameweek}/picks/"))
            .await?;
        Ok(map_picks(gameweek, raw))
    }

    /// Both managers' squads, requested concurrently.
    pub async fn fetch_picks_pair(
        &self,
        entry_id: u32,
        rival_id: u32,
        gameweek: u8,
    ) -> ApiResult<(GameweekPicks, GameweekPicks)> {
        tokio::try_join!(
            self.fetch_picks(entry_id, gameweek),
            self.fetch_picks(rival_id, gameweek)
        )
    }

    pub async fn fetch_league_standings(&self, league_id: u32, page: u32) -> ApiResult<LeagueStandings> {
        let page = page.max(1);
        let raw: StandingsResponse = self
            .get(&format!(
                "/leagues-classic/{league_id}/standings/?page_new_entries=1&page_standings={page}&phase=1"
            ))
            .await?;
        Ok(map_standings(league_id, page, raw))
    }

    pub async fn fetch_player_summary(&self, player_id: u32) -> ApiResult<PlayerSummary> {
        let raw: ElementSummaryResponse =
            self.get(&format!("/element-summary/{player_id}/")).await?;
        Ok(map_element_summary(player_id, raw))
    }

    pub async fn fetch_fixtures(&self) -> ApiResult<Vec<Fixture>> {
        let raw: Vec<FplFixture> = self.get("/fixtures/").await?;
        Ok(raw.iter().map(map_fixture).collect())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.proxy, self.base_url, path)
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url));
        }

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url)),
            Err(e) => Err(ApiError::Api(e, url)),
        }
    }
}

// ---------------------------------------------------------------------------
// Fetch-once static data
// ---------------------------------------------------------------------------

/// Memoizing handle over the bootstrap dataset.
///
/// The first `get` fetches and patches deadlines; every caller, including
/// ones that arrive while that fetch is in flight, shares the result. A failed
/// fetch leaves the cache empty so the next `get` tries again.
#[derive(Debug)]
pub struct StaticDataCache {
    api: FplApi,
    overrides: DeadlineOverrides,
    cell: OnceCell<Arc<StaticDataset>>,
}

impl StaticDataCache {
    pub fn new(api: FplApi, overrides: DeadlineOverrides) -> Self {
        Self { api, overrides, cell: OnceCell::new() }
    }

    pub fn api(&self) -> &FplApi {
        &self.api
    }

    pub fn overrides(&self) -> &DeadlineOverrides {
        &self.overrides
    }

    pub async fn get(&self) -> ApiResult<Arc<StaticDataset>> {
        self.cell
            .get_or_try_init(|| async {
                debug!("loading bootstrap data");
                let mut dataset = self.api.fetch_bootstrap().await?;
                self.overrides.apply(&mut dataset.events);
                Ok::<_, ApiError>(Arc::new(dataset))
            })
            .await
            .cloned()
    }

    /// The dataset if it has already been loaded.
    pub fn peek(&self) -> Option<Arc<StaticDataset>> {
        self.cell.get().cloned()
    }

    /// Drop the loaded dataset; the next `get` fetches again.
    pub fn reload(&mut self) {
        self.cell = OnceCell::new();
    }

    /// Gameweek status from whatever is loaded, falling back to overrides.
    pub fn status(&self, now: DateTime<Utc>) -> GameweekStatus {
        resolve_status(self.peek().as_deref(), &self.overrides, now)
    }
}

// ---------------------------------------------------------------------------
// Mapping: FPL wire types → clean domain types
// ---------------------------------------------------------------------------

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_decimal(raw: Option<&str>) -> f32 {
    raw.and_then(|s| s.trim().parse::<f32>().ok()).unwrap_or_default()
}

fn map_bootstrap(raw: BootstrapResponse) -> StaticDataset {
    StaticDataset {
        events: raw.events.iter().map(map_event).collect(),
        teams: raw.teams.iter().map(map_team).collect(),
        players: raw.elements.iter().filter_map(map_element).collect(),
    }
}

fn map_event(e: &FplEvent) -> Event {
    Event {
        id: e.id,
        name: e.name.clone(),
        deadline_time: parse_timestamp(e.deadline_time.as_deref()),
        is_previous: e.is_previous,
        is_current: e.is_current,
        is_next: e.is_next,
        finished: e.finished,
        average_entry_score: e.average_entry_score,
        highest_score: e.highest_score,
        most_captained: e.most_captained,
    }
}

fn map_team(t: &FplTeam) -> Team {
    Team {
        id: t.id,
        code: t.code,
        name: t.name.clone(),
        short_name: t.short_name.clone(),
        strength_defence_home: t.strength_defence_home,
        strength_defence_away: t.strength_defence_away,
    }
}

/// Elements with an element_type outside 1..=4 (e.g. managers) are dropped.
fn map_element(el: &FplElement) -> Option<Player> {
    let Some(position) = Position::from_element_type(el.element_type) else {
        warn!("skipping element {} with element_type {}", el.id, el.element_type);
        return None;
    };
    Some(Player {
        id: el.id,
        code: el.code,
        team: el.team,
        position,
        web_name: el.web_name.clone(),
        first_name: el.first_name.clone(),
        second_name: el.second_name.clone(),
        now_cost: el.now_cost,
        stats: SeasonStats {
            total_points: el.total_points,
            goals_scored: el.goals_scored,
            assists: el.assists,
            bonus: el.bonus,
            form: parse_decimal(el.form.as_deref()),
            selected_by_percent: parse_decimal(el.selected_by_percent.as_deref()),
        },
    })
}

fn map_entry(raw: EntryResponse) -> EntrySummary {
    EntrySummary {
        id: raw.id,
        name: raw.name,
        player_first_name: raw.player_first_name,
        player_last_name: raw.player_last_name,
        current_event: raw.current_event,
        overall_points: raw.summary_overall_points.unwrap_or_default(),
        overall_rank: raw.summary_overall_rank,
        event_points: raw.summary_event_points.unwrap_or_default(),
        last_deadline_value: raw.last_deadline_value,
        last_deadline_bank: raw.last_deadline_bank,
        classic_leagues: raw
            .leagues
            .classic
            .into_iter()
            .map(|l| ClassicLeague { id: l.id, name: l.name, entry_rank: l.entry_rank })
            .collect(),
    }
}

fn map_history(raw: HistoryResponse) -> EntryHistory {
    EntryHistory {
        gameweeks: raw
            .current
            .into_iter()
            .map(|h| GameweekHistory {
                event: h.event,
                points: h.points,
                total_points: h.total_points,
                overall_rank: h.overall_rank,
                bank: h.bank,
                value: h.value,
                event_transfers: h.event_transfers,
                event_transfers_cost: h.event_transfers_cost,
                points_on_bench: h.points_on_bench,
            })
            .collect(),
        chips: raw
            .chips
            .into_iter()
            .map(|c| ChipPlay { name: c.name, event: c.event })
            .collect(),
    }
}

fn map_pick(p: &FplPick) -> Pick {
    Pick {
        element: p.element,
        position: p.position,
        multiplier: p.multiplier,
        is_captain: p.is_captain,
        is_vice_captain: p.is_vice_captain,
    }
}

/// Picks keep the order of the response.
fn map_picks(gameweek: u8, raw: PicksResponse) -> GameweekPicks {
    let (event, points) = raw
        .entry_history
        .map(|h| (h.event, h.points))
        .unwrap_or((gameweek, 0));
    GameweekPicks {
        event,
        active_chip: raw.active_chip,
        points,
        picks: raw.picks.iter().map(map_pick).collect(),
    }
}

fn map_standings(league_id: u32, page: u32, raw: StandingsResponse) -> LeagueStandings {
    LeagueStandings {
        league_id: if raw.league.id == 0 { league_id } else { raw.league.id },
        league_name: raw.league.name,
        page: if raw.standings.page == 0 { page } else { raw.standings.page },
        has_next: raw.standings.has_next,
        entries: raw
            .standings
            .results
            .into_iter()
            .map(|r| LeagueStandingEntry {
                entry: r.entry,
                entry_name: r.entry_name,
                player_name: r.player_name,
                rank: r.rank,
                last_rank: r.last_rank,
                event_total: r.event_total,
                total: r.total,
            })
            .collect(),
    }
}

fn map_element_summary(player_id: u32, raw: ElementSummaryResponse) -> PlayerSummary {
    PlayerSummary {
        player_id,
        fixtures: raw
            .fixtures
            .iter()
            .map(|f| UpcomingFixture {
                event: f.event,
                opponent: if f.is_home { f.team_a } else { f.team_h },
                is_home: f.is_home,
                difficulty: f.difficulty,
            })
            .collect(),
        history: raw
            .history
            .iter()
            .map(|h| PlayerGameweek {
                round: h.round,
                opponent_team: h.opponent_team,
                total_points: h.total_points,
                minutes: h.minutes,
                goals_scored: h.goals_scored,
                assists: h.assists,
            })
            .collect(),
    }
}

fn map_fixture(f: &FplFixture) -> Fixture {
    Fixture {
        id: f.id,
        event: f.event,
        team_h: f.team_h,
        team_a: f.team_a,
        team_h_difficulty: f.team_h_difficulty,
        team_a_difficulty: f.team_a_difficulty,
        kickoff_time: parse_timestamp(f.kickoff_time.as_deref()),
        finished: f.finished,
        score: f.team_h_score.zip(f.team_a_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::{Matcher, Server};

    const BOOTSTRAP: &str = r#"{
        "events": [
            {"id": 23, "name": "Gameweek 23", "deadline_time": "2026-01-24T12:00:00Z",
             "finished": true, "is_previous": true, "is_current": false, "is_next": false},
            {"id": 24, "name": "Gameweek 24", "deadline_time": "2026-01-31T11:00:00Z",
             "finished": false, "is_previous": false, "is_current": true, "is_next": false,
             "most_captained": 328},
            {"id": 25, "name": "Gameweek 25", "deadline_time": "2026-02-07T11:00:00Z",
             "finished": false, "is_previous": false, "is_current": false, "is_next": true}
        ],
        "teams": [
            {"id": 1, "code": 3, "name": "Arsenal", "short_name": "ARS",
             "strength_defence_home": 1300, "strength_defence_away": 1340},
            {"id": 12, "code": 14, "name": "Liverpool", "short_name": "LIV",
             "strength_defence_home": 1290, "strength_defence_away": 1310}
        ],
        "elements": [
            {"id": 328, "code": 118748, "team": 12, "element_type": 3, "web_name": "M.Salah",
             "first_name": "Mohamed", "second_name": "Salah", "now_cost": 145,
             "total_points": 180, "goals_scored": 15, "assists": 10, "bonus": 25,
             "form": "7.4", "selected_by_percent": "61.2"},
            {"id": 999, "code": 1, "team": 1, "element_type": 5, "web_name": "Arteta"}
        ]
    }"#;

    fn api_for(server: &Server) -> FplApi {
        FplApi::new().with_base_url(server.url())
    }

    #[test]
    fn element_type_maps_to_position() {
        assert_eq!(Position::from_element_type(1), Some(Position::Goalkeeper));
        assert_eq!(Position::from_element_type(4), Some(Position::Forward));
        assert_eq!(Position::from_element_type(5), None);
        assert_eq!(Position::from_element_type(0), None);
    }

    #[test]
    fn decimal_strings_parse_leniently() {
        assert_eq!(parse_decimal(Some("5.2")), 5.2);
        assert_eq!(parse_decimal(Some("")), 0.0);
        assert_eq!(parse_decimal(None), 0.0);
    }

    #[test]
    fn fixture_score_needs_both_sides() {
        let raw = FplFixture {
            id: 1,
            event: Some(3),
            team_h: 1,
            team_a: 2,
            team_h_score: Some(2),
            team_a_score: None,
            kickoff_time: Some("2025-08-30T14:00:00Z".into()),
            ..Default::default()
        };
        let fixture = map_fixture(&raw);
        assert_eq!(fixture.score, None);
        assert_eq!(
            fixture.kickoff_time,
            Some(Utc.with_ymd_and_hms(2025, 8, 30, 14, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn bootstrap_maps_dataset() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/bootstrap-static/")
            .with_header("content-type", "application/json")
            .with_body(BOOTSTRAP)
            .create_async()
            .await;

        let dataset = api_for(&server).fetch_bootstrap().await.unwrap();
        assert_eq!(dataset.events.len(), 3);
        assert_eq!(dataset.teams.len(), 2);
        assert_eq!(dataset.players.len(), 1, "element_type 5 is dropped");

        let salah = dataset.player(328).unwrap();
        assert_eq!(salah.position, Position::Midfielder);
        assert_eq!(salah.stats.form, 7.4);
        assert_eq!(salah.price(), 14.5);
        assert_eq!(dataset.team_by_code(14).map(|t| t.short_name.as_str()), Some("LIV"));
        assert_eq!(dataset.current_event().map(|e| e.id), Some(24));
    }

    #[tokio::test]
    async fn cache_fetches_once_and_applies_overrides() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/bootstrap-static/")
            .with_header("content-type", "application/json")
            .with_body(BOOTSTRAP)
            .expect(1)
            .create_async()
            .await;

        let override_deadline = Utc.with_ymd_and_hms(2026, 1, 31, 13, 30, 0).unwrap();
        let overrides = DeadlineOverrides::new("2025/26").with_deadline(24, override_deadline);
        let cache = StaticDataCache::new(api_for(&server), overrides);
        assert!(cache.peek().is_none());

        let (a, b) = tokio::join!(cache.get(), cache.get());
        let (a, b) = (a.unwrap(), b.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
        let again = cache.get().await.unwrap();
        assert!(Arc::ptr_eq(&a, &again));
        mock.assert_async().await;

        assert_eq!(a.event(24).unwrap().deadline_time, Some(override_deadline));
        assert_eq!(
            a.event(25).unwrap().deadline_time,
            Some(Utc.with_ymd_and_hms(2026, 2, 7, 11, 0, 0).unwrap())
        );

        let status = cache.status(Utc.with_ymd_and_hms(2026, 1, 30, 0, 0, 0).unwrap());
        assert_eq!(status.current.map(|e| e.id), Some(24));
        assert_eq!(status.next.map(|e| e.id), Some(25));
    }

    #[tokio::test]
    async fn cache_retries_after_failure() {
        let mut server = Server::new_async().await;
        let failing = server
            .mock("GET", "/bootstrap-static/")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let cache = StaticDataCache::new(api_for(&server), DeadlineOverrides::default());
        let err = cache.get().await.unwrap_err();
        assert!(matches!(err, ApiError::Api(_, _)), "got {err}");
        assert!(cache.peek().is_none());
        failing.assert_async().await;
        failing.remove_async().await;

        server
            .mock("GET", "/bootstrap-static/")
            .with_header("content-type", "application/json")
            .with_body(BOOTSTRAP)
            .create_async()
            .await;
        assert!(cache.get().await.is_ok());
        assert!(cache.peek().is_some());
    }

    #[tokio::test]
    async fn status_without_dataset_uses_override_fallback() {
        let server = Server::new_async().await;
        let overrides = DeadlineOverrides::new("2025/26")
            .with_deadline(24, Utc.with_ymd_and_hms(2026, 1, 31, 13, 30, 0).unwrap());
        let cache = StaticDataCache::new(api_for(&server), overrides);
        let status = cache.status(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert!(status.current.is_none());
        assert_eq!(status.next.map(|e| e.id), Some(24));
    }

    #[tokio::test]
    async fn entry_not_found_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/entry/1/")
            .with_status(404)
            .create_async()
            .await;

        let err = api_for(&server).fetch_entry(1).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "got {err}");
    }

    #[tokio::test]
    async fn malformed_body_is_a_parsing_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/fixtures/")
            .with_header("content-type", "application/json")
            .with_body("{\"not\": \"an array\"}")
            .create_async()
            .await;

        let err = api_for(&server).fetch_fixtures().await.unwrap_err();
        assert!(matches!(err, ApiError::Parsing(_, _)), "got {err}");
    }

    #[tokio::test]
    async fn picks_keep_response_order() {
        let mut server = Server::new_async().await;
        let body = r#"{
            "active_chip": null,
            "entry_history": {"event": 24, "points": 61},
            "picks": [
                {"element": 5, "position": 1, "multiplier": 1, "is_captain": false, "is_vice_captain": false},
                {"element": 328, "position": 2, "multiplier": 2, "is_captain": true, "is_vice_captain": false},
                {"element": 7, "position": 3, "multiplier": 1, "is_captain": false, "is_vice_captain": true}
            ]
        }"#;
        server
            .mock("GET", "/entry/42/event/24/picks/")
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let picks = api_for(&server).fetch_picks(42, 24).await.unwrap();
        assert_eq!(picks.points, 61);
        let order: Vec<u32> = picks.picks.iter().map(|p| p.element).collect();
        assert_eq!(order, vec![5, 328, 7]);
        assert!(picks.picks[1].is_captain);
        assert!(picks.picks[2].is_vice_captain);
    }

    #[tokio::test]
    async fn picks_pair_joins_both_requests() {
        let mut server = Server::new_async().await;
        for (entry, element) in [(1, 10), (2, 20)] {
            server
                .mock("GET", format!("/entry/{entry}/event/5/picks/").as_str())
                .with_header("content-type", "application/json")
                .with_body(format!(r#"{{"picks": [{{"element": {element}, "position": 1}}]}}"#))
                .expect(1)
                .create_async()
                .await;
        }

        let (mine, rival) = api_for(&server).fetch_picks_pair(1, 2, 5).await.unwrap();
        assert_eq!(mine.picks[0].element, 10);
        assert_eq!(rival.picks[0].element, 20);
        assert_eq!(mine.event, 5);
    }

    #[tokio::test]
    async fn standings_page_maps_entries() {
        let mut server = Server::new_async().await;
        let body = r#"{
            "league": {"id": 314, "name": "Overall"},
            "standings": {"has_next": true, "page": 2, "results": [
                {"entry": 9, "entry_name": "Klopp's Kids", "player_name": "Ann Lee",
                 "rank": 51, "last_rank": 60, "event_total": 70, "total": 1500}
            ]}
        }"#;
        server
            .mock("GET", "/leagues-classic/314/standings/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page_standings".into(), "2".into()),
                Matcher::UrlEncoded("phase".into(), "1".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let standings = api_for(&server).fetch_league_standings(314, 2).await.unwrap();
        assert_eq!(standings.league_name, "Overall");
        assert!(standings.has_next);
        assert_eq!(standings.entries.len(), 1);
        assert_eq!(standings.entries[0].movement(), 9);
    }

    #[tokio::test]
    async fn empty_league_is_not_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/leagues-classic/7/standings/")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(r#"{"league": {"id": 7, "name": "New"}, "standings": {"has_next": false, "page": 1, "results": []}}"#)
            .create_async()
            .await;

        let standings = api_for(&server).fetch_league_standings(7, 1).await.unwrap();
        assert!(standings.entries.is_empty());
    }

    #[tokio::test]
    async fn proxy_prefix_is_prepended() {
        let mut server = Server::new_async().await;
        // Relay of the form http://relay/?<upstream-url>
        let upstream = "https://fantasy.premierleague.com/api";
        server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .expect(1)
            .create_async()
            .await;

        let api = FplApi::new()
            .with_base_url(upstream)
            .with_proxy(format!("{}/?", server.url()));
        assert_eq!(api.url("/fixtures/"), format!("{}/?{upstream}/fixtures/", server.url()));
        assert!(api.fetch_fixtures().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn player_summary_resolves_opponents() {
        let mut server = Server::new_async().await;
        let body = r#"{
            "fixtures": [{"event": 25, "team_h": 12, "team_a": 1, "is_home": true, "difficulty": 4}],
            "history": [
                {"round": 23, "opponent_team": 3, "total_points": 2, "minutes": 90},
                {"round": 24, "opponent_team": 4, "total_points": 13, "minutes": 90, "goals_scored": 2}
            ]
        }"#;
        server
            .mock("GET", "/element-summary/328/")
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let summary = api_for(&server).fetch_player_summary(328).await.unwrap();
        assert_eq!(summary.fixtures[0].opponent, 1);
        assert_eq!(summary.recent_points(1), 13);
        assert_eq!(summary.recent_points(5), 15);
    }

    #[tokio::test]
    async fn entry_and_history_map_summary_fields() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/entry/35868/")
            .with_header("content-type", "application/json")
            .with_body(r#"{
                "id": 35868, "name": "Route One", "player_first_name": "Sam",
                "player_last_name": "Kerr", "current_event": 24,
                "summary_overall_points": 1402, "summary_overall_rank": 120345,
                "summary_event_points": 58, "last_deadline_value": 1024,
                "last_deadline_bank": 5,
                "leagues": {"classic": [{"id": 314, "name": "Overall", "entry_rank": 120345}]}
            }"#)
            .create_async()
            .await;
        server
            .mock("GET", "/entry/35868/history/")
            .with_header("content-type", "application/json")
            .with_body(r#"{
                "current": [
                    {"event": 1, "points": 70, "total_points": 70},
                    {"event": 2, "points": 88, "total_points": 158, "points_on_bench": 9}
                ],
                "chips": [{"name": "wildcard", "event": 2}]
            }"#)
            .create_async()
            .await;

        let api = api_for(&server);
        let entry = api.fetch_entry(35868).await.unwrap();
        assert_eq!(entry.manager_name(), "Sam Kerr");
        assert_eq!(entry.team_value(), Some(102.4));
        assert_eq!(entry.classic_leagues[0].id, 314);

        let history = api.fetch_entry_history(35868).await.unwrap();
        assert_eq!(history.best_gameweek().map(|g| g.event), Some(2));
        assert_eq!(history.chips[0].name, "wildcard");
    }
}
