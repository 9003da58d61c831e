use crate::state::messages::{NetworkRequest, NetworkResponse};
use chrono::Utc;
use fpl_api::client::{ApiError, StaticDataCache};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

pub struct NetworkWorker {
    cache: StaticDataCache,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        cache: StaticDataCache,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            cache,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadStaticData => self.handle_load_static().await,
                NetworkRequest::Reload => {
                    debug!("reloading bootstrap data");
                    self.cache.reload();
                    self.handle_load_static().await
                }
                NetworkRequest::LoadTeam { entry_id } => self.handle_load_team(entry_id).await,
                NetworkRequest::LoadLeague { league_id, page } => {
                    self.handle_load_league(league_id, page).await
                }
                NetworkRequest::LoadRival { entry_id, rival_id, rival_name, gameweek } => {
                    self.handle_load_rival(entry_id, rival_id, rival_name, gameweek).await
                }
                NetworkRequest::LoadPlayer { player_id } => self.handle_load_player(player_id).await,
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    /// Sends the dataset, or on bootstrap failure the override-resolved
    /// status, before fixtures are fetched.
    async fn handle_load_static(&self) -> Result<NetworkResponse, ApiError> {
        debug!("loading bootstrap data");
        let dataset = match self.cache.get().await {
            Ok(dataset) => dataset,
            Err(e) => {
                let status = self.cache.status(Utc::now());
                let _ = self.responses.send(NetworkResponse::StatusResolved { status }).await;
                return Err(e);
            }
        };
        let status = self.cache.status(Utc::now());
        let _ = self
            .responses
            .send(NetworkResponse::StaticDataLoaded { dataset, status })
            .await;

        debug!("loading fixtures");
        let fixtures = self.cache.api().fetch_fixtures().await?;
        Ok(NetworkResponse::FixturesLoaded { fixtures })
    }

    async fn handle_load_team(&self, entry_id: u32) -> Result<NetworkResponse, ApiError> {
        debug!("loading entry {entry_id}");
        // Picks are keyed by gameweek, so the bootstrap has to be in first.
        self.cache.get().await?;
        let api = self.cache.api();
        let entry = api.fetch_entry(entry_id).await?;
        let history = api.fetch_entry_history(entry_id).await?;

        let gameweek = entry
            .current_event
            .or_else(|| self.cache.status(Utc::now()).current.map(|e| e.id));
        let picks = match gameweek {
            Some(gw) => match api.fetch_picks(entry_id, gw).await {
                Ok(picks) => Some(picks),
                Err(ApiError::NotFound(url)) => {
                    debug!("no picks yet at {url}");
                    None
                }
                Err(e) => return Err(e),
            },
            None => None,
        };

        Ok(NetworkResponse::TeamLoaded { entry, history, picks })
    }

    async fn handle_load_league(&self, league_id: u32, page: u32) -> Result<NetworkResponse, ApiError> {
        debug!("loading league {league_id} page {page}");
        let standings = self.cache.api().fetch_league_standings(league_id, page).await?;
        Ok(NetworkResponse::LeagueLoaded { standings })
    }

    async fn handle_load_rival(
        &self,
        entry_id: u32,
        rival_id: u32,
        rival_name: String,
        gameweek: u8,
    ) -> Result<NetworkResponse, ApiError> {
        debug!("comparing entry {entry_id} with rival {rival_id} in gameweek {gameweek}");
        let (mine, theirs) = self
            .cache
            .api()
            .fetch_picks_pair(entry_id, rival_id, gameweek)
            .await?;
        Ok(NetworkResponse::RivalLoaded { rival_id, rival_name, mine, theirs })
    }

    async fn handle_load_player(&self, player_id: u32) -> Result<NetworkResponse, ApiError> {
        debug!("loading player summary {player_id}");
        let summary = self.cache.api().fetch_player_summary(player_id).await?;
        Ok(NetworkResponse::PlayerLoaded { summary })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
