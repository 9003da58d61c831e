use crate::{Event, StaticDataset};
use chrono::{DateTime, Duration, TimeZone, Utc};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Corrections for gameweek deadlines the upstream API is known to get wrong.
///
/// Keyed by gameweek id and scoped to one season. Once applied to a dataset the
/// override is the deadline for that id; the upstream value is discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeadlineOverrides {
    season: String,
    deadlines: BTreeMap<u8, DateTime<Utc>>,
}

/// (gameweek, year, month, day, hour, minute), all UTC.
/// From GW31 the clocks are on BST, so these are one hour behind UK local time.
const SEASON_2025_26: &[(u8, i32, u32, u32, u32, u32)] = &[
    (21, 2026, 1, 6, 18, 30),
    (22, 2026, 1, 17, 11, 0),
    (23, 2026, 1, 24, 11, 0),
    (24, 2026, 1, 31, 13, 30),
    (25, 2026, 2, 7, 13, 30),
    (26, 2026, 2, 10, 18, 30),
    (27, 2026, 2, 21, 13, 30),
    (28, 2026, 2, 28, 13, 30),
    (29, 2026, 3, 7, 15, 0),
    (30, 2026, 3, 14, 15, 0),
    (31, 2026, 4, 4, 10, 0),
    (32, 2026, 4, 11, 10, 0),
    (33, 2026, 4, 18, 10, 0),
    (34, 2026, 4, 25, 10, 0),
    (35, 2026, 5, 2, 10, 0),
    (36, 2026, 5, 9, 10, 0),
    (37, 2026, 5, 16, 10, 0),
    (38, 2026, 5, 24, 13, 30),
];

impl DeadlineOverrides {
    pub fn new(season: impl Into<String>) -> Self {
        Self { season: season.into(), deadlines: BTreeMap::new() }
    }

    /// The correction table shipped for the 2025/26 season.
    pub fn season_2025_26() -> Self {
        let deadlines = SEASON_2025_26
            .iter()
            .filter_map(|&(id, y, mo, d, h, mi)| {
                Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).single().map(|dt| (id, dt))
            })
            .collect();
        Self { season: "2025/26".into(), deadlines }
    }

    pub fn with_deadline(mut self, gameweek: u8, deadline: DateTime<Utc>) -> Self {
        self.deadlines.insert(gameweek, deadline);
        self
    }

    pub fn season(&self) -> &str {
        &self.season
    }

    pub fn get(&self, gameweek: u8) -> Option<DateTime<Utc>> {
        self.deadlines.get(&gameweek).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    /// Ascending by gameweek id.
    pub fn iter(&self) -> impl Iterator<Item = (u8, DateTime<Utc>)> + '_ {
        self.deadlines.iter().map(|(&id, &dt)| (id, dt))
    }

    /// Overwrite the deadline of every event that has an override.
    /// Returns the number of events patched.
    pub fn apply(&self, events: &mut [Event]) -> usize {
        let mut patched = 0;
        for event in events.iter_mut() {
            if let Some(deadline) = self.get(event.id) {
                event.deadline_time = Some(deadline);
                patched += 1;
            }
        }
        debug!("applied {patched} deadline overrides for season {}", self.season);
        patched
    }

    /// The first overridden gameweek whose deadline is strictly after `now`,
    /// synthesized as the next event.
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<Event> {
        self.iter().find(|&(_, deadline)| deadline > now).map(|(id, deadline)| Event {
            id,
            name: format!("Gameweek {id}"),
            deadline_time: Some(deadline),
            is_previous: false,
            is_current: false,
            is_next: true,
            ..Default::default()
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameweekStatus {
    pub current: Option<Event>,
    pub next: Option<Event>,
}

impl GameweekStatus {
    /// Time left before the next deadline. None once it has passed.
    pub fn deadline_countdown(&self, now: DateTime<Utc>) -> Option<Duration> {
        let deadline = self.next.as_ref()?.deadline_time?;
        let remaining = deadline - now;
        (remaining > Duration::zero()).then_some(remaining)
    }

    /// Gameweek to request picks for: current if one is live, else next.
    pub fn active_gameweek(&self) -> Option<u8> {
        self.current.as_ref().or(self.next.as_ref()).map(|e| e.id)
    }
}

/// Resolve the current and next gameweek.
///
/// With dataset events available their `is_current` / `is_next` flags win,
/// and the returned events carry any overridden deadline. Without them the
/// override table alone is scanned for the first future deadline; `current`
/// is then always None.
pub fn resolve_status(
    dataset: Option<&StaticDataset>,
    overrides: &DeadlineOverrides,
    now: DateTime<Utc>,
) -> GameweekStatus {
    let Some(dataset) = dataset.filter(|d| !d.events.is_empty()) else {
        debug!("no gameweek data, resolving from {} overrides", overrides.season());
        return GameweekStatus { current: None, next: overrides.next_after(now) };
    };

    let patched = |event: &Event| {
        let mut event = event.clone();
        if let Some(deadline) = overrides.get(event.id) {
            event.deadline_time = Some(deadline);
        }
        event
    };

    let current = dataset.current_event().map(patched);
    let next = dataset.next_event().map(patched);

    if let Some(deadline) = next.as_ref().and_then(|e| e.deadline_time)
        && deadline <= now
    {
        warn!("next gameweek deadline {deadline} is already past; upstream flags may be stale");
    }

    GameweekStatus { current, next }
}
