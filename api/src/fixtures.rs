use crate::Fixture;
use log::warn;
use std::collections::HashMap;

pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// One team's view of one fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureSlot {
    pub opponent_team_id: u32,
    pub difficulty: u8,
    pub is_home: bool,
}

/// Per-team schedule for `window_size` gameweeks starting at `start_gw`.
/// `None` marks a blank gameweek.
pub type FixtureWindow = HashMap<u32, Vec<Option<FixtureSlot>>>;

/// Build a fixed-width fixture difficulty window.
///
/// Every id in `team_ids` gets exactly `window_size` slots. Fixtures outside
/// the window, without a gameweek, or involving a team not in `team_ids` are
/// ignored. When a team plays twice in one gameweek the later fixture in
/// `fixtures` wins the slot.
pub fn build_window(
    fixtures: &[Fixture],
    start_gw: u8,
    window_size: usize,
    team_ids: &[u32],
) -> FixtureWindow {
    let mut window: FixtureWindow = team_ids
        .iter()
        .map(|&id| (id, vec![None; window_size]))
        .collect();

    let start = usize::from(start_gw);
    for fixture in fixtures {
        let Some(gw) = fixture.event.map(usize::from) else {
            continue;
        };
        if gw < start || gw >= start + window_size {
            continue;
        }
        let idx = gw - start;

        if let Some(slots) = window.get_mut(&fixture.team_h) {
            slots[idx] = Some(FixtureSlot {
                opponent_team_id: fixture.team_a,
                difficulty: fixture.team_h_difficulty,
                is_home: true,
            });
        } else {
            warn!("fixture {} has unknown home team {}", fixture.id, fixture.team_h);
        }

        if let Some(slots) = window.get_mut(&fixture.team_a) {
            slots[idx] = Some(FixtureSlot {
                opponent_team_id: fixture.team_h,
                difficulty: fixture.team_a_difficulty,
                is_home: false,
            });
        } else {
            warn!("fixture {} has unknown away team {}", fixture.id, fixture.team_a);
        }
    }

    window
}

/// Sum of difficulty over the filled slots. Blank gameweeks add nothing.
pub fn window_difficulty(slots: &[Option<FixtureSlot>]) -> u32 {
    slots.iter().flatten().map(|s| u32::from(s.difficulty)).sum()
}

/// Team ids ordered easiest run first, ties broken by id.
pub fn rank_by_difficulty(window: &FixtureWindow) -> Vec<u32> {
    let mut ids: Vec<u32> = window.keys().copied().collect();
    ids.sort_by(|a, b| {
        let da = window_difficulty(&window[a]);
        let db = window_difficulty(&window[b]);
        da.cmp(&db).then_with(|| a.cmp(b))
    });
    ids
}
