use crate::{Pick, Position};
use std::fmt;

pub const STARTING_XI: usize = 11;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquadError {
    /// Not enough picks to identify a starting XI.
    TooFewPicks { found: usize },
}

impl fmt::Display for SquadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquadError::TooFewPicks { found } => {
                write!(f, "invalid squad: {found} picks, need at least {STARTING_XI}")
            }
        }
    }
}

impl std::error::Error for SquadError {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionGroups {
    pub goalkeepers: Vec<Pick>,
    pub defenders: Vec<Pick>,
    pub midfielders: Vec<Pick>,
    pub forwards: Vec<Pick>,
}

impl PositionGroups {
    pub fn get(&self, position: Position) -> &[Pick] {
        match position {
            Position::Goalkeeper => &self.goalkeepers,
            Position::Defender => &self.defenders,
            Position::Midfielder => &self.midfielders,
            Position::Forward => &self.forwards,
        }
    }

    fn push(&mut self, position: Position, pick: Pick) {
        match position {
            Position::Goalkeeper => self.goalkeepers.push(pick),
            Position::Defender => self.defenders.push(pick),
            Position::Midfielder => self.midfielders.push(pick),
            Position::Forward => self.forwards.push(pick),
        }
    }
}

/// A squad split for display: starters, bench, and starters by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formation {
    pub starters: Vec<Pick>,
    /// Substitution priority order, never re-sorted.
    pub bench: Vec<Pick>,
    pub by_position: PositionGroups,
    /// "{DEF}-{MID}-{FWD}", e.g. "4-4-2".
    pub label: String,
}

impl Formation {
    pub fn captain(&self) -> Option<&Pick> {
        self.starters.iter().chain(&self.bench).find(|p| p.is_captain)
    }

    pub fn vice_captain(&self) -> Option<&Pick> {
        self.starters.iter().chain(&self.bench).find(|p| p.is_vice_captain)
    }
}

/// Split an ordered squad into starters and bench and group the starters by
/// position.
///
/// This is a display derivation, not a legality check: goalkeeper count and
/// positional minimums are not validated, and a starter whose position cannot
/// be resolved is kept in `starters` but left out of every group.
pub fn derive_formation(
    picks: &[Pick],
    position_of: impl Fn(u32) -> Option<Position>,
) -> Result<Formation, SquadError> {
    if picks.len() < STARTING_XI {
        return Err(SquadError::TooFewPicks { found: picks.len() });
    }

    let (starters, bench) = picks.split_at(STARTING_XI);

    let mut by_position = PositionGroups::default();
    for pick in starters {
        if let Some(position) = position_of(pick.element) {
            by_position.push(position, pick.clone());
        }
    }

    let label = format!(
        "{}-{}-{}",
        by_position.defenders.len(),
        by_position.midfielders.len(),
        by_position.forwards.len()
    );

    Ok(Formation {
        starters: starters.to_vec(),
        bench: bench.to_vec(),
        by_position,
        label,
    })
}
