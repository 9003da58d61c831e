use fpl_api::StaticDataset;
use fpl_api::fixtures::{FixtureSlot, FixtureWindow, window_difficulty};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

const TEAM_COL: u16 = 6;
const GW_COL: u16 = 8;

/// Fixture difficulty grid, one row per club in `ranking` order.
pub struct FixtureGrid<'a> {
    pub window: &'a FixtureWindow,
    pub ranking: &'a [u32],
    pub dataset: &'a StaticDataset,
    pub start_gw: u8,
    pub scroll_offset: u16,
}

impl Widget for FixtureGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 2 || area.width < TEAM_COL + GW_COL {
            return;
        }
        let header = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
        let columns = self.window.values().map(Vec::len).max().unwrap_or(0);
        let visible_cols = usize::from((area.width - TEAM_COL) / GW_COL).min(columns);

        buf.set_string(area.x, area.y, "Team", header);
        for col in 0..visible_cols {
            let gw = usize::from(self.start_gw) + col;
            let x = area.x + TEAM_COL + col as u16 * GW_COL;
            buf.set_string(x, area.y, format!("GW{gw:<5}"), header);
        }
        let total_x = area.x + TEAM_COL + visible_cols as u16 * GW_COL;
        if total_x + 3 <= area.x + area.width {
            buf.set_string(total_x, area.y, "Sum", header);
        }

        let rows = usize::from(area.height - 1);
        for (row, team_id) in self
            .ranking
            .iter()
            .skip(usize::from(self.scroll_offset))
            .take(rows)
            .enumerate()
        {
            let y = area.y + 1 + row as u16;
            let Some(slots) = self.window.get(team_id) else {
                continue;
            };
            buf.set_string(area.x, y, self.short_name(*team_id), Style::default().fg(Color::White));
            for (col, slot) in slots.iter().take(visible_cols).enumerate() {
                let x = area.x + TEAM_COL + col as u16 * GW_COL;
                let (text, style) = self.cell(slot);
                buf.set_string(x, y, format!("{text:^7}"), style);
            }
            if total_x + 3 <= area.x + area.width {
                buf.set_string(
                    total_x,
                    y,
                    window_difficulty(slots).to_string(),
                    Style::default().fg(Color::DarkGray),
                );
            }
        }
    }
}

impl FixtureGrid<'_> {
    fn short_name(&self, team_id: u32) -> String {
        self.dataset
            .team(team_id)
            .map(|t| t.short_name.clone())
            .unwrap_or_else(|| format!("#{team_id}"))
    }

    fn cell(&self, slot: &Option<FixtureSlot>) -> (String, Style) {
        match slot {
            Some(s) => {
                let opponent = self.short_name(s.opponent_team_id);
                let text = if s.is_home { opponent.to_uppercase() } else { opponent.to_lowercase() };
                (text, Style::default().fg(Color::Black).bg(difficulty_color(s.difficulty)))
            }
            None => ("-".to_string(), Style::default().fg(Color::DarkGray)),
        }
    }
}

/// Fixture difficulty rating colour, 1 (easiest) to 5.
pub fn difficulty_color(difficulty: u8) -> Color {
    match difficulty {
        1 => Color::Rgb(0x00, 0xff, 0x87),
        2 => Color::Rgb(0x00, 0xc0, 0x90),
        3 => Color::Rgb(0xe7, 0xe7, 0xe7),
        4 => Color::Rgb(0xff, 0xad, 0x0f),
        5 => Color::Rgb(0xff, 0x3b, 0x3b),
        _ => Color::DarkGray,
    }
}
