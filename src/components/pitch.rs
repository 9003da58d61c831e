use fpl_api::squad::Formation;
use fpl_api::{Pick, Position, StaticDataset};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

const PITCH_ROWS: [Position; 4] = [
    Position::Goalkeeper,
    Position::Defender,
    Position::Midfielder,
    Position::Forward,
];

/// Home kit colours keyed by full club name.
const KIT_COLORS: &[(&str, (u8, u8, u8))] = &[
    ("Arsenal", (0xEF, 0x01, 0x07)),
    ("Aston Villa", (0x7A, 0x00, 0x3C)),
    ("Bournemouth", (0xD7, 0x19, 0x20)),
    ("Brentford", (0xE3, 0x06, 0x13)),
    ("Brighton & Hove Albion", (0x00, 0x57, 0xB8)),
    ("Burnley", (0x6C, 0x1D, 0x45)),
    ("Chelsea", (0x03, 0x4E, 0xA2)),
    ("Crystal Palace", (0x00, 0x33, 0xA0)),
    ("Everton", (0x00, 0x33, 0x99)),
    ("Fulham", (0xFF, 0xFF, 0xFF)),
    ("Leeds United", (0xFF, 0xFF, 0xFF)),
    ("Liverpool", (0xC8, 0x10, 0x2E)),
    ("Manchester City", (0x6C, 0xAB, 0xDD)),
    ("Manchester United", (0xDA, 0x29, 0x1C)),
    ("Newcastle United", (0x00, 0x00, 0x00)),
    ("Nottingham Forest", (0xE5, 0x32, 0x33)),
    ("Sunderland", (0xFF, 0x00, 0x00)),
    ("Tottenham Hotspur", (0xFF, 0xFF, 0xFF)),
    ("West Ham United", (0x7E, 0x18, 0x23)),
    ("Wolverhampton Wanderers", (0xFD, 0xB9, 0x13)),
];

/// Upstream short forms that differ from the kit table.
const CLUB_ALIASES: &[(&str, &str)] = &[
    ("Man City", "Manchester City"),
    ("Man Utd", "Manchester United"),
    ("Spurs", "Tottenham Hotspur"),
    ("Wolves", "Wolverhampton Wanderers"),
    ("Nott'm Forest", "Nottingham Forest"),
    ("Newcastle", "Newcastle United"),
    ("Brighton", "Brighton & Hove Albion"),
    ("West Ham", "West Ham United"),
    ("Leeds", "Leeds United"),
];

/// Starting XI laid out by line, goalkeeper at the top, bench underneath.
pub struct PitchView<'a> {
    pub formation: &'a Formation,
    pub dataset: Option<&'a StaticDataset>,
    pub selected_element: Option<u32>,
}

impl Widget for PitchView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 10 || area.height < 6 {
            return;
        }

        let pitch_height = area.height - 2;
        let pitch_style = Style::default().bg(Color::Rgb(0x0b, 0x3d, 0x1e));
        buf.set_style(Rect::new(area.x, area.y, area.width, pitch_height), pitch_style);

        for (line, position) in PITCH_ROWS.iter().enumerate() {
            let picks = self.formation.by_position.get(*position);
            if picks.is_empty() {
                continue;
            }
            let y = area.y + (2 * line as u16 + 1) * pitch_height / 8;
            let slot_width = area.width / picks.len() as u16;
            for (i, pick) in picks.iter().enumerate() {
                let label = player_label(pick, self.dataset);
                let label: String = label.chars().take(slot_width.saturating_sub(1) as usize).collect();
                let len = label.chars().count() as u16;
                let x = area.x + i as u16 * slot_width + slot_width.saturating_sub(len) / 2;
                buf.set_string(x, y, &label, self.style_for(pick).bg(Color::Rgb(0x0b, 0x3d, 0x1e)));
            }
        }

        let bench_y = area.y + pitch_height + 1;
        buf.set_string(area.x, bench_y, "Bench:", Style::default().fg(Color::DarkGray));
        let mut x = area.x + 7;
        for (i, pick) in self.formation.bench.iter().enumerate() {
            let label = format!("{}.{} ", i + 1, player_label(pick, self.dataset));
            let remaining = (area.x + area.width).saturating_sub(x);
            if remaining == 0 {
                break;
            }
            let label: String = label.chars().take(remaining as usize).collect();
            buf.set_string(x, bench_y, &label, self.style_for(pick));
            x += label.chars().count() as u16;
        }
    }
}

impl PitchView<'_> {
    fn style_for(&self, pick: &Pick) -> Style {
        if Some(pick.element) == self.selected_element {
            return Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        let kit = self
            .dataset
            .and_then(|d| d.player(pick.element))
            .and_then(|p| self.dataset.and_then(|d| d.team(p.team)))
            .and_then(|t| kit_color(&t.name));
        match kit {
            Some(color) if pick.is_captain => Style::default().fg(color).add_modifier(Modifier::BOLD),
            Some(color) => Style::default().fg(color),
            None => Style::default().fg(Color::White),
        }
    }
}

/// "Salah (C)": display name plus captaincy marker.
pub fn player_label(pick: &Pick, dataset: Option<&StaticDataset>) -> String {
    let name = dataset
        .and_then(|d| d.player(pick.element))
        .map(|p| p.web_name.clone())
        .unwrap_or_else(|| format!("#{}", pick.element));
    let marker = match (pick.is_captain, pick.is_vice_captain, pick.multiplier) {
        (true, _, 3) => " (TC)",
        (true, _, _) => " (C)",
        (_, true, _) => " (V)",
        _ => "",
    };
    format!("{name}{marker}")
}

pub fn kit_color(club: &str) -> Option<Color> {
    let club = CLUB_ALIASES
        .iter()
        .find(|(alias, _)| *alias == club)
        .map_or(club, |(_, full)| *full);
    KIT_COLORS
        .iter()
        .find(|(name, _)| *name == club)
        .map(|(_, (r, g, b))| Color::Rgb(*r, *g, *b))
}
