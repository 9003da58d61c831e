use fpl_api::identicon::{Hsl, Identicon};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::Span;
use tui::widgets::Widget;

/// Fills its area with the identicon pattern, initials centred on top.
pub struct IdenticonView<'a> {
    pub identicon: &'a Identicon,
}

impl Widget for IdenticonView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.identicon.colors.is_empty() {
            return;
        }

        for y in 0..area.height {
            for x in 0..area.width {
                let color = hsl_color(self.identicon.color_at(x, y, area.width, area.height));
                if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                    cell.set_symbol(" ").set_bg(color);
                }
            }
        }

        let Some(initials) = self.identicon.initials.as_deref().filter(|s| !s.is_empty()) else {
            return;
        };
        let width = initials.chars().count() as u16;
        if width > area.width {
            return;
        }
        let x = area.x + (area.width - width) / 2;
        let y = area.y + area.height / 2;
        for (offset, c) in initials.chars().enumerate() {
            if let Some(cell) = buf.cell_mut((x + offset as u16, y)) {
                cell.set_char(c)
                    .set_fg(Color::White)
                    .set_style(Style::default().add_modifier(Modifier::BOLD));
            }
        }
    }
}

/// Two-cell inline badge for list rows: initials on the first palette colour.
pub fn badge(identicon: &Identicon) -> Span<'static> {
    let text = match identicon.initials.as_deref() {
        Some(i) if !i.is_empty() => format!("{i:<2}"),
        _ => "  ".to_string(),
    };
    let bg = identicon.colors.first().copied().map(hsl_color).unwrap_or(Color::DarkGray);
    Span::styled(
        text,
        Style::default().fg(Color::White).bg(bg).add_modifier(Modifier::BOLD),
    )
}

pub fn hsl_color(hsl: Hsl) -> Color {
    let (r, g, b) = hsl.to_rgb();
    Color::Rgb(r, g, b)
}
