use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::fixture_grid::{FixtureGrid, difficulty_color};
use crate::components::identicon::{IdenticonView, badge};
use crate::components::pitch::{PitchView, player_label};
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;
use fpl_api::identicon::Identicon;
use fpl_api::input::player_image_url;
use fpl_api::{Pick, StaticDataset};
use log::error;

static TABS: &[&str; 4] = &["Team", "Fixtures", "League", "Rivals"];

const HELP_TEXT: &str = "\
Global
  1-4      switch tab             ?       help (Esc to close)
  t        enter team id or URL   R       reload everything
  f        full screen            \"       toggle log pane
  q        quit

Team       j/k select player, Enter load player detail
Fixtures   j/k scroll (clubs sorted by easiest next 5 gameweeks)
League     j/k select, n/p page, l next league, Enter compare as rival";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Team => draw_team(f, layout.main, app),
            MenuItem::Fixtures => draw_fixtures(f, layout.main, app),
            MenuItem::League => draw_league(f, layout.main, app),
            MenuItem::Rivals => draw_rivals(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }
        draw_status_line(f, layout.status, app);
        if app.state.prompt.active {
            draw_prompt(f, f.area(), app);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });
    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Team => 0,
        MenuItem::Fixtures => 1,
        MenuItem::League => 2,
        MenuItem::Rivals => 3,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_status_message(f: &mut Frame, area: Rect, msg: &str) {
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

/// Bottom row on every tab: the last error in red, otherwise key hints.
fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    if area.is_empty() {
        return;
    }
    let line = match app.state.last_error.as_deref() {
        Some(err) => Line::from(vec![
            Span::styled(format!(" {ERROR_CHAR} {err}"), Style::default().fg(Color::Red)),
            Span::styled("  R retry  t change team", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            " t team  R reload  \" logs  ? help  q quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

fn draw_team(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" My Team ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [summary_area, body] =
        Layout::vertical([Constraint::Length(6), Constraint::Fill(1)]).areas(inner);
    let [cards, status_area, icon_area] = Layout::horizontal([
        Constraint::Fill(2),
        Constraint::Fill(1),
        Constraint::Length(12),
    ])
    .areas(summary_area);

    draw_gameweek_status(f, status_area, app);

    let team = &app.state.team;
    let Some(entry) = team.entry.as_ref() else {
        let msg = match team.entry_id {
            Some(id) => format!("Loading entry {id}..."),
            None => "No team loaded. Press t and enter your FPL team id or entry URL.".to_string(),
        };
        draw_status_message(f, cards, &msg);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(entry.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {}", entry.manager_name()), Style::default().fg(Color::Gray)),
        ]),
        Line::from(format!(
            "Overall: {} pts   Rank: {}",
            entry.overall_points,
            entry.overall_rank.map_or("-".to_string(), |r| r.to_string())
        )),
        Line::from(format!(
            "GW points: {}   Value: {}   Bank: {}",
            team.picks.as_ref().map_or(entry.event_points, |p| p.points),
            entry.team_value().map_or("-".to_string(), |v| format!("£{v:.1}m")),
            entry
                .last_deadline_bank
                .map_or("-".to_string(), |b| format!("£{:.1}m", f32::from(b) / 10.0))
        )),
    ];
    if let Some(best) = team.history.as_ref().and_then(|h| h.best_gameweek()) {
        lines.push(Line::from(format!("Best gameweek: GW{} ({} pts)", best.event, best.points)));
    }
    if let Some(chip) = team.picks.as_ref().and_then(|p| p.active_chip.as_deref()) {
        lines.push(Line::from(Span::styled(
            format!("Chip active: {chip}"),
            Style::default().fg(Color::Magenta),
        )));
    }
    f.render_widget(Paragraph::new(lines), cards);

    if let Some(icon) = team.identicon() {
        let icon_area = Rect { height: icon_area.height.min(5), ..icon_area };
        f.render_widget(IdenticonView { identicon: &icon }, icon_area);
    }

    let dataset = app.state.static_data.dataset();
    let [pitch_area, detail_area] = if body.width >= 90 {
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(34)]).areas(body)
    } else {
        [body, Rect::ZERO]
    };

    match (team.formation.as_ref(), team.formation_error.as_deref()) {
        (Some(formation), _) => {
            let pitch_block = default_border(Color::DarkGray).title(format!(" {} ", formation.label));
            let pitch_inner = pitch_block.inner(pitch_area);
            f.render_widget(pitch_block, pitch_area);
            f.render_widget(
                PitchView {
                    formation,
                    dataset,
                    selected_element: team.selected_pick().map(|p| p.element),
                },
                pitch_inner,
            );
        }
        (None, Some(err)) => draw_placeholder(f, pitch_area, err),
        (None, None) => draw_placeholder(f, pitch_area, "No picks for this gameweek yet"),
    }

    if !detail_area.is_empty() {
        draw_player_detail(f, detail_area, app, dataset);
    }
}

fn draw_gameweek_status(f: &mut Frame, area: Rect, app: &App) {
    let status = &app.state.static_data.status;
    let mut lines = Vec::new();
    match status.current.as_ref() {
        Some(current) => {
            lines.push(Line::from(Span::styled(
                current.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            if let Some(avg) = current.average_entry_score {
                lines.push(Line::from(format!(
                    "Avg {avg}  High {}",
                    current.highest_score.unwrap_or_default()
                )));
            }
        }
        None => lines.push(Line::from("Season not started")),
    }
    match status.next.as_ref() {
        Some(next) => {
            lines.push(Line::from(format!("Next: {}", next.name)));
            let countdown = status
                .deadline_countdown(app.state.now)
                .map(format_countdown)
                .unwrap_or_else(|| "deadline passed".to_string());
            lines.push(Line::from(Span::styled(
                format!("Deadline in {countdown}"),
                Style::default().fg(Color::Yellow),
            )));
            if let Some(deadline) = next.deadline_time {
                lines.push(Line::from(Span::styled(
                    deadline.with_timezone(&chrono::Local).format("%a %d %b %H:%M").to_string(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
        None => lines.push(Line::from("No upcoming gameweek")),
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_player_detail(f: &mut Frame, area: Rect, app: &App, dataset: Option<&StaticDataset>) {
    let block = default_border(Color::DarkGray).title(" Player ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(pick) = app.state.team.selected_pick() else {
        return;
    };
    let Some(player) = dataset.and_then(|d| d.player(pick.element)) else {
        f.render_widget(Paragraph::new(player_label(pick, dataset)), inner);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} {}", player.first_name, player.second_name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} {}  £{:.1}m",
            app.state.static_data.team_short_name(player.team),
            player.position.short_label(),
            player.price()
        )),
        Line::from(format!(
            "Pts {}  Form {:.1}  Sel {:.1}%",
            player.stats.total_points, player.stats.form, player.stats.selected_by_percent
        )),
        Line::from(format!(
            "G {}  A {}  Bonus {}",
            player.stats.goals_scored, player.stats.assists, player.stats.bonus
        )),
        Line::from(Span::styled(
            player_image_url(player.code),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    match app.state.team.player.as_ref().filter(|s| s.player_id == player.id) {
        Some(summary) => {
            lines.push(Line::from(format!("Last 5: {} pts", summary.recent_points(5))));
            for fixture in summary.fixtures.iter().take(5) {
                let opponent = app.state.static_data.team_short_name(fixture.opponent);
                let venue = if fixture.is_home { "H" } else { "A" };
                lines.push(Line::from(vec![
                    Span::raw(format!(
                        "GW{:<3}",
                        fixture.event.map_or("-".to_string(), |e| e.to_string())
                    )),
                    Span::styled(
                        format!(" {opponent} ({venue}) "),
                        Style::default().fg(Color::Black).bg(difficulty_color(fixture.difficulty)),
                    ),
                ]));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "Enter: load fixtures & form",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn draw_fixtures(f: &mut Frame, area: Rect, app: &App) {
    let fixtures = &app.state.fixtures;
    let block = default_border(Color::White).title(" Fixture Difficulty ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(dataset) = app.state.static_data.dataset() else {
        draw_status_message(f, inner, "Loading fixtures...");
        return;
    };
    if fixtures.ranking.is_empty() {
        draw_status_message(f, inner, "No fixtures available");
        return;
    }

    f.render_widget(
        FixtureGrid {
            window: &fixtures.window,
            ranking: &fixtures.ranking,
            dataset,
            start_gw: fixtures.start_gw,
            scroll_offset: fixtures.scroll_offset,
        },
        inner,
    );
}

// ---------------------------------------------------------------------------
// League
// ---------------------------------------------------------------------------

fn draw_league(f: &mut Frame, area: Rect, app: &App) {
    let league = &app.state.league;
    let Some(standings) = league.standings.as_ref() else {
        let block = default_border(Color::White).title(" League ");
        let inner = block.inner(area);
        f.render_widget(block, area);
        draw_status_message(f, inner, "Load a team to see its leagues");
        return;
    };

    let block = default_border(Color::White).title(format!(
        " {} (page {}) ",
        standings.league_name, standings.page
    ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if standings.entries.is_empty() {
        draw_placeholder(f, inner, "No managers in this league yet");
        return;
    }

    let header = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled(
        format!("    {:>6}     {:<24} {:<20} {:>4} {:>6}", "Rank", "Team", "Manager", "GW", "Total"),
        header,
    ))];

    let me = app.state.team.entry_id;
    let visible = inner.height.saturating_sub(2) as usize;
    let offset = league.selected.saturating_sub(visible.saturating_sub(1));
    for (idx, row) in standings.entries.iter().enumerate().skip(offset).take(visible) {
        let marker = if idx == league.selected { ">" } else { " " };
        let icon = Identicon::for_name(row.entry, Some(&row.player_name));
        let (arrow, arrow_style) = movement_arrow(row.movement());
        let name_style = if Some(row.entry) == me {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{marker} ")),
            badge(&icon),
            Span::raw(format!(" {:>6} ", row.rank)),
            Span::styled(format!("{arrow:<3} "), arrow_style),
            Span::styled(format!("{:<24} ", truncate(&row.entry_name, 24)), name_style),
            Span::styled(
                format!("{:<20} ", truncate(&row.player_name, 20)),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(format!("{:>4} {:>6}", row.event_total, row.total)),
        ]));
    }

    let footer = match (league.prev_page().is_some(), league.next_page().is_some()) {
        (true, true) => "p/n page  Enter compare",
        (false, true) => "n next page  Enter compare",
        (true, false) => "p prev page  Enter compare",
        (false, false) => "Enter compare  l next league",
    };
    let [list_area, footer_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
    f.render_widget(Paragraph::new(lines), list_area);
    f.render_widget(
        Paragraph::new(footer).style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}

fn movement_arrow(movement: i64) -> (String, Style) {
    match movement {
        m if m > 0 => (format!("▲{m}"), Style::default().fg(Color::Green)),
        m if m < 0 => (format!("▼{}", -m), Style::default().fg(Color::Red)),
        _ => ("•".to_string(), Style::default().fg(Color::DarkGray)),
    }
}

// ---------------------------------------------------------------------------
// Rivals
// ---------------------------------------------------------------------------

fn draw_rivals(f: &mut Frame, area: Rect, app: &App) {
    let rival = &app.state.rival;
    let block = default_border(Color::White).title(" Rivals ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if rival.rival_id.is_none() {
        draw_status_message(f, inner, "Pick a manager on the League tab and press Enter");
        return;
    }

    let [header, columns] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(inner);
    f.render_widget(
        Paragraph::new(format!("GW{} differentials vs {}", rival.gameweek, rival.rival_name))
            .style(Style::default().add_modifier(Modifier::BOLD)),
        header,
    );

    let [theirs_area, mine_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(columns);
    draw_pick_list(f, theirs_area, &format!(" Only {} ", rival.rival_name), &rival.theirs_only, app);
    draw_pick_list(f, mine_area, " Only you ", &rival.mine_only, app);
}

fn draw_pick_list(f: &mut Frame, area: Rect, title: &str, picks: &[Pick], app: &App) {
    let block = default_border(Color::DarkGray).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    if picks.is_empty() {
        f.render_widget(
            Paragraph::new("Same players")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let dataset = app.state.static_data.dataset();
    let lines: Vec<Line> = picks
        .iter()
        .map(|pick| {
            let bench = pick.multiplier == 0;
            let detail = dataset
                .and_then(|d| d.player(pick.element))
                .map(|p| {
                    format!(
                        "{} {} £{:.1}m",
                        app.state.static_data.team_short_name(p.team),
                        p.position.short_label(),
                        p.price()
                    )
                })
                .unwrap_or_default();
            Line::from(vec![
                Span::styled(
                    format!("{:<22}", player_label(pick, dataset)),
                    Style::default().fg(if bench { Color::DarkGray } else { Color::White }),
                ),
                Span::styled(detail, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

fn draw_prompt(f: &mut Frame, area: Rect, app: &App) {
    let width = area.width.min(60);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height.saturating_sub(5) / 2,
        width,
        5.min(area.height),
    );
    f.render_widget(Clear, popup);
    let block = default_border(Color::Yellow).title(" Team id or entry URL ");
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("> {}_", app.state.prompt.input),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                "Enter confirm  Esc cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ]),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    if area.is_empty() {
        return;
    }
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Cyan))
        .style_debug(Style::default().fg(Color::Gray))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn format_countdown(remaining: chrono::Duration) -> String {
    let secs = remaining.num_seconds().max(0);
    let (days, hours, minutes, seconds) =
        (secs / 86_400, secs % 86_400 / 3_600, secs % 3_600 / 60, secs % 60);
    if days > 0 {
        format!("{days}d {hours:02}h {minutes:02}m")
    } else {
        format!("{hours:02}h {minutes:02}m {seconds:02}s")
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use fpl_api::{EntryHistory, EntrySummary, LeagueStandingEntry, LeagueStandings};
    use tui::backend::TestBackend;
    use tui::buffer::Buffer;

    fn app() -> App {
        let settings_path = std::env::temp_dir()
            .join(format!("fpltui-draw-{}", std::process::id()))
            .join("settings.json");
        let mut app = App::new(AppSettings { settings_path, ..AppSettings::default() });
        let entry = EntrySummary { id: 7, name: "Kloppites".into(), ..Default::default() };
        app.on_team_loaded(entry, EntryHistory::default(), None);
        app
    }

    fn render(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        draw(&mut terminal, app, LoadingState::default());
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn invalid_prompt_input_is_shown_with_team_loaded() {
        let mut app = app();
        app.state.prompt.open();
        app.state.prompt.input = "abc".into();
        assert_eq!(app.submit_team_prompt(), None);

        let buf = render(&mut app);
        let screen: Vec<String> = (0..buf.area.height).map(|y| row_text(&buf, y)).collect();
        assert!(screen.iter().any(|row| row.contains("Kloppites")), "team still drawn");
        let status = &screen[39];
        assert!(status.contains("Not a team id or entry URL: \"abc\""), "{status:?}");
        assert_eq!(buf[(1, 39)].fg, Color::Red);
    }

    #[test]
    fn rejected_rival_is_shown_over_league_table() {
        let mut app = app();
        app.on_league_loaded(LeagueStandings {
            league_id: 314,
            league_name: "Office".into(),
            page: 1,
            entries: vec![LeagueStandingEntry { entry: 7, entry_name: "Kloppites".into(), ..Default::default() }],
            ..Default::default()
        });
        app.update_tab(MenuItem::League);
        assert!(app.select_rival().is_none());

        let buf = render(&mut app);
        assert!(row_text(&buf, 39).contains("That's you"));
    }

    #[test]
    fn status_line_shows_hints_without_error() {
        let mut app = app();
        let buf = render(&mut app);
        assert!(row_text(&buf, 39).contains("R reload"));
    }

    #[test]
    fn countdown_drops_seconds_when_days_remain() {
        assert_eq!(format_countdown(chrono::Duration::seconds(90_061)), "1d 01h 01m");
        assert_eq!(format_countdown(chrono::Duration::seconds(3_725)), "01h 02m 05s");
        assert_eq!(format_countdown(chrono::Duration::seconds(-5)), "00h 00m 00s");
    }

    #[test]
    fn movement_arrows_show_direction() {
        assert_eq!(movement_arrow(9).0, "▲9");
        assert_eq!(movement_arrow(-3).0, "▼3");
        assert_eq!(movement_arrow(0).0, "•");
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("Klopp's Kids", 24), "Klopp's Kids");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
