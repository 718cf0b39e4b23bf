//! Launch manifest screen rendering
//!
//! Renders the merged launch manifest with provider, pad, status, and a
//! countdown to (or time since) each launch window.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Color for a launch status abbreviation
fn status_color(abbrev: &str) -> Color {
    match abbrev {
        "Go" | "Success" => Color::Green,
        "TBC" | "TBD" => Color::Yellow,
        "Hold" | "Failure" => Color::Red,
        _ => Color::Gray,
    }
}

/// Formats a countdown label relative to `now`
///
/// Future windows count down ("T-2d 04h"), past ones count up ("T+3h 12m").
fn countdown_label(net: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = net - now;
    let (sign, delta) = if delta < chrono::Duration::zero() {
        ("T+", -delta)
    } else {
        ("T-", delta)
    };

    let days = delta.num_days();
    let hours = delta.num_hours() % 24;
    let minutes = delta.num_minutes() % 60;

    if days > 0 {
        format!("{}{}d {:02}h", sign, days, hours)
    } else if delta.num_hours() > 0 {
        format!("{}{}h {:02}m", sign, delta.num_hours(), minutes)
    } else {
        format!("{}{}m", sign, delta.num_minutes().max(1))
    }
}

/// Renders the launch manifest view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let now = Utc::now();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let mut lines = Vec::new();
    if app.launches.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No launches available",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, launch) in app.launches.iter().enumerate() {
        let selected = i == app.selected_launch;
        let marker = if selected { "▶ " } else { "  " };
        let name_style = if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(format!("{:<44}", launch.name), name_style),
            Span::styled(
                format!("{:<6}", launch.status.abbrev),
                Style::default().fg(status_color(&launch.status.abbrev)),
            ),
            Span::styled(
                format!("{:<10}", countdown_label(launch.net, now)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                format!(
                    "{} · {}",
                    launch.launch_service_provider.name, launch.pad.location.name
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

        if selected {
            if let Some(mission) = &launch.mission {
                lines.push(Line::from(Span::styled(
                    format!("      {}", mission.description),
                    Style::default().fg(Color::Gray),
                )));
            }
        }
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Launches ({}) ", app.launches.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(list, chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        " ↑/↓ select · 1 events · 3 weather · 4 gallery · r refresh · ? help · q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::data::launches::mock_launches;
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, Terminal};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_countdown_future_window() {
        let net = t0() + chrono::Duration::days(2) + chrono::Duration::hours(4);
        assert_eq!(countdown_label(net, t0()), "T-2d 04h");
    }

    #[test]
    fn test_countdown_same_day_window() {
        let net = t0() + chrono::Duration::hours(3) + chrono::Duration::minutes(12);
        assert_eq!(countdown_label(net, t0()), "T-3h 12m");
    }

    #[test]
    fn test_countdown_past_window() {
        let net = t0() - chrono::Duration::minutes(42);
        assert_eq!(countdown_label(net, t0()), "T+42m");
    }

    #[test]
    fn test_status_color_mapping() {
        assert_eq!(status_color("Go"), Color::Green);
        assert_eq!(status_color("TBD"), Color::Yellow);
        assert_eq!(status_color("Hold"), Color::Red);
        assert_eq!(status_color("In Flight"), Color::Gray);
    }

    #[test]
    fn test_renders_launch_manifest() {
        let mut app = App::uncached();
        app.launches = mock_launches();
        app.state = AppState::Launches;

        let backend = TestBackend::new(130, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(content.contains("Starship Flight 7"));
        assert!(content.contains("SpaceX"));
        assert!(content.contains("Launches (3)"));
    }

    #[test]
    fn test_renders_empty_manifest_notice() {
        let mut app = App::uncached();
        app.state = AppState::Launches;

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, &app)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(content.contains("No launches available"));
    }
}
