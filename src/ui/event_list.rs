//! Sky event list screen rendering
//!
//! Renders the main catalog view showing all upcoming sky events with their
//! date, category, visibility, and viewing quality.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::EventKind;

/// Event category to icon mapping
pub fn event_icon(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Meteor => "\u{2604}",      // ☄
        EventKind::Eclipse => "\u{1F311}",    // 🌑
        EventKind::Conjunction => "\u{1FA90}", // 🪐
        EventKind::Comet => "\u{2604}",       // ☄
        EventKind::Planet => "\u{1FA90}",     // 🪐
        EventKind::Satellite => "\u{1F680}",  // 🚀
        EventKind::Aurora => "\u{1F30C}",     // 🌌
        EventKind::Lunar => "\u{1F315}",      // 🌕
    }
}

/// Color for a viewing quality label
pub fn quality_color(quality: &str) -> Color {
    match quality {
        "Excellent" => Color::Green,
        "Good" => Color::Cyan,
        "Fair" => Color::Yellow,
        "Uncertain" => Color::Magenta,
        _ => Color::Gray,
    }
}

/// Renders the event list view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    // Header with refresh timestamp
    let refreshed = app
        .last_refresh
        .map(|t| format!("updated {}", t.format("%H:%M:%S")))
        .unwrap_or_else(|| "never updated".to_string());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " SpaceScope ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("· Sky Events  "),
        Span::styled(refreshed, Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    // Event rows
    let mut lines = Vec::new();
    if app.events.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No events available",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, event) in app.events.iter().enumerate() {
        let selected = i == app.selected_event;
        let marker = if selected { "▶ " } else { "  " };
        let title_style = if selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{} ", event.date.format("%Y-%m-%d")),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(format!("{} ", event_icon(event.kind))),
            Span::styled(format!("{:<42}", event.title), title_style),
            Span::styled(
                format!("{:<10}", event.viewing_quality),
                Style::default().fg(quality_color(&event.viewing_quality)),
            ),
            Span::styled(
                event.visibility.clone(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let list = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Events ({}) ", app.events.len()))
            .borders(Borders::ALL),
    );
    frame.render_widget(list, chunks[1]);

    // Footer with key hints
    let footer = Paragraph::new(Line::from(Span::styled(
        " ↑/↓ select · Enter details · 2 launches · 3 weather · 4 gallery · r refresh · ? help · q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::data::events::curated_events;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_event_titles_and_header() {
        let mut app = App::uncached();
        app.events = curated_events();
        app.state = AppState::EventList;

        let content = render_to_string(&app);
        assert!(content.contains("SpaceScope"));
        assert!(content.contains("Perseids Meteor Shower"));
        assert!(content.contains("Excellent"));
    }

    #[test]
    fn test_renders_empty_catalog_notice() {
        let mut app = App::uncached();
        app.state = AppState::EventList;

        let content = render_to_string(&app);
        assert!(content.contains("No events available"));
    }

    #[test]
    fn test_selection_marker_follows_selected_event() {
        let mut app = App::uncached();
        app.events = curated_events();
        app.state = AppState::EventList;
        app.selected_event = 0;

        let content = render_to_string(&app);
        assert!(content.contains("▶"));
    }

    #[test]
    fn test_quality_color_mapping() {
        assert_eq!(quality_color("Excellent"), Color::Green);
        assert_eq!(quality_color("Good"), Color::Cyan);
        assert_eq!(quality_color("Fair"), Color::Yellow);
        assert_eq!(quality_color("Concluded"), Color::Gray);
    }

    #[test]
    fn test_event_icon_covers_all_kinds() {
        let kinds = [
            EventKind::Meteor,
            EventKind::Eclipse,
            EventKind::Conjunction,
            EventKind::Comet,
            EventKind::Planet,
            EventKind::Satellite,
            EventKind::Aurora,
            EventKind::Lunar,
        ];
        for kind in kinds {
            assert!(!event_icon(kind).is_empty());
        }
    }
}
