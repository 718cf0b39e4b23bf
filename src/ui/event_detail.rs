//! Event detail screen rendering
//!
//! Renders a single sky event with its description, sky coordinates,
//! recommended observing site, per-event telemetry, and local observing
//! conditions. Supports vertical scrolling for small terminals.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::event_list::{event_icon, quality_color};

/// Renders the detail view for the event with the given id
pub fn render(frame: &mut Frame, app: &App, event_id: &str) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let Some(event) = app.event_by_id(event_id) else {
        let missing = Paragraph::new("Event not found")
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(missing, chunks[0]);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", event_icon(event.kind))),
            Span::styled(
                event.title.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{}  ", event.date.format("%B %-d, %Y")),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                event.viewing_quality.clone(),
                Style::default().fg(quality_color(&event.viewing_quality)),
            ),
        ]),
        Line::from(""),
        Line::from(Span::raw(event.description.clone())),
        Line::from(""),
    ];

    if let Some(magnitude) = &event.magnitude {
        lines.push(detail_line("Magnitude", magnitude));
    }
    lines.push(detail_line(
        "Coordinates",
        &format!("RA {}  Dec {}", event.coordinates.ra, event.coordinates.dec),
    ));
    lines.push(detail_line("Visibility", &event.visibility));
    lines.push(detail_line(
        "Best viewing",
        &format!(
            "{} ({:.2}°, {:.2}°)",
            event.best_viewing.city,
            event.best_viewing.coordinates.lat,
            event.best_viewing.coordinates.lng
        ),
    ));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Telemetry",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for entry in &event.telemetry {
        let value = if entry.unit.is_empty() {
            entry.value.clone()
        } else {
            format!("{} {}", entry.value, entry.unit)
        };
        lines.push(detail_line(&entry.label, &value));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "Observing conditions",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(detail_line("Seeing", &event.conditions.seeing));
    lines.push(detail_line(
        "Sky brightness",
        &format!("{} mag/arcsec²", event.conditions.sky_brightness),
    ));
    lines.push(detail_line("Bortle", &event.conditions.bortle_class));
    lines.push(detail_line("Limiting mag", &event.conditions.limiting_mag));

    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Event Detail ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll_offset, 0));
    frame.render_widget(body, chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        " j/k scroll · g/G top/bottom · Esc back · q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, chunks[1]);
}

/// Creates a labelled detail line
fn detail_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<16}", label),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(value.to_string()),
    ])
}
