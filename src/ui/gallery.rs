//! EPIC Earth imagery screen rendering
//!
//! The terminal cannot show the images themselves, so this view presents the
//! frame metadata and the archive URL for the currently selected frame, with
//! left/right cycling through the batch.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

/// Renders the gallery view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .title(" Earth Imagery (EPIC) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let body = match app.gallery.get(app.gallery_index) {
        Some(image) => {
            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!("Frame {} of {}", app.gallery_index + 1, app.gallery.len()),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
                meta_line("Identifier", &image.id),
                meta_line("Captured", &image.date.format("%Y-%m-%d %H:%M UTC").to_string()),
                meta_line("Archive PNG", &image.image_url),
                Line::from(""),
                Line::from(Span::styled(
                    "Full-disc natural-color Earth from the DSCOVR spacecraft at L1.",
                    Style::default().fg(Color::Gray),
                )),
            ];
            Paragraph::new(lines).wrap(Wrap { trim: false })
        }
        None => Paragraph::new("Earth imagery unavailable")
            .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(body.block(block), chunks[0]);

    let footer = Paragraph::new(Line::from(Span::styled(
        " ←/→ cycle frames · 1 events · 2 launches · 3 weather · r refresh · ? help · q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, chunks[1]);
}

/// Creates a labelled metadata line
fn meta_line(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<12}", label),
            Style::default().fg(Color::Yellow),
        ),
        Span::raw(value.to_string()),
    ])
}
