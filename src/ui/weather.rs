//! Space weather screen rendering
//!
//! Renders the SWPC snapshot: solar wind, magnetic field, Kp index, flare
//! activity with a logarithmic flux sparkline, active alerts, and the aurora
//! estimate when an observer latitude was given.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::{FieldStatus, FlareClass, KpStatus, SpaceWeather};
use crate::ui::widgets::FluxSparkline;

/// Color for a Kp status
fn kp_color(status: KpStatus) -> Color {
    match status {
        KpStatus::Quiet => Color::Green,
        KpStatus::Storm => Color::Red,
    }
}

/// Color for a magnetic field status
fn field_color(status: FieldStatus) -> Color {
    match status {
        FieldStatus::Stable => Color::Green,
        FieldStatus::Unstable => Color::Yellow,
        FieldStatus::Critical => Color::Red,
    }
}

/// Color for a flare class
fn flare_color(class: FlareClass) -> Color {
    match class {
        FlareClass::A | FlareClass::B => Color::Green,
        FlareClass::C => Color::Yellow,
        FlareClass::M => Color::LightRed,
        FlareClass::X => Color::Red,
    }
}

/// Renders the space weather view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    match &app.weather {
        Some(weather) => render_snapshot(frame, weather, chunks[0]),
        None => {
            let missing = Paragraph::new("Space weather unavailable")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title(" Space Weather ").borders(Borders::ALL));
            frame.render_widget(missing, chunks[0]);
        }
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " 1 events · 2 launches · 4 gallery · r refresh · ? help · q quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, chunks[1]);
}

fn render_snapshot(frame: &mut Frame, weather: &SpaceWeather, area: Rect) {
    let block = Block::default()
        .title(" Space Weather ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(inner);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Solar wind   ", Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                "{:.0} km/s · {:.1} p/cm³ · {:.0} K",
                weather.solar_wind.speed, weather.solar_wind.density, weather.solar_wind.temp
            )),
        ]),
        Line::from(vec![
            Span::styled("  IMF          ", Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                "Bt {:.1} nT · Bz {:+.1} nT · ",
                weather.magnetic_field.bt, weather.magnetic_field.bz
            )),
            Span::styled(
                format!("{:?}", weather.magnetic_field.status),
                Style::default().fg(field_color(weather.magnetic_field.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Kp index     ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:.1} · ", weather.kp.value)),
            Span::styled(
                format!("{:?}", weather.kp.status),
                Style::default().fg(kp_color(weather.kp.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Sunspots     ", Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                "SSN {:.0} · radiation {}",
                weather.sunspot_number, weather.radiation_scale
            )),
        ]),
    ];

    if let Some(probability) = weather.aurora_probability {
        lines.push(Line::from(vec![
            Span::styled("  Aurora       ", Style::default().fg(Color::Yellow)),
            Span::raw(format!("{:.0}% visibility chance", probability)),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), rows[0]);

    // Flare line with sparkline of recent flux
    let flare_line = Line::from(vec![
        Span::styled("  X-ray flux   ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{}-class", weather.flare.class),
            Style::default()
                .fg(flare_color(weather.flare.class))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" ({:.1e} W/m²)  ", weather.flare.flux)),
    ]);
    let flare_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(10)])
        .split(rows[1]);
    frame.render_widget(Paragraph::new(flare_line), flare_row[0]);

    let samples: Vec<f64> = weather.flare.history.iter().map(|s| s.flux).collect();
    frame.render_widget(FluxSparkline::new(&samples), flare_row[1]);

    // Alerts
    let mut alert_lines = vec![Line::from(Span::styled(
        "  Alerts",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if weather.alerts.is_empty() {
        alert_lines.push(Line::from(Span::styled(
            "    No active alerts",
            Style::default().fg(Color::Green),
        )));
    }
    for alert in &weather.alerts {
        alert_lines.push(Line::from(vec![
            Span::styled(
                format!("    {:?}{} ", alert.scale, alert.level),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(alert.message.clone()),
        ]));
    }
    frame.render_widget(Paragraph::new(alert_lines), rows[2]);
}
