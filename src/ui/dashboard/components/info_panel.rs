//! Dashboard info panel component
//!
//! Renders backend and session information

use crate::environment::Environment;

use super::super::state::DashboardState;
use super::super::utils::format_uptime;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

/// Render info panel.
pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = Vec::new();

    let env_color = match state.environment {
        Environment::Production => Color::Green,
        Environment::Local => Color::LightBlue,
        Environment::Custom { .. } => Color::Yellow,
    };
    info_lines.push(Line::from(vec![Span::styled(
        format!("Env: {}", state.environment),
        Style::default().fg(env_color),
    )]));
    info_lines.push(Line::from(vec![Span::styled(
        format!("Backend: {}", state.environment.api_url()),
        Style::default().fg(Color::Gray),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Poll: every {} ms", state.poll_interval.as_millis()),
        Style::default().fg(Color::Cyan),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Uptime: {}", format_uptime(state.start_time.elapsed())),
        Style::default().fg(Color::LightGreen),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Nodes: {}", state.snapshot().node_count()),
        Style::default().fg(Color::LightYellow),
    )]));

    if let Some(users) = state.snapshot().format_users() {
        info_lines.push(Line::from(vec![Span::styled(
            format!("Users: {}", users),
            Style::default().fg(Color::LightCyan),
        )]));
    }

    let info_block = Block::default()
        .title("SYSTEM INFO")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}
