//! Notice popup component
//!
//! Renders the pending command acknowledgement over the dashboard

use super::super::state::{DashboardState, NoticeKind};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

/// Render the current notice, if any.
pub fn render_notice(f: &mut Frame, state: &DashboardState) {
    let Some(notice) = state.current_notice() else {
        return;
    };

    let (title, color) = match notice.kind {
        NoticeKind::Success => ("COMMAND SENT", Color::Green),
        NoticeKind::Failure => ("COMMAND FAILED", Color::Red),
    };

    let mut lines = vec![
        Line::from(notice.message.clone()).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("[Enter] OK").style(Style::default().fg(Color::DarkGray)),
    ];
    let queued = state.pending_notices().saturating_sub(1);
    if queued > 0 {
        lines.push(
            Line::from(format!("{} more pending", queued))
                .style(Style::default().fg(Color::DarkGray)),
        );
    }

    let area = centered(f.area(), 48, lines.len() as u16 + 2);
    let popup = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(color)),
    );

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}
