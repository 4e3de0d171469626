//! Dashboard node grid component
//!
//! Renders one card per node of the latest snapshot

use super::super::state::DashboardState;
use crate::snapshot::NodeReading;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph};

/// Borders plus five content rows.
const CARD_HEIGHT: u16 = 7;
const CARD_MIN_WIDTH: u16 = 34;
const MAX_COLUMNS: usize = 3;

pub const WAITING_TEXT: &str = "Waiting for Sensor Data...";

/// Render the node grid, or the waiting placeholder when nothing arrived yet.
pub fn render_nodes_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("SENSOR NODES")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let nodes = &state.snapshot().nodes;
    if nodes.is_empty() {
        let waiting = Paragraph::new(WAITING_TEXT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(waiting, inner);
        return;
    }

    let columns = ((inner.width / CARD_MIN_WIDTH) as usize).clamp(1, MAX_COLUMNS);
    let cards: Vec<(&String, &NodeReading)> = nodes.iter().collect();
    let rows: Vec<&[(&String, &NodeReading)]> = cards.chunks(columns).collect();

    // Cards are never squeezed: rows that do not fit are scrolled out and
    // summarized on a hint line.
    let (visible, hint_height) = if rows.len() <= (inner.height / CARD_HEIGHT) as usize {
        (rows.len(), 0)
    } else {
        let visible = (inner.height.saturating_sub(1) / CARD_HEIGHT).max(1) as usize;
        (visible, 1)
    };
    let selected_row = state.selected_index().unwrap_or(0) / columns;
    let first = window_start(selected_row, visible, rows.len());
    let shown = &rows[first..first + visible];

    let mut row_constraints = vec![Constraint::Length(CARD_HEIGHT); visible];
    row_constraints.push(Constraint::Fill(1));
    row_constraints.push(Constraint::Length(hint_height));
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(inner);

    for (row, row_area) in shown.iter().zip(row_areas.iter()) {
        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);
        for ((key, reading), card_area) in row.iter().zip(col_areas.iter()) {
            let selected = state.selected_key() == Some(key.as_str());
            render_card(f, *card_area, reading, selected);
        }
    }

    if hint_height > 0 {
        let on_screen: usize = shown.iter().map(|row| row.len()).sum();
        let hint = Paragraph::new(format!(
            "{} more node(s), [↑↓] to scroll",
            cards.len() - on_screen
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
        f.render_widget(hint, row_areas[visible + 1]);
    }
}

/// First row of a `visible`-row window over `total` rows that keeps
/// `selected_row` on screen.
fn window_start(selected_row: usize, visible: usize, total: usize) -> usize {
    if visible >= total {
        return 0;
    }
    selected_row
        .saturating_sub(visible - 1)
        .min(total - visible)
}

fn render_card(f: &mut Frame, area: Rect, reading: &NodeReading, selected: bool) {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::styled("Time    ", label),
            Span::styled(reading.format_time().to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(vec![
            Span::styled("Temp    ", label),
            Span::styled(reading.format_temp(), value.fg(Color::LightRed)),
        ]),
        Line::from(vec![
            Span::styled("Gas     ", label),
            Span::styled(reading.format_gas(), value.fg(Color::LightBlue)),
        ]),
        Line::from(vec![
            Span::styled("Limits: ", label),
            Span::styled(reading.format_limits(), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(vec![
            Span::styled("[o] Light ON", Style::default().fg(Color::LightBlue)),
            Span::raw("  "),
            Span::styled("[f] Light OFF", Style::default().fg(Color::Gray)),
        ]),
    ];

    let (title, border_type, border_color) = if selected {
        (
            format!("▶ {}", reading.display_name()),
            BorderType::Thick,
            Color::LightYellow,
        )
    } else {
        (
            reading.display_name().to_string(),
            BorderType::Rounded,
            Color::DarkGray,
        )
    };

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(Style::default().fg(border_color))
            .padding(Padding::horizontal(1)),
    );
    f.render_widget(card, area);
}
