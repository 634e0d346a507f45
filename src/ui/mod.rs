use crate::app::{App, InputMode};
use crate::depot::Depot;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub mod containers_view;
pub mod journal_view;

pub fn render(frame: &mut Frame, app: &App, depot: &Depot) {
    let size = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    render_header(frame, layout[0], depot);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    containers_view::render(frame, columns[0], app, depot);
    journal_view::render(frame, columns[1], depot);

    render_footer(frame, layout[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, depot: &Depot) {
    let storage = depot.storage();
    let slots = match storage.max_containers() {
        Some(max) => format!("{}/{max}", storage.len()),
        None => format!("{}/∞", storage.len()),
    };
    let dock = if depot.auto_traffic() {
        format!("Open ({:.0}%)", depot.traffic_progress() * 100.0)
    } else {
        "Closed".to_string()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "Cereal Storage",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  Containers: "),
            Span::styled(slots, Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                "  •  {} per container, {} total",
                storage.container_capacity(),
                storage.storage_capacity()
            )),
            Span::raw("  •  Dock: "),
            Span::styled(dock, Style::default().fg(Color::Magenta)),
        ]),
        Line::from(vec![Span::raw(
            "Select a cereal, then add to or take from its container.",
        )]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.input {
        InputMode::Amount { action, buffer } => Line::from(vec![
            Span::styled(
                format!("{} {}: ", action.label(), app.selected()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!("{buffer}_")),
            Span::raw("    [Enter] confirm  •  [Esc] cancel"),
        ]),
        InputMode::Browse => Line::from(vec![
            Span::raw("Hotkeys: "),
            Span::styled("[J/K]", Style::default().fg(Color::Yellow)),
            Span::raw(" select  •  "),
            Span::styled("[A]", Style::default().fg(Color::Yellow)),
            Span::raw(" add  •  "),
            Span::styled("[G]", Style::default().fg(Color::Yellow)),
            Span::raw(" get  •  "),
            Span::styled("[R]", Style::default().fg(Color::Yellow)),
            Span::raw(" remove container  •  "),
            Span::styled("[D]", Style::default().fg(Color::Yellow)),
            Span::raw(" toggle dock  •  "),
            Span::styled("[Q]", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]),
    };
    let footer = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}
