use crate::app::App;
use crate::depot::Depot;
use cereal_storage::Cereal;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

const BAR_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, app: &App, depot: &Depot) {
    let storage = depot.storage();
    let capacity = storage.container_capacity();

    let items: Vec<ListItem> = Cereal::ALL
        .iter()
        .map(|cereal| {
            let header = Span::styled(
                format!("{:<10}", cereal.name()),
                Style::default()
                    .fg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            );
            let detail = if storage.contains(cereal) {
                let amount = storage.amount_of(cereal);
                let ratio = if capacity > 0.0 { amount / capacity } else { 0.0 };
                let filled = ((ratio * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
                let style = if ratio >= 1.0 {
                    Style::default().fg(Color::LightRed)
                } else {
                    Style::default().fg(Color::LightGreen)
                };
                vec![
                    Span::styled("█".repeat(filled), style),
                    Span::styled(
                        "░".repeat(BAR_WIDTH - filled),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(format!(" {amount}/{capacity}")),
                ]
            } else if storage.can_open_container() {
                vec![Span::styled(
                    "no container (slot free)",
                    Style::default().fg(Color::Gray),
                )]
            } else {
                vec![Span::styled(
                    "no container (storage full)",
                    Style::default().fg(Color::DarkGray),
                )]
            };
            let mut spans = vec![header, Span::raw(" ")];
            spans.extend(detail);
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Containers")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_cereal.min(Cereal::ALL.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}
