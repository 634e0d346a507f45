use crate::depot::Depot;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, depot: &Depot) {
    let block = Block::default().title("Journal").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut items: Vec<ListItem> = depot.messages().into_iter().map(ListItem::new).collect();
    if items.is_empty() {
        items.push(ListItem::new("Nothing has happened yet."));
    }
    frame.render_widget(List::new(items), inner);
}
