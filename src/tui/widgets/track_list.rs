use crate::ui_state::UiState;
use ratatui::{
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, List, ListItem, StatefulWidget},
};

pub struct TrackList;

impl StatefulWidget for TrackList {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let items: Vec<ListItem> = state
            .track_names
            .iter()
            .map(|name| ListItem::new(name.as_str()))
            .collect();

        let list = List::new(items)
            .block(Block::new().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::new().add_modifier(Modifier::BOLD).reversed())
            .highlight_symbol("▶ ");

        StatefulWidget::render(list, area, buf, &mut state.list_pos);
    }
}
