use crate::ui_state::UiState;
use ratatui::{
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};

pub struct ErrorMsg;

impl StatefulWidget for ErrorMsg {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let Some(message) = state.error() else {
            return;
        };

        let block = Block::new()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Color::Red))
            .title(" error ")
            .title_bottom(" esc to dismiss ");

        Paragraph::new(message.to_string())
            .wrap(Wrap { trim: true })
            .block(block)
            .render(area, buf);
    }
}
