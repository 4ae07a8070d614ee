use crate::ui_state::UiState;
use ratatui::{
    style::{Color, Style},
    widgets::{Block, LineGauge, Padding, StatefulWidget, Widget},
};

pub struct ProgressBar;

impl StatefulWidget for ProgressBar {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let ratio = state.progress.clamp(0.0, 1.0);

        let gauge = LineGauge::default()
            .block(Block::new().padding(Padding {
                left: 2,
                right: 2,
                top: 0,
                bottom: 0,
            }))
            .filled_style(Style::new().fg(Color::LightBlue))
            .unfilled_style(Style::new().fg(Color::DarkGray))
            .label("")
            .ratio(ratio);

        gauge.render(area, buf);
    }
}
