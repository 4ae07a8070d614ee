use crate::{get_readable_duration, ui_state::UiState};
use ratatui::{
    style::Stylize,
    text::{Line, Span},
    widgets::{StatefulWidget, Widget},
};

pub struct StatusLine;

impl StatefulWidget for StatusLine {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let timing = match (state.elapsed(), state.duration) {
            (Some(elapsed), Some(total)) => format!(
                "{} / {}",
                get_readable_duration(elapsed),
                get_readable_duration(total)
            ),
            _ => String::from("-:-- / -:--"),
        };

        let line = Line::from(vec![
            Span::from(format!(" [{}] ", state.state_label())).bold(),
            Span::from(state.track_label.as_str()),
            Span::from(format!("  {timing}")).dim(),
            Span::from(format!("  speed {}%", state.speed_percent)).dim(),
            Span::from(format!("  vol {}%", state.volume)).dim(),
        ]);

        line.render(area, buf);
    }
}
