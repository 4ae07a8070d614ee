use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub track_list: Rect,
    pub progress_bar: Rect,
    pub status_line: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let [track_list, progress_bar, status_line] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas::<3>(area);

        AppLayout {
            track_list,
            progress_bar,
            status_line,
        }
    }
}
