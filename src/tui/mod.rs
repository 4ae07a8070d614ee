mod layout;
mod renderer;
pub mod widgets;

pub use layout::AppLayout;
pub use renderer::render;
