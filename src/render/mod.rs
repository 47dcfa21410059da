pub mod renderer;
pub mod theme;

pub use renderer::Renderer;
pub use theme::Theme;
