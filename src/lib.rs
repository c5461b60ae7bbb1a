#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod html;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
#[cfg(feature = "fetch")]
pub mod records;
pub mod render;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig};
pub use html::render_html;
pub use ir::Timetable;
pub use layout::{Layout, compute_layout};
pub use parser::parse_events;
pub use render::render_svg;
pub use theme::Theme;
