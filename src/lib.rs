#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod layout;
pub mod layout_dump;
pub mod record;
pub mod render;
pub mod summary;
pub mod text_metrics;
pub mod theme;

pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use dataset::{Dataset, DuplicatePolicy};
pub use error::{Error, Result};
pub use layout::{Annotation, BodyPart, Layout, Segment, compute_layout};
pub use record::{Attribute, Record};
pub use render::{Figure, Scene, render_scene, render_svg};
pub use theme::Theme;

#[cfg(feature = "cli")]
pub use cli::run;

/// Lays out and renders two players side by side with the configured
/// separation and accent colours.
pub fn render_comparison(left: &Record, right: &Record, config: &Config) -> Result<(Scene, String)> {
    let offset = config.layout.figure_separation;
    let left_layout = compute_layout(left, -offset, &config.layout)?;
    let right_layout = compute_layout(right, offset, &config.layout)?;
    let scene = render_scene(
        Figure {
            record: left,
            layout: &left_layout,
            accent: &config.theme.accent_colors[0],
        },
        Figure {
            record: right,
            layout: &right_layout,
            accent: &config.theme.accent_colors[1],
        },
        &config.theme,
        &config.render,
    );
    let svg = render_svg(&scene, &config.theme, &config.render);
    Ok((scene, svg))
}
