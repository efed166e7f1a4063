use crate::config::RenderConfig;
use crate::layout::{BodyPart, Layout};
use crate::record::{Record, format_value};
use crate::text_metrics;
use crate::theme::Theme;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// One figure to draw: the player, its geometry and the accent colour that
/// tells it apart from the other figure.
#[derive(Debug, Clone, Copy)]
pub struct Figure<'a> {
    pub record: &'a Record,
    pub layout: &'a Layout,
    pub accent: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Baseline {
    Middle,
    /// Text hangs below its anchor point.
    Hanging,
}

/// Drawable primitive in chart units (y up).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Primitive {
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: String,
        width: f32,
        dasharray: Option<String>,
        hover: Option<String>,
    },
    Marker {
        center: (f32, f32),
        /// Diameter in pixels; markers do not scale with the chart.
        size: f32,
        fill: String,
        stroke: Option<(String, f32)>,
        hover: Option<String>,
    },
    Text {
        at: (f32, f32),
        text: String,
        size: f32,
        color: String,
        font_family: String,
        anchor: TextAnchor,
        baseline: Baseline,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min_x: f32::INFINITY,
            min_y: f32::INFINITY,
            max_x: f32::NEG_INFINITY,
            max_y: f32::NEG_INFINITY,
        }
    }

    fn include(&mut self, x: f32, y: f32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> f32 {
        (self.max_x - self.min_x).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.max_y - self.min_y).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    /// Extent of every primitive anchor in chart units.
    pub bounds: Bounds,
}

impl Scene {
    pub fn hover_texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Line { hover, .. } | Primitive::Marker { hover, .. } => hover.as_deref(),
            Primitive::Text { .. } => None,
        })
    }
}

pub fn render_scene(left: Figure<'_>, right: Figure<'_>, theme: &Theme, config: &RenderConfig) -> Scene {
    let mut primitives = Vec::new();
    for figure in [left, right] {
        push_figure(&mut primitives, figure, theme, config);
    }

    let mut bounds = Bounds::empty();
    for primitive in &primitives {
        match primitive {
            Primitive::Line { from, to, .. } => {
                bounds.include(from.0, from.1);
                bounds.include(to.0, to.1);
            }
            Primitive::Marker { center, .. } | Primitive::Text { at: center, .. } => {
                bounds.include(center.0, center.1);
            }
        }
    }
    if !bounds.min_x.is_finite() {
        bounds = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 1.0,
            max_y: 1.0,
        };
    }
    log::debug!("scene with {} primitives, bounds {:?}", primitives.len(), bounds);
    Scene { primitives, bounds }
}

fn push_figure(out: &mut Vec<Primitive>, figure: Figure<'_>, theme: &Theme, config: &RenderConfig) {
    let layout = figure.layout;
    let record = figure.record;

    for segment in &layout.segments {
        let width = if segment.part == BodyPart::Leg {
            config.leg_stroke_width
        } else {
            config.bone_stroke_width
        };
        out.push(Primitive::Line {
            from: segment.start,
            to: segment.end,
            color: theme.bone_color(segment.part, figure.accent).to_string(),
            width,
            dasharray: None,
            hover: Some(segment.label.clone()),
        });
    }

    let height_text = record.height.map(format_value).unwrap_or_default();
    let head = layout.head_marker();
    out.push(Primitive::Marker {
        center: head,
        size: config.head_size,
        fill: theme.head_fill.clone(),
        stroke: Some((theme.head_stroke.clone(), config.head_stroke_width)),
        hover: Some(format!("Height: {height_text}")),
    });

    for point in &layout.points {
        out.push(Primitive::Marker {
            center: (point.x, point.y),
            size: config.hover_marker_size,
            fill: theme.hover_fill.clone(),
            stroke: None,
            hover: Some(point.hover_text()),
        });
    }

    out.push(Primitive::Text {
        at: (layout.center_x, layout.foot_y - config.caption_offset),
        text: record.name.clone(),
        size: theme.caption_font_size,
        color: figure.accent.to_string(),
        font_family: theme.caption_font_family.clone(),
        anchor: TextAnchor::Middle,
        baseline: Baseline::Hanging,
    });

    let mid_y = (layout.foot_y + head.1) / 2.0;
    for dx in [-config.guide_offset, config.guide_offset] {
        let x = layout.center_x + dx;
        out.push(Primitive::Line {
            from: (x, layout.foot_y),
            to: (x, head.1),
            color: theme.guide_color.clone(),
            width: config.guide_stroke_width,
            dasharray: Some(config.guide_dasharray.clone()),
            hover: None,
        });
        out.push(Primitive::Text {
            at: (x, mid_y),
            text: format!("{height_text} cm"),
            size: theme.guide_font_size,
            color: theme.guide_color.clone(),
            font_family: theme.font_family.clone(),
            anchor: if dx > 0.0 { TextAnchor::Start } else { TextAnchor::End },
            baseline: Baseline::Middle,
        });
    }
}

/// Maps chart units into the SVG canvas with a uniform scale, flipping y.
struct Viewport {
    scale: f32,
    origin_x: f32,
    origin_y: f32,
}

impl Viewport {
    /// Fits the scene into a `width` x `height` canvas. Callers pass the
    /// clamped canvas size so the mapping matches the emitted `<svg>`.
    fn fit(scene: &Scene, theme: &Theme, config: &RenderConfig, (width, height): (f32, f32)) -> Self {
        // Markers and labels have a fixed pixel size, so reserve room for them
        // around the geometry before picking the scale.
        let pad_x = horizontal_text_extent(scene).max(config.hover_marker_size);
        let pad_y = config.hover_marker_size.max(theme.caption_font_size * 1.5);
        let avail_w = (width - 2.0 * (config.margin_side + pad_x)).max(1.0);
        let avail_h = (height - config.margin_top - 2.0 * pad_y).max(1.0);
        let bounds = scene.bounds;
        let scale = (avail_w / bounds.width().max(1.0)).min(avail_h / bounds.height().max(1.0));
        let used_w = bounds.width() * scale;
        let used_h = bounds.height() * scale;
        let origin_x = (width - used_w) / 2.0 - bounds.min_x * scale;
        let top = config.margin_top + (height - config.margin_top - used_h) / 2.0;
        let origin_y = top + bounds.max_y * scale;
        Self {
            scale,
            origin_x,
            origin_y,
        }
    }

    fn map(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }
}

fn horizontal_text_extent(scene: &Scene) -> f32 {
    scene
        .primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Text {
                text,
                size,
                font_family,
                anchor,
                ..
            } => {
                let width = text_metrics::text_width(text, *size, font_family);
                Some(if *anchor == TextAnchor::Middle { width / 2.0 } else { width + 4.0 })
            }
            _ => None,
        })
        .fold(0.0, f32::max)
}

pub fn render_svg(scene: &Scene, theme: &Theme, config: &RenderConfig) -> String {
    let (width, height) = config.canvas_size();
    let viewport = Viewport::fit(scene, theme, config, (width, height));
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));
    svg.push_str(&format!(
        "<style>.hover-point:hover{{stroke:{};stroke-width:1.5}}</style>",
        css_value(&theme.text_color)
    ));
    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        escape_xml(&theme.background)
    ));

    for primitive in &scene.primitives {
        match primitive {
            Primitive::Line {
                from,
                to,
                color,
                width,
                dasharray,
                hover,
            } => {
                let (x1, y1) = viewport.map(*from);
                let (x2, y2) = viewport.map(*to);
                let dash = dasharray
                    .as_ref()
                    .map(|d| format!(" stroke-dasharray=\"{d}\""))
                    .unwrap_or_default();
                svg.push_str(&format!(
                    "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\" stroke=\"{}\" stroke-width=\"{width}\" stroke-linecap=\"round\"{dash}",
                    escape_xml(color)
                ));
                close_with_title(&mut svg, "line", hover.as_deref());
            }
            Primitive::Marker {
                center,
                size,
                fill,
                stroke,
                hover,
            } => {
                let (cx, cy) = viewport.map(*center);
                let stroke_attr = stroke
                    .as_ref()
                    .map(|(color, w)| format!(" stroke=\"{}\" stroke-width=\"{w}\"", escape_xml(color)))
                    .unwrap_or_default();
                let class = if stroke.is_none() && hover.is_some() {
                    " class=\"hover-point\""
                } else {
                    ""
                };
                svg.push_str(&format!(
                    "<circle{class} cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"{}\"{stroke_attr}",
                    size / 2.0,
                    escape_xml(fill)
                ));
                close_with_title(&mut svg, "circle", hover.as_deref());
            }
            Primitive::Text {
                at,
                text,
                size,
                color,
                font_family,
                anchor,
                baseline,
            } => {
                let (x, y) = viewport.map(*at);
                let (x, y, dominant) = match baseline {
                    Baseline::Middle => (x, y, "central"),
                    Baseline::Hanging => (x, y + 4.0, "hanging"),
                };
                let x = match anchor {
                    TextAnchor::Start => x + 4.0,
                    TextAnchor::End => x - 4.0,
                    TextAnchor::Middle => x,
                };
                svg.push_str(&format!(
                    "<text x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"{}\" dominant-baseline=\"{dominant}\" font-family=\"{}\" font-size=\"{size}\" fill=\"{}\">{}</text>",
                    anchor.as_svg(),
                    escape_xml(font_family),
                    escape_xml(color),
                    escape_xml(text)
                ));
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn close_with_title(svg: &mut String, tag: &str, hover: Option<&str>) {
    match hover {
        Some(text) => {
            svg.push_str(&format!("><title>{}</title></{tag}>", escape_xml(text)));
        }
        None => svg.push_str("/>"),
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
            log::info!("wrote {}", path.display());
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig, theme: &Theme) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = primary_family(&theme.font_family);
    opt.fontdb_mut().load_system_fonts();
    let (width, height) = render_cfg.canvas_size();
    opt.default_size = usvg::Size::from_wh(width, height)
        .ok_or_else(|| anyhow::anyhow!("invalid canvas size {width}x{height}"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    log::info!("wrote {}", output.display());
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig, _theme: &Theme) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

#[cfg(feature = "png")]
fn primary_family(font_family: &str) -> String {
    font_family
        .split(',')
        .map(|part| part.trim().trim_matches('"').trim_matches('\''))
        .find(|part| !part.is_empty())
        .unwrap_or("sans-serif")
        .to_string()
}

pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Drops characters that could close a declaration, a rule or the
/// surrounding `<style>` element. Quotes stay so font lists keep working.
pub(crate) fn css_value(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '{' | '}' | ';' | '\\'))
        .collect()
}
