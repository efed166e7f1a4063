use crate::theme::Theme;
use serde::Deserialize;
use std::path::Path;

/// Geometry constants of the stick figure. Base lengths are in chart units
/// for a measurement of 10 on a player of `reference_height`.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub reference_height: f32,
    pub base_leg: f32,
    pub base_arm: f32,
    pub base_neck: f32,
    pub base_shoulder: f32,
    /// Torso height as a fraction of the scaled base leg length.
    pub torso_factor: f32,
    /// Gap between the neck top and the head marker.
    pub head_clearance: f32,
    /// Horizontal distance of each figure from the chart centre.
    pub figure_separation: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            reference_height: 180.0,
            base_leg: 50.0,
            base_arm: 35.0,
            base_neck: 12.0,
            base_shoulder: 25.0,
            torso_factor: 0.1,
            head_clearance: 10.0,
            figure_separation: 120.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_side: f32,
    pub title: String,
    pub leg_stroke_width: f32,
    pub bone_stroke_width: f32,
    pub head_size: f32,
    pub head_stroke_width: f32,
    pub hover_marker_size: f32,
    pub caption_offset: f32,
    pub guide_offset: f32,
    pub guide_stroke_width: f32,
    pub guide_dasharray: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
            margin_top: 40.0,
            margin_side: 0.0,
            title: "eFootball Player Model Visualizer".to_string(),
            leg_stroke_width: 7.0,
            bone_stroke_width: 5.0,
            head_size: 22.0,
            head_stroke_width: 2.0,
            hover_marker_size: 28.0,
            caption_offset: 25.0,
            guide_offset: 45.0,
            guide_stroke_width: 2.0,
            guide_dasharray: "6,4".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Every length constant must be finite and positive; the torso factor
    /// and head clearance may be zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (key, value) in [
            ("referenceHeight", self.reference_height),
            ("baseLeg", self.base_leg),
            ("baseArm", self.base_arm),
            ("baseNeck", self.base_neck),
            ("baseShoulder", self.base_shoulder),
        ] {
            ensure_positive("layout", key, value)?;
        }
        ensure_non_negative("layout", "torsoFactor", self.torso_factor)?;
        ensure_non_negative("layout", "headClearance", self.head_clearance)?;
        ensure_finite("layout", "figureSeparation", self.figure_separation)
    }
}

impl RenderConfig {
    /// Smallest canvas edge the SVG writer emits.
    pub const MIN_CANVAS: f32 = 200.0;

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure_positive("render", "width", self.width)?;
        ensure_positive("render", "height", self.height)?;
        for (key, value) in [
            ("legStrokeWidth", self.leg_stroke_width),
            ("boneStrokeWidth", self.bone_stroke_width),
            ("headSize", self.head_size),
            ("hoverMarkerSize", self.hover_marker_size),
            ("guideOffset", self.guide_offset),
        ] {
            ensure_non_negative("render", key, value)?;
        }
        Ok(())
    }

    /// Canvas size actually written to the SVG, clamped to `MIN_CANVAS`.
    pub fn canvas_size(&self) -> (f32, f32) {
        (
            self.width.max(Self::MIN_CANVAS),
            self.height.max(Self::MIN_CANVAS),
        )
    }
}

fn ensure_finite(section: &str, key: &str, value: f32) -> anyhow::Result<()> {
    if !value.is_finite() {
        return Err(anyhow::anyhow!("{section}.{key} must be a finite number, got {value}"));
    }
    Ok(())
}

fn ensure_positive(section: &str, key: &str, value: f32) -> anyhow::Result<()> {
    ensure_finite(section, key, value)?;
    if value <= 0.0 {
        return Err(anyhow::anyhow!("{section}.{key} must be positive, got {value}"));
    }
    Ok(())
}

fn ensure_non_negative(section: &str, key: &str, value: f32) -> anyhow::Result<()> {
    ensure_finite(section, key, value)?;
    if value < 0.0 {
        return Err(anyhow::anyhow!("{section}.{key} must not be negative, got {value}"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    text_color: Option<String>,
    background: Option<String>,
    left_color: Option<String>,
    right_color: Option<String>,
    arm_color: Option<String>,
    neck_color: Option<String>,
    shoulder_color: Option<String>,
    torso_color: Option<String>,
    head_color: Option<String>,
    hover_color: Option<String>,
    guide_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    reference_height: Option<f32>,
    base_leg: Option<f32>,
    base_arm: Option<f32>,
    base_neck: Option<f32>,
    base_shoulder: Option<f32>,
    torso_factor: Option<f32>,
    head_clearance: Option<f32>,
    figure_separation: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    title: Option<String>,
    leg_stroke_width: Option<f32>,
    bone_stroke_width: Option<f32>,
    head_size: Option<f32>,
    hover_marker_size: Option<f32>,
    guide_offset: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a config document. Strict JSON is tried first; JSON5 (comments,
/// trailing commas, unquoted keys) is accepted as a fallback.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .map_err(|_| anyhow::anyhow!("invalid config file: {json_err}"))?,
    };
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "modern" => config.theme = Theme::modern(),
            "plotly" | "default" => config.theme = Theme::plotly(),
            other => log::warn!("unknown theme {other:?}, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }

    if let Some(layout) = parsed.layout {
        let cfg = &mut config.layout;
        if let Some(v) = layout.reference_height {
            cfg.reference_height = v;
        }
        if let Some(v) = layout.base_leg {
            cfg.base_leg = v;
        }
        if let Some(v) = layout.base_arm {
            cfg.base_arm = v;
        }
        if let Some(v) = layout.base_neck {
            cfg.base_neck = v;
        }
        if let Some(v) = layout.base_shoulder {
            cfg.base_shoulder = v;
        }
        if let Some(v) = layout.torso_factor {
            cfg.torso_factor = v;
        }
        if let Some(v) = layout.head_clearance {
            cfg.head_clearance = v;
        }
        if let Some(v) = layout.figure_separation {
            cfg.figure_separation = v;
        }
    }

    if let Some(render) = parsed.render {
        let cfg = &mut config.render;
        if let Some(v) = render.width {
            cfg.width = v;
        }
        if let Some(v) = render.height {
            cfg.height = v;
        }
        if let Some(v) = render.title {
            cfg.title = v;
        }
        if let Some(v) = render.leg_stroke_width {
            cfg.leg_stroke_width = v;
        }
        if let Some(v) = render.bone_stroke_width {
            cfg.bone_stroke_width = v;
        }
        if let Some(v) = render.head_size {
            cfg.head_size = v;
        }
        if let Some(v) = render.hover_marker_size {
            cfg.hover_marker_size = v;
        }
        if let Some(v) = render.guide_offset {
            cfg.guide_offset = v;
        }
    }

    config.layout.validate()?;
    config.render.validate()?;
    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    if let Some(v) = vars.font_family {
        theme.font_family = v;
    }
    if let Some(v) = vars.font_size {
        theme.font_size = v;
    }
    if let Some(v) = vars.text_color {
        theme.text_color = v;
    }
    if let Some(v) = vars.background {
        theme.background = v;
    }
    if let Some(v) = vars.left_color {
        theme.accent_colors[0] = v;
    }
    if let Some(v) = vars.right_color {
        theme.accent_colors[1] = v;
    }
    if let Some(v) = vars.arm_color {
        theme.arm_color = v;
    }
    if let Some(v) = vars.neck_color {
        theme.neck_color = v;
    }
    if let Some(v) = vars.shoulder_color {
        theme.shoulder_color = v;
    }
    if let Some(v) = vars.torso_color {
        theme.torso_color = v;
    }
    if let Some(v) = vars.head_color {
        theme.head_fill = v;
    }
    if let Some(v) = vars.hover_color {
        theme.hover_fill = v;
    }
    if let Some(v) = vars.guide_color {
        theme.guide_color = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.base_leg, 50.0);
        assert_eq!(config.render.width, 900.0);
        assert_eq!(config.theme.accent_colors[0], "crimson");
    }

    #[test]
    fn overrides_apply_on_top_of_theme() {
        let config = parse_config(
            r##"{"theme": "modern", "themeVariables": {"leftColor": "#FF0000"},
                "layout": {"baseLeg": 60}, "render": {"width": 1200}}"##,
        )
        .unwrap();
        assert_eq!(config.theme.accent_colors[0], "#FF0000");
        assert_eq!(config.theme.arm_color, Theme::modern().arm_color);
        assert_eq!(config.layout.base_leg, 60.0);
        assert_eq!(config.layout.base_arm, 35.0);
        assert_eq!(config.render.width, 1200.0);
    }

    #[test]
    fn accepts_json5() {
        let config = parse_config(
            "{\n  // wider figures\n  layout: { baseShoulder: 30, },\n}\n",
        )
        .unwrap();
        assert_eq!(config.layout.base_shoulder, 30.0);
    }

    #[test]
    fn rejects_non_positive_reference_height() {
        assert!(parse_config(r#"{"layout": {"referenceHeight": 0}}"#).is_err());
    }

    #[test]
    fn rejects_nan_and_infinite_layout_constants() {
        let err = parse_config("{layout: {referenceHeight: NaN}}").unwrap_err();
        assert!(err.to_string().contains("layout.referenceHeight"));
        assert!(parse_config("{layout: {baseArm: Infinity}}").is_err());
        assert!(parse_config("{layout: {headClearance: NaN}}").is_err());
    }

    #[test]
    fn rejects_zero_or_negative_base_lengths() {
        let err = parse_config(r#"{"layout": {"baseLeg": 0}}"#).unwrap_err();
        assert!(err.to_string().contains("layout.baseLeg"));
        assert!(parse_config(r#"{"layout": {"baseLeg": -50}}"#).is_err());
        assert!(parse_config(r#"{"layout": {"baseShoulder": -1}}"#).is_err());
        assert!(parse_config(r#"{"layout": {"torsoFactor": -0.1}}"#).is_err());
    }

    #[test]
    fn zero_torso_and_clearance_are_allowed() {
        let config = parse_config(r#"{"layout": {"torsoFactor": 0, "headClearance": 0}}"#).unwrap();
        assert_eq!(config.layout.torso_factor, 0.0);
        assert_eq!(config.layout.head_clearance, 0.0);
    }

    #[test]
    fn rejects_bad_canvas_size() {
        assert!(parse_config(r#"{"render": {"width": 0}}"#).is_err());
        assert!(parse_config("{render: {height: NaN}}").is_err());
    }

    #[test]
    fn canvas_size_is_clamped() {
        let render = RenderConfig {
            width: 100.0,
            height: 900.0,
            ..RenderConfig::default()
        };
        assert_eq!(render.canvas_size(), (200.0, 900.0));
    }
}
