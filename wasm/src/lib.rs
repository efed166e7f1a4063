use player_model_viz::summary::render_html;
use player_model_viz::{Config, Dataset, Record, Theme, render_comparison};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonOptions {
    theme: Option<String>,
    left_color: Option<String>,
    right_color: Option<String>,
    width: Option<f32>,
    height: Option<f32>,
}

fn build_config(options: ComparisonOptions) -> anyhow::Result<Config> {
    let mut config = Config::default();
    if options.theme.as_deref() == Some("modern") {
        config.theme = Theme::modern();
    }
    if let Some(color) = options.left_color {
        config.theme.accent_colors[0] = color;
    }
    if let Some(color) = options.right_color {
        config.theme.accent_colors[1] = color;
    }
    if let Some(width) = options.width {
        config.render.width = width;
    }
    if let Some(height) = options.height {
        config.render.height = height;
    }
    config.render.validate()?;
    Ok(config)
}

fn parse_options(options_json: Option<String>) -> Result<ComparisonOptions, JsValue> {
    match options_json {
        Some(raw) => serde_json::from_str(&raw).map_err(|error| JsValue::from_str(&error.to_string())),
        None => Ok(ComparisonOptions::default()),
    }
}

fn select<'a>(
    dataset: &'a Dataset,
    left: Option<String>,
    right: Option<String>,
) -> player_model_viz::Result<(&'a Record, &'a Record)> {
    let (default_left, default_right) = dataset.default_selection();
    let left = match left.as_deref() {
        Some(name) => dataset.lookup(name)?,
        None => default_left,
    };
    let right = match right.as_deref() {
        Some(name) => dataset.lookup(name)?,
        None => default_right,
    };
    Ok((left, right))
}

fn to_js(error: impl ToString) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Player names in CSV order, for populating the two selection controls.
#[wasm_bindgen(js_name = playerNames)]
pub fn player_names(csv: &str) -> Result<Vec<String>, JsValue> {
    let dataset = Dataset::from_reader(csv.as_bytes()).map_err(to_js)?;
    Ok(dataset.names().into_iter().map(str::to_string).collect())
}

#[wasm_bindgen(js_name = renderComparisonSvg)]
pub fn render_comparison_svg(
    csv: &str,
    left: Option<String>,
    right: Option<String>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?).map_err(to_js)?;
    let dataset = Dataset::from_reader(csv.as_bytes()).map_err(to_js)?;
    let (left, right) = select(&dataset, left, right).map_err(to_js)?;
    let (_, svg) = render_comparison(left, right, &config).map_err(to_js)?;
    Ok(svg)
}

#[wasm_bindgen(js_name = renderComparisonPage)]
pub fn render_comparison_page(
    csv: &str,
    left: Option<String>,
    right: Option<String>,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let config = build_config(parse_options(options_json)?).map_err(to_js)?;
    let dataset = Dataset::from_reader(csv.as_bytes()).map_err(to_js)?;
    let (left, right) = select(&dataset, left, right).map_err(to_js)?;
    let (_, svg) = render_comparison(left, right, &config).map_err(to_js)?;
    Ok(render_html(&svg, left, right, &config.render, &config.theme))
}

#[cfg(test)]
mod tests {
    use player_model_viz::{Dataset, render_comparison};

    use crate::{ComparisonOptions, build_config, select};

    const CSV: &str = "\
Name,Leg_Length,Arm_Length,Neck_Length,Shoulder_Width,Height_cm,Position,Club
Alpha,10,10,10,10,180,CF,One
Beta,11,9,10,12,190,CB,Two
";

    #[test]
    fn renders_default_pair_with_custom_accent() {
        let config = build_config(ComparisonOptions {
            left_color: Some("#FF8800".to_string()),
            ..ComparisonOptions::default()
        })
        .expect("options are valid");
        let dataset = Dataset::from_reader(CSV.as_bytes()).expect("csv should load");
        let (left, right) = select(&dataset, None, None).expect("default pair");
        let (_, svg) = render_comparison(left, right, &config).expect("pair should render");

        assert!(svg.contains("<svg"));
        assert!(svg.contains("#FF8800"));
        assert!(svg.contains("Beta"));
    }

    #[test]
    fn invalid_canvas_size_is_rejected() {
        assert!(
            build_config(ComparisonOptions {
                width: Some(f32::NAN),
                ..ComparisonOptions::default()
            })
            .is_err()
        );
        assert!(
            build_config(ComparisonOptions {
                height: Some(-10.0),
                ..ComparisonOptions::default()
            })
            .is_err()
        );
    }

    #[test]
    fn unknown_player_is_an_error() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).expect("csv should load");
        assert!(select(&dataset, Some("Gamma".to_string()), None).is_err());
    }
}
