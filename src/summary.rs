//! Text that accompanies the chart: per-player summaries, the side-by-side
//! table and the HTML page that stitches everything together.

use crate::config::RenderConfig;
use crate::record::{Attribute, Record, format_value};
use crate::render::{css_value, escape_xml};
use crate::theme::Theme;

pub const INSTRUCTIONS: [&str; 4] = [
    "Choose any two players.",
    "Hover over arms, legs, neck, or height bar to see the exact attribute values as tooltips.",
    "Player names shown below figures.",
    "Height scale shown on sides for context.",
];

pub fn summary_heading(record: &Record) -> String {
    format!("{} ({}, {})", record.name, record.position, record.club)
}

/// `Label: value` lines in display order; height carries its unit.
pub fn summary_lines(record: &Record) -> Vec<String> {
    Attribute::ALL
        .iter()
        .map(|&attribute| {
            let value = match record.measurement(attribute) {
                Some(v) if attribute == Attribute::Height => format!("{} cm", format_value(v)),
                Some(v) => format_value(v),
                None => "n/a".to_string(),
            };
            format!("{}: {value}", attribute.label())
        })
        .collect()
}

/// Two-column plain-text table of both players.
pub fn summary_table(left: &Record, right: &Record) -> String {
    let mut left_col = vec![summary_heading(left)];
    left_col.extend(summary_lines(left).into_iter().map(|line| format!("- {line}")));
    let mut right_col = vec![summary_heading(right)];
    right_col.extend(summary_lines(right).into_iter().map(|line| format!("- {line}")));

    let width = left_col
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (idx, (l, r)) in left_col.iter().zip(&right_col).enumerate() {
        let pad = width - l.chars().count();
        out.push_str(&format!("{l}{}   {r}\n", " ".repeat(pad)));
        if idx == 0 {
            out.push_str(&format!("{}   {}\n", "-".repeat(width), "-".repeat(r.chars().count())));
        }
    }
    out
}

pub fn instructions_text() -> String {
    let mut out = String::from("Instructions:\n");
    for line in INSTRUCTIONS {
        out.push_str(&format!("- {line}\n"));
    }
    out
}

fn summary_panel_html(record: &Record, accent: &str) -> String {
    let mut html = format!(
        "<section class=\"player\"><h2 style=\"color:{}\">{}</h2><ul>",
        escape_xml(accent),
        escape_xml(&summary_heading(record))
    );
    for line in summary_lines(record) {
        let (label, value) = line.split_once(": ").unwrap_or((line.as_str(), ""));
        html.push_str(&format!(
            "<li><strong>{}:</strong> {}</li>",
            escape_xml(label),
            escape_xml(value)
        ));
    }
    html.push_str("</ul></section>");
    html
}

/// Self-contained page: title, chart, both summaries and the instructions.
pub fn render_html(svg: &str, left: &Record, right: &Record, config: &RenderConfig, theme: &Theme) -> String {
    let title = escape_xml(&config.title);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str(&format!("<title>{title}</title>"));
    html.push_str(&format!(
        "<style>body{{font-family:{};color:{};background:{};margin:2rem}}\
         .columns{{display:grid;grid-template-columns:1fr 1fr;gap:2rem}}\
         .chart svg{{width:100%;height:auto}}\
         .info{{background:#E8F1FB;border-radius:6px;padding:1rem 1.5rem}}</style>",
        css_value(&theme.font_family),
        css_value(&theme.text_color),
        css_value(&theme.background)
    ));
    html.push_str("</head><body>");
    html.push_str(&format!("<h1>{title}</h1>"));
    html.push_str(&format!("<div class=\"chart\">{svg}</div>"));
    html.push_str("<div class=\"columns\">");
    html.push_str(&summary_panel_html(left, &theme.accent_colors[0]));
    html.push_str(&summary_panel_html(right, &theme.accent_colors[1]));
    html.push_str("</div>");
    html.push_str("<div class=\"info\"><strong>Instructions:</strong><ul>");
    for line in INSTRUCTIONS {
        html.push_str(&format!("<li>{}</li>", escape_xml(line)));
    }
    html.push_str("</ul></div></body></html>\n");
    html
}
