use crate::config::load_config;
use crate::dataset::{Dataset, DuplicatePolicy};
use crate::layout::compute_layout;
use crate::layout_dump::{ComparisonDump, write_layout_dump};
use crate::render::{write_output_png, write_output_svg};
use crate::summary::{instructions_text, render_html, summary_table};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pmviz", version, about = "Compare two player body models as stick figures")]
pub struct Args {
    /// Player CSV (Name, Leg_Length, Arm_Length, Neck_Length, Shoulder_Width, Height_cm, Position, Club)
    #[arg(short = 'd', long = "data", default_value = "player_models.csv")]
    pub data: PathBuf,

    /// Left player; defaults to the first row
    #[arg(short = 'l', long = "left")]
    pub left: Option<String>,

    /// Right player; defaults to the second row
    #[arg(short = 'r', long = "right")]
    pub right: Option<String>,

    /// Output file. Defaults to stdout for text formats if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON/JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Fail when a selected name matches more than one row
    #[arg(long = "strict-names")]
    pub strict_names: bool,

    /// Print every player name and exit
    #[arg(long = "list")]
    pub list: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Html,
    Json,
    Text,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    execute(&args)
}

pub fn execute(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    config.render.validate()?;

    let policy = if args.strict_names {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::FirstMatch
    };
    let dataset = Dataset::load(&args.data)?.with_policy(policy);

    if args.list {
        for name in dataset.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let (default_left, default_right) = dataset.default_selection();
    let left = match args.left.as_deref() {
        Some(name) => dataset.lookup(name)?,
        None => default_left,
    };
    let right = match args.right.as_deref() {
        Some(name) => dataset.lookup(name)?,
        None => default_right,
    };
    log::info!("comparing {:?} with {:?}", left.name, right.name);

    match args.output_format {
        OutputFormat::Text => {
            let text = format!("{}\n{}", summary_table(left, right), instructions_text());
            write_text(&text, args.output.as_deref())?;
        }
        OutputFormat::Json => {
            let offset = config.layout.figure_separation;
            let left_layout = compute_layout(left, -offset, &config.layout)?;
            let right_layout = compute_layout(right, offset, &config.layout)?;
            let dump = ComparisonDump::new(&[(&left_layout, left), (&right_layout, right)]);
            write_layout_dump(args.output.as_deref(), &dump)?;
        }
        OutputFormat::Svg => {
            let (_, svg) = crate::render_comparison(left, right, &config)?;
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Html => {
            let (_, svg) = crate::render_comparison(left, right, &config)?;
            let html = render_html(&svg, left, right, &config.render, &config.theme);
            write_text(&html, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            let (_, svg) = crate::render_comparison(left, right, &config)?;
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }

    Ok(())
}

fn write_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const CSV: &str = "\
Name,Leg_Length,Arm_Length,Neck_Length,Shoulder_Width,Height_cm,Position,Club
Alpha,10,10,10,10,180,CF,One
Beta,11,9,10,12,190,CB,Two
Gamma,10,,10,10,180,GK,Three
";

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pmviz-{}-{name}", std::process::id()))
    }

    fn args_for(data: &Path, extra: &[&str]) -> Args {
        let mut argv = vec!["pmviz", "-d", data.to_str().unwrap()];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn parses_defaults() {
        let args = Args::try_parse_from(["pmviz"]).unwrap();
        assert_eq!(args.data, PathBuf::from("player_models.csv"));
        assert_eq!(args.output_format, OutputFormat::Svg);
        assert!(args.left.is_none() && args.right.is_none());
    }

    #[test]
    fn writes_svg_and_html_for_selected_players() {
        let data = temp_path("players.csv");
        std::fs::write(&data, CSV).unwrap();

        let svg_out = temp_path("out.svg");
        let args = args_for(&data, &["-l", "Beta", "-r", "Alpha", "-o", svg_out.to_str().unwrap()]);
        execute(&args).unwrap();
        let svg = std::fs::read_to_string(&svg_out).unwrap();
        assert!(svg.contains(">Beta</text>"));
        assert!(svg.contains(">Alpha</text>"));
        assert!(svg.contains("<title>Height: 190</title>"));

        let html_out = temp_path("out.html");
        let args = args_for(&data, &["-e", "html", "-o", html_out.to_str().unwrap()]);
        execute(&args).unwrap();
        let html = std::fs::read_to_string(&html_out).unwrap();
        assert!(html.contains("Alpha (CF, One)"));
        assert!(html.contains("Beta (CB, Two)"));

        for path in [data, svg_out, html_out] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn unknown_name_is_not_found() {
        let data = temp_path("missing.csv");
        std::fs::write(&data, CSV).unwrap();
        let args = args_for(&data, &["-r", "Delta", "-e", "text"]);
        let err = execute(&args).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NotFound { .. })));
        let _ = std::fs::remove_file(data);
    }

    #[test]
    fn missing_measurement_is_reported() {
        let data = temp_path("invalid.csv");
        std::fs::write(&data, CSV).unwrap();
        let args = args_for(&data, &["-r", "Gamma", "-e", "json"]);
        let err = execute(&args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidMeasurement { .. })
        ));
        let _ = std::fs::remove_file(data);
    }

    #[test]
    fn writes_text_summary_to_file() {
        let data = temp_path("text.csv");
        std::fs::write(&data, CSV).unwrap();
        let out = temp_path("summary.txt");
        let args = args_for(&data, &["-e", "text", "-o", out.to_str().unwrap()]);
        execute(&args).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("Alpha (CF, One)"));
        assert!(text.contains("Beta (CB, Two)"));
        assert!(text.contains("Instructions:"));
        for path in [data, out] {
            let _ = std::fs::remove_file(path);
        }
    }

    #[test]
    fn list_returns_before_writing_output() {
        let data = temp_path("list.csv");
        std::fs::write(&data, CSV).unwrap();
        let out = temp_path("list.svg");
        let _ = std::fs::remove_file(&out);
        let args = args_for(&data, &["--list", "-o", out.to_str().unwrap()]);
        execute(&args).unwrap();
        assert!(!out.exists());
        let _ = std::fs::remove_file(data);
    }

    #[test]
    fn non_finite_canvas_override_is_rejected() {
        let data = temp_path("canvas.csv");
        std::fs::write(&data, CSV).unwrap();
        let out = temp_path("canvas.svg");
        let _ = std::fs::remove_file(&out);
        for extra in [["-w", "NaN"], ["-H", "0"]] {
            let mut argv = extra.to_vec();
            argv.extend_from_slice(&["-o", out.to_str().unwrap()]);
            let err = execute(&args_for(&data, &argv)).unwrap_err();
            assert!(err.to_string().starts_with("render."), "{err}");
        }
        assert!(!out.exists());
        let _ = std::fs::remove_file(data);
    }

    #[test]
    fn png_requires_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        assert_eq!(
            ensure_output(&Some(PathBuf::from("a.png")), "png").unwrap(),
            PathBuf::from("a.png")
        );
    }
}
