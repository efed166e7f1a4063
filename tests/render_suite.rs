use std::path::Path;

use player_model_viz::{
    BodyPart, Config, Dataset, DuplicatePolicy, Error, compute_layout, render_comparison,
};

fn fixture_dataset() -> Dataset {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("player_models.csv");
    Dataset::load(&path).expect("fixture should load")
}

fn assert_valid_svg(svg: &str, pair: &str) {
    assert!(svg.contains("<svg"), "{pair}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{pair}: missing </svg tag");
}

#[test]
fn render_every_adjacent_pair() {
    let data = fixture_dataset();
    let config = Config::default();
    let records = data.records();
    assert_eq!(records.len(), 8);

    for pair in records.windows(2) {
        let label = format!("{} vs {}", pair[0].name, pair[1].name);
        let (scene, svg) = render_comparison(&pair[0], &pair[1], &config).expect("render failed");
        assert_valid_svg(&svg, &label);
        assert_eq!(scene.primitives.len(), 38, "{label}");
        assert!(svg.contains(&pair[0].name), "{label}: left caption missing");
        assert!(svg.contains(&pair[1].name), "{label}: right caption missing");
    }
}

#[test]
fn taller_player_reaches_higher() {
    let data = fixture_dataset();
    let config = Config::default();
    let messi = data.lookup("Lionel Messi").unwrap();
    let courtois = data.lookup("Thibaut Courtois").unwrap();
    let short = compute_layout(messi, 0.0, &config.layout).unwrap();
    let tall = compute_layout(courtois, 0.0, &config.layout).unwrap();
    assert!(tall.head_y > short.head_y);
    assert!(tall.foot_y > short.foot_y);

    let span = |layout: &player_model_viz::Layout| {
        let arms: Vec<_> = layout.segments_of(BodyPart::Arm).collect();
        arms[1].end.0 - arms[0].end.0
    };
    assert!(span(&tall) > span(&short));
}

#[test]
fn lookups_respect_selection_rules() {
    let data = fixture_dataset();
    let (left, right) = data.default_selection();
    assert_eq!(left.name, "Lionel Messi");
    assert_eq!(right.name, "Cristiano Ronaldo");
    assert_eq!(data.lookup("Kylian Mbappé").unwrap().club, "Real Madrid");
    assert!(matches!(data.lookup("Nobody"), Err(Error::NotFound { .. })));

    let strict = data.with_policy(DuplicatePolicy::Reject);
    assert!(strict.lookup("Pedri").is_ok());
}
