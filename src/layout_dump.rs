use crate::layout::Layout;
use crate::record::Record;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ComparisonDump {
    pub figures: Vec<FigureDump>,
}

#[derive(Debug, Serialize)]
pub struct FigureDump {
    pub name: String,
    pub position: String,
    pub club: String,
    pub center_x: f32,
    pub head_y: f32,
    pub foot_y: f32,
    pub segments: Vec<SegmentDump>,
    pub points: Vec<PointDump>,
}

#[derive(Debug, Serialize)]
pub struct SegmentDump {
    pub part: String,
    pub label: String,
    pub points: [[f32; 2]; 2],
}

#[derive(Debug, Serialize)]
pub struct PointDump {
    pub attribute: String,
    pub value: f32,
    pub hover: String,
    pub at: [f32; 2],
}

impl FigureDump {
    pub fn from_layout(layout: &Layout, record: &Record) -> Self {
        let segments = layout
            .segments
            .iter()
            .map(|segment| SegmentDump {
                part: format!("{:?}", segment.part),
                label: segment.label.clone(),
                points: [
                    [segment.start.0, segment.start.1],
                    [segment.end.0, segment.end.1],
                ],
            })
            .collect();

        let points = layout
            .points
            .iter()
            .map(|point| PointDump {
                attribute: point.attribute.label().to_string(),
                value: point.value,
                hover: point.hover_text(),
                at: [point.x, point.y],
            })
            .collect();

        FigureDump {
            name: record.name.clone(),
            position: record.position.clone(),
            club: record.club.clone(),
            center_x: layout.center_x,
            head_y: layout.head_y,
            foot_y: layout.foot_y,
            segments,
            points,
        }
    }
}

impl ComparisonDump {
    pub fn new(figures: &[(&Layout, &Record)]) -> Self {
        Self {
            figures: figures
                .iter()
                .map(|(layout, record)| FigureDump::from_layout(layout, record))
                .collect(),
        }
    }
}

/// Writes the dump as pretty JSON to `path`, or to stdout when `None`.
pub fn write_layout_dump(path: Option<&Path>, dump: &ComparisonDump) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            let mut writer = std::io::BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, dump)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            serde_json::to_writer_pretty(&mut lock, dump)?;
            writeln!(lock)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::compute_layout;
    use crate::record::sample_record;

    #[test]
    fn dump_serializes_geometry_and_labels() {
        let record = sample_record("A", 10.0, 180.0);
        let layout = compute_layout(&record, 0.0, &LayoutConfig::default()).unwrap();
        let dump = ComparisonDump::new(&[(&layout, &record)]);
        let value = serde_json::to_value(&dump).unwrap();
        let figure = &value["figures"][0];
        assert_eq!(figure["name"], "A");
        assert_eq!(figure["segments"].as_array().unwrap().len(), 7);
        assert_eq!(figure["segments"][0]["part"], "Leg");
        assert_eq!(figure["segments"][0]["points"][1][1], 25.0);
        assert_eq!(figure["points"][5]["hover"], "Height: 180");
    }
}
