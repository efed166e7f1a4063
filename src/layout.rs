//! Stick-figure geometry.
//!
//! Coordinates are in chart units with the y axis pointing up. The hip sits
//! at `(offset, 0)` and the figure is stacked upward from there: knee, foot,
//! shoulder, head. Every length is a base constant multiplied by
//! `measurement / 10` and by `height / reference_height`.

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::record::{Attribute, Record, format_value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BodyPart {
    Leg,
    Torso,
    Shoulders,
    Arm,
    Neck,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: (f32, f32),
    pub end: (f32, f32),
    pub part: BodyPart,
    /// Tooltip text, e.g. `Leg Length: 10`.
    pub label: String,
}

/// A hoverable point tied to one measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub x: f32,
    pub y: f32,
    pub attribute: Attribute,
    pub value: f32,
}

impl Annotation {
    pub fn hover_text(&self) -> String {
        format!("{}: {}", self.attribute.label(), format_value(self.value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub segments: Vec<Segment>,
    pub points: Vec<Annotation>,
    pub center_x: f32,
    pub head_y: f32,
    pub foot_y: f32,
    pub knee_y: f32,
    pub shoulder_y: f32,
    /// Distance from the neck top to the head marker.
    pub head_clearance: f32,
}

impl Layout {
    pub fn hip(&self) -> (f32, f32) {
        (self.center_x, 0.0)
    }

    /// Centre of the head marker.
    pub fn head_marker(&self) -> (f32, f32) {
        (self.center_x, self.head_y + self.head_clearance)
    }

    pub fn segments_of(&self, part: BodyPart) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(move |s| s.part == part)
    }
}

/// Positive, finite measurements of one record.
struct Measurements {
    leg: f32,
    arm: f32,
    neck: f32,
    shoulder: f32,
    height: f32,
}

impl Measurements {
    fn from_record(record: &Record) -> Result<Self> {
        let get = |attribute: Attribute| -> Result<f32> {
            match record.measurement(attribute) {
                Some(v) if v.is_finite() && v > 0.0 => Ok(v),
                value => Err(Error::InvalidMeasurement {
                    name: record.name.clone(),
                    attribute,
                    value,
                }),
            }
        };
        Ok(Self {
            leg: get(Attribute::Leg)?,
            arm: get(Attribute::Arm)?,
            neck: get(Attribute::Neck)?,
            shoulder: get(Attribute::Shoulder)?,
            height: get(Attribute::Height)?,
        })
    }
}

pub fn compute_layout(record: &Record, offset: f32, config: &LayoutConfig) -> Result<Layout> {
    let m = Measurements::from_record(record)?;
    let scale = m.height / config.reference_height;
    let span = |base: f32, value: f32| base * scale * (value / 10.0);

    let (hip_x, hip_y) = (offset, 0.0);
    let half_leg = span(config.base_leg, m.leg) * 0.5;
    let knee_y = hip_y + half_leg;
    let foot_y = knee_y + half_leg;
    let shoulder_y = foot_y + config.base_leg * scale * config.torso_factor;
    let head_y = shoulder_y + span(config.base_neck, m.neck);

    let shoulder_half = span(config.base_shoulder, m.shoulder);
    let arm = span(config.base_arm, m.arm);
    let left_shoulder = hip_x - shoulder_half;
    let right_shoulder = hip_x + shoulder_half;
    let left_hand = left_shoulder - arm;
    let right_hand = right_shoulder + arm;

    let tag = |attribute: Attribute, value: f32| {
        format!("{}: {}", attribute.label(), format_value(value))
    };
    let leg_label = tag(Attribute::Leg, m.leg);
    let shoulder_label = tag(Attribute::Shoulder, m.shoulder);
    let arm_label = tag(Attribute::Arm, m.arm);

    let segment = |start, end, part, label: &str| Segment {
        start,
        end,
        part,
        label: label.to_string(),
    };
    let segments = vec![
        segment((hip_x, hip_y), (hip_x, knee_y), BodyPart::Leg, &leg_label),
        segment((hip_x, knee_y), (hip_x, foot_y), BodyPart::Leg, &leg_label),
        segment((hip_x, hip_y), (hip_x, shoulder_y), BodyPart::Torso, &shoulder_label),
        segment(
            (left_shoulder, shoulder_y),
            (right_shoulder, shoulder_y),
            BodyPart::Shoulders,
            &shoulder_label,
        ),
        segment((left_shoulder, shoulder_y), (left_hand, shoulder_y), BodyPart::Arm, &arm_label),
        segment((right_shoulder, shoulder_y), (right_hand, shoulder_y), BodyPart::Arm, &arm_label),
        segment(
            (hip_x, shoulder_y),
            (hip_x, head_y),
            BodyPart::Neck,
            &tag(Attribute::Neck, m.neck),
        ),
    ];

    let point = |x, y, attribute, value| Annotation {
        x,
        y,
        attribute,
        value,
    };
    let points = vec![
        point(left_hand, shoulder_y, Attribute::Arm, m.arm),
        point(right_hand, shoulder_y, Attribute::Arm, m.arm),
        point(hip_x, foot_y, Attribute::Leg, m.leg),
        point(hip_x, (shoulder_y + head_y) / 2.0, Attribute::Neck, m.neck),
        point(hip_x, shoulder_y, Attribute::Shoulder, m.shoulder),
        point(hip_x, head_y + config.head_clearance, Attribute::Height, m.height),
    ];

    log::debug!(
        "layout for {}: foot_y={foot_y:.2} shoulder_y={shoulder_y:.2} head_y={head_y:.2}",
        record.name
    );

    Ok(Layout {
        segments,
        points,
        center_x: hip_x,
        head_y,
        foot_y,
        knee_y,
        shoulder_y,
        head_clearance: config.head_clearance,
    })
}
