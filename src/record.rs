use serde::{Deserialize, Serialize};
use std::fmt;

/// The five numeric measurements that drive the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Attribute {
    Leg,
    Arm,
    Neck,
    Shoulder,
    Height,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Leg,
        Attribute::Arm,
        Attribute::Neck,
        Attribute::Shoulder,
        Attribute::Height,
    ];

    /// Column identifier in the player CSV.
    pub fn column(self) -> &'static str {
        match self {
            Attribute::Leg => "Leg_Length",
            Attribute::Arm => "Arm_Length",
            Attribute::Neck => "Neck_Length",
            Attribute::Shoulder => "Shoulder_Width",
            Attribute::Height => "Height_cm",
        }
    }

    /// Human label used in tooltips and the summary panel.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Leg => "Leg Length",
            Attribute::Arm => "Arm Length",
            Attribute::Neck => "Neck Length",
            Attribute::Shoulder => "Shoulder Width",
            Attribute::Height => "Height",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the player dataset. Field names mirror the CSV headers so the
/// row deserializes directly from a `csv::Reader`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Leg_Length")]
    pub leg: Option<f32>,
    #[serde(rename = "Arm_Length")]
    pub arm: Option<f32>,
    #[serde(rename = "Neck_Length")]
    pub neck: Option<f32>,
    #[serde(rename = "Shoulder_Width")]
    pub shoulder: Option<f32>,
    #[serde(rename = "Height_cm")]
    pub height: Option<f32>,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Club")]
    pub club: String,
}

impl Record {
    pub fn measurement(&self, attribute: Attribute) -> Option<f32> {
        match attribute {
            Attribute::Leg => self.leg,
            Attribute::Arm => self.arm,
            Attribute::Neck => self.neck,
            Attribute::Shoulder => self.shoulder,
            Attribute::Height => self.height,
        }
    }
}

/// Formats a measurement the way it appears in tooltips: whole numbers
/// without a fractional part, everything else in shortest decimal form.
pub fn format_value(value: f32) -> String {
    format!("{value}")
}

pub const REQUIRED_COLUMNS: [&str; 8] = [
    "Name",
    "Leg_Length",
    "Arm_Length",
    "Neck_Length",
    "Shoulder_Width",
    "Height_cm",
    "Position",
    "Club",
];

#[cfg(test)]
pub(crate) fn sample_record(name: &str, value: f32, height: f32) -> Record {
    Record {
        name: name.to_string(),
        leg: Some(value),
        arm: Some(value),
        neck: Some(value),
        shoulder: Some(value),
        height: Some(height),
        position: "CMF".to_string(),
        club: "FC Test".to_string(),
    }
}
