use thiserror::Error;

use crate::record::Attribute;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The dataset could not be read, is missing required columns, or holds
    /// no usable rows.
    #[error("player data unavailable ({source_name}): {reason}")]
    DataUnavailable { source_name: String, reason: String },

    #[error("no player named {name:?} in the dataset")]
    NotFound { name: String },

    #[error("player name {name:?} matches {count} records")]
    AmbiguousName { name: String, count: usize },

    #[error("{name}: invalid {attribute} ({})", describe_value(.value))]
    InvalidMeasurement {
        name: String,
        attribute: Attribute,
        value: Option<f32>,
    },
}

impl Error {
    pub(crate) fn unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Error::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

fn describe_value(value: &Option<f32>) -> String {
    match value {
        Some(v) => format!("{v} is not a positive number"),
        None => "value missing".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_measurement_message_names_attribute() {
        let err = Error::InvalidMeasurement {
            name: "Pedri".to_string(),
            attribute: Attribute::Neck,
            value: None,
        };
        assert_eq!(err.to_string(), "Pedri: invalid Neck Length (value missing)");

        let err = Error::InvalidMeasurement {
            name: "Pedri".to_string(),
            attribute: Attribute::Leg,
            value: Some(-2.0),
        };
        assert!(err.to_string().contains("-2 is not a positive number"));
    }
}
